//! 50/30/20 budgeting: how income should be split between needs, wants and
//! savings, and how the current spending compares.

use crate::period::monthly_equivalent;
use crate::schema::{CategoryKind, ExpenseRecord};
use crate::utils::percent_of;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Percentages of net income.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BudgetDistribution {
    pub needs: f64,
    pub wants: f64,
    pub savings: f64,
}

pub const IDEAL_DISTRIBUTION: BudgetDistribution = BudgetDistribution {
    needs: 50.0,
    wants: 30.0,
    savings: 20.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Allocation {
    pub percent: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryTotal {
    pub name: String,
    pub kind: CategoryKind,
    /// Monthly equivalent of every expense in the category
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BudgetPlan {
    pub total_income: f64,
    pub needs: Allocation,
    pub wants: Allocation,
    pub savings: Allocation,
    /// In the order each category first appears
    pub category_totals: Vec<CategoryTotal>,
}

/// Monthly spending per category kind.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KindTotals {
    pub necessity: f64,
    pub want: f64,
    pub savings: f64,
}

pub fn spending_by_kind(expenses: &[ExpenseRecord]) -> KindTotals {
    let mut totals = KindTotals::default();

    for expense in expenses {
        let monthly = monthly_equivalent(expense.amount, expense.recurrence);
        match expense.category.kind {
            CategoryKind::Necessity => totals.necessity += monthly,
            CategoryKind::Want => totals.want += monthly,
            CategoryKind::Savings => totals.savings += monthly,
        }
    }

    totals
}

/// Current split of net income. Savings counts both savings-kind expenses
/// and the uncommitted surplus (`savings_rate`).
pub fn current_distribution(
    net_income: f64,
    savings_rate: f64,
    expenses: &[ExpenseRecord],
) -> BudgetDistribution {
    let totals = spending_by_kind(expenses);

    BudgetDistribution {
        needs: percent_of(totals.necessity, net_income),
        wants: percent_of(totals.want, net_income),
        savings: percent_of(totals.savings, net_income) + savings_rate.max(0.0),
    }
}

fn allocation(total_income: f64, percent: f64) -> Allocation {
    Allocation {
        percent,
        amount: total_income * percent / 100.0,
    }
}

pub fn generate_budget_plan(total_income: f64, expenses: &[ExpenseRecord]) -> BudgetPlan {
    let mut category_totals: Vec<CategoryTotal> = Vec::new();
    let mut index_by_name: HashMap<&str, usize> = HashMap::new();

    for expense in expenses {
        let monthly = monthly_equivalent(expense.amount, expense.recurrence);
        let index = *index_by_name
            .entry(expense.category.name.as_str())
            .or_insert_with(|| {
                category_totals.push(CategoryTotal {
                    name: expense.category.name.clone(),
                    kind: expense.category.kind,
                    total: 0.0,
                });
                category_totals.len() - 1
            });
        category_totals[index].total += monthly;
    }

    BudgetPlan {
        total_income,
        needs: allocation(total_income, IDEAL_DISTRIBUTION.needs),
        wants: allocation(total_income, IDEAL_DISTRIBUTION.wants),
        savings: allocation(total_income, IDEAL_DISTRIBUTION.savings),
        category_totals,
    }
}
