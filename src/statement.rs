//! Personal income statement.
//!
//! Mirrors a company P&L: income minus operating expenses gives the
//! operating result, and debt service (financing expenses) is taken from
//! that to reach the net result. All values are monthly.

use crate::period::monthly_equivalent;
use crate::schema::{DebtRecord, ExpenseClassification, ExpenseRecord, IncomeRecord};
use crate::utils::percent_of;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OperatingExpenses {
    pub fixed: f64,
    pub variable: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FinancingExpenses {
    /// Estimated simple interest for one month. Informational only.
    pub interest: f64,
    /// Portion of the payments that reduces principal. Informational only.
    pub amortization: f64,
    /// Sum of all monthly debt payments.
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StatementResult {
    pub gross_income: f64,
    /// Always zero for now. Reserved for tax and payroll deduction rules.
    pub deductions: f64,
    pub net_income: f64,
    pub operating_expenses: OperatingExpenses,
    pub operating_result: f64,
    pub financing_expenses: FinancingExpenses,
    pub result_before_taxes: f64,
    pub taxes: f64,
    pub net_result: f64,
    /// Operating result as a percentage of net income.
    pub operating_margin: f64,
    /// Net result as a percentage of net income.
    pub net_margin: f64,
}

impl StatementResult {
    /// Operating expenses plus debt service.
    pub fn total_outflow(&self) -> f64 {
        self.operating_expenses.total + self.financing_expenses.total
    }
}

/// Simple one-month interest on a debt's current balance.
pub(crate) fn implied_interest(debt: &DebtRecord) -> f64 {
    debt.balance * (debt.rate() / 100.0)
}

pub fn build_statement(
    incomes: &[IncomeRecord],
    expenses: &[ExpenseRecord],
    debts: &[DebtRecord],
) -> StatementResult {
    let gross_income: f64 = incomes
        .iter()
        .map(|inc| monthly_equivalent(inc.amount, inc.recurrence))
        .sum();

    let deductions = 0.0;
    let net_income = gross_income - deductions;

    let operating_expenses = operating_expenses(expenses);
    let operating_result = net_income - operating_expenses.total;

    let interest: f64 = debts
        .iter()
        .filter(|d| d.rate() > 0.0 && d.balance > 0.0)
        .map(implied_interest)
        .sum();

    let amortization: f64 = debts
        .iter()
        .map(|d| (d.monthly_payment - implied_interest(d)).max(0.0))
        .sum();

    let financing_expenses = FinancingExpenses {
        interest,
        amortization,
        total: debts.iter().map(|d| d.monthly_payment).sum(),
    };

    let result_before_taxes = operating_result - financing_expenses.total;
    let taxes = 0.0;
    let net_result = result_before_taxes - taxes;

    StatementResult {
        gross_income,
        deductions,
        net_income,
        operating_expenses,
        operating_result,
        financing_expenses,
        result_before_taxes,
        taxes,
        net_result,
        operating_margin: percent_of(operating_result, net_income),
        net_margin: percent_of(net_result, net_income),
    }
}

fn operating_expenses(expenses: &[ExpenseRecord]) -> OperatingExpenses {
    let mut fixed = 0.0;
    let mut variable = 0.0;

    for expense in expenses {
        let monthly = monthly_equivalent(expense.amount, expense.recurrence);
        match expense.classification {
            ExpenseClassification::Fixed => fixed += monthly,
            ExpenseClassification::Variable => variable += monthly,
        }
    }

    OperatingExpenses {
        fixed,
        variable,
        total: fixed + variable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CategoryRef, RecurrencePeriod};

    fn income(amount: f64, recurrence: RecurrencePeriod) -> IncomeRecord {
        IncomeRecord {
            name: "Salary".to_string(),
            amount,
            recurrence,
        }
    }

    fn expense(amount: f64, classification: ExpenseClassification) -> ExpenseRecord {
        ExpenseRecord {
            name: "Expense".to_string(),
            amount,
            recurrence: RecurrencePeriod::Monthly,
            classification,
            category: CategoryRef::default(),
        }
    }

    fn debt(balance: f64, monthly_payment: f64, rate: Option<f64>) -> DebtRecord {
        DebtRecord {
            name: "Loan".to_string(),
            balance,
            monthly_payment,
            interest_rate_percent: rate,
            remaining_installments: None,
        }
    }

    #[test]
    fn test_statement_lines() {
        let statement = build_statement(
            &[
                income(4000.0, RecurrencePeriod::Monthly),
                income(250.0, RecurrencePeriod::Weekly),
            ],
            &[
                expense(1500.0, ExpenseClassification::Fixed),
                expense(800.0, ExpenseClassification::Variable),
                expense(200.0, ExpenseClassification::Fixed),
            ],
            &[debt(10000.0, 500.0, Some(2.0)), debt(3000.0, 150.0, None)],
        );

        assert_eq!(statement.gross_income, 5000.0);
        assert_eq!(statement.deductions, 0.0);
        assert_eq!(statement.net_income, 5000.0);
        assert_eq!(statement.operating_expenses.fixed, 1700.0);
        assert_eq!(statement.operating_expenses.variable, 800.0);
        assert_eq!(statement.operating_expenses.total, 2500.0);
        assert_eq!(statement.operating_result, 2500.0);

        // 10000 * 2% = 200 interest, 300 principal; the rate-free debt is all principal
        assert!((statement.financing_expenses.interest - 200.0).abs() < 1e-9);
        assert!((statement.financing_expenses.amortization - 450.0).abs() < 1e-9);
        assert_eq!(statement.financing_expenses.total, 650.0);

        assert_eq!(statement.net_result, 1850.0);
        assert!((statement.operating_margin - 50.0).abs() < 1e-9);
        assert!((statement.net_margin - 37.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_income_margins_are_zero() {
        let statement = build_statement(
            &[],
            &[expense(900.0, ExpenseClassification::Fixed)],
            &[debt(1000.0, 100.0, Some(3.0))],
        );

        assert_eq!(statement.net_income, 0.0);
        assert_eq!(statement.operating_margin, 0.0);
        assert_eq!(statement.net_margin, 0.0);
        assert_eq!(statement.net_result, -1000.0);
        assert!(!statement.net_margin.is_nan());
    }

    #[test]
    fn test_amortization_never_negative() {
        // payment smaller than the implied interest
        let statement = build_statement(&[], &[], &[debt(10000.0, 100.0, Some(5.0))]);

        assert!((statement.financing_expenses.interest - 500.0).abs() < 1e-9);
        assert_eq!(statement.financing_expenses.amortization, 0.0);
        assert_eq!(statement.financing_expenses.total, 100.0);
    }

    #[test]
    fn test_balance_identity() {
        let statement = build_statement(
            &[income(1234.56, RecurrencePeriod::Biweekly)],
            &[
                expense(321.0, ExpenseClassification::Variable),
                expense(777.7, ExpenseClassification::Fixed),
            ],
            &[debt(5000.0, 222.2, Some(1.5))],
        );

        let expected = statement.gross_income
            - statement.operating_expenses.total
            - statement.financing_expenses.total;
        assert!((statement.net_result - expected).abs() < 1e-9);
        assert_eq!(statement.total_outflow(), 321.0 + 777.7 + 222.2);
    }
}
