//! Month-by-month debt amortization.
//!
//! Every simulation runs on private working copies of the caller's debts and
//! stops when all balances reach zero or after [`MAX_SIMULATION_MONTHS`].
//! Within a month, interest accrues first, then every debt receives its own
//! minimum payment, then whatever is left of the monthly budget goes to the
//! first open debt in strategy order (one debt per month).

use crate::schema::DebtRecord;
use log::{debug, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Hard stop for simulations whose payments never outpace interest.
pub const MAX_SIMULATION_MONTHS: u32 = 360;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub enum PayoffStrategy {
    #[schemars(description = "Extra payments go to the debt with the highest interest rate first")]
    Avalanche,

    #[schemars(description = "Extra payments go to the debt with the lowest balance first")]
    Snowball,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PayoffPlan {
    pub strategy: PayoffStrategy,
    pub total_interest_paid: f64,
    /// Equal to [`MAX_SIMULATION_MONTHS`] when the debts were not paid off.
    pub months_to_payoff: u32,
    /// Sum of minimum payments plus the extra budget, spent every month.
    pub monthly_budget: f64,
}

impl PayoffPlan {
    pub fn hit_month_cap(&self) -> bool {
        self.months_to_payoff >= MAX_SIMULATION_MONTHS
    }
}

/// Outcome of paying every debt at its stated minimum with no reordering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CurrentPace {
    pub months_to_payoff: u32,
    pub total_interest_paid: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DebtAnalysis {
    pub total_balance: f64,
    pub total_monthly_payment: f64,
    /// Mean monthly rate across debts that carry a positive rate.
    pub average_interest_rate: f64,
    pub highest_interest_debt: Option<DebtRecord>,
    pub lowest_balance_debt: Option<DebtRecord>,
    pub months_to_payoff_current: u32,
    pub total_interest_if_current: f64,
    pub avalanche_plan: PayoffPlan,
    pub snowball_plan: PayoffPlan,
    pub recommended_strategy: PayoffStrategy,
    /// Interest avoided by the avalanche plan compared to the current pace.
    pub potential_savings: f64,
}

#[derive(Debug, Clone)]
struct WorkingDebt {
    position: usize,
    balance: f64,
    rate: f64,
    minimum_payment: f64,
}

impl WorkingDebt {
    fn is_open(&self) -> bool {
        self.balance > 0.0
    }

    fn accrue_interest(&mut self) -> f64 {
        let interest = self.balance * (self.rate / 100.0);
        self.balance += interest;
        interest
    }

    /// Pays up to `amount`, never past zero. Returns what was actually paid.
    fn pay(&mut self, amount: f64) -> f64 {
        let paid = amount.min(self.balance);
        self.balance -= paid;
        paid
    }

    fn pay_minimum(&mut self) -> f64 {
        self.pay(self.minimum_payment)
    }
}

fn working_copies(debts: &[DebtRecord]) -> Vec<WorkingDebt> {
    debts
        .iter()
        .enumerate()
        .map(|(position, debt)| WorkingDebt {
            position,
            balance: debt.balance,
            rate: debt.rate(),
            minimum_payment: debt.monthly_payment,
        })
        .collect()
}

/// Working copies sorted for `strategy`. The sort is stable, so ties keep
/// input order.
fn ordered_working_copies(debts: &[DebtRecord], strategy: PayoffStrategy) -> Vec<WorkingDebt> {
    let mut working = working_copies(debts);
    match strategy {
        PayoffStrategy::Avalanche => working.sort_by(|a, b| b.rate.total_cmp(&a.rate)),
        PayoffStrategy::Snowball => working.sort_by(|a, b| a.balance.total_cmp(&b.balance)),
    }
    working
}

pub fn simulate_payoff(
    debts: &[DebtRecord],
    extra_monthly_budget: f64,
    strategy: PayoffStrategy,
) -> PayoffPlan {
    let mut working = ordered_working_copies(debts, strategy);

    let total_minimum: f64 = working.iter().map(|d| d.minimum_payment).sum();
    let monthly_budget = total_minimum + extra_monthly_budget;

    let mut month = 0;
    let mut total_interest_paid = 0.0;

    while month < MAX_SIMULATION_MONTHS && working.iter().any(WorkingDebt::is_open) {
        let mut remaining = monthly_budget;

        for debt in working.iter_mut().filter(|d| d.is_open()) {
            total_interest_paid += debt.accrue_interest();
        }

        for debt in working.iter_mut().filter(|d| d.is_open()) {
            remaining -= debt.pay_minimum();
        }

        if remaining > 0.0 {
            if let Some(target) = working.iter_mut().find(|d| d.is_open()) {
                target.pay(remaining);
            }
        }

        month += 1;
    }

    if working.iter().any(WorkingDebt::is_open) {
        warn!(
            "{:?} simulation stopped at the {}-month cap with balances outstanding",
            strategy, MAX_SIMULATION_MONTHS
        );
    }

    debug!(
        "{:?} plan: {} months, {:.2} interest, {:.2}/month budget",
        strategy, month, total_interest_paid, monthly_budget
    );

    PayoffPlan {
        strategy,
        total_interest_paid,
        months_to_payoff: month,
        monthly_budget,
    }
}

pub fn simulate_current_pace(debts: &[DebtRecord]) -> CurrentPace {
    let mut working = working_copies(debts);

    let mut month = 0;
    let mut total_interest_paid = 0.0;

    while month < MAX_SIMULATION_MONTHS && working.iter().any(WorkingDebt::is_open) {
        month += 1;
        for debt in working.iter_mut().filter(|d| d.is_open()) {
            total_interest_paid += debt.accrue_interest();
            debt.pay_minimum();
        }
    }

    CurrentPace {
        months_to_payoff: month,
        total_interest_paid,
    }
}

/// Avalanche unless snowball is strictly cheaper. Differences within float
/// noise count as a tie.
pub fn recommend_strategy(avalanche: &PayoffPlan, snowball: &PayoffPlan) -> PayoffStrategy {
    let tolerance = 1e-9 * avalanche.total_interest_paid.abs().max(1.0);
    if snowball.total_interest_paid < avalanche.total_interest_paid - tolerance {
        PayoffStrategy::Snowball
    } else {
        PayoffStrategy::Avalanche
    }
}

pub fn analyze_debts(debts: &[DebtRecord], extra_monthly_budget: f64) -> DebtAnalysis {
    let total_balance: f64 = debts.iter().map(|d| d.balance).sum();
    let total_monthly_payment: f64 = debts.iter().map(|d| d.monthly_payment).sum();

    let with_rate: Vec<&DebtRecord> = debts.iter().filter(|d| d.rate() > 0.0).collect();
    let average_interest_rate = if with_rate.is_empty() {
        0.0
    } else {
        with_rate.iter().map(|d| d.rate()).sum::<f64>() / with_rate.len() as f64
    };

    let highest_interest_debt = with_rate
        .iter()
        .copied()
        .reduce(|max, d| if d.rate() > max.rate() { d } else { max })
        .cloned();

    let lowest_balance_debt = debts
        .iter()
        .reduce(|min, d| if d.balance < min.balance { d } else { min })
        .cloned();

    let current = simulate_current_pace(debts);
    let avalanche_plan = simulate_payoff(debts, extra_monthly_budget, PayoffStrategy::Avalanche);
    let snowball_plan = simulate_payoff(debts, extra_monthly_budget, PayoffStrategy::Snowball);
    let recommended_strategy = recommend_strategy(&avalanche_plan, &snowball_plan);

    let potential_savings =
        (current.total_interest_paid - avalanche_plan.total_interest_paid).max(0.0);

    DebtAnalysis {
        total_balance,
        total_monthly_payment,
        average_interest_rate,
        highest_interest_debt,
        lowest_balance_debt,
        months_to_payoff_current: current.months_to_payoff,
        total_interest_if_current: current.total_interest_paid,
        avalanche_plan,
        snowball_plan,
        recommended_strategy,
        potential_savings,
    }
}
