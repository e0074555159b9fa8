use crate::utils::{month_label, shift_month};
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_HORIZON_MONTHS: u32 = 12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CashFlowEntry {
    /// 1-based position within the projection
    pub period: u32,
    pub month: u32,
    pub year: i32,
    pub label: String,
    pub inflow: f64,
    pub outflow: f64,
    pub balance: f64,
    pub cumulative_balance: f64,
}

/// Projects a flat run rate across `horizon_months` calendar months starting
/// at the month containing `start`.
///
/// No seasonality, growth or variation is applied: every period carries the
/// same inflow and outflow.
pub fn project_cash_flow(
    start: NaiveDate,
    monthly_income: f64,
    monthly_expense: f64,
    monthly_debt_service: f64,
    horizon_months: u32,
) -> Vec<CashFlowEntry> {
    let inflow = monthly_income;
    let outflow = monthly_expense + monthly_debt_service;
    let balance = inflow - outflow;

    let mut cumulative_balance = 0.0;
    let mut projection = Vec::with_capacity(horizon_months as usize);

    for offset in 0..horizon_months {
        let (year, month) = shift_month(start, offset);
        cumulative_balance += balance;

        projection.push(CashFlowEntry {
            period: offset + 1,
            month,
            year,
            label: month_label(year, month),
            inflow,
            outflow,
            balance,
            cumulative_balance,
        });
    }

    projection
}
