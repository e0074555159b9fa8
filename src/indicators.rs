//! Financial ratios, the composite health score and the risk tier.
//!
//! The score starts at [`BASELINE_SCORE`] and each band table adds or removes
//! points depending on where its ratio falls. Bands are checked top-down and
//! the first match wins; a value matching no band gets the table's
//! `otherwise` points.

use crate::statement::StatementResult;
use crate::utils::safe_ratio;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const BASELINE_SCORE: i32 = 50;

/// Months of expenses an emergency reserve should cover.
pub const EMERGENCY_RESERVE_MONTHS: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FinancialIndicators {
    /// Net income / (operating expenses + debt service)
    pub current_ratio: f64,
    /// (Net income - fixed expenses) / variable expenses
    pub immediate_liquidity: f64,
    /// Total debt balance / annual net income
    pub leverage: f64,
    /// Debt service as a percentage of net income
    pub debt_service_ratio: f64,
    pub net_margin: f64,
    pub savings_rate: f64,
    /// Days of outflow covered by one month's surplus
    pub expense_coverage: f64,
    pub emergency_reserve_months: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub enum BandDirection {
    /// Band matches when the value is at or above the threshold
    AtLeast,
    /// Band matches when the value is at or below the threshold
    AtMost,
}

impl BandDirection {
    fn matches(self, value: f64, threshold: f64) -> bool {
        match self {
            BandDirection::AtLeast => value >= threshold,
            BandDirection::AtMost => value <= threshold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBand {
    pub threshold: f64,
    pub points: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandTable {
    pub direction: BandDirection,
    pub bands: &'static [ScoreBand],
    pub otherwise: i32,
}

impl BandTable {
    pub fn points_for(&self, value: f64) -> i32 {
        self.bands
            .iter()
            .find(|band| self.direction.matches(value, band.threshold))
            .map(|band| band.points)
            .unwrap_or(self.otherwise)
    }
}

pub const CURRENT_RATIO_BANDS: BandTable = BandTable {
    direction: BandDirection::AtLeast,
    bands: &[
        ScoreBand { threshold: 1.5, points: 15 },
        ScoreBand { threshold: 1.2, points: 10 },
        ScoreBand { threshold: 1.0, points: 5 },
        ScoreBand { threshold: 0.8, points: -5 },
    ],
    otherwise: -15,
};

pub const DEBT_SERVICE_BANDS: BandTable = BandTable {
    direction: BandDirection::AtMost,
    bands: &[
        ScoreBand { threshold: 15.0, points: 15 },
        ScoreBand { threshold: 25.0, points: 10 },
        ScoreBand { threshold: 35.0, points: 0 },
        ScoreBand { threshold: 50.0, points: -10 },
    ],
    otherwise: -15,
};

pub const SAVINGS_RATE_BANDS: BandTable = BandTable {
    direction: BandDirection::AtLeast,
    bands: &[
        ScoreBand { threshold: 30.0, points: 20 },
        ScoreBand { threshold: 20.0, points: 15 },
        ScoreBand { threshold: 10.0, points: 5 },
        ScoreBand { threshold: 0.0, points: -5 },
    ],
    otherwise: -20,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HealthScore {
    /// Composite score in 0..=100
    pub score: u8,
    pub current_ratio_points: i32,
    pub debt_service_points: i32,
    pub savings_rate_points: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskTier {
    pub fn from_score(score: u8) -> Self {
        if score >= 70 {
            RiskTier::Low
        } else if score >= 50 {
            RiskTier::Medium
        } else if score >= 30 {
            RiskTier::High
        } else {
            RiskTier::Critical
        }
    }
}

pub fn calculate_indicators(
    statement: &StatementResult,
    total_debt_balance: f64,
) -> FinancialIndicators {
    let net_income = statement.net_income;
    let total_outflow = statement.total_outflow();
    let fixed = statement.operating_expenses.fixed;
    let variable = statement.operating_expenses.variable;
    let net_result = statement.net_result;

    let net_margin = statement.net_margin;
    let savings_rate = if net_margin > 0.0 { net_margin } else { 0.0 };

    let expense_coverage = if net_result > 0.0 {
        safe_ratio(net_result, total_outflow) * 30.0
    } else {
        0.0
    };

    FinancialIndicators {
        current_ratio: safe_ratio(net_income, total_outflow),
        immediate_liquidity: safe_ratio(net_income - fixed, variable),
        leverage: safe_ratio(total_debt_balance, net_income * 12.0),
        debt_service_ratio: safe_ratio(statement.financing_expenses.total, net_income) * 100.0,
        net_margin,
        savings_rate,
        expense_coverage,
        emergency_reserve_months: EMERGENCY_RESERVE_MONTHS,
    }
}

/// True when money is going out but there is no income to cover any of it.
pub fn has_unfunded_outflow(statement: &StatementResult) -> bool {
    statement.net_income <= 0.0 && statement.total_outflow() > 0.0
}

/// Combines the indicators into a 0-100 score.
///
/// With `unfunded_outflow` set every table scores its `otherwise` value: the
/// guarded ratios read as zero in that case, which would otherwise land in
/// the favorable debt-service band.
pub fn score_indicators(
    indicators: &FinancialIndicators,
    unfunded_outflow: bool,
) -> HealthScore {
    let (current_ratio_points, debt_service_points, savings_rate_points) = if unfunded_outflow {
        (
            CURRENT_RATIO_BANDS.otherwise,
            DEBT_SERVICE_BANDS.otherwise,
            SAVINGS_RATE_BANDS.otherwise,
        )
    } else {
        (
            CURRENT_RATIO_BANDS.points_for(indicators.current_ratio),
            DEBT_SERVICE_BANDS.points_for(indicators.debt_service_ratio),
            SAVINGS_RATE_BANDS.points_for(indicators.savings_rate),
        )
    };

    let raw = BASELINE_SCORE + current_ratio_points + debt_service_points + savings_rate_points;

    HealthScore {
        score: raw.clamp(0, 100) as u8,
        current_ratio_points,
        debt_service_points,
        savings_rate_points,
    }
}
