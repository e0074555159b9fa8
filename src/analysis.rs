use crate::cash_flow::{project_cash_flow, CashFlowEntry};
use crate::debt::{analyze_debts, DebtAnalysis};
use crate::indicators::{
    calculate_indicators, has_unfunded_outflow, score_indicators, FinancialIndicators,
    HealthScore, RiskTier,
};
use crate::plan::{current_distribution, BudgetDistribution, IDEAL_DISTRIBUTION};
use crate::schema::{AnalysisOptions, FinancialSnapshot};
use crate::statement::{build_statement, StatementResult};
use crate::utils::{first_day_of_month, percent_of};
use chrono::{Local, NaiveDate};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Debt service above this share of income is flagged.
pub const DEBT_SERVICE_LIMIT: f64 = 30.0;
/// Monthly rate above which the most expensive debt is flagged.
pub const HIGH_INTEREST_RATE: f64 = 5.0;
pub const MIN_SAVINGS_RATE: f64 = 10.0;
/// Share of income that fixed expenses should stay under.
pub const FIXED_EXPENSE_LIMIT: f64 = 50.0;
pub const LOW_SCORE_THRESHOLD: u8 = 40;
pub const LONG_PAYOFF_MONTHS: u32 = 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CriticalPoint {
    /// Outflow exceeds income.
    NetDeficit { monthly_deficit: f64 },

    /// Income does not cover outflow.
    LowLiquidity { current_ratio: f64 },

    HighDebtService { debt_service_ratio: f64, limit: f64 },

    /// The most expensive debt should be paid first.
    HighInterestDebt { name: String, monthly_rate: f64 },

    LowSavingsRate { savings_rate: f64 },

    HighFixedExpenses {
        fixed_expenses: f64,
        share_of_income: f64,
    },

    LowHealthScore { score: u8 },

    /// Paying only the minimums takes more than five years.
    LongPayoffHorizon { months: u32, years: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub enum Outlook {
    Healthy,
    Reasonable,
    AtRisk,
    Critical,
}

impl From<RiskTier> for Outlook {
    fn from(tier: RiskTier) -> Self {
        match tier {
            RiskTier::Low => Outlook::Healthy,
            RiskTier::Medium => Outlook::Reasonable,
            RiskTier::High => Outlook::AtRisk,
            RiskTier::Critical => Outlook::Critical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisSummary {
    pub outlook: Outlook,
    pub score: u8,
    pub monthly_balance: f64,
    pub annual_balance: f64,
    pub savings_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisResult {
    pub total_income: f64,
    pub total_fixed_expenses: f64,
    pub total_variable_expenses: f64,
    pub total_expenses: f64,
    pub total_debt_balance: f64,
    pub total_debt_payment: f64,
    pub monthly_balance: f64,
    pub annual_balance: f64,

    /// Operating expenses as a percentage of income
    pub expense_ratio: f64,
    /// Debt payments as a percentage of income
    pub debt_ratio: f64,
    pub savings_capacity: f64,

    pub indicators: FinancialIndicators,
    pub health_score: HealthScore,
    pub risk_tier: RiskTier,

    pub current_distribution: BudgetDistribution,
    pub ideal_distribution: BudgetDistribution,

    pub statement: StatementResult,
    pub cash_flow: Vec<CashFlowEntry>,
    pub debt_analysis: DebtAnalysis,

    pub critical_points: Vec<CriticalPoint>,
    pub summary: AnalysisSummary,
}

impl AnalysisResult {
    pub fn score(&self) -> u8 {
        self.health_score.score
    }
}

fn projection_start(options: &AnalysisOptions) -> NaiveDate {
    let start = options
        .projection_start
        .unwrap_or_else(|| Local::now().date_naive());
    first_day_of_month(start)
}

/// Runs every stage of the analysis. Never fails: degenerate inputs produce
/// zero-valued or capped results.
pub fn run_analysis(snapshot: &FinancialSnapshot, options: &AnalysisOptions) -> AnalysisResult {
    info!(
        "Analyzing {} incomes, {} expenses and {} debts",
        snapshot.incomes.len(),
        snapshot.expenses.len(),
        snapshot.debts.len()
    );

    let statement = build_statement(&snapshot.incomes, &snapshot.expenses, &snapshot.debts);
    debug!(
        "Statement: net income {:.2}, operating result {:.2}, net result {:.2}",
        statement.net_income, statement.operating_result, statement.net_result
    );

    let total_debt_balance: f64 = snapshot.debts.iter().map(|d| d.balance).sum();

    let indicators = calculate_indicators(&statement, total_debt_balance);
    let health_score = score_indicators(&indicators, has_unfunded_outflow(&statement));
    let risk_tier = RiskTier::from_score(health_score.score);
    debug!("Health score {} ({:?})", health_score.score, risk_tier);

    let total_income = statement.net_income;
    let monthly_balance = statement.net_result;

    let current_distribution =
        current_distribution(total_income, indicators.savings_rate, &snapshot.expenses);

    let cash_flow = project_cash_flow(
        projection_start(options),
        total_income,
        statement.operating_expenses.total,
        statement.financing_expenses.total,
        options.horizon_months,
    );

    let extra_for_debt = if monthly_balance > 0.0 {
        monthly_balance * options.extra_budget_share
    } else {
        0.0
    };
    let debt_analysis = analyze_debts(&snapshot.debts, extra_for_debt);

    let critical_points =
        find_critical_points(&statement, &indicators, health_score.score, &debt_analysis);

    let summary = AnalysisSummary {
        outlook: risk_tier.into(),
        score: health_score.score,
        monthly_balance,
        annual_balance: monthly_balance * 12.0,
        savings_rate: indicators.savings_rate,
    };

    info!(
        "Analysis complete: score {}, {} critical points",
        health_score.score,
        critical_points.len()
    );

    AnalysisResult {
        total_income,
        total_fixed_expenses: statement.operating_expenses.fixed,
        total_variable_expenses: statement.operating_expenses.variable,
        total_expenses: statement.operating_expenses.total,
        total_debt_balance,
        total_debt_payment: statement.financing_expenses.total,
        monthly_balance,
        annual_balance: monthly_balance * 12.0,
        expense_ratio: percent_of(statement.operating_expenses.total, total_income),
        debt_ratio: percent_of(statement.financing_expenses.total, total_income),
        savings_capacity: indicators.savings_rate,
        indicators,
        health_score,
        risk_tier,
        current_distribution,
        ideal_distribution: IDEAL_DISTRIBUTION,
        statement,
        cash_flow,
        debt_analysis,
        critical_points,
        summary,
    }
}

pub fn find_critical_points(
    statement: &StatementResult,
    indicators: &FinancialIndicators,
    score: u8,
    debt_analysis: &DebtAnalysis,
) -> Vec<CriticalPoint> {
    let mut points = Vec::new();

    if statement.net_result < 0.0 {
        points.push(CriticalPoint::NetDeficit {
            monthly_deficit: statement.net_result.abs(),
        });
    }

    if indicators.current_ratio < 1.0 {
        points.push(CriticalPoint::LowLiquidity {
            current_ratio: indicators.current_ratio,
        });
    }

    if indicators.debt_service_ratio > DEBT_SERVICE_LIMIT {
        points.push(CriticalPoint::HighDebtService {
            debt_service_ratio: indicators.debt_service_ratio,
            limit: DEBT_SERVICE_LIMIT,
        });
    }

    if let Some(debt) = &debt_analysis.highest_interest_debt {
        if debt.rate() > HIGH_INTEREST_RATE {
            points.push(CriticalPoint::HighInterestDebt {
                name: debt.name.clone(),
                monthly_rate: debt.rate(),
            });
        }
    }

    if indicators.savings_rate < MIN_SAVINGS_RATE && statement.net_result >= 0.0 {
        points.push(CriticalPoint::LowSavingsRate {
            savings_rate: indicators.savings_rate,
        });
    }

    let fixed = statement.operating_expenses.fixed;
    if fixed > statement.net_income * FIXED_EXPENSE_LIMIT / 100.0 {
        points.push(CriticalPoint::HighFixedExpenses {
            fixed_expenses: fixed,
            share_of_income: percent_of(fixed, statement.net_income),
        });
    }

    if score < LOW_SCORE_THRESHOLD {
        points.push(CriticalPoint::LowHealthScore { score });
    }

    let months = debt_analysis.months_to_payoff_current;
    if months > LONG_PAYOFF_MONTHS {
        points.push(CriticalPoint::LongPayoffHorizon {
            months,
            years: months.div_ceil(12),
        });
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{
        CategoryKind, CategoryRef, DebtRecord, ExpenseClassification, ExpenseRecord,
        IncomeRecord, RecurrencePeriod,
    };

    fn options() -> AnalysisOptions {
        AnalysisOptions {
            projection_start: NaiveDate::from_ymd_opt(2024, 7, 15),
            ..AnalysisOptions::default()
        }
    }

    fn salary(amount: f64) -> IncomeRecord {
        IncomeRecord {
            name: "Salary".to_string(),
            amount,
            recurrence: RecurrencePeriod::Monthly,
        }
    }

    fn fixed(name: &str, amount: f64, kind: CategoryKind) -> ExpenseRecord {
        ExpenseRecord {
            name: name.to_string(),
            amount,
            recurrence: RecurrencePeriod::Monthly,
            classification: ExpenseClassification::Fixed,
            category: CategoryRef {
                name: name.to_string(),
                kind,
            },
        }
    }

    fn debt(name: &str, balance: f64, payment: f64, rate: f64) -> DebtRecord {
        DebtRecord {
            name: name.to_string(),
            balance,
            monthly_payment: payment,
            interest_rate_percent: Some(rate),
            remaining_installments: None,
        }
    }

    #[test]
    fn test_run_analysis_wires_stages() {
        let snapshot = FinancialSnapshot {
            incomes: vec![salary(6000.0)],
            expenses: vec![fixed("Rent", 2000.0, CategoryKind::Necessity)],
            debts: vec![debt("Card", 3000.0, 300.0, 3.0)],
        };

        let result = run_analysis(&snapshot, &options());

        assert_eq!(result.total_income, 6000.0);
        assert_eq!(result.total_expenses, 2000.0);
        assert_eq!(result.total_debt_payment, 300.0);
        assert_eq!(result.monthly_balance, 3700.0);
        assert_eq!(result.annual_balance, 44400.0);
        assert_eq!(result.cash_flow.len(), 12);
        assert_eq!(result.cash_flow[0].label, "2024-07");
        assert_eq!(result.ideal_distribution, IDEAL_DISTRIBUTION);

        // half of the 3700 surplus goes to the payoff plans
        assert_eq!(result.debt_analysis.avalanche_plan.monthly_budget, 2150.0);
        assert_eq!(result.summary.outlook, Outlook::from(result.risk_tier));
        assert_eq!(result.summary.score, result.score());
    }

    #[test]
    fn test_deficit_flags() {
        let snapshot = FinancialSnapshot {
            incomes: vec![salary(2000.0)],
            expenses: vec![fixed("Rent", 1800.0, CategoryKind::Necessity)],
            debts: vec![debt("Payday", 4000.0, 700.0, 8.0)],
        };

        let result = run_analysis(&snapshot, &options());

        assert!(result.critical_points.contains(&CriticalPoint::NetDeficit {
            monthly_deficit: 500.0
        }));
        assert!(result.critical_points.contains(&CriticalPoint::HighDebtService {
            debt_service_ratio: 35.0,
            limit: DEBT_SERVICE_LIMIT,
        }));
        assert!(result.critical_points.contains(&CriticalPoint::HighInterestDebt {
            name: "Payday".to_string(),
            monthly_rate: 8.0,
        }));
        assert!(result.critical_points.iter().any(|p| matches!(
            p,
            CriticalPoint::LowLiquidity { current_ratio } if *current_ratio < 1.0
        )));
        assert!(result.critical_points.iter().any(|p| matches!(
            p,
            CriticalPoint::HighFixedExpenses { share_of_income, .. }
                if (*share_of_income - 90.0).abs() < 1e-9
        )));

        // no savings flag while in deficit
        assert!(!result
            .critical_points
            .iter()
            .any(|p| matches!(p, CriticalPoint::LowSavingsRate { .. })));
    }

    #[test]
    fn test_flag_order_follows_pipeline() {
        let snapshot = FinancialSnapshot {
            incomes: vec![],
            expenses: vec![fixed("Rent", 500.0, CategoryKind::Necessity)],
            debts: vec![],
        };

        let result = run_analysis(&snapshot, &options());

        let kinds: Vec<&str> = result
            .critical_points
            .iter()
            .map(|p| match p {
                CriticalPoint::NetDeficit { .. } => "deficit",
                CriticalPoint::LowLiquidity { .. } => "liquidity",
                CriticalPoint::HighFixedExpenses { .. } => "fixed",
                CriticalPoint::LowHealthScore { .. } => "score",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["deficit", "liquidity", "fixed", "score"]);
    }

    #[test]
    fn test_long_payoff_horizon_flag() {
        let snapshot = FinancialSnapshot {
            incomes: vec![salary(10000.0)],
            expenses: vec![],
            debts: vec![debt("Mortgage", 100000.0, 1000.0, 0.5)],
        };

        let result = run_analysis(&snapshot, &options());
        let months = result.debt_analysis.months_to_payoff_current;

        assert!(months > LONG_PAYOFF_MONTHS);
        assert!(result
            .critical_points
            .contains(&CriticalPoint::LongPayoffHorizon {
                months,
                years: months.div_ceil(12),
            }));
    }

    #[test]
    fn test_critical_points_serialize_with_kind_tag() {
        let point = CriticalPoint::LowHealthScore { score: 12 };
        let json = serde_json::to_string(&point).unwrap();
        assert_eq!(json, r#"{"kind":"low_health_score","score":12}"#);
    }
}
