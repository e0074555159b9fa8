//! # Personal Finance Analyzer
//!
//! A library for turning a household's income, expense and debt records into
//! a structured financial diagnosis.
//!
//! ## Core Concepts
//!
//! - **Monthly basis**: every amount is normalized to a monthly equivalent
//! - **Income statement**: income less operating expenses and debt service
//! - **Run-rate projection**: 12 months of constant inflow and outflow
//! - **Payoff simulation**: avalanche (highest rate first) vs snowball (lowest balance first)
//! - **Health score**: a 0-100 composite score mapped to a risk tier
//!
//! The engine is pure: it performs no I/O and never fails on valid input.
//!
//! ## Example
//!
//! ```rust,ignore
//! use personal_finance_analyzer::*;
//!
//! let snapshot = FinancialSnapshot {
//!     incomes: vec![IncomeRecord {
//!         name: "Salary".to_string(),
//!         amount: 5000.0,
//!         recurrence: RecurrencePeriod::Monthly,
//!     }],
//!     expenses: vec![ExpenseRecord {
//!         name: "Rent".to_string(),
//!         amount: 1800.0,
//!         recurrence: RecurrencePeriod::Monthly,
//!         classification: ExpenseClassification::Fixed,
//!         category: CategoryRef {
//!             name: "Housing".to_string(),
//!             kind: CategoryKind::Necessity,
//!         },
//!     }],
//!     debts: vec![DebtRecord {
//!         name: "Credit Card".to_string(),
//!         balance: 4000.0,
//!         monthly_payment: 250.0,
//!         interest_rate_percent: Some(3.5),
//!         remaining_installments: None,
//!     }],
//! };
//!
//! let result = analyze(&snapshot);
//! println!("Score: {} ({:?})", result.score(), result.risk_tier);
//! ```

pub mod analysis;
pub mod cash_flow;
pub mod debt;
pub mod error;
pub mod indicators;
pub mod period;
pub mod plan;
pub mod schema;
pub mod statement;
pub mod utils;

pub use analysis::{
    find_critical_points, run_analysis, AnalysisResult, AnalysisSummary, CriticalPoint, Outlook,
};
pub use cash_flow::{project_cash_flow, CashFlowEntry, DEFAULT_HORIZON_MONTHS};
pub use debt::{
    analyze_debts, recommend_strategy, simulate_current_pace, simulate_payoff, CurrentPace,
    DebtAnalysis, PayoffPlan, PayoffStrategy, MAX_SIMULATION_MONTHS,
};
pub use error::{AnalysisError, Result};
pub use indicators::{
    calculate_indicators, score_indicators, FinancialIndicators, HealthScore, RiskTier,
};
pub use period::monthly_equivalent;
pub use plan::{
    current_distribution, generate_budget_plan, BudgetDistribution, BudgetPlan, CategoryTotal,
    IDEAL_DISTRIBUTION,
};
pub use schema::*;
pub use statement::{build_statement, StatementResult};

use log::debug;

pub struct FinancialAnalyzer {
    options: AnalysisOptions,
}

impl FinancialAnalyzer {
    pub fn new(options: AnalysisOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    pub fn analyze(&self, snapshot: &FinancialSnapshot) -> AnalysisResult {
        run_analysis(snapshot, &self.options)
    }

    /// Rejects negative or non-finite amounts and out-of-range options before
    /// running the analysis.
    pub fn analyze_validated(&self, snapshot: &FinancialSnapshot) -> Result<AnalysisResult> {
        self.options.validate()?;
        snapshot.validate()?;

        debug!("Snapshot passed validation");

        Ok(self.analyze(snapshot))
    }
}

impl Default for FinancialAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisOptions::default())
    }
}

pub fn analyze(snapshot: &FinancialSnapshot) -> AnalysisResult {
    FinancialAnalyzer::default().analyze(snapshot)
}

pub fn analyze_with_options(
    snapshot: &FinancialSnapshot,
    options: &AnalysisOptions,
) -> AnalysisResult {
    run_analysis(snapshot, options)
}
