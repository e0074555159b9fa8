use crate::error::{AnalysisError, Result};
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub enum RecurrencePeriod {
    #[schemars(description = "Paid or charged every week. Counted as 4 occurrences per month.")]
    Weekly,

    #[schemars(description = "Paid or charged every two weeks. Counted as 2 occurrences per month.")]
    Biweekly,

    #[schemars(description = "Paid or charged once per month.")]
    Monthly,

    #[schemars(description = "A single occurrence, amortized evenly across 12 months.")]
    OneTime,

    #[serde(other)]
    #[schemars(description = "Any tag not listed above. Treated as already monthly.")]
    Unrecognized,
}

impl Default for RecurrencePeriod {
    fn default() -> Self {
        Self::Monthly
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub enum ExpenseClassification {
    #[schemars(description = "Committed cost that does not change month to month (rent, insurance, subscriptions)")]
    Fixed,

    #[schemars(description = "Discretionary or usage-driven cost (groceries, dining, fuel)")]
    Variable,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub enum CategoryKind {
    #[schemars(description = "Essential spending: housing, utilities, food, transport")]
    Necessity,

    #[schemars(description = "Lifestyle spending that could be cut without hardship")]
    Want,

    #[schemars(description = "Money set aside: savings deposits, investments, reserves")]
    Savings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct CategoryRef {
    #[schemars(description = "Display name of the category (e.g., 'Groceries', 'Rent')")]
    pub name: String,

    #[schemars(description = "How spending in this category counts toward the needs/wants/savings split")]
    pub kind: CategoryKind,
}

impl Default for CategoryRef {
    fn default() -> Self {
        Self {
            name: "Other".to_string(),
            kind: CategoryKind::Necessity,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct IncomeRecord {
    #[schemars(description = "Name of the income source (e.g., 'Salary', 'Freelance')")]
    pub name: String,

    #[schemars(description = "Amount received per occurrence. Must be non-negative.")]
    pub amount: f64,

    #[serde(default)]
    #[schemars(description = "How often the amount is received. Defaults to Monthly.")]
    pub recurrence: RecurrencePeriod,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct ExpenseRecord {
    #[schemars(description = "Name of the expense (e.g., 'Rent', 'Netflix')")]
    pub name: String,

    #[schemars(description = "Amount paid per occurrence. Must be non-negative.")]
    pub amount: f64,

    #[serde(default)]
    #[schemars(description = "How often the amount is paid. Defaults to Monthly.")]
    pub recurrence: RecurrencePeriod,

    #[schemars(description = "Whether the expense is fixed or variable")]
    pub classification: ExpenseClassification,

    #[serde(default)]
    #[schemars(description = "Category of the expense. Defaults to a Necessity category named 'Other'.")]
    pub category: CategoryRef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct DebtRecord {
    #[schemars(description = "Name of the debt (e.g., 'Credit Card', 'Car Loan')")]
    pub name: String,

    #[schemars(description = "Outstanding balance today. Must be non-negative.")]
    pub balance: f64,

    #[schemars(description = "Minimum payment made every month. Must be non-negative.")]
    pub monthly_payment: f64,

    #[serde(default)]
    #[schemars(description = "Monthly interest rate as a percentage (e.g., 2.5 for 2.5% per month). Omit for interest-free debts.")]
    pub interest_rate_percent: Option<f64>,

    #[serde(default)]
    #[schemars(description = "Number of installments still to pay, when the contract defines one")]
    pub remaining_installments: Option<u32>,
}

impl DebtRecord {
    /// Monthly rate in percent, with an absent rate read as zero.
    pub fn rate(&self) -> f64 {
        self.interest_rate_percent.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct FinancialSnapshot {
    #[serde(default)]
    #[schemars(description = "All income sources")]
    pub incomes: Vec<IncomeRecord>,

    #[serde(default)]
    #[schemars(description = "All recurring and one-time expenses")]
    pub expenses: Vec<ExpenseRecord>,

    #[serde(default)]
    #[schemars(description = "All outstanding debts")]
    pub debts: Vec<DebtRecord>,
}

impl FinancialSnapshot {
    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(FinancialSnapshot)
    }

    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }

    /// Parses a snapshot and rejects it if any amount is negative or non-finite.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: FinancialSnapshot = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn validate(&self) -> Result<()> {
        for income in &self.incomes {
            check_amount(&income.name, "amount", income.amount)?;
        }

        for expense in &self.expenses {
            check_amount(&expense.name, "amount", expense.amount)?;
        }

        for debt in &self.debts {
            check_amount(&debt.name, "balance", debt.balance)?;
            check_amount(&debt.name, "monthly_payment", debt.monthly_payment)?;
            if let Some(rate) = debt.interest_rate_percent {
                check_amount(&debt.name, "interest_rate_percent", rate)?;
            }
        }

        Ok(())
    }
}

fn check_amount(record: &str, field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(AnalysisError::NonFiniteAmount {
            record: record.to_string(),
            field,
        });
    }

    if value < 0.0 {
        return Err(AnalysisError::NegativeAmount {
            record: record.to_string(),
            field,
            value,
        });
    }

    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct AnalysisOptions {
    #[schemars(description = "First month of the cash-flow projection. Defaults to the current month.")]
    pub projection_start: Option<NaiveDate>,

    #[schemars(description = "Number of months to project. Defaults to 12.")]
    pub horizon_months: u32,

    #[schemars(description = "Share of a positive monthly balance offered to the payoff plans as extra budget (0.0 to 1.0). Defaults to 0.5.")]
    pub extra_budget_share: f64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            projection_start: None,
            horizon_months: crate::cash_flow::DEFAULT_HORIZON_MONTHS,
            extra_budget_share: 0.5,
        }
    }
}

impl AnalysisOptions {
    pub fn validate(&self) -> Result<()> {
        if self.horizon_months == 0 {
            return Err(AnalysisError::InvalidOption(
                "horizon_months must be at least 1".to_string(),
            ));
        }

        if !self.extra_budget_share.is_finite() || !(0.0..=1.0).contains(&self.extra_budget_share)
        {
            return Err(AnalysisError::InvalidOption(format!(
                "extra_budget_share must be between 0.0 and 1.0 (got {})",
                self.extra_budget_share
            )));
        }

        Ok(())
    }
}
