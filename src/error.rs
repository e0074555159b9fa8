use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Negative amount on {record}: {field} = {value}")]
    NegativeAmount {
        record: String,
        field: &'static str,
        value: f64,
    },

    #[error("Non-finite amount on {record}: {field}")]
    NonFiniteAmount { record: String, field: &'static str },

    #[error("Invalid analysis option: {0}")]
    InvalidOption(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
