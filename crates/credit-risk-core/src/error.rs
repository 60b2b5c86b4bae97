use thiserror::Error;

/// Everything a calculation can refuse to do, from malformed applicant
/// fields to business inputs that contradict arithmetic.
#[derive(Debug, Error)]
pub enum CreditRiskError {
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Financial impossibility: {0}")]
    FinancialImpossibility(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CreditRiskError {
    fn from(e: serde_json::Error) -> Self {
        CreditRiskError::SerializationError(e.to_string())
    }
}
