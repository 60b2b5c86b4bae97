pub mod error;
pub mod types;

#[cfg(feature = "scoring")]
pub mod scoring;

#[cfg(feature = "roi")]
pub mod roi;

#[cfg(feature = "model_metrics")]
pub mod model_metrics;

pub use error::CreditRiskError;
pub use types::*;

/// Standard result type for all credit-risk operations
pub type CreditRiskResult<T> = Result<T, CreditRiskError>;
