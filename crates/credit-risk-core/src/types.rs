use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Monetary amounts. Decimal end to end so money never rides an f64.
pub type Money = Decimal;

/// Fractional rates (0.05 = 5%).
pub type Rate = Decimal;

/// Rates expressed in percentage points (6.5 = 6.5%). Business inputs
/// arrive in this form; divide by 100 before any loss arithmetic.
pub type Percent = Decimal;

/// Currency of the monetary fields. Lending books here are
/// real-denominated, so BRL is the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    BRL,
    USD,
    EUR,
    GBP,
    Other(String),
}

/// An inclusive numeric sweep for sensitivity analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityRange {
    pub min: Decimal,
    pub max: Decimal,
    pub step: Decimal,
}

/// Reporting envelope returned by every public operation: the numbers,
/// the methodology line they were produced by, the assumptions they rest
/// on, and any warnings that belong next to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: RunMetadata,
}

/// Engine provenance stamped onto every envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

impl<T: Serialize> ComputationOutput<T> {
    /// Seal a finished result into the envelope, stamping elapsed wall
    /// time and the engine version.
    pub fn wrap(
        result: T,
        methodology: &str,
        assumptions: &impl Serialize,
        warnings: Vec<String>,
        started: Instant,
    ) -> Self {
        Self {
            result,
            methodology: methodology.to_string(),
            assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
            warnings,
            metadata: RunMetadata {
                version: env!("CARGO_PKG_VERSION").to_string(),
                computation_time_us: started.elapsed().as_micros() as u64,
                precision: "rust_decimal_128bit".to_string(),
            },
        }
    }
}
