use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::{types::*, CreditRiskError, CreditRiskResult};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

pub const DEFAULT_PORTFOLIO_VALUE: Money = dec!(100_000_000);
pub const DEFAULT_ASSUMED_DEFAULT_RATE: Rate = dec!(0.05);
/// Rule-of-thumb share of an AUC improvement that turns into avoided
/// losses. Calibrated once for the business case, not re-estimated.
pub const DEFAULT_LOSS_CONVERSION_FACTOR: Decimal = dec!(0.4);

fn default_portfolio_value() -> Money {
    DEFAULT_PORTFOLIO_VALUE
}

fn default_assumed_default_rate() -> Rate {
    DEFAULT_ASSUMED_DEFAULT_RATE
}

fn default_loss_conversion_factor() -> Decimal {
    DEFAULT_LOSS_CONVERSION_FACTOR
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessImpactInput {
    pub baseline_auc: Decimal,
    pub improved_auc: Decimal,
    #[serde(default = "default_portfolio_value")]
    pub portfolio_value: Money,
    #[serde(default = "default_assumed_default_rate")]
    pub assumed_default_rate: Rate,
    #[serde(default = "default_loss_conversion_factor")]
    pub loss_conversion_factor: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessImpact {
    pub auc_improvement_pct: Percent,
    pub estimated_loss_reduction_pct: Percent,
    pub estimated_current_losses: Money,
    pub estimated_savings: Money,
    pub portfolio_value: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Translate an AUC improvement into estimated annual savings.
///
/// A coarse executive estimate: the relative AUC gain is scaled by a fixed
/// conversion factor into a loss-reduction percentage, then applied to the
/// portfolio's assumed default losses.
pub fn estimate_impact(
    input: &BusinessImpactInput,
) -> CreditRiskResult<ComputationOutput<BusinessImpact>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let auc_improvement_pct =
        (input.improved_auc - input.baseline_auc) / input.baseline_auc * dec!(100);
    let estimated_loss_reduction_pct = auc_improvement_pct * input.loss_conversion_factor;

    let estimated_current_losses = input.portfolio_value * input.assumed_default_rate;
    let estimated_savings = estimated_current_losses * estimated_loss_reduction_pct / dec!(100);

    if input.improved_auc < input.baseline_auc {
        warnings.push(
            "Improved model scores below the baseline; the estimated impact is negative."
                .to_string(),
        );
    }

    let impact = BusinessImpact {
        auc_improvement_pct,
        estimated_loss_reduction_pct,
        estimated_current_losses,
        estimated_savings,
        portfolio_value: input.portfolio_value,
    };

    let assumptions = serde_json::json!({
        "loss_conversion_factor": input.loss_conversion_factor.to_string(),
        "assumed_default_rate": input.assumed_default_rate.to_string(),
        "estimate_quality": "rule-of-thumb executive estimate, not calibrated",
    });

    Ok(ComputationOutput::wrap(
        impact,
        "Business impact estimate from AUC uplift",
        &assumptions,
        warnings,
        start,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_input(input: &BusinessImpactInput) -> CreditRiskResult<()> {
    for (name, auc) in [
        ("baseline_auc", input.baseline_auc),
        ("improved_auc", input.improved_auc),
    ] {
        if auc <= dec!(0.5) || auc > Decimal::ONE {
            return Err(CreditRiskError::InvalidInput {
                field: name.to_string(),
                reason: "A usable ranker must score above 0.5 and at most 1.".into(),
            });
        }
    }
    if input.portfolio_value <= Decimal::ZERO {
        return Err(CreditRiskError::InvalidInput {
            field: "portfolio_value".into(),
            reason: "Portfolio value must be positive.".into(),
        });
    }
    if input.assumed_default_rate <= Decimal::ZERO || input.assumed_default_rate >= Decimal::ONE {
        return Err(CreditRiskError::InvalidInput {
            field: "assumed_default_rate".into(),
            reason: "Assumed default rate must lie strictly between 0 and 1.".into(),
        });
    }
    if input.loss_conversion_factor <= Decimal::ZERO {
        return Err(CreditRiskError::InvalidInput {
            field: "loss_conversion_factor".into(),
            reason: "Loss conversion factor must be positive.".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
