//! Closed-form ROI projection for deploying the risk model on a loan
//! portfolio. Losses are modelled as volume times default rate; savings
//! scale linearly with the expected default-rate reduction.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::{types::*, CreditRiskError, CreditRiskResult};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

pub const DEFAULT_INITIAL_INVESTMENT: Money = dec!(500_000);
pub const DEFAULT_ANALYSIS_PERIOD_MONTHS: u32 = 12;

fn default_initial_investment() -> Money {
    DEFAULT_INITIAL_INVESTMENT
}

fn default_analysis_period_months() -> u32 {
    DEFAULT_ANALYSIS_PERIOD_MONTHS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialScenario {
    /// New loan volume originated per month.
    pub monthly_volume: Money,
    /// Charged on the portfolio's loans. Reported back in the assumptions
    /// but absent from every loss formula, as in the reference business
    /// case: savings come from avoided defaults, not from interest.
    pub monthly_interest_rate_pct: Percent,
    pub current_default_rate_pct: Percent,
    /// Share of today's default losses the model is expected to prevent.
    pub expected_default_reduction_pct: Percent,
    #[serde(default = "default_initial_investment")]
    pub initial_investment: Money,
    #[serde(default = "default_analysis_period_months")]
    pub analysis_period_months: u32,
    #[serde(default)]
    pub currency: Currency,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiProjection {
    pub total_volume: Money,
    pub current_losses: Money,
    pub losses_with_model: Money,
    pub total_savings: Money,
    pub monthly_savings: Money,
    pub roi_pct: Percent,
    /// None when monthly savings are not positive: the investment is never
    /// recovered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payback_months: Option<Decimal>,
    pub new_default_rate_pct: Percent,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Project portfolio economics over the analysis period.
///
/// All steps are closed-form; the only non-total operation is the payback
/// division, which degrades to `None` instead of failing when there are no
/// savings to recover the investment from.
pub fn compute(scenario: &FinancialScenario) -> CreditRiskResult<ComputationOutput<RoiProjection>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    // -- Validation ----------------------------------------------------------
    validate_scenario(scenario)?;

    let months = Decimal::from(scenario.analysis_period_months);
    let current_rate = scenario.current_default_rate_pct / dec!(100);
    let reduction = scenario.expected_default_reduction_pct / dec!(100);

    // -- Loss arithmetic -----------------------------------------------------
    let total_volume = scenario.monthly_volume * months;
    let current_losses = total_volume * current_rate;

    let new_rate = current_rate * (Decimal::ONE - reduction);
    let losses_with_model = total_volume * new_rate;

    let total_savings = current_losses - losses_with_model;
    let monthly_savings = total_savings / months;

    // -- Return on investment ------------------------------------------------
    let roi_pct =
        (total_savings - scenario.initial_investment) / scenario.initial_investment * dec!(100);

    let payback_months = if monthly_savings > Decimal::ZERO {
        Some(scenario.initial_investment / monthly_savings)
    } else {
        None
    };

    let projection = RoiProjection {
        total_volume,
        current_losses,
        losses_with_model,
        total_savings,
        monthly_savings,
        roi_pct,
        payback_months,
        new_default_rate_pct: new_rate * dec!(100),
    };

    let assumptions = serde_json::json!({
        "loss_model": "losses = volume x default rate; savings scale linearly with the reduction",
        "monthly_interest_rate_pct": scenario.monthly_interest_rate_pct.to_string(),
        "currency": scenario.currency,
        "payback_rule": "initial investment / monthly savings; unbounded when savings are not positive",
    });

    Ok(ComputationOutput::wrap(
        projection,
        "Portfolio ROI projection (closed-form default-loss savings)",
        &assumptions,
        warnings,
        start,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

pub(crate) fn validate_scenario(scenario: &FinancialScenario) -> CreditRiskResult<()> {
    if scenario.monthly_volume <= Decimal::ZERO {
        return Err(CreditRiskError::InvalidInput {
            field: "monthly_volume".into(),
            reason: "Monthly loan volume must be positive.".into(),
        });
    }
    if scenario.initial_investment <= Decimal::ZERO {
        return Err(CreditRiskError::InvalidInput {
            field: "initial_investment".into(),
            reason: "Initial investment must be positive.".into(),
        });
    }
    if scenario.analysis_period_months == 0 {
        return Err(CreditRiskError::InvalidInput {
            field: "analysis_period_months".into(),
            reason: "Analysis period must cover at least one month.".into(),
        });
    }
    if scenario.monthly_interest_rate_pct < Decimal::ZERO {
        return Err(CreditRiskError::InvalidInput {
            field: "monthly_interest_rate_pct".into(),
            reason: "Interest rate cannot be negative.".into(),
        });
    }
    if scenario.current_default_rate_pct < Decimal::ZERO {
        return Err(CreditRiskError::InvalidInput {
            field: "current_default_rate_pct".into(),
            reason: "Default rate cannot be negative.".into(),
        });
    }
    if scenario.expected_default_reduction_pct < Decimal::ZERO {
        return Err(CreditRiskError::InvalidInput {
            field: "expected_default_reduction_pct".into(),
            reason: "Default reduction cannot be negative.".into(),
        });
    }
    if scenario.current_default_rate_pct > dec!(100) {
        return Err(CreditRiskError::FinancialImpossibility(
            "Current default rate above 100% would mean losing more than the lent volume."
                .to_string(),
        ));
    }
    if scenario.expected_default_reduction_pct > dec!(100) {
        return Err(CreditRiskError::FinancialImpossibility(
            "Default reduction above 100% would produce a negative default rate.".to_string(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    /// The reference business case: 25M monthly volume, 6.5% default rate,
    /// 25% expected reduction over 12 months.
    fn reference_scenario() -> FinancialScenario {
        FinancialScenario {
            monthly_volume: dec!(25_000_000),
            monthly_interest_rate_pct: dec!(3.0),
            current_default_rate_pct: dec!(6.5),
            expected_default_reduction_pct: dec!(25),
            initial_investment: dec!(500_000),
            analysis_period_months: 12,
            currency: Currency::BRL,
        }
    }

    #[test]
    fn test_reference_scenario_numbers() {
        let result = compute(&reference_scenario()).unwrap();
        let out = &result.result;

        assert_eq!(out.total_volume, dec!(300_000_000));
        assert_eq!(out.current_losses, dec!(19_500_000));
        assert_eq!(out.new_default_rate_pct, dec!(4.875));
        assert_eq!(out.losses_with_model, dec!(14_625_000));
        assert_eq!(out.total_savings, dec!(4_875_000));
        assert_eq!(out.monthly_savings, dec!(406_250));
        assert_eq!(out.roi_pct, dec!(875));
    }

    #[test]
    fn test_payback_months() {
        let result = compute(&reference_scenario()).unwrap();
        let payback = result.result.payback_months.unwrap();

        // 500,000 / 406,250 months, a little over five weeks
        assert_eq!(payback, dec!(500_000) / dec!(406_250));
        assert_eq!(payback.round_dp(2), dec!(1.23));
    }

    #[test]
    fn test_zero_reduction_gives_unbounded_payback() {
        let mut scenario = reference_scenario();
        scenario.expected_default_reduction_pct = Decimal::ZERO;
        let result = compute(&scenario).unwrap();
        let out = &result.result;

        assert_eq!(out.total_savings, Decimal::ZERO);
        assert_eq!(out.monthly_savings, Decimal::ZERO);
        assert!(out.payback_months.is_none());
        // The full investment is lost
        assert_eq!(out.roi_pct, dec!(-100));
    }

    #[test]
    fn test_interest_rate_does_not_change_outcome() {
        let mut scenario = reference_scenario();
        scenario.monthly_interest_rate_pct = dec!(9.9);
        let result = compute(&scenario).unwrap();

        assert_eq!(result.result.total_savings, dec!(4_875_000));
        assert_eq!(result.result.roi_pct, dec!(875));
    }

    #[test]
    fn test_serde_defaults_for_investment_and_period() {
        let json = r#"{
            "monthly_volume": "25000000",
            "monthly_interest_rate_pct": "3.0",
            "current_default_rate_pct": "6.5",
            "expected_default_reduction_pct": "25"
        }"#;
        let scenario: FinancialScenario = serde_json::from_str(json).unwrap();

        assert_eq!(scenario.initial_investment, dec!(500_000));
        assert_eq!(scenario.analysis_period_months, 12);
        assert_eq!(scenario.currency, Currency::BRL);
    }

    #[test]
    fn test_non_positive_volume_rejected() {
        let mut scenario = reference_scenario();
        scenario.monthly_volume = Decimal::ZERO;
        let err = compute(&scenario).unwrap_err();
        match err {
            crate::CreditRiskError::InvalidInput { field, .. } => {
                assert_eq!(field, "monthly_volume");
            }
            other => panic!("Expected InvalidInput for monthly_volume, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_period_rejected() {
        let mut scenario = reference_scenario();
        scenario.analysis_period_months = 0;
        let err = compute(&scenario).unwrap_err();
        match err {
            crate::CreditRiskError::InvalidInput { field, .. } => {
                assert_eq!(field, "analysis_period_months");
            }
            other => panic!("Expected InvalidInput for analysis_period_months, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_rate_rejected() {
        let mut scenario = reference_scenario();
        scenario.current_default_rate_pct = dec!(-1);
        assert!(compute(&scenario).is_err());
    }

    #[test]
    fn test_reduction_above_hundred_is_impossible() {
        let mut scenario = reference_scenario();
        scenario.expected_default_reduction_pct = dec!(120);
        let err = compute(&scenario).unwrap_err();
        match err {
            crate::CreditRiskError::FinancialImpossibility(_) => {}
            other => panic!("Expected FinancialImpossibility, got {other:?}"),
        }
    }

    #[test]
    fn test_deterministic_output() {
        let scenario = reference_scenario();
        let a = compute(&scenario).unwrap();
        let b = compute(&scenario).unwrap();

        let a_json = serde_json::to_value(&a.result).unwrap();
        let b_json = serde_json::to_value(&b.result).unwrap();
        assert_eq!(a_json, b_json);
    }
}
