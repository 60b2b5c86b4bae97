//! What-if sweep over the expected default reduction. Each row of the
//! comparative table re-runs the ROI projection with the reduction scaled
//! by a multiplier, the base case sitting at 1.0x.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::roi::projection::{self, FinancialScenario};
use crate::{types::*, CreditRiskError, CreditRiskResult};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Multipliers applied when the caller supplies neither an explicit list
/// nor a range.
pub const DEFAULT_MULTIPLIERS: [Decimal; 5] = [
    dec!(0.5),
    dec!(0.75),
    dec!(1.0),
    dec!(1.25),
    dec!(1.5),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiSensitivityInput {
    pub scenario: FinancialScenario,
    /// Explicit multipliers. Takes precedence over `range` when both are
    /// present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multipliers: Option<Vec<Decimal>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<SensitivityRange>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiSensitivityRow {
    pub multiplier: Decimal,
    pub effective_reduction_pct: Percent,
    pub roi_pct: Percent,
    pub total_savings: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payback_months: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiSensitivityOutput {
    pub rows: Vec<RoiSensitivityRow>,
    /// Index of the 1.0x row when the sweep contains one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_case_index: Option<usize>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Sweep the ROI projection across default-reduction multipliers.
///
/// Rows whose scaled scenario fails validation (for example a multiplier
/// that pushes the reduction past 100%) are zero-filled and reported as
/// warnings rather than aborting the whole sweep.
pub fn sweep(
    input: &RoiSensitivityInput,
) -> CreditRiskResult<ComputationOutput<RoiSensitivityOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    projection::validate_scenario(&input.scenario)?;
    let multipliers = resolve_multipliers(input)?;

    let mut rows: Vec<RoiSensitivityRow> = Vec::with_capacity(multipliers.len());
    for multiplier in &multipliers {
        let effective_reduction_pct =
            input.scenario.expected_default_reduction_pct * *multiplier;

        let mut scenario = input.scenario.clone();
        scenario.expected_default_reduction_pct = effective_reduction_pct;

        match projection::compute(&scenario) {
            Ok(output) => {
                let projection = output.result;
                rows.push(RoiSensitivityRow {
                    multiplier: *multiplier,
                    effective_reduction_pct,
                    roi_pct: projection.roi_pct,
                    total_savings: projection.total_savings,
                    payback_months: projection.payback_months,
                });
            }
            Err(e) => {
                warnings.push(format!("Sweep failed at {multiplier}x: {e}"));
                rows.push(RoiSensitivityRow {
                    multiplier: *multiplier,
                    effective_reduction_pct,
                    roi_pct: Decimal::ZERO,
                    total_savings: Decimal::ZERO,
                    payback_months: None,
                });
            }
        }
    }

    let base_case_index = rows.iter().position(|r| r.multiplier == Decimal::ONE);

    let output = RoiSensitivityOutput {
        rows,
        base_case_index,
    };

    let assumptions = serde_json::json!({
        "swept_variable": "expected_default_reduction_pct",
        "multipliers": multipliers
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>(),
    });

    Ok(ComputationOutput::wrap(
        output,
        "ROI sensitivity sweep over the default-reduction estimate",
        &assumptions,
        warnings,
        start,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn resolve_multipliers(input: &RoiSensitivityInput) -> CreditRiskResult<Vec<Decimal>> {
    if let Some(multipliers) = &input.multipliers {
        if multipliers.is_empty() {
            return Err(CreditRiskError::InvalidInput {
                field: "multipliers".into(),
                reason: "At least one multiplier is required.".into(),
            });
        }
        return Ok(multipliers.clone());
    }
    if let Some(range) = &input.range {
        return generate_sweep_values(range);
    }
    Ok(DEFAULT_MULTIPLIERS.to_vec())
}

fn generate_sweep_values(range: &SensitivityRange) -> CreditRiskResult<Vec<Decimal>> {
    if range.step <= Decimal::ZERO {
        return Err(CreditRiskError::InvalidInput {
            field: "range.step".into(),
            reason: "Step must be positive.".into(),
        });
    }
    if range.min > range.max {
        return Err(CreditRiskError::InvalidInput {
            field: "range.min".into(),
            reason: "Min must not exceed max.".into(),
        });
    }

    let mut values = Vec::new();
    let mut v = range.min;
    while v <= range.max {
        values.push(v);
        v += range.step;
    }
    // Include max when the step overshoots it
    if let Some(last) = values.last() {
        if *last != range.max {
            values.push(range.max);
        }
    }
    Ok(values)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roi::presets::ScenarioPreset;
    use rust_decimal_macros::dec;

    fn base_input() -> RoiSensitivityInput {
        RoiSensitivityInput {
            scenario: ScenarioPreset::Moderate.scenario(),
            multipliers: None,
            range: None,
        }
    }

    #[test]
    fn test_default_multiplier_sweep() {
        let result = sweep(&base_input()).unwrap();
        let out = &result.result;

        assert_eq!(out.rows.len(), 5);
        assert_eq!(out.base_case_index, Some(2));
        assert_eq!(out.rows[0].multiplier, dec!(0.5));
        assert_eq!(out.rows[4].multiplier, dec!(1.5));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_base_case_reproduces_projection() {
        let input = base_input();
        let swept = sweep(&input).unwrap();
        let base_row = &swept.result.rows[swept.result.base_case_index.unwrap()];

        let direct = projection::compute(&input.scenario).unwrap().result;
        assert_eq!(base_row.roi_pct, direct.roi_pct);
        assert_eq!(base_row.total_savings, direct.total_savings);
        assert_eq!(base_row.payback_months, direct.payback_months);
    }

    #[test]
    fn test_half_multiplier_halves_savings() {
        let result = sweep(&base_input()).unwrap();
        let rows = &result.result.rows;

        // 0.5x of a 25% reduction is 12.5%, half the savings of the base case
        assert_eq!(rows[0].effective_reduction_pct, dec!(12.5));
        assert_eq!(rows[0].total_savings, dec!(2_437_500));
    }

    #[test]
    fn test_explicit_multipliers() {
        let mut input = base_input();
        input.multipliers = Some(vec![dec!(1), dec!(2)]);
        let result = sweep(&input).unwrap();
        let rows = &result.result.rows;

        assert_eq!(rows.len(), 2);
        assert_eq!(result.result.base_case_index, Some(0));
        // 2x of 25% is a 50% reduction
        assert_eq!(rows[1].effective_reduction_pct, dec!(50));
        assert_eq!(rows[1].total_savings, dec!(9_750_000));
    }

    #[test]
    fn test_range_sweep_includes_max() {
        let mut input = base_input();
        input.range = Some(SensitivityRange {
            min: dec!(0.5),
            max: dec!(1.6),
            step: dec!(0.5),
        });
        let result = sweep(&input).unwrap();
        let multipliers: Vec<Decimal> =
            result.result.rows.iter().map(|r| r.multiplier).collect();

        // 1.6 is appended even though the step lands on 1.5
        assert_eq!(multipliers, vec![dec!(0.5), dec!(1.0), dec!(1.5), dec!(1.6)]);
        assert_eq!(result.result.base_case_index, Some(1));
    }

    #[test]
    fn test_overscaled_row_zero_filled_with_warning() {
        let mut input = base_input();
        input.scenario.expected_default_reduction_pct = dec!(80);
        // 1.5x of 80% crosses 100%
        let result = sweep(&input).unwrap();
        let rows = &result.result.rows;

        assert_eq!(rows.len(), 5);
        assert_eq!(rows[4].effective_reduction_pct, dec!(120.0));
        assert_eq!(rows[4].roi_pct, Decimal::ZERO);
        assert_eq!(rows[4].total_savings, Decimal::ZERO);
        assert!(rows[4].payback_months.is_none());
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("1.5x"));
    }

    #[test]
    fn test_empty_multipliers_rejected() {
        let mut input = base_input();
        input.multipliers = Some(Vec::new());
        let err = sweep(&input).unwrap_err();
        match err {
            CreditRiskError::InvalidInput { field, .. } => {
                assert_eq!(field, "multipliers");
            }
            other => panic!("Expected InvalidInput for multipliers, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_range_step_rejected() {
        let mut input = base_input();
        input.range = Some(SensitivityRange {
            min: dec!(0.5),
            max: dec!(1.5),
            step: Decimal::ZERO,
        });
        assert!(sweep(&input).is_err());
    }

    #[test]
    fn test_invalid_base_scenario_rejected_up_front() {
        let mut input = base_input();
        input.scenario.monthly_volume = Decimal::ZERO;
        assert!(sweep(&input).is_err());
    }
}
