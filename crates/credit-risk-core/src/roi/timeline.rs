use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::roi::projection::{self, FinancialScenario};
use crate::{types::*, CreditRiskResult};

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Reported cumulative ROI never drops below a total write-off.
const ROI_FLOOR_PCT: Decimal = dec!(-100);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub month: u32,
    pub cumulative_savings: Money,
    pub cumulative_roi_pct: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiTimeline {
    pub points: Vec<TimelinePoint>,
    /// First month whose cumulative savings cover the investment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_even_month: Option<u32>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Month-by-month cumulative ROI across the analysis period.
///
/// Savings accrue linearly: each month adds one month of prevented default
/// losses against the up-front investment.
pub fn project(scenario: &FinancialScenario) -> CreditRiskResult<ComputationOutput<RoiTimeline>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    projection::validate_scenario(scenario)?;

    let current_rate = scenario.current_default_rate_pct / dec!(100);
    let reduction = scenario.expected_default_reduction_pct / dec!(100);
    let investment = scenario.initial_investment;

    let mut points: Vec<TimelinePoint> = Vec::with_capacity(scenario.analysis_period_months as usize);
    let mut break_even_month: Option<u32> = None;

    for month in 1..=scenario.analysis_period_months {
        let volume_to_date = scenario.monthly_volume * Decimal::from(month);
        let cumulative_savings = volume_to_date * current_rate * reduction;
        let cumulative_roi_pct =
            ((cumulative_savings - investment) / investment * dec!(100)).max(ROI_FLOOR_PCT);

        if break_even_month.is_none() && cumulative_savings >= investment {
            break_even_month = Some(month);
        }

        points.push(TimelinePoint {
            month,
            cumulative_savings,
            cumulative_roi_pct,
        });
    }

    let timeline = RoiTimeline {
        points,
        break_even_month,
    };

    let assumptions = serde_json::json!({
        "accrual": "savings accrue linearly month over month",
        "investment_timing": "entire investment paid up front in month zero",
        "roi_floor_pct": ROI_FLOOR_PCT.to_string(),
    });

    Ok(ComputationOutput::wrap(
        timeline,
        "Cumulative ROI timeline over the analysis period",
        &assumptions,
        warnings,
        start,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roi::presets::ScenarioPreset;
    use rust_decimal_macros::dec;

    #[test]
    fn test_one_point_per_month() {
        let scenario = ScenarioPreset::Moderate.scenario();
        let result = project(&scenario).unwrap();
        let out = &result.result;

        assert_eq!(out.points.len(), 12);
        assert_eq!(out.points[0].month, 1);
        assert_eq!(out.points[11].month, 12);
    }

    #[test]
    fn test_first_month_numbers() {
        let scenario = ScenarioPreset::Moderate.scenario();
        let result = project(&scenario).unwrap();
        let first = &result.result.points[0];

        // One month of savings: 25M * 6.5% * 25% = 406,250
        assert_eq!(first.cumulative_savings, dec!(406_250));
        // (406,250 - 500,000) / 500,000 * 100 = -18.75%
        assert_eq!(first.cumulative_roi_pct, dec!(-18.75));
    }

    #[test]
    fn test_final_month_matches_projection() {
        let scenario = ScenarioPreset::Moderate.scenario();
        let timeline = project(&scenario).unwrap().result;
        let projection = projection::compute(&scenario).unwrap().result;

        let last = timeline.points.last().unwrap();
        assert_eq!(last.cumulative_savings, projection.total_savings);
        assert_eq!(last.cumulative_roi_pct, projection.roi_pct);
    }

    #[test]
    fn test_break_even_consistent_with_payback() {
        let scenario = ScenarioPreset::Moderate.scenario();
        let timeline = project(&scenario).unwrap().result;
        let projection = projection::compute(&scenario).unwrap().result;

        // Payback lands at ~1.23 months, so month 2 is the first whole month
        // in the black.
        assert_eq!(timeline.break_even_month, Some(2));
        let payback = projection.payback_months.unwrap();
        assert_eq!(Decimal::from(timeline.break_even_month.unwrap()), payback.ceil());
    }

    #[test]
    fn test_zero_reduction_never_breaks_even() {
        let mut scenario = ScenarioPreset::Moderate.scenario();
        scenario.expected_default_reduction_pct = Decimal::ZERO;
        let result = project(&scenario).unwrap();
        let out = &result.result;

        assert!(out.break_even_month.is_none());
        // Nothing is ever recovered; the ROI pins to the floor every month
        for point in &out.points {
            assert_eq!(point.cumulative_savings, Decimal::ZERO);
            assert_eq!(point.cumulative_roi_pct, dec!(-100));
        }
    }

    #[test]
    fn test_cumulative_roi_is_monotonic() {
        let scenario = ScenarioPreset::Aggressive.scenario();
        let points = project(&scenario).unwrap().result.points;

        for pair in points.windows(2) {
            assert!(pair[1].cumulative_roi_pct > pair[0].cumulative_roi_pct);
        }
    }

    #[test]
    fn test_invalid_scenario_rejected() {
        let mut scenario = ScenarioPreset::Moderate.scenario();
        scenario.initial_investment = Decimal::ZERO;
        assert!(project(&scenario).is_err());
    }
}
