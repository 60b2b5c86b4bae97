use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::roi::projection::{
    FinancialScenario, DEFAULT_ANALYSIS_PERIOD_MONTHS, DEFAULT_INITIAL_INVESTMENT,
};
use crate::types::Currency;

/// Canned business cases used in executive reviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioPreset {
    Conservative,
    Moderate,
    Aggressive,
}

impl std::fmt::Display for ScenarioPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conservative => write!(f, "Conservative"),
            Self::Moderate => write!(f, "Moderate"),
            Self::Aggressive => write!(f, "Aggressive"),
        }
    }
}

impl ScenarioPreset {
    pub fn all() -> [ScenarioPreset; 3] {
        [Self::Conservative, Self::Moderate, Self::Aggressive]
    }

    /// The assumptions behind each preset. Larger volumes come with lower
    /// default rates and more ambitious reduction targets.
    pub fn scenario(&self) -> FinancialScenario {
        let (volume, interest, default_rate, reduction) = match self {
            Self::Conservative => (dec!(10_000_000), dec!(2.5), dec!(8.0), dec!(15)),
            Self::Moderate => (dec!(25_000_000), dec!(3.0), dec!(6.5), dec!(25)),
            Self::Aggressive => (dec!(50_000_000), dec!(3.5), dec!(5.0), dec!(35)),
        };
        FinancialScenario {
            monthly_volume: volume,
            monthly_interest_rate_pct: interest,
            current_default_rate_pct: default_rate,
            expected_default_reduction_pct: reduction,
            initial_investment: DEFAULT_INITIAL_INVESTMENT,
            analysis_period_months: DEFAULT_ANALYSIS_PERIOD_MONTHS,
            currency: Currency::BRL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roi::projection;
    use rust_decimal_macros::dec;

    #[test]
    fn test_all_presets_compute() {
        for preset in ScenarioPreset::all() {
            let result = projection::compute(&preset.scenario());
            assert!(result.is_ok(), "{preset} preset failed to compute");
        }
    }

    #[test]
    fn test_moderate_matches_reference_case() {
        let result = projection::compute(&ScenarioPreset::Moderate.scenario()).unwrap();
        let out = &result.result;

        assert_eq!(out.total_savings, dec!(4_875_000));
        assert_eq!(out.roi_pct, dec!(875));
    }

    #[test]
    fn test_conservative_preset_numbers() {
        let result = projection::compute(&ScenarioPreset::Conservative.scenario()).unwrap();
        let out = &result.result;

        // 120M volume, 9.6M losses, 15% prevented
        assert_eq!(out.total_volume, dec!(120_000_000));
        assert_eq!(out.current_losses, dec!(9_600_000));
        assert_eq!(out.total_savings, dec!(1_440_000));
        assert_eq!(out.roi_pct, dec!(188));
    }
}
