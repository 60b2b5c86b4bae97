use clap::{Args, ValueEnum};
use credit_risk_core::roi::presets::ScenarioPreset;
use credit_risk_core::roi::projection::{
    self, FinancialScenario, DEFAULT_ANALYSIS_PERIOD_MONTHS, DEFAULT_INITIAL_INVESTMENT,
};
use credit_risk_core::roi::sensitivity::{self, RoiSensitivityInput};
use credit_risk_core::roi::timeline;
use credit_risk_core::{Currency, SensitivityRange};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::input;

// ---------------------------------------------------------------------------
// Argument types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PresetArg {
    Conservative,
    Moderate,
    Aggressive,
}

impl From<PresetArg> for ScenarioPreset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Conservative => ScenarioPreset::Conservative,
            PresetArg::Moderate => ScenarioPreset::Moderate,
            PresetArg::Aggressive => ScenarioPreset::Aggressive,
        }
    }
}

/// Business-case inputs, either inline via flags, from a preset, or as a
/// JSON document.
#[derive(Args)]
pub struct ScenarioArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Start from a canned business case; individual flags override its fields
    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,

    /// New loan volume originated per month
    #[arg(long)]
    pub monthly_volume: Option<Decimal>,

    /// Monthly interest rate in percent
    #[arg(long)]
    pub monthly_interest_rate: Option<Decimal>,

    /// Current default rate in percent
    #[arg(long)]
    pub current_default_rate: Option<Decimal>,

    /// Share of default losses the model is expected to prevent, in percent
    #[arg(long)]
    pub default_reduction: Option<Decimal>,

    /// Up-front model investment
    #[arg(long)]
    pub investment: Option<Decimal>,

    /// Analysis period in months
    #[arg(long)]
    pub months: Option<u32>,
}

#[derive(Args)]
pub struct SensitivityArgs {
    #[command(flatten)]
    pub scenario: ScenarioArgs,

    /// Comma-separated default-reduction multipliers
    #[arg(long, value_delimiter = ',')]
    pub multipliers: Option<Vec<Decimal>>,

    /// Lower bound of a generated multiplier sweep
    #[arg(long)]
    pub min: Option<Decimal>,

    /// Upper bound of a generated multiplier sweep
    #[arg(long)]
    pub max: Option<Decimal>,

    /// Step of a generated multiplier sweep
    #[arg(long)]
    pub step: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

pub fn run_projection(args: ScenarioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let scenario = resolve_scenario(&args)?;
    let result = projection::compute(&scenario)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_sensitivity(args: SensitivityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let scenario = resolve_scenario(&args.scenario)?;

    let range = match (args.min, args.max, args.step) {
        (Some(min), Some(max), Some(step)) => Some(SensitivityRange { min, max, step }),
        (None, None, None) => None,
        _ => return Err("provide --min, --max and --step together".into()),
    };

    let result = sensitivity::sweep(&RoiSensitivityInput {
        scenario,
        multipliers: args.multipliers,
        range,
    })?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_timeline(args: ScenarioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let scenario = resolve_scenario(&args)?;
    let result = timeline::project(&scenario)?;
    Ok(serde_json::to_value(result)?)
}

fn resolve_scenario(args: &ScenarioArgs) -> Result<FinancialScenario, Box<dyn std::error::Error>> {
    if let Some(scenario) = input::from_file_or_stdin::<FinancialScenario>(args.input.as_deref())? {
        return Ok(scenario);
    }

    if let Some(preset) = args.preset {
        let mut scenario = ScenarioPreset::from(preset).scenario();
        if let Some(v) = args.monthly_volume {
            scenario.monthly_volume = v;
        }
        if let Some(v) = args.monthly_interest_rate {
            scenario.monthly_interest_rate_pct = v;
        }
        if let Some(v) = args.current_default_rate {
            scenario.current_default_rate_pct = v;
        }
        if let Some(v) = args.default_reduction {
            scenario.expected_default_reduction_pct = v;
        }
        if let Some(v) = args.investment {
            scenario.initial_investment = v;
        }
        if let Some(v) = args.months {
            scenario.analysis_period_months = v;
        }
        return Ok(scenario);
    }

    Ok(FinancialScenario {
        monthly_volume: args
            .monthly_volume
            .ok_or("--monthly-volume is required (or provide --preset/--input)")?,
        monthly_interest_rate_pct: args
            .monthly_interest_rate
            .ok_or("--monthly-interest-rate is required (or provide --preset/--input)")?,
        current_default_rate_pct: args
            .current_default_rate
            .ok_or("--current-default-rate is required (or provide --preset/--input)")?,
        expected_default_reduction_pct: args
            .default_reduction
            .ok_or("--default-reduction is required (or provide --preset/--input)")?,
        initial_investment: args.investment.unwrap_or(DEFAULT_INITIAL_INVESTMENT),
        analysis_period_months: args.months.unwrap_or(DEFAULT_ANALYSIS_PERIOD_MONTHS),
        currency: Currency::default(),
    })
}
