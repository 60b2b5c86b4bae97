use clap::{Args, ValueEnum};
use credit_risk_core::model_metrics::confusion::{
    self, ConfusionCounts, ReportedRatesInput,
};
use credit_risk_core::model_metrics::report::{self, ModelCard};
use credit_risk_core::model_metrics::uplift::{
    self, BusinessImpactInput, DEFAULT_ASSUMED_DEFAULT_RATE, DEFAULT_LOSS_CONVERSION_FACTOR,
    DEFAULT_PORTFOLIO_VALUE,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::input;

// ---------------------------------------------------------------------------
// Argument types
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct MetricsArgs {
    /// Path to JSON input file with the four confusion-matrix counts
    #[arg(long)]
    pub input: Option<String>,

    /// Defaulters flagged by the model
    #[arg(long)]
    pub true_positives: Option<u64>,

    /// Good payers passed by the model
    #[arg(long)]
    pub true_negatives: Option<u64>,

    /// Good payers flagged by the model
    #[arg(long)]
    pub false_positives: Option<u64>,

    /// Defaulters missed by the model
    #[arg(long)]
    pub false_negatives: Option<u64>,
}

#[derive(Args)]
pub struct DeriveArgs {
    /// Path to JSON input file with the reported evaluation rates
    #[arg(long)]
    pub input: Option<String>,

    /// Evaluation set size
    #[arg(long)]
    pub total: Option<u64>,

    /// Share of defaulters in the evaluation set, as a fraction
    #[arg(long)]
    pub positive_rate: Option<Decimal>,

    /// Reported recall, as a fraction
    #[arg(long)]
    pub recall: Option<Decimal>,

    /// Reported precision, as a fraction
    #[arg(long)]
    pub precision: Option<Decimal>,
}

#[derive(Args)]
pub struct CompareArgs {
    /// Path to JSON input file holding both cards: {"baseline": ..., "improved": ...}
    #[arg(long)]
    pub input: Option<String>,

    /// Path to a JSON model card for the baseline
    #[arg(long)]
    pub baseline: Option<String>,

    /// Path to a JSON model card for the candidate
    #[arg(long)]
    pub improved: Option<String>,
}

#[derive(Args)]
pub struct ImpactArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,

    /// Baseline model AUC
    #[arg(long)]
    pub baseline_auc: Option<Decimal>,

    /// Candidate model AUC
    #[arg(long)]
    pub improved_auc: Option<Decimal>,

    /// Outstanding portfolio value the estimate is scaled to
    #[arg(long)]
    pub portfolio_value: Option<Decimal>,

    /// Assumed portfolio default rate, as a fraction
    #[arg(long)]
    pub default_rate: Option<Decimal>,

    /// Fraction of the AUC gain that converts into avoided losses
    #[arg(long)]
    pub conversion_factor: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CardArg {
    /// Logistic regression scored at the default 0.5-style threshold
    Baseline,
    /// LightGBM with SMOTE resampling and a tuned decision threshold
    Tuned,
}

#[derive(Args)]
pub struct CardArgs {
    /// Which published card to print
    #[arg(long, value_enum, default_value_t = CardArg::Tuned)]
    pub model: CardArg,
}

/// Both sides of a model comparison in one JSON document.
#[derive(Deserialize)]
struct CardPair {
    baseline: ModelCard,
    improved: ModelCard,
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

pub fn run_metrics(args: MetricsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let counts = match input::from_file_or_stdin::<ConfusionCounts>(args.input.as_deref())? {
        Some(counts) => counts,
        None => ConfusionCounts {
            true_positives: args
                .true_positives
                .ok_or("--true-positives is required (or provide --input)")?,
            true_negatives: args
                .true_negatives
                .ok_or("--true-negatives is required (or provide --input)")?,
            false_positives: args
                .false_positives
                .ok_or("--false-positives is required (or provide --input)")?,
            false_negatives: args
                .false_negatives
                .ok_or("--false-negatives is required (or provide --input)")?,
        },
    };

    let result = confusion::calculate_metrics(&counts)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_derive(args: DeriveArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rates = match input::from_file_or_stdin::<ReportedRatesInput>(args.input.as_deref())? {
        Some(rates) => rates,
        None => ReportedRatesInput {
            total_observations: args.total.ok_or("--total is required (or provide --input)")?,
            positive_rate: args
                .positive_rate
                .ok_or("--positive-rate is required (or provide --input)")?,
            recall: args.recall.ok_or("--recall is required (or provide --input)")?,
            precision: args
                .precision
                .ok_or("--precision is required (or provide --input)")?,
        },
    };

    let result = confusion::derive_counts(&rates)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (baseline, improved) = match input::from_file_or_stdin::<CardPair>(args.input.as_deref())? {
        Some(pair) => (pair.baseline, pair.improved),
        None => {
            // Cards given as separate files; missing sides fall back to the
            // published evaluation cards.
            let baseline = match args.baseline {
                Some(ref path) => input::file::read_json(path)?,
                None => ModelCard::baseline(),
            };
            let improved = match args.improved {
                Some(ref path) => input::file::read_json(path)?,
                None => ModelCard::tuned(),
            };
            (baseline, improved)
        }
    };

    let result = report::compare_models(&baseline, &improved)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_impact(args: ImpactArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let impact_input = match input::from_file_or_stdin::<BusinessImpactInput>(args.input.as_deref())?
    {
        Some(parsed) => parsed,
        None => BusinessImpactInput {
            baseline_auc: args
                .baseline_auc
                .ok_or("--baseline-auc is required (or provide --input)")?,
            improved_auc: args
                .improved_auc
                .ok_or("--improved-auc is required (or provide --input)")?,
            portfolio_value: args.portfolio_value.unwrap_or(DEFAULT_PORTFOLIO_VALUE),
            assumed_default_rate: args.default_rate.unwrap_or(DEFAULT_ASSUMED_DEFAULT_RATE),
            loss_conversion_factor: args
                .conversion_factor
                .unwrap_or(DEFAULT_LOSS_CONVERSION_FACTOR),
        },
    };

    let result = uplift::estimate_impact(&impact_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_card(args: CardArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let card = match args.model {
        CardArg::Baseline => ModelCard::baseline(),
        CardArg::Tuned => ModelCard::tuned(),
    };
    Ok(serde_json::to_value(card)?)
}
