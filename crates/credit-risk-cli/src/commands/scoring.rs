use clap::{Args, ValueEnum};
use credit_risk_core::scoring::simulator::{ApplicantProfile, CreditHistory, LoanPurpose};
use credit_risk_core::scoring::{benchmark, simulator};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::input;

// ---------------------------------------------------------------------------
// Argument types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HistoryArg {
    Excellent,
    Good,
    Regular,
    Poor,
}

impl From<HistoryArg> for CreditHistory {
    fn from(arg: HistoryArg) -> Self {
        match arg {
            HistoryArg::Excellent => CreditHistory::Excellent,
            HistoryArg::Good => CreditHistory::Good,
            HistoryArg::Regular => CreditHistory::Regular,
            HistoryArg::Poor => CreditHistory::Poor,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PurposeArg {
    VehiclePurchase,
    HomeImprovement,
    DebtConsolidation,
    WorkingCapital,
    Other,
}

impl From<PurposeArg> for LoanPurpose {
    fn from(arg: PurposeArg) -> Self {
        match arg {
            PurposeArg::VehiclePurchase => LoanPurpose::VehiclePurchase,
            PurposeArg::HomeImprovement => LoanPurpose::HomeImprovement,
            PurposeArg::DebtConsolidation => LoanPurpose::DebtConsolidation,
            PurposeArg::WorkingCapital => LoanPurpose::WorkingCapital,
            PurposeArg::Other => LoanPurpose::Other,
        }
    }
}

/// Applicant data, either inline via flags or as a JSON document.
#[derive(Args)]
pub struct ProfileArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Applicant age in completed years
    #[arg(long)]
    pub age: Option<u32>,

    /// Monthly income
    #[arg(long)]
    pub monthly_income: Option<Decimal>,

    /// Requested loan amount
    #[arg(long)]
    pub loan_amount: Option<Decimal>,

    /// Bureau credit-history band
    #[arg(long, value_enum)]
    pub credit_history: Option<HistoryArg>,

    /// Declared loan purpose
    #[arg(long, value_enum)]
    pub loan_purpose: Option<PurposeArg>,
}

impl ProfileArgs {
    fn has_flags(&self) -> bool {
        self.age.is_some()
            || self.monthly_income.is_some()
            || self.loan_amount.is_some()
            || self.credit_history.is_some()
            || self.loan_purpose.is_some()
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

pub fn run_assess(args: ProfileArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let profile = match input::from_file_or_stdin::<ApplicantProfile>(args.input.as_deref())? {
        Some(profile) => profile,
        None => profile_from_flags(&args)?,
    };

    let result = simulator::assess(&profile)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_benchmark(args: ProfileArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let candidate = match input::from_file_or_stdin::<ApplicantProfile>(args.input.as_deref())? {
        Some(profile) => Some(profile),
        None if args.has_flags() => Some(profile_from_flags(&args)?),
        None => None,
    };

    let result = benchmark::compare(candidate.as_ref())?;
    Ok(serde_json::to_value(result)?)
}

fn profile_from_flags(args: &ProfileArgs) -> Result<ApplicantProfile, Box<dyn std::error::Error>> {
    Ok(ApplicantProfile {
        age: args.age.ok_or("--age is required (or provide --input)")?,
        monthly_income: args
            .monthly_income
            .ok_or("--monthly-income is required (or provide --input)")?,
        loan_amount: args
            .loan_amount
            .ok_or("--loan-amount is required (or provide --input)")?,
        credit_history: args
            .credit_history
            .ok_or("--credit-history is required (or provide --input)")?
            .into(),
        loan_purpose: args
            .loan_purpose
            .ok_or("--loan-purpose is required (or provide --input)")?
            .into(),
    })
}
