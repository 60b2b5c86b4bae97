//! Heuristic credit-risk simulator.
//!
//! Approximates the production classifier with an additive score over the
//! model's most influential variables: age band, monthly income, bureau
//! history, loan-to-annual-income ratio, and declared purpose. The approval
//! cutoff is the decision threshold published for the tuned model; it is
//! treated as configuration and never recomputed here.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::{types::*, CreditRiskError, CreditRiskResult};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Bureau credit-history band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreditHistory {
    Excellent,
    Good,
    Regular,
    Poor,
}

impl std::fmt::Display for CreditHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Excellent => write!(f, "Excellent"),
            Self::Good => write!(f, "Good"),
            Self::Regular => write!(f, "Regular"),
            Self::Poor => write!(f, "Poor"),
        }
    }
}

/// Declared purpose of the requested loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanPurpose {
    VehiclePurchase,
    HomeImprovement,
    DebtConsolidation,
    WorkingCapital,
    Other,
}

impl std::fmt::Display for LoanPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VehiclePurchase => write!(f, "Vehicle purchase"),
            Self::HomeImprovement => write!(f, "Home improvement"),
            Self::DebtConsolidation => write!(f, "Debt consolidation"),
            Self::WorkingCapital => write!(f, "Working capital"),
            Self::Other => write!(f, "Other"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantProfile {
    /// Age in completed years. Form-level range limits are the caller's job;
    /// any age is scored.
    pub age: u32,
    pub monthly_income: Money,
    pub loan_amount: Money,
    pub credit_history: CreditHistory,
    pub loan_purpose: LoanPurpose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    #[serde(rename = "Medium-Low")]
    MediumLow,
    Medium,
    #[serde(rename = "Medium-High")]
    MediumHigh,
    High,
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::MediumLow => write!(f, "Medium-Low"),
            Self::Medium => write!(f, "Medium"),
            Self::MediumHigh => write!(f, "Medium-High"),
            Self::High => write!(f, "High"),
        }
    }
}

/// One additive contribution to the final score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreFactor {
    pub name: String,
    pub observed: String,
    pub adjustment: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Heuristic default risk in [0, 1]; higher is riskier.
    pub score: Decimal,
    pub approved: bool,
    pub risk_tier: RiskTier,
    /// Decision confidence in percent, capped at 95.
    pub confidence_pct: Decimal,
    /// First matching explanation in the fixed priority order:
    /// history, income, loan ratio, age.
    pub primary_reason: String,
    pub loan_to_annual_income: Decimal,
    pub factors: Vec<ScoreFactor>,
}

// ---------------------------------------------------------------------------
// Scoring constants
// ---------------------------------------------------------------------------

/// Decision threshold published for the tuned production model.
/// Applicants scoring at or below it are approved.
pub const APPROVAL_THRESHOLD: Decimal = dec!(0.0922);

const BASE_SCORE: Decimal = dec!(0.5);

// Age band
const PRIME_AGE_MIN: u32 = 25;
const PRIME_AGE_MAX: u32 = 55;
const PRIME_AGE_ADJ: Decimal = dec!(-0.10);
const OFF_PRIME_AGE_ADJ: Decimal = dec!(0.05);

// Monthly income bands
const HIGH_INCOME_FLOOR: Decimal = dec!(10_000);
const MID_INCOME_FLOOR: Decimal = dec!(5_000);
const HIGH_INCOME_ADJ: Decimal = dec!(-0.15);
const MID_INCOME_ADJ: Decimal = dec!(-0.05);
const LOW_INCOME_ADJ: Decimal = dec!(0.10);

// Loan-to-annual-income ratio bands
const RATIO_SEVERE: Decimal = dec!(5);
const RATIO_ELEVATED: Decimal = dec!(3);
const RATIO_COMFORTABLE: Decimal = dec!(1);
const RATIO_SEVERE_ADJ: Decimal = dec!(0.20);
const RATIO_ELEVATED_ADJ: Decimal = dec!(0.10);
const RATIO_COMFORTABLE_ADJ: Decimal = dec!(-0.05);

// Risk tier cutpoints (inclusive upper bounds, evaluated low to high)
const TIER_LOW_MAX: Decimal = dec!(0.1);
const TIER_MEDIUM_LOW_MAX: Decimal = dec!(0.3);
const TIER_MEDIUM_MAX: Decimal = dec!(0.5);
const TIER_MEDIUM_HIGH_MAX: Decimal = dec!(0.7);

// Confidence grows with distance from the decision boundary
const CONFIDENCE_BASE: Decimal = dec!(70);
const CONFIDENCE_CAP: Decimal = dec!(95);

/// Income floor for the "low income" explanation. Narrower than the
/// scoring band on purpose: only clearly low incomes are called out.
const LOW_INCOME_REASON_FLOOR: Decimal = dec!(3_000);

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Assess the credit risk of a single applicant.
///
/// Starts from a base score of 0.5 and applies one fixed adjustment per
/// variable, clamping the sum to [0, 1]. The output carries the full factor
/// breakdown so callers can show where the score came from.
pub fn assess(profile: &ApplicantProfile) -> CreditRiskResult<ComputationOutput<RiskAssessment>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    // -- Validation ----------------------------------------------------------
    validate_profile(profile)?;

    let mut factors: Vec<ScoreFactor> = Vec::with_capacity(5);
    let mut score = BASE_SCORE;

    // -- Age band ------------------------------------------------------------
    let in_prime_band = (PRIME_AGE_MIN..=PRIME_AGE_MAX).contains(&profile.age);
    let age_adj = if in_prime_band {
        PRIME_AGE_ADJ
    } else {
        OFF_PRIME_AGE_ADJ
    };
    score += age_adj;
    factors.push(build_factor(
        "Age band",
        format!("{} years", profile.age),
        age_adj,
    ));

    // -- Income band ---------------------------------------------------------
    let income_adj = if profile.monthly_income >= HIGH_INCOME_FLOOR {
        HIGH_INCOME_ADJ
    } else if profile.monthly_income >= MID_INCOME_FLOOR {
        MID_INCOME_ADJ
    } else {
        LOW_INCOME_ADJ
    };
    score += income_adj;
    factors.push(build_factor(
        "Income band",
        format!("{} per month", profile.monthly_income),
        income_adj,
    ));

    // -- Bureau history (dominant factor) ------------------------------------
    let history_adj = history_adjustment(profile.credit_history);
    score += history_adj;
    factors.push(build_factor(
        "Credit history",
        profile.credit_history.to_string(),
        history_adj,
    ));

    // -- Loan-to-annual-income ratio -----------------------------------------
    let annual_income = profile.monthly_income * dec!(12);
    let ratio = profile.loan_amount / annual_income;
    let ratio_adj = if ratio > RATIO_SEVERE {
        RATIO_SEVERE_ADJ
    } else if ratio > RATIO_ELEVATED {
        RATIO_ELEVATED_ADJ
    } else if ratio < RATIO_COMFORTABLE {
        RATIO_COMFORTABLE_ADJ
    } else {
        Decimal::ZERO
    };
    score += ratio_adj;
    factors.push(build_factor(
        "Loan-to-income ratio",
        format!("{}x annual income", ratio.round_dp(2)),
        ratio_adj,
    ));

    // -- Declared purpose ----------------------------------------------------
    let purpose_adj = purpose_adjustment(profile.loan_purpose);
    score += purpose_adj;
    factors.push(build_factor(
        "Loan purpose",
        profile.loan_purpose.to_string(),
        purpose_adj,
    ));

    // -- Decision ------------------------------------------------------------
    let score = score.clamp(Decimal::ZERO, Decimal::ONE);
    let approved = score <= APPROVAL_THRESHOLD;
    let risk_tier = classify_tier(score);
    let confidence_pct = confidence(score);
    let primary_reason = primary_reason(profile, ratio);

    let assessment = RiskAssessment {
        score,
        approved,
        risk_tier,
        confidence_pct,
        primary_reason,
        loan_to_annual_income: ratio,
        factors,
    };

    let assumptions = serde_json::json!({
        "base_score": BASE_SCORE.to_string(),
        "decision_threshold": APPROVAL_THRESHOLD.to_string(),
        "approval_rule": "approved when score <= decision threshold",
        "threshold_source": "published operating point of the tuned production model",
        "score_scale": "0 = lowest risk, 1 = highest risk",
    });

    Ok(ComputationOutput::wrap(
        assessment,
        "Heuristic credit-risk simulation (additive factor adjustments)",
        &assumptions,
        warnings,
        start,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_profile(profile: &ApplicantProfile) -> CreditRiskResult<()> {
    if profile.monthly_income <= Decimal::ZERO {
        return Err(CreditRiskError::InvalidInput {
            field: "monthly_income".into(),
            reason: "Monthly income must be positive.".into(),
        });
    }
    if profile.loan_amount <= Decimal::ZERO {
        return Err(CreditRiskError::InvalidInput {
            field: "loan_amount".into(),
            reason: "Loan amount must be positive.".into(),
        });
    }
    Ok(())
}

fn history_adjustment(history: CreditHistory) -> Decimal {
    match history {
        CreditHistory::Excellent => dec!(-0.20),
        CreditHistory::Good => dec!(-0.10),
        CreditHistory::Regular => dec!(0.05),
        CreditHistory::Poor => dec!(0.25),
    }
}

fn purpose_adjustment(purpose: LoanPurpose) -> Decimal {
    match purpose {
        LoanPurpose::VehiclePurchase => dec!(-0.02),
        LoanPurpose::HomeImprovement => dec!(-0.01),
        LoanPurpose::DebtConsolidation => dec!(0.05),
        LoanPurpose::WorkingCapital => dec!(0.03),
        LoanPurpose::Other => dec!(0.02),
    }
}

fn classify_tier(score: Decimal) -> RiskTier {
    if score <= TIER_LOW_MAX {
        RiskTier::Low
    } else if score <= TIER_MEDIUM_LOW_MAX {
        RiskTier::MediumLow
    } else if score <= TIER_MEDIUM_MAX {
        RiskTier::Medium
    } else if score <= TIER_MEDIUM_HIGH_MAX {
        RiskTier::MediumHigh
    } else {
        RiskTier::High
    }
}

fn confidence(score: Decimal) -> Decimal {
    let distance = (score - APPROVAL_THRESHOLD).abs();
    (CONFIDENCE_BASE + distance * dec!(100)).min(CONFIDENCE_CAP)
}

fn build_factor(name: &str, observed: String, adjustment: Decimal) -> ScoreFactor {
    ScoreFactor {
        name: name.to_string(),
        observed,
        adjustment,
    }
}

/// First matching explanation, in the model's fixed priority order.
///
/// The order is part of the contract: bureau history outranks income,
/// income outranks the loan ratio, and the age band comes last.
fn primary_reason(profile: &ApplicantProfile, loan_to_annual_income: Decimal) -> String {
    match profile.credit_history {
        CreditHistory::Excellent | CreditHistory::Good => {
            return "Positive credit history".to_string()
        }
        CreditHistory::Poor => return "Negative credit history".to_string(),
        CreditHistory::Regular => {}
    }

    if profile.monthly_income >= HIGH_INCOME_FLOOR {
        return "High monthly income".to_string();
    }
    if profile.monthly_income < LOW_INCOME_REASON_FLOOR {
        return "Low monthly income".to_string();
    }

    if loan_to_annual_income > RATIO_SEVERE {
        return "Loan amount very high for the income".to_string();
    }
    if loan_to_annual_income < RATIO_COMFORTABLE {
        return "Loan amount well covered by the income".to_string();
    }

    if (PRIME_AGE_MIN..=PRIME_AGE_MAX).contains(&profile.age) {
        return "Age band with historically lower risk".to_string();
    }

    "Overall applicant profile".to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
