use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::scoring::simulator::{
    self, ApplicantProfile, CreditHistory, LoanPurpose, RiskTier, APPROVAL_THRESHOLD,
};
use crate::{types::*, CreditRiskResult};

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkRow {
    pub label: String,
    pub score: Decimal,
    pub risk_tier: RiskTier,
    pub approved: bool,
    pub primary_reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkComparison {
    pub rows: Vec<BenchmarkRow>,
    /// Decision threshold the approvals were judged against.
    pub threshold: Decimal,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// The three reference applicants shown beside every simulation.
pub fn reference_profiles() -> Vec<(String, ApplicantProfile)> {
    vec![
        (
            "Low-risk profile".to_string(),
            ApplicantProfile {
                age: 35,
                monthly_income: dec!(12_000),
                loan_amount: dec!(30_000),
                credit_history: CreditHistory::Excellent,
                loan_purpose: LoanPurpose::VehiclePurchase,
            },
        ),
        (
            "Medium-risk profile".to_string(),
            ApplicantProfile {
                age: 28,
                monthly_income: dec!(6_000),
                loan_amount: dec!(20_000),
                credit_history: CreditHistory::Good,
                loan_purpose: LoanPurpose::HomeImprovement,
            },
        ),
        (
            "High-risk profile".to_string(),
            ApplicantProfile {
                age: 22,
                monthly_income: dec!(2_500),
                loan_amount: dec!(15_000),
                credit_history: CreditHistory::Poor,
                loan_purpose: LoanPurpose::DebtConsolidation,
            },
        ),
    ]
}

/// Score the reference profiles, optionally appending a candidate applicant
/// as the final row for side-by-side comparison.
pub fn compare(
    candidate: Option<&ApplicantProfile>,
) -> CreditRiskResult<ComputationOutput<BenchmarkComparison>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    let mut rows: Vec<BenchmarkRow> = Vec::new();
    for (label, profile) in reference_profiles() {
        rows.push(build_row(label, &profile)?);
    }
    if let Some(profile) = candidate {
        rows.push(build_row("Your profile".to_string(), profile)?);
    }

    let comparison = BenchmarkComparison {
        rows,
        threshold: APPROVAL_THRESHOLD,
    };

    let assumptions = serde_json::json!({
        "reference_profiles": "fixed low/medium/high-risk applicants",
        "decision_threshold": APPROVAL_THRESHOLD.to_string(),
    });

    Ok(ComputationOutput::wrap(
        comparison,
        "Reference-profile benchmark (heuristic credit-risk simulation)",
        &assumptions,
        warnings,
        start,
    ))
}

fn build_row(label: String, profile: &ApplicantProfile) -> CreditRiskResult<BenchmarkRow> {
    let assessed = simulator::assess(profile)?;
    let assessment = assessed.result;
    Ok(BenchmarkRow {
        label,
        score: assessment.score,
        risk_tier: assessment.risk_tier,
        approved: assessment.approved,
        primary_reason: assessment.primary_reason,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_rows_without_candidate() {
        let result = compare(None).unwrap();
        let out = &result.result;

        assert_eq!(out.rows.len(), 3);
        assert_eq!(out.rows[0].label, "Low-risk profile");
        assert_eq!(out.rows[1].label, "Medium-risk profile");
        assert_eq!(out.rows[2].label, "High-risk profile");
        assert_eq!(out.threshold, dec!(0.0922));
    }

    #[test]
    fn test_reference_profile_scores() {
        let result = compare(None).unwrap();
        let rows = &result.result.rows;

        // Low-risk clamps to zero and is the only approval.
        assert_eq!(rows[0].score, Decimal::ZERO);
        assert!(rows[0].approved);
        assert_eq!(rows[0].risk_tier, RiskTier::Low);

        assert_eq!(rows[1].score, dec!(0.19));
        assert!(!rows[1].approved);
        assert_eq!(rows[1].risk_tier, RiskTier::MediumLow);

        assert_eq!(rows[2].score, dec!(0.90));
        assert!(!rows[2].approved);
        assert_eq!(rows[2].risk_tier, RiskTier::High);
    }

    #[test]
    fn test_candidate_appended_last() {
        let candidate = ApplicantProfile {
            age: 35,
            monthly_income: dec!(5_000),
            loan_amount: dec!(25_000),
            credit_history: CreditHistory::Good,
            loan_purpose: LoanPurpose::VehiclePurchase,
        };
        let result = compare(Some(&candidate)).unwrap();
        let rows = &result.result.rows;

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[3].label, "Your profile");
        assert_eq!(rows[3].score, dec!(0.18));
    }

    #[test]
    fn test_invalid_candidate_propagates() {
        let candidate = ApplicantProfile {
            age: 35,
            monthly_income: Decimal::ZERO,
            loan_amount: dec!(25_000),
            credit_history: CreditHistory::Good,
            loan_purpose: LoanPurpose::VehiclePurchase,
        };
        assert!(compare(Some(&candidate)).is_err());
    }
}
