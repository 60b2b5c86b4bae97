use credit_risk_core::scoring::benchmark;
use credit_risk_core::scoring::simulator::{
    self, ApplicantProfile, CreditHistory, LoanPurpose, RiskTier,
};
use credit_risk_core::CreditRiskError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Simulator tests
// ===========================================================================

fn sample_applicant() -> ApplicantProfile {
    // The reference mid-range case: every band is exercised once
    ApplicantProfile {
        age: 35,
        monthly_income: dec!(5_000),
        loan_amount: dec!(25_000),
        credit_history: CreditHistory::Good,
        loan_purpose: LoanPurpose::VehiclePurchase,
    }
}

#[test]
fn test_assess_reference_applicant() {
    let result = simulator::assess(&sample_applicant()).unwrap();
    let out = &result.result;

    // 0.5 - 0.10 - 0.05 - 0.10 - 0.05 - 0.02 = 0.18
    assert_eq!(out.score, dec!(0.18));
    assert!(!out.approved);
    assert_eq!(out.risk_tier, RiskTier::MediumLow);
    assert_eq!(out.confidence_pct, dec!(78.78));
    // Good history wins the explanation slot
    assert_eq!(out.primary_reason, "Positive credit history");
    // 25,000 over 60,000 of annual income
    let expected_ratio = dec!(25_000) / dec!(60_000);
    assert_eq!(out.loan_to_annual_income, expected_ratio);
}

#[test]
fn test_score_stays_in_unit_interval() {
    // Sweep a coarse profile grid; every score must stay inside [0, 1]
    let histories = [
        CreditHistory::Excellent,
        CreditHistory::Good,
        CreditHistory::Regular,
        CreditHistory::Poor,
    ];
    let purposes = [
        LoanPurpose::VehiclePurchase,
        LoanPurpose::HomeImprovement,
        LoanPurpose::DebtConsolidation,
        LoanPurpose::WorkingCapital,
        LoanPurpose::Other,
    ];
    let ages = [18u32, 25, 40, 55, 56, 80];
    let incomes = [dec!(1_000), dec!(4_999), dec!(5_000), dec!(10_000), dec!(25_000)];
    let loans = [dec!(5_000), dec!(100_000), dec!(2_000_000)];

    for history in histories {
        for purpose in purposes {
            for age in ages {
                for income in incomes {
                    for loan in loans {
                        let profile = ApplicantProfile {
                            age,
                            monthly_income: income,
                            loan_amount: loan,
                            credit_history: history,
                            loan_purpose: purpose,
                        };
                        let out = simulator::assess(&profile).unwrap().result;
                        assert!(
                            out.score >= Decimal::ZERO && out.score <= Decimal::ONE,
                            "score {} out of range for {profile:?}",
                            out.score
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_income_crossing_both_bands_drops_quarter_point() {
    let mut below = sample_applicant();
    below.monthly_income = dec!(4_000);
    below.loan_amount = dec!(10_000);

    let mut above = below.clone();
    above.monthly_income = dec!(12_000);

    let low = simulator::assess(&below).unwrap().result.score;
    let high = simulator::assess(&above).unwrap().result.score;

    // +0.10 band to -0.15 band, with the loan small enough that the
    // ratio adjustment stays at -0.05 for both
    assert_eq!(low - high, dec!(0.25));
}

#[test]
fn test_history_is_the_dominant_factor() {
    let base = ApplicantProfile {
        age: 60,
        monthly_income: dec!(6_000),
        loan_amount: dec!(20_000),
        credit_history: CreditHistory::Excellent,
        loan_purpose: LoanPurpose::Other,
    };

    let score_for = |history: CreditHistory| {
        let mut profile = base.clone();
        profile.credit_history = history;
        simulator::assess(&profile).unwrap().result.score
    };

    let excellent = score_for(CreditHistory::Excellent);
    let good = score_for(CreditHistory::Good);
    let regular = score_for(CreditHistory::Regular);
    let poor = score_for(CreditHistory::Poor);

    assert!(poor > regular && regular > good && good > excellent);
    // Relative offsets against the shared baseline: -0.20/-0.10/+0.05/+0.25
    assert_eq!(poor - excellent, dec!(0.45));
    assert_eq!(regular - excellent, dec!(0.25));
    assert_eq!(good - excellent, dec!(0.10));
}

#[test]
fn test_identical_inputs_identical_serialized_results() {
    let profile = sample_applicant();
    let a = simulator::assess(&profile).unwrap().result;
    let b = simulator::assess(&profile).unwrap().result;

    let a_json = serde_json::to_string(&a).unwrap();
    let b_json = serde_json::to_string(&b).unwrap();
    assert_eq!(a_json, b_json);
}

#[test]
fn test_profile_round_trips_through_json() {
    let profile = sample_applicant();
    let json = serde_json::to_string(&profile).unwrap();
    let back: ApplicantProfile = serde_json::from_str(&json).unwrap();

    assert_eq!(
        simulator::assess(&profile).unwrap().result.score,
        simulator::assess(&back).unwrap().result.score
    );
}

#[test]
fn test_risk_tier_serializes_with_canonical_names() {
    let json = serde_json::to_string(&RiskTier::MediumHigh).unwrap();
    assert_eq!(json, "\"Medium-High\"");
    let back: RiskTier = serde_json::from_str("\"Medium-Low\"").unwrap();
    assert_eq!(back, RiskTier::MediumLow);
}

#[test]
fn test_non_positive_income_rejected() {
    let mut profile = sample_applicant();
    profile.monthly_income = dec!(-500);
    let err = simulator::assess(&profile).unwrap_err();
    match err {
        CreditRiskError::InvalidInput { field, .. } => assert_eq!(field, "monthly_income"),
        other => panic!("Expected InvalidInput for monthly_income, got {other:?}"),
    }
}

// ===========================================================================
// Benchmark tests
// ===========================================================================

#[test]
fn test_benchmark_reference_spread() {
    let result = benchmark::compare(None).unwrap();
    let rows = &result.result.rows;

    assert_eq!(rows.len(), 3);
    // The spread is the whole point: approve the low-risk reference,
    // decline the other two.
    assert!(rows[0].approved);
    assert!(!rows[1].approved);
    assert!(!rows[2].approved);
    assert!(rows[0].score < rows[1].score && rows[1].score < rows[2].score);
}

#[test]
fn test_benchmark_candidate_scored_like_direct_assessment() {
    let candidate = sample_applicant();
    let direct = simulator::assess(&candidate).unwrap().result;

    let result = benchmark::compare(Some(&candidate)).unwrap();
    let yours = result.result.rows.last().unwrap();

    assert_eq!(yours.label, "Your profile");
    assert_eq!(yours.score, direct.score);
    assert_eq!(yours.approved, direct.approved);
    assert_eq!(yours.primary_reason, direct.primary_reason);
}

#[test]
fn test_benchmark_threshold_matches_simulator() {
    let result = benchmark::compare(None).unwrap();
    assert_eq!(result.result.threshold, simulator::APPROVAL_THRESHOLD);
}
