//! Classification metrics over a confusion matrix, plus reconstruction of
//! the matrix itself from the aggregate rates quoted in an evaluation
//! report. Positives are defaulters throughout.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::{types::*, CreditRiskError, CreditRiskResult};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConfusionCounts {
    pub true_positives: u64,
    pub true_negatives: u64,
    pub false_positives: u64,
    pub false_negatives: u64,
}

impl ConfusionCounts {
    pub fn total(&self) -> u64 {
        self.true_positives + self.true_negatives + self.false_positives + self.false_negatives
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationMetrics {
    pub accuracy: Rate,
    pub precision: Rate,
    pub recall: Rate,
    pub specificity: Rate,
    pub f1_score: Rate,
    pub false_positive_rate: Rate,
    pub total_observations: u64,
}

/// Reported aggregates from an evaluation run, as quoted in a model report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportedRatesInput {
    pub total_observations: u64,
    /// Share of defaulters in the evaluation set, as a fraction.
    pub positive_rate: Rate,
    pub recall: Rate,
    pub precision: Rate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivedCounts {
    pub counts: ConfusionCounts,
    pub positives: u64,
    pub negatives: u64,
    /// Rates recomputed from the integer counts. Truncation makes them
    /// drift from the reported inputs.
    pub achieved_recall: Rate,
    pub achieved_precision: Rate,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Standard binary-classification metrics from raw confusion counts.
///
/// Cells with a zero denominator yield a zero metric rather than an error;
/// only a fully empty matrix is rejected.
pub fn calculate_metrics(
    counts: &ConfusionCounts,
) -> CreditRiskResult<ComputationOutput<ClassificationMetrics>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    let total_observations = counts.total();
    if total_observations == 0 {
        return Err(CreditRiskError::InsufficientData(
            "Confusion matrix has no observations.".to_string(),
        ));
    }

    let tp = Decimal::from(counts.true_positives);
    let tn = Decimal::from(counts.true_negatives);
    let fp = Decimal::from(counts.false_positives);
    let fne = Decimal::from(counts.false_negatives);
    let total = Decimal::from(total_observations);

    let accuracy = (tp + tn) / total;
    let precision = ratio_or_zero(tp, tp + fp);
    let recall = ratio_or_zero(tp, tp + fne);
    let specificity = ratio_or_zero(tn, tn + fp);
    let false_positive_rate = ratio_or_zero(fp, fp + tn);

    let f1_score = if (precision + recall).is_zero() {
        Decimal::ZERO
    } else {
        Decimal::TWO * precision * recall / (precision + recall)
    };

    let metrics = ClassificationMetrics {
        accuracy,
        precision,
        recall,
        specificity,
        f1_score,
        false_positive_rate,
        total_observations,
    };

    let assumptions = serde_json::json!({
        "positive_class": "defaulter",
        "zero_denominator_rule": "metric reported as zero",
    });

    Ok(ComputationOutput::wrap(
        metrics,
        "Binary classification metrics from a confusion matrix",
        &assumptions,
        warnings,
        start,
    ))
}

/// Reconstruct the integer confusion matrix behind reported aggregate rates.
///
/// Counts truncate toward zero, so the achieved rates usually drift a little
/// from the quoted ones; the drift is reported back as warnings.
pub fn derive_counts(
    input: &ReportedRatesInput,
) -> CreditRiskResult<ComputationOutput<DerivedCounts>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    // -- Validation ----------------------------------------------------------
    validate_reported_rates(input)?;

    let total = Decimal::from(input.total_observations);

    let positives = to_count(total * input.positive_rate, "positive_rate")?;
    if positives == 0 {
        return Err(CreditRiskError::InsufficientData(
            "Positive rate yields zero positive observations at this sample size.".to_string(),
        ));
    }
    let negatives = input.total_observations - positives;

    let true_positives = to_count(Decimal::from(positives) * input.recall, "recall")?;
    if true_positives == 0 {
        return Err(CreditRiskError::InsufficientData(
            "Reported recall yields zero true positives at this sample size.".to_string(),
        ));
    }
    let false_negatives = positives - true_positives;

    // Predicted positives follow from precision = tp / (tp + fp)
    let predicted_positives = to_count(Decimal::from(true_positives) / input.precision, "precision")?;
    let false_positives = predicted_positives - true_positives;
    if false_positives > negatives {
        return Err(CreditRiskError::FinancialImpossibility(
            "Reported precision implies more false positives than there are negative observations."
                .to_string(),
        ));
    }
    let true_negatives = negatives - false_positives;

    let achieved_recall = Decimal::from(true_positives) / Decimal::from(positives);
    let achieved_precision = Decimal::from(true_positives) / Decimal::from(predicted_positives);

    if achieved_recall != input.recall {
        warnings.push(format!(
            "Count truncation shifted achieved recall from {} to {}",
            input.recall,
            achieved_recall.round_dp(4)
        ));
    }
    if achieved_precision != input.precision {
        warnings.push(format!(
            "Count truncation shifted achieved precision from {} to {}",
            input.precision,
            achieved_precision.round_dp(4)
        ));
    }

    let derived = DerivedCounts {
        counts: ConfusionCounts {
            true_positives,
            true_negatives,
            false_positives,
            false_negatives,
        },
        positives,
        negatives,
        achieved_recall,
        achieved_precision,
    };

    let assumptions = serde_json::json!({
        "rounding": "derived counts truncate toward zero",
        "positive_class": "defaulter",
    });

    Ok(ComputationOutput::wrap(
        derived,
        "Confusion matrix reconstruction from reported aggregate rates",
        &assumptions,
        warnings,
        start,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn ratio_or_zero(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}

fn to_count(value: Decimal, field: &str) -> CreditRiskResult<u64> {
    value
        .trunc()
        .to_u64()
        .ok_or_else(|| CreditRiskError::InvalidInput {
            field: field.to_string(),
            reason: "Derived count does not fit an unsigned integer.".into(),
        })
}

fn validate_reported_rates(input: &ReportedRatesInput) -> CreditRiskResult<()> {
    if input.total_observations == 0 {
        return Err(CreditRiskError::InvalidInput {
            field: "total_observations".into(),
            reason: "Evaluation set must contain at least one observation.".into(),
        });
    }
    if input.positive_rate <= Decimal::ZERO || input.positive_rate >= Decimal::ONE {
        return Err(CreditRiskError::InvalidInput {
            field: "positive_rate".into(),
            reason: "Positive rate must lie strictly between 0 and 1.".into(),
        });
    }
    if input.recall <= Decimal::ZERO || input.recall > Decimal::ONE {
        return Err(CreditRiskError::InvalidInput {
            field: "recall".into(),
            reason: "Recall must lie in (0, 1].".into(),
        });
    }
    if input.precision <= Decimal::ZERO || input.precision > Decimal::ONE {
        return Err(CreditRiskError::InvalidInput {
            field: "precision".into(),
            reason: "Precision must lie in (0, 1].".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
