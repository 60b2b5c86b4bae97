use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::{types::*, CreditRiskError, CreditRiskResult};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Published evaluation summary of a scoring model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelCard {
    pub model_name: String,
    pub auc: Decimal,
    pub accuracy: Rate,
    pub precision: Rate,
    pub recall: Rate,
    pub decision_threshold: Decimal,
}

impl ModelCard {
    /// The unbalanced baseline classifier from the first modelling round.
    pub fn baseline() -> Self {
        ModelCard {
            model_name: "Baseline logistic regression".to_string(),
            auc: dec!(0.6753),
            accuracy: dec!(0.92),
            precision: dec!(0.12),
            recall: dec!(0.22),
            decision_threshold: dec!(0.9799),
        }
    }

    /// The production model: gradient boosting over a rebalanced sample.
    pub fn tuned() -> Self {
        ModelCard {
            model_name: "LightGBM + SMOTE".to_string(),
            auc: dec!(0.7163),
            accuracy: dec!(0.84),
            precision: dec!(0.08),
            recall: dec!(0.36),
            decision_threshold: dec!(0.0922),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelComparison {
    pub baseline_model: String,
    pub improved_model: String,
    pub auc_uplift_pct: Percent,
    pub recall_uplift_pct: Percent,
    pub accuracy_delta: Decimal,
    pub precision_delta: Decimal,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Relative uplift between two model evaluation summaries.
///
/// Uplifts are relative to the baseline; deltas are plain differences.
/// Recall is the headline number for a default-detection model, so it is
/// reported alongside AUC rather than folded into a single figure.
pub fn compare_models(
    baseline: &ModelCard,
    improved: &ModelCard,
) -> CreditRiskResult<ComputationOutput<ModelComparison>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_card(baseline, "baseline")?;
    validate_card(improved, "improved")?;

    if baseline.recall.is_zero() {
        return Err(CreditRiskError::DivisionByZero {
            context: "recall uplift (baseline recall is zero)".to_string(),
        });
    }

    let auc_uplift_pct = (improved.auc - baseline.auc) / baseline.auc * dec!(100);
    let recall_uplift_pct = (improved.recall - baseline.recall) / baseline.recall * dec!(100);

    if improved.auc < baseline.auc {
        warnings.push(format!(
            "{} scores below the baseline on AUC; the uplift is negative.",
            improved.model_name
        ));
    }

    let comparison = ModelComparison {
        baseline_model: baseline.model_name.clone(),
        improved_model: improved.model_name.clone(),
        auc_uplift_pct,
        recall_uplift_pct,
        accuracy_delta: improved.accuracy - baseline.accuracy,
        precision_delta: improved.precision - baseline.precision,
    };

    let assumptions = serde_json::json!({
        "uplift_basis": "relative to the baseline model",
        "baseline": baseline.model_name,
        "improved": improved.model_name,
    });

    Ok(ComputationOutput::wrap(
        comparison,
        "Model-to-model evaluation comparison",
        &assumptions,
        warnings,
        start,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_card(card: &ModelCard, role: &str) -> CreditRiskResult<()> {
    if card.auc <= dec!(0.5) || card.auc > Decimal::ONE {
        return Err(CreditRiskError::InvalidInput {
            field: format!("{role}.auc"),
            reason: "A usable ranker must score above 0.5 and at most 1.".into(),
        });
    }
    for (name, value) in [
        ("accuracy", card.accuracy),
        ("precision", card.precision),
        ("recall", card.recall),
        ("decision_threshold", card.decision_threshold),
    ] {
        if value < Decimal::ZERO || value > Decimal::ONE {
            return Err(CreditRiskError::InvalidInput {
                field: format!("{role}.{name}"),
                reason: "Must lie in [0, 1].".into(),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
