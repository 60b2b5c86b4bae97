use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

#[napi]
pub fn assess_applicant(input_json: String) -> NapiResult<String> {
    let profile: credit_risk_core::scoring::simulator::ApplicantProfile =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        credit_risk_core::scoring::simulator::assess(&profile).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn benchmark_profiles(candidate_json: Option<String>) -> NapiResult<String> {
    let candidate: Option<credit_risk_core::scoring::simulator::ApplicantProfile> =
        match candidate_json {
            Some(json) => Some(serde_json::from_str(&json).map_err(to_napi_error)?),
            None => None,
        };
    let output = credit_risk_core::scoring::benchmark::compare(candidate.as_ref())
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// ROI
// ---------------------------------------------------------------------------

#[napi]
pub fn roi_projection(input_json: String) -> NapiResult<String> {
    let scenario: credit_risk_core::roi::projection::FinancialScenario =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        credit_risk_core::roi::projection::compute(&scenario).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn roi_sensitivity(input_json: String) -> NapiResult<String> {
    let input: credit_risk_core::roi::sensitivity::RoiSensitivityInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = credit_risk_core::roi::sensitivity::sweep(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn roi_timeline(input_json: String) -> NapiResult<String> {
    let scenario: credit_risk_core::roi::projection::FinancialScenario =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = credit_risk_core::roi::timeline::project(&scenario).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// One canned business case with its label, for preset dropdowns.
#[derive(serde::Serialize)]
struct PresetEntry {
    name: String,
    scenario: credit_risk_core::roi::projection::FinancialScenario,
}

#[napi]
pub fn scenario_presets() -> NapiResult<String> {
    let entries: Vec<PresetEntry> = credit_risk_core::roi::presets::ScenarioPreset::all()
        .iter()
        .map(|preset| PresetEntry {
            name: preset.to_string(),
            scenario: preset.scenario(),
        })
        .collect();
    serde_json::to_string(&entries).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Model metrics
// ---------------------------------------------------------------------------

#[napi]
pub fn classification_metrics(input_json: String) -> NapiResult<String> {
    let counts: credit_risk_core::model_metrics::confusion::ConfusionCounts =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = credit_risk_core::model_metrics::confusion::calculate_metrics(&counts)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn derive_confusion_counts(input_json: String) -> NapiResult<String> {
    let rates: credit_risk_core::model_metrics::confusion::ReportedRatesInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = credit_risk_core::model_metrics::confusion::derive_counts(&rates)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Both sides of a model comparison in one JSON document.
#[derive(serde::Deserialize)]
struct CardPairBinding {
    baseline: credit_risk_core::model_metrics::report::ModelCard,
    improved: credit_risk_core::model_metrics::report::ModelCard,
}

#[napi]
pub fn compare_models(input_json: String) -> NapiResult<String> {
    let pair: CardPairBinding = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        credit_risk_core::model_metrics::report::compare_models(&pair.baseline, &pair.improved)
            .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn business_impact(input_json: String) -> NapiResult<String> {
    let input: credit_risk_core::model_metrics::uplift::BusinessImpactInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = credit_risk_core::model_metrics::uplift::estimate_impact(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// The published evaluation cards side by side, for dashboard headers.
#[derive(serde::Serialize)]
struct PublishedCards {
    baseline: credit_risk_core::model_metrics::report::ModelCard,
    tuned: credit_risk_core::model_metrics::report::ModelCard,
}

#[napi]
pub fn model_cards() -> NapiResult<String> {
    let cards = PublishedCards {
        baseline: credit_risk_core::model_metrics::report::ModelCard::baseline(),
        tuned: credit_risk_core::model_metrics::report::ModelCard::tuned(),
    };
    serde_json::to_string(&cards).map_err(to_napi_error)
}
