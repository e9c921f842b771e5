use serde_json::json;
use tracing::warn;

use super::handle::ModelHandle;
use super::result::PredictionResult;
use crate::data_loading::{FeatureSchema, RangePolicy, Sample};
use crate::error::{ErrorKind, PotabilityError, Result};

/// Výsledok pre prezentačnú vrstvu - chyba sa vracia ako hodnota, nie ako pád
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Ok(Vec<PredictionResult>),
    Err { kind: ErrorKind, message: String },
}

impl PredictionOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, PredictionOutcome::Ok(_))
    }
}

impl From<Result<Vec<PredictionResult>>> for PredictionOutcome {
    fn from(result: Result<Vec<PredictionResult>>) -> Self {
        match result {
            Ok(results) => PredictionOutcome::Ok(results),
            Err(e) => PredictionOutcome::Err {
                kind: e.kind(),
                message: e.to_string(),
            },
        }
    }
}

/// Kontrola vstupu podľa schémy ešte pred numerickým spracovaním
pub fn validate_samples(schema: &FeatureSchema, samples: &[Sample], policy: RangePolicy) -> Result<Vec<Sample>> {
    if samples.is_empty() {
        return Err(PotabilityError::InferenceFailure(
            "no samples to predict".to_string(),
        ));
    }
    samples
        .iter()
        .map(|sample| {
            let mut checked = Sample::new();
            for (name, value) in sample.iter() {
                checked.insert(name, schema.check_value(name, value, policy)?);
            }
            Ok(checked)
        })
        .collect()
}

/// Predikcia pre prezentačnú vrstvu: každá chyba skončí ako `PredictionOutcome::Err`
pub fn predict_outcome(handle: &ModelHandle, samples: &[Sample], policy: RangePolicy) -> PredictionOutcome {
    let result = validate_samples(&FeatureSchema::water(), samples, policy)
        .and_then(|checked| handle.get()?.predict_samples(&checked));
    if let Err(e) = &result {
        warn!(error = %e, "prediction failed");
    }
    result.into()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn render_result(result: &PredictionResult) -> String {
    let verdict = if result.is_potable() {
        format!(
            "The water is likely Safe (Potable). Confidence: {:.2}",
            result.confidence()
        )
    } else {
        format!(
            "The water is likely Unsafe (Not Potable). Confidence: {:.2}",
            result.confidence()
        )
    };
    let probabilities = json!({
        "Safe (Potable)": round2(result.probability_safe),
        "Unsafe (Not Potable)": round2(result.probability_unsafe),
    });
    format!("{}\nPrediction Probabilities: {}", verdict, probabilities)
}

/// Textová podoba výsledku
pub fn render_outcome(outcome: &PredictionOutcome) -> String {
    match outcome {
        PredictionOutcome::Err { message, .. } => format!("Prediction failed: {}", message),
        PredictionOutcome::Ok(results) if results.len() == 1 => render_result(&results[0]),
        PredictionOutcome::Ok(results) => results
            .iter()
            .enumerate()
            .map(|(idx, r)| format!("Row {}: {}", idx + 1, render_result(r)))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
