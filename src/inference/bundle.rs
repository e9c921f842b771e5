use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::result::PredictionResult;
use crate::data_loading::Sample;
use crate::error::{PotabilityError, Result};
use crate::pipeline::FittedPipeline;

/// Uložený artefakt: natrénovaný pipeline + poradie features z tréningu
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelBundle {
    pub pipeline: FittedPipeline,
    pub feature_names: Vec<String>,
}

impl ModelBundle {
    pub fn new(pipeline: FittedPipeline, feature_names: Vec<String>) -> Result<Self> {
        Self::check(&pipeline, &feature_names).map_err(PotabilityError::SchemaMismatch)?;
        Ok(Self {
            pipeline,
            feature_names,
        })
    }

    fn check(pipeline: &FittedPipeline, feature_names: &[String]) -> std::result::Result<(), String> {
        if !pipeline.is_consistent() {
            return Err("pipeline stages are not fitted consistently".to_string());
        }
        if feature_names.len() != pipeline.n_features() {
            return Err(format!(
                "{} feature names for a pipeline fitted on {} features",
                feature_names.len(),
                pipeline.n_features()
            ));
        }
        let unique: BTreeSet<String> = feature_names.iter().map(|n| n.to_lowercase()).collect();
        if unique.len() != feature_names.len() {
            return Err(format!("duplicate feature names: {:?}", feature_names));
        }
        Ok(())
    }

    /// Zapíše bundle; existujúci súbor sa prepíše
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let unwritable = |source: std::io::Error| PotabilityError::ArtifactUnwritable {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(unwritable)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self).map_err(|e| unwritable(e.into()))?;
        writer.flush().map_err(unwritable)?;

        info!(path = %path.display(), features = self.feature_names.len(), "model bundle saved");
        Ok(())
    }

    /// Načíta bundle zo súboru (bez cache)
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| PotabilityError::ArtifactUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let bundle: ModelBundle = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            if e.is_io() {
                PotabilityError::ArtifactUnreadable {
                    path: path.to_path_buf(),
                    source: e.into(),
                }
            } else {
                PotabilityError::ArtifactCorrupt {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
            }
        })?;

        Self::check(&bundle.pipeline, &bundle.feature_names).map_err(|reason| {
            PotabilityError::ArtifactCorrupt {
                path: path.to_path_buf(),
                reason,
            }
        })?;

        info!(
            path = %path.display(),
            trees = bundle.pipeline.classifier().n_trees(),
            features = ?bundle.feature_names,
            "model bundle loaded"
        );
        Ok(bundle)
    }

    /// Zoradí vstup podľa `feature_names`. Chýbajúca feature je NaN (doplní ju imputer),
    /// stĺpce mimo schémy modelu sa zahodia.
    pub fn align(&self, samples: &[Sample]) -> Result<Vec<Vec<f64>>> {
        let mut dropped: BTreeSet<&str> = BTreeSet::new();
        let mut rows = Vec::with_capacity(samples.len());

        for (idx, sample) in samples.iter().enumerate() {
            for name in sample.names() {
                if !self.feature_names.iter().any(|f| f.eq_ignore_ascii_case(name)) {
                    dropped.insert(name);
                }
            }

            let mut row = Vec::with_capacity(self.feature_names.len());
            for feature in &self.feature_names {
                // `pH` a `ph` v jednej vzorke nie je možné jednoznačne priradiť
                let matching: Vec<&str> = sample
                    .names()
                    .filter(|name| name.eq_ignore_ascii_case(feature))
                    .collect();
                if matching.len() > 1 {
                    return Err(PotabilityError::InferenceFailure(format!(
                        "row {} has ambiguous columns {:?} for feature '{}'",
                        idx + 1,
                        matching,
                        feature
                    )));
                }
                let value = sample.get(feature).unwrap_or(f64::NAN);
                if value.is_infinite() {
                    return Err(PotabilityError::InferenceFailure(format!(
                        "feature '{}' in row {} is not finite",
                        feature,
                        idx + 1
                    )));
                }
                row.push(value);
            }
            rows.push(row);
        }

        if !dropped.is_empty() {
            warn!(columns = ?dropped, "dropping columns unknown to the model");
        }
        debug!(rows = rows.len(), "input aligned to model features");
        Ok(rows)
    }

    pub fn predict(&self, samples: &[Sample]) -> Result<Vec<u32>> {
        if samples.is_empty() {
            return Ok(Vec::new());
        }
        let rows = self.align(samples)?;
        self.pipeline.predict_rows(&rows)
    }

    pub fn predict_proba(&self, samples: &[Sample]) -> Result<Vec<[f64; 2]>> {
        if samples.is_empty() {
            return Ok(Vec::new());
        }
        let rows = self.align(samples)?;
        self.pipeline.predict_proba_rows(&rows)
    }

    /// Label aj pravdepodobnosti pre každú vzorku
    pub fn predict_samples(&self, samples: &[Sample]) -> Result<Vec<PredictionResult>> {
        Ok(self
            .predict_proba(samples)?
            .into_iter()
            .map(PredictionResult::from_proba)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::PipelineDirector;

    fn bundle() -> ModelBundle {
        let rows: Vec<Vec<f64>> = (0..30)
            .map(|i| {
                let label = (i % 2) as f64;
                vec![5.0 + 3.0 * label, 200.0 + i as f64, 4.0 - label]
            })
            .collect();
        let labels: Vec<u32> = (0..30).map(|i| i % 2).collect();
        let fitted = PipelineDirector::build_quick(5, 9)
            .unwrap()
            .fit(&rows, &labels)
            .unwrap();
        let names = vec!["ph".to_string(), "Hardness".to_string(), "Turbidity".to_string()];
        ModelBundle::new(fitted, names).unwrap()
    }

    #[test]
    fn align_reorders_and_fills_missing() {
        let b = bundle();
        let sample = Sample::new()
            .with("Turbidity", 3.0)
            .with("pH", 8.0)
            .with("Color", 1.0);
        let rows = b.align(&[sample]).unwrap();
        assert_eq!(rows[0][0], 8.0);
        assert!(rows[0][1].is_nan());
        assert_eq!(rows[0][2], 3.0);
    }

    #[test]
    fn case_only_duplicates_are_rejected() {
        let b = bundle();
        let sample = Sample::new().with("pH", 7.0).with("ph", 3.0);
        let err = b.align(&[sample]).unwrap_err();
        assert!(matches!(err, PotabilityError::InferenceFailure(_)));
        assert!(err.to_string().contains("ambiguous"));
    }

    #[test]
    fn infinite_values_fail() {
        let b = bundle();
        let sample = Sample::new().with("ph", f64::INFINITY);
        assert!(matches!(
            b.align(&[sample]),
            Err(PotabilityError::InferenceFailure(_))
        ));
    }

    #[test]
    fn probabilities_sum_to_one() {
        let b = bundle();
        let samples = vec![
            Sample::new().with("ph", 8.0).with("Hardness", 210.0).with("Turbidity", 3.0),
            Sample::new(),
        ];
        for result in b.predict_samples(&samples).unwrap() {
            assert!(result.label <= 1);
            assert!((result.probability_safe + result.probability_unsafe - 1.0).abs() < 1e-6);
        }
        assert!(b.predict(&[]).unwrap().is_empty());
    }

    #[test]
    fn save_and_load_roundtrip_predicts_the_same() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.pkl");
        let b = bundle();
        b.save(&path).unwrap();

        let samples = vec![Sample::new().with("ph", 5.5).with("Hardness", 190.0)];
        let loaded = ModelBundle::load(&path).unwrap();
        assert_eq!(loaded.feature_names, b.feature_names);
        assert_eq!(
            loaded.predict_proba(&samples).unwrap(),
            b.predict_proba(&samples).unwrap()
        );
    }

    #[test]
    fn garbage_file_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.pkl");
        std::fs::write(&path, b"not a model").unwrap();
        assert!(matches!(
            ModelBundle::load(&path),
            Err(PotabilityError::ArtifactCorrupt { .. })
        ));
    }

    #[test]
    fn feature_count_must_match_pipeline() {
        let b = bundle();
        assert!(ModelBundle::new(b.pipeline, vec!["ph".to_string()]).is_err());
    }
}
