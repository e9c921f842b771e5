use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use tracing::info;

use crate::error::{PotabilityError, Result};
use crate::models::{Classifier, RandomForest};
use crate::processing::{matrix_from_rows, DataProcessor, ProcessorChain};

/// Nenatrénovaný pipeline - predspracovanie + klasifikátor, fit-uje sa naraz
#[derive(Debug)]
pub struct UnfittedPipeline {
    preprocessing: ProcessorChain,
    classifier: RandomForest,
}

impl UnfittedPipeline {
    pub(crate) fn new(preprocessing: ProcessorChain, classifier: RandomForest) -> Self {
        Self {
            preprocessing,
            classifier,
        }
    }

    pub fn info(&self) -> PipelineInfo {
        PipelineInfo::collect(&self.preprocessing, &self.classifier, 0)
    }

    /// Natrénuje všetky tri kroky ako jeden celok
    pub fn fit(mut self, rows: &[Vec<f64>], labels: &[u32]) -> Result<FittedPipeline> {
        if rows.len() != labels.len() {
            return Err(PotabilityError::SchemaMismatch(format!(
                "Sample count mismatch: X has {}, y has {}",
                rows.len(),
                labels.len()
            )));
        }
        let x = matrix_from_rows(rows)?;
        let n_features = x.shape().1;

        let prepared = self.preprocessing.fit_transform(&x)?;
        self.classifier.fit(&prepared, labels)?;

        info!(samples = rows.len(), features = n_features, "pipeline fitted");
        Ok(FittedPipeline {
            preprocessing: self.preprocessing,
            classifier: self.classifier,
            n_features,
        })
    }
}

/// Natrénovaný pipeline; vstupné stĺpce musia byť v poradí z fit-u
#[derive(Debug, Serialize, Deserialize)]
pub struct FittedPipeline {
    preprocessing: ProcessorChain,
    classifier: RandomForest,
    n_features: usize,
}

impl FittedPipeline {
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn preprocessing(&self) -> &ProcessorChain {
        &self.preprocessing
    }

    pub fn classifier(&self) -> &RandomForest {
        &self.classifier
    }

    /// Pipeline po deserializácii - všetky kroky musia byť natrénované a zhodné v šírke
    pub fn is_consistent(&self) -> bool {
        self.preprocessing.is_fitted()
            && self.classifier.is_fitted()
            && self.classifier.n_features() == self.n_features
    }

    /// Spracuje dáta cez imputer a scaler
    pub fn preprocess(&self, x: &DenseMatrix<f64>) -> Result<DenseMatrix<f64>> {
        let cols = x.shape().1;
        if cols != self.n_features {
            return Err(PotabilityError::InferenceFailure(format!(
                "pipeline expects {} features, got {}",
                self.n_features, cols
            )));
        }
        self.preprocessing.transform(x)
    }

    pub fn predict(&self, x: &DenseMatrix<f64>) -> Result<Vec<u32>> {
        let prepared = self.preprocess(x)?;
        self.classifier.predict(&prepared)
    }

    pub fn predict_proba(&self, x: &DenseMatrix<f64>) -> Result<Vec<[f64; 2]>> {
        let prepared = self.preprocess(x)?;
        self.classifier.predict_proba(&prepared)
    }

    /// Predikcia z pozičných riadkov
    pub fn predict_rows(&self, rows: &[Vec<f64>]) -> Result<Vec<u32>> {
        self.predict(&matrix_from_rows(rows)?)
    }

    pub fn predict_proba_rows(&self, rows: &[Vec<f64>]) -> Result<Vec<[f64; 2]>> {
        self.predict_proba(&matrix_from_rows(rows)?)
    }

    pub fn info(&self) -> PipelineInfo {
        PipelineInfo::collect(&self.preprocessing, &self.classifier, self.n_features)
    }
}

/// Informácie o nakonfigurovanom pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineInfo {
    pub stages: Vec<String>,
    pub n_trees: usize,
    pub seed: u64,
    pub n_features: usize,
}

impl PipelineInfo {
    fn collect(preprocessing: &ProcessorChain, classifier: &RandomForest, n_features: usize) -> Self {
        let mut stages: Vec<String> = preprocessing.names().into_iter().map(String::from).collect();
        stages.push(classifier.get_name().to_string());
        Self {
            stages,
            n_trees: classifier.params().n_trees,
            seed: classifier.params().seed,
            n_features,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::PipelineBuilder;
    use crate::config::MaxFeatures;

    fn toy() -> (Vec<Vec<f64>>, Vec<u32>) {
        let rows = (0..40)
            .map(|i| {
                let ph = if i % 5 == 0 { f64::NAN } else { 5.0 + (i % 10) as f64 * 0.3 };
                vec![ph, 100.0 + i as f64 * 5.0]
            })
            .collect();
        let labels = (0..40).map(|i| u32::from(i >= 20)).collect();
        (rows, labels)
    }

    #[test]
    fn fit_then_predict_with_missing_values() {
        let (rows, labels) = toy();
        let fitted = PipelineBuilder::new()
            .n_trees(10)
            .max_features(MaxFeatures::All)
            .build()
            .unwrap()
            .fit(&rows, &labels)
            .unwrap();

        assert!(fitted.is_consistent());
        assert_eq!(fitted.n_features(), 2);

        let probe = vec![vec![f64::NAN, 105.0], vec![7.0, 295.0]];
        let labels = fitted.predict_rows(&probe).unwrap();
        assert_eq!(labels, vec![0, 1]);
        for [p0, p1] in fitted.predict_proba_rows(&probe).unwrap() {
            assert!((p0 + p1 - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn wrong_width_is_rejected_before_preprocessing() {
        let (rows, labels) = toy();
        let fitted = PipelineBuilder::new()
            .n_trees(3)
            .build()
            .unwrap()
            .fit(&rows, &labels)
            .unwrap();
        let result = fitted.predict_rows(&[vec![1.0, 2.0, 3.0]]);
        assert!(matches!(result, Err(PotabilityError::InferenceFailure(_))));
    }

    #[test]
    fn mismatched_label_count_fails() {
        let (rows, _) = toy();
        let result = PipelineBuilder::new().n_trees(2).build().unwrap().fit(&rows, &[0, 1]);
        assert!(result.is_err());
    }
}
