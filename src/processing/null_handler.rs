use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::arrays::{Array, MutArray};
use smartcore::linalg::basic::matrix::DenseMatrix;
use tracing::{debug, warn};

use super::{check_width, DataProcessor};
use crate::error::{PotabilityError, Result};

/// Procesor pre nahradenie chýbajúcich (NaN) hodnôt priemerom stĺpca z trénovacích dát
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeanImputer {
    means: Option<Vec<f64>>,
}

impl MeanImputer {
    pub fn new() -> Self {
        Self { means: None }
    }

    pub fn statistics(&self) -> Option<&[f64]> {
        self.means.as_deref()
    }

    fn calculate_column_mean(data: &DenseMatrix<f64>, col: usize) -> Option<f64> {
        let mut sum = 0.0;
        let mut count = 0;
        for row in 0..data.shape().0 {
            let val = *data.get((row, col));
            if !val.is_nan() {
                sum += val;
                count += 1;
            }
        }
        if count > 0 { Some(sum / count as f64) } else { None }
    }
}

impl DataProcessor for MeanImputer {
    fn get_name(&self) -> &str {
        "Mean Imputer"
    }

    fn fit(&mut self, data: &DenseMatrix<f64>) -> Result<()> {
        let cols = data.shape().1;
        let mut means = Vec::with_capacity(cols);
        for col in 0..cols {
            let mean = match Self::calculate_column_mean(data, col) {
                Some(mean) => mean,
                None => {
                    // stĺpec bez jedinej hodnoty - nie je čím imputovať
                    warn!(column = col, "column has no observed values, imputing 0.0");
                    0.0
                }
            };
            means.push(mean);
        }
        debug!(?means, "imputer fitted");
        self.means = Some(means);
        Ok(())
    }

    fn transform(&self, data: &DenseMatrix<f64>) -> Result<DenseMatrix<f64>> {
        let means = self.means.as_ref().ok_or_else(|| {
            PotabilityError::InferenceFailure("imputer is not fitted".to_string())
        })?;
        check_width(self.get_name(), data, means.len())?;

        let (rows, cols) = data.shape();
        let mut result = data.clone();
        for row in 0..rows {
            for col in 0..cols {
                if data.get((row, col)).is_nan() {
                    result.set((row, col), means[col]);
                }
            }
        }
        Ok(result)
    }

    fn is_fitted(&self) -> bool {
        self.means.is_some()
    }
}
