use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::arrays::{Array, MutArray};
use smartcore::linalg::basic::matrix::DenseMatrix;
use tracing::debug;

use super::{check_width, DataProcessor};
use crate::error::{PotabilityError, Result};

/// Standard Scaler - (x - mean) / std so štatistikami z trénovacích dát
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Option<Vec<f64>>,
    stds: Option<Vec<f64>>,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self {
            means: None,
            stds: None,
        }
    }

    pub fn means(&self) -> Option<&[f64]> {
        self.means.as_deref()
    }

    /// Smerodajné odchýlky; nulový rozptyl je uložený ako 1.0
    pub fn scales(&self) -> Option<&[f64]> {
        self.stds.as_deref()
    }
}

impl DataProcessor for StandardScaler {
    fn get_name(&self) -> &str {
        "Standard Scaler"
    }

    fn fit(&mut self, data: &DenseMatrix<f64>) -> Result<()> {
        let (rows, cols) = data.shape();
        if rows == 0 {
            return Err(PotabilityError::InsufficientData(
                "cannot fit scaler on zero rows".to_string(),
            ));
        }

        let mut means = Vec::with_capacity(cols);
        let mut stds = Vec::with_capacity(cols);
        for j in 0..cols {
            let col: Vec<f64> = (0..rows).map(|i| *data.get((i, j))).collect();
            if col.iter().any(|v| v.is_nan()) {
                return Err(PotabilityError::InferenceFailure(format!(
                    "scaler received a missing value in column {}",
                    j
                )));
            }
            let mean = col.iter().sum::<f64>() / rows as f64;
            let var = col.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / rows as f64;
            let std = var.sqrt();

            means.push(mean);
            stds.push(if std > 0.0 { std } else { 1.0 });
        }

        debug!(?means, ?stds, "scaler fitted");
        self.means = Some(means);
        self.stds = Some(stds);
        Ok(())
    }

    fn transform(&self, data: &DenseMatrix<f64>) -> Result<DenseMatrix<f64>> {
        let (Some(means), Some(stds)) = (&self.means, &self.stds) else {
            return Err(PotabilityError::InferenceFailure(
                "scaler is not fitted".to_string(),
            ));
        };
        check_width(self.get_name(), data, means.len())?;

        let (rows, cols) = data.shape();
        let mut result = data.clone();
        for j in 0..cols {
            for i in 0..rows {
                let val = (data.get((i, j)) - means[j]) / stds[j];
                result.set((i, j), val);
            }
        }
        Ok(result)
    }

    fn is_fitted(&self) -> bool {
        self.means.is_some() && self.stds.is_some()
    }
}
