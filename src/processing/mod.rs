use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::error::{PotabilityError, Result};

pub trait DataProcessor {
    fn get_name(&self) -> &str;

    /// Naučí štatistiky z trénovacích dát
    fn fit(&mut self, data: &DenseMatrix<f64>) -> Result<()>;

    /// Aplikuje naučené štatistiky
    fn transform(&self, data: &DenseMatrix<f64>) -> Result<DenseMatrix<f64>>;

    fn fit_transform(&mut self, data: &DenseMatrix<f64>) -> Result<DenseMatrix<f64>> {
        self.fit(data)?;
        self.transform(data)
    }

    fn is_fitted(&self) -> bool;
}

pub mod scaler;
pub mod null_handler;
pub mod processor_decorator;

pub use scaler::StandardScaler;
pub use null_handler::MeanImputer;
pub use processor_decorator::{Processor, ProcessorChain};

/// Zostaví maticu z riadkov
pub fn matrix_from_rows(rows: &[Vec<f64>]) -> Result<DenseMatrix<f64>> {
    if rows.is_empty() {
        return Err(PotabilityError::InsufficientData(
            "cannot build a matrix from zero rows".to_string(),
        ));
    }
    Ok(DenseMatrix::from_2d_vec(&rows.to_vec())?)
}

/// Rozloží maticu späť na riadky
pub fn matrix_to_rows(data: &DenseMatrix<f64>) -> Vec<Vec<f64>> {
    let (rows, cols) = data.shape();
    (0..rows)
        .map(|i| (0..cols).map(|j| *data.get((i, j))).collect())
        .collect()
}

/// Kontrola, že matica má toľko stĺpcov, koľko bolo pri fit-e
pub(crate) fn check_width(name: &str, data: &DenseMatrix<f64>, expected: usize) -> Result<()> {
    let cols = data.shape().1;
    if cols != expected {
        return Err(PotabilityError::InferenceFailure(format!(
            "{} was fitted on {} columns, got {}",
            name, expected, cols
        )));
    }
    Ok(())
}
