use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::error::Result;

/// Binárny klasifikátor nad už predspracovanou maticou
pub trait Classifier {
    fn get_name(&self) -> &str;

    fn fit(&mut self, x: &DenseMatrix<f64>, y: &[u32]) -> Result<()>;

    fn predict(&self, x: &DenseMatrix<f64>) -> Result<Vec<u32>>;

    /// Pravdepodobnosti [trieda 0, trieda 1] pre každý riadok
    fn predict_proba(&self, x: &DenseMatrix<f64>) -> Result<Vec<[f64; 2]>>;

    fn is_fitted(&self) -> bool;
}

pub mod tree;
pub mod forest;

pub use tree::{TreeParams, TreeWrapper};
pub use forest::{ForestParams, RandomForest};
