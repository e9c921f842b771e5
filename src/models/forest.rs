use std::fmt;

use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use tracing::{debug, info};

use super::tree::{TreeParams, TreeWrapper};
use super::Classifier;
use crate::config::{MaxFeatures, TrainingConfig};
use crate::error::{PotabilityError, Result};
use crate::processing::matrix_to_rows;

/// Hyperparametre lesa
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_trees: usize,
    pub tree: TreeParams,
    pub max_features: MaxFeatures,
    pub bootstrap: bool,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self::from(&TrainingConfig::default())
    }
}

impl From<&TrainingConfig> for ForestParams {
    fn from(config: &TrainingConfig) -> Self {
        Self {
            n_trees: config.n_trees,
            tree: TreeParams {
                max_depth: config.max_depth,
                min_samples_split: config.min_samples_split,
                min_samples_leaf: config.min_samples_leaf,
            },
            max_features: config.max_features,
            bootstrap: config.bootstrap,
            seed: config.seed,
        }
    }
}

/// Random forest - bagging smartcore rozhodovacích stromov, hlasovanie väčšinou
#[derive(Serialize, Deserialize)]
pub struct RandomForest {
    params: ForestParams,
    trees: Vec<TreeWrapper>,
    n_features: usize,
}

impl fmt::Debug for RandomForest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomForest")
            .field("params", &self.params)
            .field("trees", &self.trees.len())
            .field("n_features", &self.n_features)
            .finish()
    }
}

impl RandomForest {
    pub fn new(params: ForestParams) -> Self {
        Self {
            params,
            trees: Vec::new(),
            n_features: 0,
        }
    }

    pub fn params(&self) -> &ForestParams {
        &self.params
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn trees(&self) -> &[TreeWrapper] {
        &self.trees
    }

    /// Náhodný stav stromu závisí iba od seed-u a indexu stromu
    fn tree_rng(&self, tree_idx: usize) -> StdRng {
        StdRng::seed_from_u64(self.params.seed.wrapping_add(tree_idx as u64))
    }

    fn fit_tree(&self, tree_idx: usize, rows: &[Vec<f64>], labels: &[u32]) -> Result<TreeWrapper> {
        let mut rng = self.tree_rng(tree_idx);
        let n = rows.len();

        let sample_indices: Vec<usize> = if self.params.bootstrap {
            (0..n).map(|_| rng.gen_range(0..n)).collect()
        } else {
            (0..n).collect()
        };

        let k = self.params.max_features.resolve(self.n_features);
        let mut features = index::sample(&mut rng, self.n_features, k).into_vec();
        features.sort_unstable();

        TreeWrapper::fit(rows, labels, &sample_indices, features, self.params.tree)
    }

    fn check_fitted(&self, x: &DenseMatrix<f64>) -> Result<()> {
        if self.trees.is_empty() {
            return Err(PotabilityError::InferenceFailure(
                "forest is not fitted".to_string(),
            ));
        }
        let cols = x.shape().1;
        if cols != self.n_features {
            return Err(PotabilityError::InferenceFailure(format!(
                "forest was fitted on {} features, got {}",
                self.n_features, cols
            )));
        }
        Ok(())
    }

    /// Počty hlasov [trieda 0, trieda 1] pre každý riadok
    pub fn predict_votes(&self, x: &DenseMatrix<f64>) -> Result<Vec<[usize; 2]>> {
        self.check_fitted(x)?;
        let rows = matrix_to_rows(x);
        let mut votes = vec![[0usize; 2]; rows.len()];
        for tree in &self.trees {
            for (vote, label) in votes.iter_mut().zip(tree.predict(&rows)?) {
                vote[usize::from(label == 1)] += 1;
            }
        }
        Ok(votes)
    }
}

impl Classifier for RandomForest {
    fn get_name(&self) -> &str {
        "Random Forest"
    }

    fn fit(&mut self, x: &DenseMatrix<f64>, y: &[u32]) -> Result<()> {
        let (n_rows, n_cols) = x.shape();
        if n_rows != y.len() {
            return Err(PotabilityError::SchemaMismatch(format!(
                "Sample count mismatch: X has {}, y has {}",
                n_rows,
                y.len()
            )));
        }
        if n_rows == 0 || n_cols == 0 {
            return Err(PotabilityError::InsufficientData(
                "cannot fit a forest on an empty matrix".to_string(),
            ));
        }
        if let Some(bad) = y.iter().find(|&&l| l > 1) {
            return Err(PotabilityError::SchemaMismatch(format!(
                "labels must be 0 or 1, found {}",
                bad
            )));
        }

        self.n_features = n_cols;
        let rows = matrix_to_rows(x);

        let this = &*self;
        let trees = (0..this.params.n_trees)
            .into_par_iter()
            .map(|idx| this.fit_tree(idx, &rows, y))
            .collect::<Result<Vec<_>>>()?;

        let constant = trees.iter().filter(|t| t.is_constant()).count();
        debug!(constant, "single-class trees in forest");
        info!(trees = trees.len(), features = n_cols, samples = n_rows, "forest fitted");
        self.trees = trees;
        Ok(())
    }

    fn predict(&self, x: &DenseMatrix<f64>) -> Result<Vec<u32>> {
        Ok(self
            .predict_votes(x)?
            .into_iter()
            .map(|[neg, pos]| u32::from(pos > neg))
            .collect())
    }

    fn predict_proba(&self, x: &DenseMatrix<f64>) -> Result<Vec<[f64; 2]>> {
        let total = self.trees.len() as f64;
        Ok(self
            .predict_votes(x)?
            .into_iter()
            .map(|[neg, pos]| [neg as f64 / total, pos as f64 / total])
            .collect())
    }

    fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::matrix_from_rows;

    fn separable() -> (DenseMatrix<f64>, Vec<u32>) {
        let rows: Vec<Vec<f64>> = (0..60)
            .map(|i| vec![i as f64, (i % 7) as f64, 3.0])
            .collect();
        let labels = (0..60).map(|i| u32::from(i >= 30)).collect();
        (matrix_from_rows(&rows).unwrap(), labels)
    }

    fn small_params(seed: u64) -> ForestParams {
        ForestParams {
            n_trees: 15,
            max_features: MaxFeatures::All,
            seed,
            ..ForestParams::default()
        }
    }

    #[test]
    fn fits_requested_number_of_trees() {
        let (x, y) = separable();
        let mut forest = RandomForest::new(small_params(7));
        assert!(!forest.is_fitted());
        forest.fit(&x, &y).unwrap();
        assert_eq!(forest.n_trees(), 15);
        assert_eq!(forest.n_features(), 3);
    }

    #[test]
    fn probabilities_are_vote_shares() {
        let (x, y) = separable();
        let mut forest = RandomForest::new(small_params(7));
        forest.fit(&x, &y).unwrap();

        let probe = matrix_from_rows(&[vec![2.0, 2.0, 3.0], vec![57.0, 1.0, 3.0]]).unwrap();
        let proba = forest.predict_proba(&probe).unwrap();
        for [p0, p1] in &proba {
            assert!((p0 + p1 - 1.0).abs() < 1e-9);
        }
        assert_eq!(forest.predict(&probe).unwrap(), vec![0, 1]);
    }

    #[test]
    fn same_seed_same_forest() {
        let (x, y) = separable();
        let mut a = RandomForest::new(small_params(11));
        let mut b = RandomForest::new(small_params(11));
        a.fit(&x, &y).unwrap();
        b.fit(&x, &y).unwrap();
        let features_a: Vec<&[usize]> = a.trees().iter().map(|t| t.features()).collect();
        let features_b: Vec<&[usize]> = b.trees().iter().map(|t| t.features()).collect();
        assert_eq!(features_a, features_b);
        assert_eq!(a.predict_votes(&x).unwrap(), b.predict_votes(&x).unwrap());
    }

    #[test]
    fn sqrt_subspace_limits_features_per_tree() {
        let (x, y) = separable();
        let mut forest = RandomForest::new(ForestParams {
            max_features: MaxFeatures::Sqrt,
            ..small_params(3)
        });
        forest.fit(&x, &y).unwrap();
        assert!(forest.trees().iter().all(|t| t.features().len() == 2));
    }

    #[test]
    fn rejects_non_binary_labels_and_wrong_width() {
        let (x, mut y) = separable();
        y[0] = 2;
        assert!(RandomForest::new(small_params(1)).fit(&x, &y).is_err());

        let (x, y) = separable();
        let mut forest = RandomForest::new(small_params(1));
        forest.fit(&x, &y).unwrap();
        let narrow = matrix_from_rows(&[vec![1.0, 2.0]]).unwrap();
        assert!(matches!(
            forest.predict(&narrow),
            Err(PotabilityError::InferenceFailure(_))
        ));
    }

    #[test]
    fn unfitted_forest_refuses_to_predict() {
        let probe = matrix_from_rows(&[vec![1.0, 2.0, 3.0]]).unwrap();
        assert!(RandomForest::new(small_params(1)).predict_proba(&probe).is_err());
    }
}
