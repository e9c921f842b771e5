use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::tree::decision_tree_classifier::{
    DecisionTreeClassifier, DecisionTreeClassifierParameters,
};
use tracing::warn;

use crate::error::Result;
use crate::processing::matrix_from_rows;

type Tree = DecisionTreeClassifier<f64, u32, DenseMatrix<f64>, Vec<u32>>;

/// Hyperparametre jedného stromu
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeParams {
    pub max_depth: Option<u16>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

impl TreeParams {
    fn to_smartcore(self) -> DecisionTreeClassifierParameters {
        let mut params = DecisionTreeClassifierParameters::default()
            .with_min_samples_split(self.min_samples_split)
            .with_min_samples_leaf(self.min_samples_leaf);
        if let Some(depth) = self.max_depth {
            params = params.with_max_depth(depth);
        }
        params
    }
}

#[derive(Serialize, Deserialize)]
enum TreeModel {
    Fitted(Tree),
    /// Vzorka obsahovala iba jednu triedu, smartcore taký strom nepostaví
    Constant(u32),
}

/// Jeden strom lesa: podmnožina features + natrénovaný smartcore strom
#[derive(Serialize, Deserialize)]
pub struct TreeWrapper {
    features: Vec<usize>,
    model: TreeModel,
}

impl TreeWrapper {
    /// Natrénuje strom na vybraných riadkoch a stĺpcoch
    pub fn fit(
        rows: &[Vec<f64>],
        labels: &[u32],
        sample_indices: &[usize],
        features: Vec<usize>,
        params: TreeParams,
    ) -> Result<Self> {
        let y: Vec<u32> = sample_indices.iter().map(|&i| labels[i]).collect();

        let first = y.first().copied().unwrap_or(0);
        if y.iter().all(|&l| l == first) {
            warn!(label = first, samples = y.len(), "bootstrap sample holds a single class");
            return Ok(Self {
                features,
                model: TreeModel::Constant(first),
            });
        }

        let projected: Vec<Vec<f64>> = sample_indices
            .iter()
            .map(|&i| Self::project(&rows[i], &features))
            .collect();
        let x = matrix_from_rows(&projected)?;
        let tree = Tree::fit(&x, &y, params.to_smartcore())?;

        Ok(Self {
            features,
            model: TreeModel::Fitted(tree),
        })
    }

    fn project(row: &[f64], features: &[usize]) -> Vec<f64> {
        features.iter().map(|&j| row[j]).collect()
    }

    pub fn features(&self) -> &[usize] {
        &self.features
    }

    pub fn is_constant(&self) -> bool {
        matches!(self.model, TreeModel::Constant(_))
    }

    /// Predikcia tried pre všetky riadky
    pub fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<u32>> {
        match &self.model {
            TreeModel::Constant(label) => Ok(vec![*label; rows.len()]),
            TreeModel::Fitted(tree) => {
                if rows.is_empty() {
                    return Ok(Vec::new());
                }
                let projected: Vec<Vec<f64>> = rows
                    .iter()
                    .map(|r| Self::project(r, &self.features))
                    .collect();
                let x = matrix_from_rows(&projected)?;
                Ok(tree.predict(&x)?)
            }
        }
    }
}
