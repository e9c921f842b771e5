use serde::{Deserialize, Serialize};

use crate::error::{PotabilityError, Result};

pub const DEFAULT_DATA_PATH: &str = "water_potability.csv";
pub const DEFAULT_MODEL_PATH: &str = "water_quality_model.pkl";
pub const LABEL_COLUMN: &str = "Potability";

/// Počet features, ktoré vidí každý strom lesa
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxFeatures {
    All,
    Sqrt,
    Count(usize),
}

impl MaxFeatures {
    /// Vyhodnotí počet features pre daný počet stĺpcov (vždy aspoň 1)
    pub fn resolve(&self, n_features: usize) -> usize {
        let n = match self {
            MaxFeatures::All => n_features,
            MaxFeatures::Sqrt => (n_features as f64).sqrt().ceil() as usize,
            MaxFeatures::Count(k) => *k,
        };
        n.clamp(1, n_features.max(1))
    }
}

/// Konfigurácia tréningu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub test_fraction: f64,
    pub seed: u64,
    pub n_trees: usize,
    pub max_depth: Option<u16>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    pub max_features: MaxFeatures,
    pub bootstrap: bool,
    pub label_column: String,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 42,
            n_trees: 200,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: MaxFeatures::All,
            bootstrap: true,
            label_column: LABEL_COLUMN.to_string(),
        }
    }
}

impl TrainingConfig {
    /// Načíta konfiguráciu z JSON, chýbajúce kľúče dostanú default hodnoty
    pub fn from_json(json: &str) -> Result<Self> {
        let config: TrainingConfig = serde_json::from_str(json)
            .map_err(|e| PotabilityError::InvalidConfig(format!("Config parse error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_test_fraction(mut self, test_fraction: f64) -> Self {
        self.test_fraction = test_fraction;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_n_trees(mut self, n_trees: usize) -> Self {
        self.n_trees = n_trees;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u16) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_max_features(mut self, max_features: MaxFeatures) -> Self {
        self.max_features = max_features;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(PotabilityError::InvalidConfig(format!(
                "test_fraction must lie in (0, 1), got {}",
                self.test_fraction
            )));
        }
        if self.n_trees == 0 {
            return Err(PotabilityError::InvalidConfig(
                "n_trees must be at least 1".to_string(),
            ));
        }
        if self.min_samples_split < 2 {
            return Err(PotabilityError::InvalidConfig(
                "min_samples_split must be at least 2".to_string(),
            ));
        }
        if self.min_samples_leaf == 0 {
            return Err(PotabilityError::InvalidConfig(
                "min_samples_leaf must be at least 1".to_string(),
            ));
        }
        if let MaxFeatures::Count(0) = self.max_features {
            return Err(PotabilityError::InvalidConfig(
                "max_features must be at least 1".to_string(),
            ));
        }
        if self.label_column.trim().is_empty() {
            return Err(PotabilityError::InvalidConfig(
                "label_column must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_training_run() {
        let config = TrainingConfig::default();
        assert_eq!(config.n_trees, 200);
        assert_eq!(config.seed, 42);
        assert!((config.test_fraction - 0.2).abs() < f64::EPSILON);
        assert_eq!(config.label_column, "Potability");
        assert_eq!(config.max_features, MaxFeatures::All);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn feature_subspace_is_configurable() {
        let config = TrainingConfig::default().with_max_features(MaxFeatures::Sqrt);
        assert_eq!(config.max_features.resolve(9), 3);
        assert!(config.validate().is_ok());

        let empty = TrainingConfig::default().with_max_features(MaxFeatures::Count(0));
        assert!(matches!(empty.validate(), Err(PotabilityError::InvalidConfig(_))));
    }

    #[test]
    fn from_json_fills_missing_keys() {
        let config = TrainingConfig::from_json(r#"{"n_trees": 10, "max_features": {"count": 4}}"#)
            .expect("valid config");
        assert_eq!(config.n_trees, 10);
        assert_eq!(config.max_features, MaxFeatures::Count(4));
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn rejects_out_of_bounds_test_fraction() {
        for fraction in [0.0, 1.0, -0.5, f64::NAN] {
            let config = TrainingConfig::default().with_test_fraction(fraction);
            assert!(matches!(
                config.validate(),
                Err(PotabilityError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn max_features_resolution() {
        assert_eq!(MaxFeatures::All.resolve(9), 9);
        assert_eq!(MaxFeatures::Sqrt.resolve(9), 3);
        assert_eq!(MaxFeatures::Sqrt.resolve(10), 4);
        assert_eq!(MaxFeatures::Count(50).resolve(9), 9);
        assert_eq!(MaxFeatures::Count(0).resolve(9), 1);
    }
}
