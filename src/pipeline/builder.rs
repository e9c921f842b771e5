use crate::config::{MaxFeatures, TrainingConfig};
use crate::error::{PotabilityError, Result};
use crate::models::{ForestParams, RandomForest};
use crate::processing::{MeanImputer, Processor, ProcessorChain, StandardScaler};
use super::pipeline::UnfittedPipeline;

/// Builder pre konfiguráciu pipeline imputer -> scaler -> random forest
pub struct PipelineBuilder {
    params: ForestParams,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            params: ForestParams::default(),
        }
    }

    /// Builder s hyperparametrami z tréningovej konfigurácie
    pub fn from_config(config: &TrainingConfig) -> Self {
        Self {
            params: ForestParams::from(config),
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.params.seed = seed;
        self
    }

    pub fn n_trees(mut self, n_trees: usize) -> Self {
        self.params.n_trees = n_trees;
        self
    }

    pub fn max_depth(mut self, max_depth: u16) -> Self {
        self.params.tree.max_depth = Some(max_depth);
        self
    }

    pub fn min_samples_split(mut self, min_samples_split: usize) -> Self {
        self.params.tree.min_samples_split = min_samples_split;
        self
    }

    pub fn min_samples_leaf(mut self, min_samples_leaf: usize) -> Self {
        self.params.tree.min_samples_leaf = min_samples_leaf;
        self
    }

    pub fn max_features(mut self, max_features: MaxFeatures) -> Self {
        self.params.max_features = max_features;
        self
    }

    pub fn bootstrap(mut self, bootstrap: bool) -> Self {
        self.params.bootstrap = bootstrap;
        self
    }

    /// Vytvorí nenatrénovaný pipeline s validáciou parametrov
    pub fn build(self) -> Result<UnfittedPipeline> {
        if self.params.n_trees == 0 {
            return Err(PotabilityError::InvalidConfig(
                "forest needs at least one tree".to_string(),
            ));
        }
        if self.params.tree.min_samples_split < 2 || self.params.tree.min_samples_leaf == 0 {
            return Err(PotabilityError::InvalidConfig(
                "min_samples_split must be >= 2 and min_samples_leaf >= 1".to_string(),
            ));
        }
        if let MaxFeatures::Count(0) = self.params.max_features {
            return Err(PotabilityError::InvalidConfig(
                "max_features must be at least 1".to_string(),
            ));
        }

        // Poradie je pevné: imputácia pred škálovaním
        let preprocessing = ProcessorChain::new()
            .add(Processor::Imputer(MeanImputer::new()))
            .add(Processor::Scaler(StandardScaler::new()));

        Ok(UnfittedPipeline::new(preprocessing, RandomForest::new(self.params)))
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_produces_three_stages_in_order() {
        let pipeline = PipelineBuilder::new().seed(5).build().unwrap();
        let info = pipeline.info();
        assert_eq!(info.stages, vec!["Mean Imputer", "Standard Scaler", "Random Forest"]);
        assert_eq!(info.n_trees, 200);
        assert_eq!(info.seed, 5);
    }

    #[test]
    fn invalid_params_are_rejected() {
        assert!(PipelineBuilder::new().n_trees(0).build().is_err());
        assert!(PipelineBuilder::new().min_samples_split(1).build().is_err());
        assert!(PipelineBuilder::new().max_features(MaxFeatures::Count(0)).build().is_err());
    }
}
