use super::builder::PipelineBuilder;
use super::pipeline::UnfittedPipeline;
use crate::config::{MaxFeatures, TrainingConfig};
use crate::error::Result;

/// Director pre Builder pattern - obsahuje hotové "recepty" na vytváranie pipeline
pub struct PipelineDirector;

impl PipelineDirector {
    /// Referenčný pipeline pre pitnosť vody: mean imputer, standard scaler, 200 stromov
    /// Deterministický pre daný seed
    pub fn build_pipeline(seed: u64) -> Result<UnfittedPipeline> {
        PipelineBuilder::new().seed(seed).build()
    }

    /// Pipeline podľa tréningovej konfigurácie
    pub fn from_config(config: &TrainingConfig) -> Result<UnfittedPipeline> {
        config.validate()?;
        PipelineBuilder::from_config(config).build()
    }

    /// Malý les na rýchle experimenty a testy
    pub fn build_quick(seed: u64, n_trees: usize) -> Result<UnfittedPipeline> {
        PipelineBuilder::new()
            .seed(seed)
            .n_trees(n_trees)
            .max_features(MaxFeatures::All)
            .build()
    }
}

/// Skratka pre referenčný recept
pub fn build_pipeline(seed: u64) -> Result<UnfittedPipeline> {
    PipelineDirector::build_pipeline(seed)
}
