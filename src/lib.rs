pub mod config;
pub mod error;

pub mod data_loading;
pub mod processing;
pub mod models;
pub mod pipeline;
pub mod evaluation;
pub mod training;
pub mod inference;

pub use config::{MaxFeatures, TrainingConfig};
pub use error::{ErrorKind, PotabilityError, Result};

pub use data_loading::{load, Dataset, FeatureSchema, RangePolicy, Sample, WaterSample};
pub use evaluation::{ClassificationReport, ConfusionMatrix};
pub use pipeline::{build_pipeline, FittedPipeline, PipelineBuilder, UnfittedPipeline};
pub use training::{fit_and_evaluate, stratified_split, Trainer, TrainingSummary};
pub use inference::{
    predict_outcome, render_outcome, ModelBundle, ModelHandle, PredictionOutcome, PredictionResult,
};
