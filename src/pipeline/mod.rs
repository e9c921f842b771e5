pub mod pipeline;
pub mod builder;
pub mod director;

pub use pipeline::{FittedPipeline, PipelineInfo, UnfittedPipeline};
pub use builder::PipelineBuilder;
pub use director::{build_pipeline, PipelineDirector};
