pub mod evaluator;
pub mod metrics;

pub use evaluator::ModelEvaluator;
pub use metrics::{ClassMetrics, ClassificationReport, ConfusionMatrix};
