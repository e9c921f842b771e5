pub mod split;
pub mod trainer;

pub use split::{split_dataset, stratified_split, SplitIndices};
pub use trainer::{fit_and_evaluate, Trainer, TrainingSummary};
