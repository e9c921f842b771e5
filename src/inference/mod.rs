pub mod result;
pub mod bundle;
pub mod handle;
pub mod boundary;

pub use result::PredictionResult;
pub use bundle::ModelBundle;
pub use handle::ModelHandle;
pub use boundary::{predict_outcome, render_outcome, validate_samples, PredictionOutcome};
