use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PotabilityError>;

/// Hrubá taxonómia chýb, ktorú vidí prezentačná vrstva
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    DatasetNotFound,
    SchemaMismatch,
    ArtifactUnwritable,
    ArtifactUnreadable,
    InferenceFailure,
}

#[derive(Error, Debug)]
pub enum PotabilityError {
    #[error("Dataset not found at {}. Place 'water_potability.csv' in the project folder.", .0.display())]
    DatasetNotFound(PathBuf),

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Value '{value}' in column '{column}' (row {row}) is not a valid number")]
    MalformedValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Not enough data: {0}")]
    InsufficientData(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Cannot write model artifact to {}: {source}", path.display())]
    ArtifactUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read model artifact from {}: {source}", path.display())]
    ArtifactUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Model artifact {} is corrupt: {reason}", path.display())]
    ArtifactCorrupt { path: PathBuf, reason: String },

    #[error("Inference failed: {0}")]
    InferenceFailure(String),

    #[error("Feature '{feature}' = {value} is outside the expected range [{min}, {max}]")]
    OutOfRange {
        feature: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Model error: {0}")]
    Model(#[from] smartcore::error::Failed),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PotabilityError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PotabilityError::DatasetNotFound(_) => ErrorKind::DatasetNotFound,
            PotabilityError::SchemaMismatch(_)
            | PotabilityError::MalformedValue { .. }
            | PotabilityError::InsufficientData(_)
            | PotabilityError::InvalidConfig(_)
            | PotabilityError::Csv(_) => ErrorKind::SchemaMismatch,
            PotabilityError::ArtifactUnwritable { .. } => ErrorKind::ArtifactUnwritable,
            PotabilityError::ArtifactUnreadable { .. }
            | PotabilityError::ArtifactCorrupt { .. }
            | PotabilityError::Io(_) => ErrorKind::ArtifactUnreadable,
            PotabilityError::InferenceFailure(_)
            | PotabilityError::OutOfRange { .. }
            | PotabilityError::Model(_) => ErrorKind::InferenceFailure,
        }
    }
}
