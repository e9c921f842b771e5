use std::path::PathBuf;

use once_cell::sync::OnceCell;
use tracing::info;

use super::bundle::ModelBundle;
use crate::config::DEFAULT_MODEL_PATH;
use crate::error::Result;

/// Lenivo načítaný model. Prvé úspešné `get` ho načíta, potom je nemenný.
/// Neúspešné načítanie nechá handle prázdny a ďalšie volanie skúsi znova.
#[derive(Debug)]
pub struct ModelHandle {
    path: PathBuf,
    bundle: OnceCell<ModelBundle>,
}

impl ModelHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            bundle: OnceCell::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.bundle.get().is_some()
    }

    /// Vráti bundle, pri prvom volaní ho načíta. Súbežní volajúci čakajú na jedno načítanie.
    pub fn get(&self) -> Result<&ModelBundle> {
        self.bundle.get_or_try_init(|| {
            info!(path = %self.path.display(), "loading model bundle");
            ModelBundle::load(&self.path)
        })
    }
}

impl Default for ModelHandle {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL_PATH)
    }
}
