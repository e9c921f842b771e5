use std::path::Path;

use super::csv_data_loader::CsvDataLoader;
use super::data_loader::DataLoader;
use super::json_data_loader::JsonDataLoader;
use crate::error::{PotabilityError, Result};

/// Factory pre vytváranie data loaderov podľa typu
pub struct DataLoaderFactory;

impl DataLoaderFactory {
    /// Vytvorí loader na základe typu
    pub fn create(loader_type: &str) -> Result<Box<dyn DataLoader>> {
        match loader_type.to_lowercase().as_str() {
            "csv" => Ok(Box::new(CsvDataLoader::new())),
            "tsv" => Ok(Box::new(CsvDataLoader::with_delimiter(b'\t'))),
            "json" => Ok(Box::new(JsonDataLoader::new())),
            _ => Err(PotabilityError::InvalidConfig(format!(
                "Unknown loader type: {}",
                loader_type
            ))),
        }
    }

    /// Vyberie loader podľa prípony súboru, inak podľa obsahu; v krajnom prípade CSV
    pub fn for_path(path: &Path, data: &str) -> Box<dyn DataLoader> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|ext| Self::create(ext).ok())
            .or_else(|| Self::create_auto(data).ok())
            .unwrap_or_else(|| Box::new(CsvDataLoader::new()))
    }

    /// Automaticky detekuje formát na základe obsahu
    pub fn create_auto(data: &str) -> Result<Box<dyn DataLoader>> {
        let trimmed = data.trim();

        if trimmed.starts_with('[') && trimmed.contains('{') {
            Ok(Box::new(JsonDataLoader::new()))
        } else if trimmed.contains(',') || trimmed.contains('\n') {
            Ok(Box::new(CsvDataLoader::new()))
        } else {
            Err(PotabilityError::SchemaMismatch(
                "Could not detect the data format".to_string(),
            ))
        }
    }
}
