use std::path::Path;

use tracing::{info, warn};

use super::data_loader::{is_null, parse_numeric_value, RawTable};
use super::factory::DataLoaderFactory;
use super::sample::Sample;
use super::schema::FeatureSchema;
use crate::config::LABEL_COLUMN;
use crate::error::{PotabilityError, Result};

/// Výsledok načítania dát - features v poradí zo súboru, label oddelene
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub feature_names: Vec<String>,
    pub rows: Vec<Vec<f64>>,
    pub labels: Vec<u32>,
}

impl Dataset {
    pub fn new(feature_names: Vec<String>, rows: Vec<Vec<f64>>, labels: Vec<u32>) -> Result<Self> {
        if rows.len() != labels.len() {
            return Err(PotabilityError::SchemaMismatch(format!(
                "Sample count mismatch: X has {}, y has {}",
                rows.len(),
                labels.len()
            )));
        }
        if let Some(bad) = rows.iter().position(|r| r.len() != feature_names.len()) {
            return Err(PotabilityError::SchemaMismatch(format!(
                "Row {} has {} features, expected {}",
                bad + 1,
                rows[bad].len(),
                feature_names.len()
            )));
        }
        Ok(Self {
            feature_names,
            rows,
            labels,
        })
    }

    /// Zostaví dataset z tabuľky. Vyžaduje label stĺpec a všetky features zo schémy.
    pub fn from_table(table: &RawTable, schema: &FeatureSchema, label_column: &str) -> Result<Self> {
        let label_idx = table.column_index(label_column).ok_or_else(|| {
            PotabilityError::SchemaMismatch(format!(
                "Target column '{}' is not present in the data. Available columns: {:?}",
                label_column, table.headers
            ))
        })?;

        let missing = schema.missing_from(&table.headers);
        if !missing.is_empty() {
            return Err(PotabilityError::SchemaMismatch(format!(
                "Required feature columns are missing: {:?}",
                missing
            )));
        }

        // Poradie features = poradie stĺpcov v súbore (bez labelu)
        let mut feature_cols = Vec::new();
        for (idx, header) in table.headers.iter().enumerate() {
            if idx == label_idx {
                continue;
            }
            if schema.find(header).is_some() {
                if feature_cols.iter().any(|(_, h): &(usize, String)| h.eq_ignore_ascii_case(header)) {
                    return Err(PotabilityError::SchemaMismatch(format!(
                        "Feature column '{}' appears more than once",
                        header
                    )));
                }
                feature_cols.push((idx, header.clone()));
            } else {
                warn!(column = %header, "ignoring column outside the feature schema");
            }
        }

        let mut rows = Vec::with_capacity(table.num_rows());
        let mut labels = Vec::with_capacity(table.num_rows());
        for (row_idx, record) in table.rows.iter().enumerate() {
            let row = feature_cols
                .iter()
                .map(|(idx, header)| parse_numeric_value(&record[*idx], header, row_idx))
                .collect::<Result<Vec<f64>>>()?;
            rows.push(row);
            labels.push(parse_label(&record[label_idx], label_column, row_idx)?);
        }

        let feature_names = feature_cols.into_iter().map(|(_, h)| h).collect();
        Self::new(feature_names, rows, labels)
    }

    pub fn num_samples(&self) -> usize {
        self.rows.len()
    }

    pub fn num_features(&self) -> usize {
        self.feature_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Počet vzoriek triedy 0 a triedy 1
    pub fn class_counts(&self) -> [usize; 2] {
        class_counts(&self.labels)
    }

    /// Podmnožina riadkov podľa indexov (zachováva poradie indexov)
    pub fn subset(&self, indices: &[usize]) -> Dataset {
        Dataset {
            feature_names: self.feature_names.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
        }
    }
}

pub fn class_counts(labels: &[u32]) -> [usize; 2] {
    let positives = labels.iter().filter(|&&l| l == 1).count();
    [labels.len() - positives, positives]
}

fn parse_label(value: &str, column: &str, row: usize) -> Result<u32> {
    let malformed = || PotabilityError::MalformedValue {
        row: row + 1,
        column: column.to_string(),
        value: value.to_string(),
    };
    if is_null(value) {
        return Err(malformed());
    }
    let parsed = parse_numeric_value(value, column, row)?;
    if parsed == 0.0 {
        Ok(0)
    } else if parsed == 1.0 {
        Ok(1)
    } else {
        Err(malformed())
    }
}

/// Načíta dataset zo súboru s predvoleným label stĺpcom `Potability`
pub fn load(path: impl AsRef<Path>) -> Result<Dataset> {
    load_with(path, &FeatureSchema::water(), LABEL_COLUMN)
}

pub fn load_with(path: impl AsRef<Path>, schema: &FeatureSchema, label_column: &str) -> Result<Dataset> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(PotabilityError::DatasetNotFound(path.to_path_buf()));
    }

    let text = std::fs::read_to_string(path)?;
    let loader = DataLoaderFactory::for_path(path, &text);
    let table = loader.parse_table(&text)?;
    let dataset = Dataset::from_table(&table, schema, label_column)?;

    let [negatives, positives] = dataset.class_counts();
    info!(
        path = %path.display(),
        loader = loader.get_name(),
        samples = dataset.num_samples(),
        features = dataset.num_features(),
        potable = positives,
        not_potable = negatives,
        "dataset loaded"
    );
    Ok(dataset)
}

/// Načíta vzorky na predikciu (bez label stĺpca) z CSV alebo JSON súboru
pub fn load_samples(path: impl AsRef<Path>) -> Result<Vec<Sample>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(PotabilityError::DatasetNotFound(path.to_path_buf()));
    }

    let text = std::fs::read_to_string(path)?;
    let table = DataLoaderFactory::for_path(path, &text).parse_table(&text)?;
    let samples = Sample::from_table(&table, &FeatureSchema::water())?;
    info!(path = %path.display(), samples = samples.len(), "samples loaded");
    Ok(samples)
}
