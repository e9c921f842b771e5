use super::data_loader::{DataLoader, RawTable};
use crate::error::{PotabilityError, Result};
use csv::ReaderBuilder;

/// CSV Data Loader - implementácia Strategy pattern pre CSV súbory
pub struct CsvDataLoader {
    delimiter: u8,
}

impl CsvDataLoader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }
}

impl DataLoader for CsvDataLoader {
    fn get_name(&self) -> &str {
        "CSV Data Loader"
    }

    fn parse_table(&self, data: &str) -> Result<RawTable> {
        self.validate_format(data)?;

        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .from_reader(data.as_bytes());

        let headers: Vec<String> = rdr
            .headers()?
            .iter()
            .map(|s| s.trim().trim_start_matches('\u{feff}').to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(PotabilityError::SchemaMismatch(
                "CSV has no columns".to_string(),
            ));
        }

        // flexible(false) už odmietne riadky s iným počtom stĺpcov
        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(|v| v.to_string()).collect());
        }

        Ok(RawTable::new(headers, rows))
    }

    fn validate_format(&self, data: &str) -> Result<()> {
        if data.trim().is_empty() {
            return Err(PotabilityError::SchemaMismatch(
                "CSV data is empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CsvDataLoader {
    fn default() -> Self {
        Self::new()
    }
}
