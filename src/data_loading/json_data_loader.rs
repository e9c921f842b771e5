use super::data_loader::{DataLoader, RawTable};
use crate::error::{PotabilityError, Result};
use serde_json::Value;

/// JSON Data Loader - implementácia Strategy pattern pre JSON súbory
pub struct JsonDataLoader;

impl JsonDataLoader {
    pub fn new() -> Self {
        Self
    }

    fn cell_to_string(value: &Value, key: &str, idx: usize) -> Result<String> {
        match value {
            Value::Null => Ok(String::new()),
            Value::Number(n) => Ok(n.to_string()),
            Value::String(s) => Ok(s.clone()),
            Value::Bool(b) => Ok(if *b { "1" } else { "0" }.to_string()),
            _ => Err(PotabilityError::SchemaMismatch(format!(
                "Unsupported value type for key '{}' in element {}",
                key, idx
            ))),
        }
    }
}

impl DataLoader for JsonDataLoader {
    fn get_name(&self) -> &str {
        "JSON Data Loader"
    }

    /// Parsuje JSON array of objects formát
    /// Príklad: [{"ph": 7.0, "Hardness": 204.8, "Potability": 0}, ...]
    fn parse_table(&self, data: &str) -> Result<RawTable> {
        self.validate_format(data)?;

        let parsed: Value = serde_json::from_str(data)
            .map_err(|e| PotabilityError::SchemaMismatch(format!("JSON parse error: {}", e)))?;

        let array = parsed.as_array().ok_or_else(|| {
            PotabilityError::SchemaMismatch("JSON must be an array of objects".to_string())
        })?;

        // Hlavičky sú zjednotenie kľúčov v poradí prvého výskytu
        let mut headers: Vec<String> = Vec::new();
        for (idx, item) in array.iter().enumerate() {
            let obj = item.as_object().ok_or_else(|| {
                PotabilityError::SchemaMismatch(format!("Element {} is not an object", idx))
            })?;
            for key in obj.keys() {
                if !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }

        if headers.is_empty() {
            return Err(PotabilityError::SchemaMismatch(
                "JSON objects have no keys".to_string(),
            ));
        }

        let mut rows = Vec::with_capacity(array.len());
        for (idx, item) in array.iter().enumerate() {
            let obj = item.as_object().ok_or_else(|| {
                PotabilityError::SchemaMismatch(format!("Element {} is not an object", idx))
            })?;
            let mut row = Vec::with_capacity(headers.len());
            for header in &headers {
                // chýbajúci kľúč = chýbajúca hodnota
                let cell = match obj.get(header) {
                    Some(value) => Self::cell_to_string(value, header, idx)?,
                    None => String::new(),
                };
                row.push(cell);
            }
            rows.push(row);
        }

        Ok(RawTable::new(headers, rows))
    }

    fn validate_format(&self, data: &str) -> Result<()> {
        let trimmed = data.trim();
        if trimmed.is_empty() {
            return Err(PotabilityError::SchemaMismatch(
                "JSON data is empty".to_string(),
            ));
        }
        if !trimmed.starts_with('[') || !trimmed.ends_with(']') {
            return Err(PotabilityError::SchemaMismatch(
                "JSON must be an array (start with '[' and end with ']')".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for JsonDataLoader {
    fn default() -> Self {
        Self::new()
    }
}
