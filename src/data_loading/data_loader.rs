use crate::error::{PotabilityError, Result};

/// Reprezentácie chýbajúcej hodnoty v zdrojových dátach
pub const NULL_VALUES: [&str; 5] = ["NA", "NaN", "null", "None", "N/A"];

/// Surová tabuľka - hlavičky a riadky ako text, v poradí zo súboru
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// Strategy pattern pre načítanie tabuľkových dát z rôznych formátov
pub trait DataLoader {
    /// Názov loadera
    fn get_name(&self) -> &str;

    /// Načíta tabuľku zo stringu
    fn parse_table(&self, data: &str) -> Result<RawTable>;

    /// Validuje formát dát pred načítaním
    fn validate_format(&self, data: &str) -> Result<()>;
}

/// Je bunka chýbajúca hodnota?
pub fn is_null(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || NULL_VALUES.iter().any(|n| n.eq_ignore_ascii_case(trimmed))
}

/// Parsuje číselnú bunku; chýbajúca hodnota je NaN
pub fn parse_numeric_value(value: &str, column: &str, row: usize) -> Result<f64> {
    if is_null(value) {
        return Ok(f64::NAN);
    }
    let trimmed = value.trim();
    trimmed
        .parse::<f64>()
        .or_else(|_| trimmed.replace(',', ".").parse::<f64>())
        .map_err(|_| PotabilityError::MalformedValue {
            row: row + 1,
            column: column.to_string(),
            value: value.to_string(),
        })
}
