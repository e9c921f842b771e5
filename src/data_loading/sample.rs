use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::data_loader::{parse_numeric_value, RawTable};
use super::schema::FeatureSchema;
use crate::error::Result;

/// Jedna vzorka vody: meno feature -> hodnota, chýbajúca hodnota je NaN alebo chýbajúci kľúč
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample {
    values: BTreeMap<String, f64>,
}

impl Sample {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }

    pub fn with(mut self, name: &str, value: f64) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: f64) {
        self.values.insert(name.to_string(), value);
    }

    /// Hodnota feature; meno sa porovnáva bez ohľadu na veľkosť písmen
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied().or_else(|| {
            self.values
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| *v)
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Prevedie riadky tabuľky na vzorky. Stĺpce schémy sa parsujú striktne,
    /// ostatné stĺpce sa ponechajú iba ak sú číselné.
    pub fn from_table(table: &RawTable, schema: &FeatureSchema) -> Result<Vec<Sample>> {
        let mut samples = Vec::with_capacity(table.num_rows());
        for (row_idx, row) in table.rows.iter().enumerate() {
            let mut sample = Sample::new();
            for (header, cell) in table.headers.iter().zip(row.iter()) {
                if schema.find(header).is_some() {
                    sample.insert(header, parse_numeric_value(cell, header, row_idx)?);
                } else if let Ok(value) = parse_numeric_value(cell, header, row_idx) {
                    sample.insert(header, value);
                }
            }
            samples.push(sample);
        }
        Ok(samples)
    }
}

/// Typovaná vzorka s deviatimi meraniami, ako ju zadáva formulár
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WaterSample {
    #[serde(rename = "pH", alias = "ph")]
    pub ph: Option<f64>,
    #[serde(rename = "Hardness")]
    pub hardness: Option<f64>,
    #[serde(rename = "Solids")]
    pub solids: Option<f64>,
    #[serde(rename = "Chloramines")]
    pub chloramines: Option<f64>,
    #[serde(rename = "Sulfate")]
    pub sulfate: Option<f64>,
    #[serde(rename = "Conductivity")]
    pub conductivity: Option<f64>,
    #[serde(rename = "Organic_carbon")]
    pub organic_carbon: Option<f64>,
    #[serde(rename = "Trihalomethanes")]
    pub trihalomethanes: Option<f64>,
    #[serde(rename = "Turbidity")]
    pub turbidity: Option<f64>,
}

impl WaterSample {
    /// Predvolené hodnoty formulára
    pub fn form_defaults() -> Self {
        Self {
            ph: Some(7.0),
            hardness: Some(200.0),
            solids: Some(15000.0),
            chloramines: Some(7.0),
            sulfate: Some(300.0),
            conductivity: Some(400.0),
            organic_carbon: Some(10.0),
            trihalomethanes: Some(80.0),
            turbidity: Some(4.0),
        }
    }
}

impl From<WaterSample> for Sample {
    fn from(w: WaterSample) -> Self {
        let fields = [
            ("pH", w.ph),
            ("Hardness", w.hardness),
            ("Solids", w.solids),
            ("Chloramines", w.chloramines),
            ("Sulfate", w.sulfate),
            ("Conductivity", w.conductivity),
            ("Organic_carbon", w.organic_carbon),
            ("Trihalomethanes", w.trihalomethanes),
            ("Turbidity", w.turbidity),
        ];
        Sample::from_pairs(
            fields
                .into_iter()
                .filter_map(|(name, value)| value.map(|v| (name, v))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let sample = Sample::new().with("ph", 7.2);
        assert_eq!(sample.get("pH"), Some(7.2));
        assert_eq!(sample.get("Hardness"), None);
    }

    #[test]
    fn water_sample_skips_missing_fields() {
        let sample: Sample = WaterSample {
            ph: Some(6.5),
            turbidity: Some(3.9),
            ..Default::default()
        }
        .into();
        assert_eq!(sample.len(), 2);
        assert_eq!(sample.get("Turbidity"), Some(3.9));
    }

    #[test]
    fn water_sample_deserializes_dataset_spelling() {
        let sample: WaterSample = serde_json::from_str(r#"{"ph": 8.1, "Sulfate": 333.0}"#).unwrap();
        assert_eq!(sample.ph, Some(8.1));
        assert_eq!(sample.sulfate, Some(333.0));
        assert_eq!(sample.hardness, None);
    }

    #[test]
    fn table_rows_become_samples() {
        let table = RawTable::new(
            vec!["id".into(), "ph".into(), "Turbidity".into()],
            vec![
                vec!["a-1".into(), "7.0".into(), "".into()],
                vec!["2".into(), "NA".into(), "4.5".into()],
            ],
        );
        let samples = Sample::from_table(&table, &FeatureSchema::water()).unwrap();
        assert_eq!(samples.len(), 2);
        assert!(samples[0].get("id").is_none());
        assert!(samples[0].get("Turbidity").unwrap().is_nan());
        assert_eq!(samples[1].get("id"), Some(2.0));
        assert!(samples[1].get("ph").unwrap().is_nan());
    }

    #[test]
    fn malformed_schema_cell_is_an_error() {
        let table = RawTable::new(vec!["ph".into()], vec![vec!["acidic".into()]]);
        assert!(Sample::from_table(&table, &FeatureSchema::water()).is_err());
    }
}
