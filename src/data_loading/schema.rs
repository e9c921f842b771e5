use serde::{Deserialize, Serialize};

use crate::error::{PotabilityError, Result};

/// Jedna feature so zdokumentovaným rozsahom hodnôt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSpec {
    pub name: String,
    pub expected_range: (f64, f64),
}

impl FeatureSpec {
    pub fn new(name: &str, min: f64, max: f64) -> Self {
        Self {
            name: name.to_string(),
            expected_range: (min, max),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.expected_range.0 && value <= self.expected_range.1
    }

    pub fn clip(&self, value: f64) -> f64 {
        value.clamp(self.expected_range.0, self.expected_range.1)
    }

    /// Porovnanie mien bez ohľadu na veľkosť písmen (`ph` v datasete, `pH` vo formulári)
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }
}

/// Čo robiť s hodnotou mimo zdokumentovaného rozsahu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangePolicy {
    #[default]
    Reject,
    Clip,
    Accept,
}

/// Explicitná schéma vstupu - deväť chemických meraní
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSchema {
    features: Vec<FeatureSpec>,
}

impl FeatureSchema {
    pub fn new(features: Vec<FeatureSpec>) -> Self {
        Self { features }
    }

    pub fn water() -> Self {
        Self::new(vec![
            FeatureSpec::new("pH", 0.0, 14.0),
            FeatureSpec::new("Hardness", 0.0, 1000.0),
            FeatureSpec::new("Solids", 0.0, 50000.0),
            FeatureSpec::new("Chloramines", 0.0, 20.0),
            FeatureSpec::new("Sulfate", 0.0, 500.0),
            FeatureSpec::new("Conductivity", 0.0, 2000.0),
            FeatureSpec::new("Organic_carbon", 0.0, 30.0),
            FeatureSpec::new("Trihalomethanes", 0.0, 150.0),
            FeatureSpec::new("Turbidity", 0.0, 10.0),
        ])
    }

    pub fn features(&self) -> &[FeatureSpec] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&FeatureSpec> {
        self.features.iter().find(|f| f.matches(name))
    }

    /// Vráti chýbajúce features z daných hlavičiek
    pub fn missing_from(&self, headers: &[String]) -> Vec<String> {
        self.features
            .iter()
            .filter(|f| !headers.iter().any(|h| f.matches(h)))
            .map(|f| f.name.clone())
            .collect()
    }

    /// Aplikuje range policy na jednu hodnotu; NaN (chýbajúca hodnota) prechádza nezmenená
    pub fn check_value(&self, name: &str, value: f64, policy: RangePolicy) -> Result<f64> {
        if value.is_nan() {
            return Ok(value);
        }
        if value.is_infinite() {
            return Err(PotabilityError::InferenceFailure(format!(
                "feature '{}' is not finite",
                name
            )));
        }
        let Some(spec) = self.find(name) else {
            return Ok(value);
        };
        if spec.contains(value) {
            return Ok(value);
        }
        match policy {
            RangePolicy::Reject => Err(PotabilityError::OutOfRange {
                feature: spec.name.clone(),
                value,
                min: spec.expected_range.0,
                max: spec.expected_range.1,
            }),
            RangePolicy::Clip => Ok(spec.clip(value)),
            RangePolicy::Accept => Ok(value),
        }
    }
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self::water()
    }
}
