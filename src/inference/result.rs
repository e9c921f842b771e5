use serde::{Deserialize, Serialize};

/// Výsledok predikcie jednej vzorky; pravdepodobnosti sa sčítajú na 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: u32,
    pub probability_safe: f64,
    pub probability_unsafe: f64,
}

impl PredictionResult {
    /// Z pravdepodobností [nepitná, pitná]; label je argmax, remíza znamená nepitná
    pub fn from_proba([p_unsafe, p_safe]: [f64; 2]) -> Self {
        Self {
            label: u32::from(p_safe > p_unsafe),
            probability_safe: p_safe,
            probability_unsafe: p_unsafe,
        }
    }

    pub fn is_potable(&self) -> bool {
        self.label == 1
    }

    /// Pravdepodobnosť predikovanej triedy
    pub fn confidence(&self) -> f64 {
        if self.is_potable() {
            self.probability_safe
        } else {
            self.probability_unsafe
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_follows_larger_probability() {
        let safe = PredictionResult::from_proba([0.3, 0.7]);
        assert!(safe.is_potable());
        assert!((safe.confidence() - 0.7).abs() < 1e-12);

        let unsafe_ = PredictionResult::from_proba([0.8, 0.2]);
        assert_eq!(unsafe_.label, 0);
        assert!((unsafe_.confidence() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn tie_is_not_potable() {
        assert_eq!(PredictionResult::from_proba([0.5, 0.5]).label, 0);
    }
}
