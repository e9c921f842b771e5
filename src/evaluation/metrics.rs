use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Confusion matrix pre binárnu klasifikáciu; riadky = skutočná trieda, stĺpce = predikcia
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub counts: [[usize; 2]; 2],
}

impl ConfusionMatrix {
    pub fn true_negatives(&self) -> usize {
        self.counts[0][0]
    }

    pub fn false_positives(&self) -> usize {
        self.counts[0][1]
    }

    pub fn false_negatives(&self) -> usize {
        self.counts[1][0]
    }

    pub fn true_positives(&self) -> usize {
        self.counts[1][1]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .counts
            .iter()
            .flatten()
            .map(|c| c.to_string().len())
            .max()
            .unwrap_or(1);
        let [[a, b], [c, d]] = self.counts;
        writeln!(f, "[[{:>w$} {:>w$}]", a, b, w = width)?;
        write!(f, " [{:>w$} {:>w$}]]", c, d, w = width)
    }
}

/// Precision / recall / F1 jednej triedy
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub model_name: String,
    pub accuracy: f64,
    /// index 0 = nepitná, index 1 = pitná
    pub per_class: [ClassMetrics; 2],
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
    pub confusion_matrix: ConfusionMatrix,
}

impl ClassificationReport {
    /// Ploché metriky v štýle `name -> value`
    pub fn metrics(&self) -> HashMap<String, f64> {
        let mut metrics = HashMap::new();
        metrics.insert("accuracy".to_string(), self.accuracy);
        for (label, m) in self.per_class.iter().enumerate() {
            metrics.insert(format!("precision_{}", label), m.precision);
            metrics.insert(format!("recall_{}", label), m.recall);
            metrics.insert(format!("f1_{}", label), m.f1);
        }
        metrics.insert("macro_f1".to_string(), self.macro_avg.f1);
        metrics.insert("weighted_f1".to_string(), self.weighted_avg.f1);
        let cm = &self.confusion_matrix;
        metrics.insert("true_positives".to_string(), cm.true_positives() as f64);
        metrics.insert("true_negatives".to_string(), cm.true_negatives() as f64);
        metrics.insert("false_positives".to_string(), cm.false_positives() as f64);
        metrics.insert("false_negatives".to_string(), cm.false_negatives() as f64);
        metrics
    }

    pub fn get_metric(&self, name: &str) -> Option<f64> {
        self.metrics().get(name).copied()
    }

    pub fn support(&self) -> usize {
        self.per_class.iter().map(|m| m.support).sum()
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>12} {:>9} {:>9} {:>9} {:>9}", "", "precision", "recall", "f1-score", "support")?;
        writeln!(f)?;
        for (label, m) in self.per_class.iter().enumerate() {
            writeln!(
                f,
                "{:>12} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                label, m.precision, m.recall, m.f1, m.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>12} {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy",
            "",
            "",
            self.accuracy,
            self.support()
        )?;
        for (name, m) in [("macro avg", &self.macro_avg), ("weighted avg", &self.weighted_avg)] {
            writeln!(
                f,
                "{:>12} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                name, m.precision, m.recall, m.f1, m.support
            )?;
        }
        Ok(())
    }
}
