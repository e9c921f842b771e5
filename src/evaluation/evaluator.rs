use super::metrics::{ClassMetrics, ClassificationReport, ConfusionMatrix};
use crate::error::{PotabilityError, Result};

pub struct ModelEvaluator;

impl ModelEvaluator {
    /// Vypočíta confusion matrix pre binárnu klasifikáciu
    pub fn confusion_matrix(y_true: &[u32], y_pred: &[u32]) -> ConfusionMatrix {
        let mut counts = [[0usize; 2]; 2];
        for (&t, &p) in y_true.iter().zip(y_pred.iter()) {
            counts[usize::from(t == 1)][usize::from(p == 1)] += 1;
        }
        ConfusionMatrix { counts }
    }

    fn ratio(num: usize, den: usize) -> f64 {
        // nulový menovateľ = 0.0, rovnako ako zero_division v reportoch
        if den == 0 { 0.0 } else { num as f64 / den as f64 }
    }

    fn class_metrics(cm: &ConfusionMatrix, label: usize) -> ClassMetrics {
        let other = 1 - label;
        let tp = cm.counts[label][label];
        let fp = cm.counts[other][label];
        let fn_ = cm.counts[label][other];

        let precision = Self::ratio(tp, tp + fp);
        let recall = Self::ratio(tp, tp + fn_);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        ClassMetrics {
            precision,
            recall,
            f1,
            support: tp + fn_,
        }
    }

    /// Vypočíta metriky pre binárny klasifikátor pitnosti
    pub fn evaluate_classification(
        y_true: &[u32],
        y_pred: &[u32],
        model_name: &str,
    ) -> Result<ClassificationReport> {
        if y_true.len() != y_pred.len() {
            return Err(PotabilityError::SchemaMismatch(format!(
                "y_true has {} labels, y_pred has {}",
                y_true.len(),
                y_pred.len()
            )));
        }
        if y_true.is_empty() {
            return Err(PotabilityError::InsufficientData(
                "cannot evaluate on an empty test set".to_string(),
            ));
        }

        let cm = Self::confusion_matrix(y_true, y_pred);
        let accuracy = Self::ratio(cm.true_positives() + cm.true_negatives(), cm.total());
        let per_class = [Self::class_metrics(&cm, 0), Self::class_metrics(&cm, 1)];

        let total = cm.total();
        let macro_avg = ClassMetrics {
            precision: (per_class[0].precision + per_class[1].precision) / 2.0,
            recall: (per_class[0].recall + per_class[1].recall) / 2.0,
            f1: (per_class[0].f1 + per_class[1].f1) / 2.0,
            support: total,
        };
        let weight = |m: &ClassMetrics| m.support as f64 / total as f64;
        let weighted_avg = ClassMetrics {
            precision: per_class.iter().map(|m| m.precision * weight(m)).sum(),
            recall: per_class.iter().map(|m| m.recall * weight(m)).sum(),
            f1: per_class.iter().map(|m| m.f1 * weight(m)).sum(),
            support: total,
        };

        Ok(ClassificationReport {
            model_name: model_name.to_string(),
            accuracy,
            per_class,
            macro_avg,
            weighted_avg,
            confusion_matrix: cm,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn confusion_matrix_layout() {
        let cm = ModelEvaluator::confusion_matrix(&[0, 0, 1, 1, 1], &[0, 1, 1, 0, 1]);
        assert_eq!(cm.counts, [[1, 1], [1, 2]]);
        assert_eq!(cm.true_positives(), 2);
        assert_eq!(cm.false_positives(), 1);
        assert_eq!(cm.to_string(), "[[1 1]\n [1 2]]");
    }

    #[test]
    fn per_class_and_averages() {
        let report =
            ModelEvaluator::evaluate_classification(&[0, 0, 1, 1, 1], &[0, 1, 1, 0, 1], "rf").unwrap();
        assert!(close(report.accuracy, 0.6));
        assert!(close(report.per_class[1].precision, 2.0 / 3.0));
        assert!(close(report.per_class[1].recall, 2.0 / 3.0));
        assert!(close(report.per_class[0].precision, 0.5));
        assert_eq!(report.per_class[0].support, 2);
        assert!(close(report.macro_avg.recall, (0.5 + 2.0 / 3.0) / 2.0));
        assert!(close(report.weighted_avg.recall, report.accuracy));
        assert_eq!(report.get_metric("false_negatives"), Some(1.0));
    }

    #[test]
    fn no_predicted_positives_gives_zero_precision() {
        let report = ModelEvaluator::evaluate_classification(&[0, 1], &[0, 0], "rf").unwrap();
        assert_eq!(report.per_class[1].precision, 0.0);
        assert_eq!(report.per_class[1].f1, 0.0);
    }

    #[test]
    fn report_renders_table() {
        let report = ModelEvaluator::evaluate_classification(&[0, 1, 1], &[0, 1, 0], "rf").unwrap();
        let text = report.to_string();
        assert!(text.contains("precision"));
        assert!(text.contains("weighted avg"));
        assert!(text.contains("accuracy"));
    }

    #[test]
    fn length_mismatch_and_empty_fail() {
        assert!(ModelEvaluator::evaluate_classification(&[0, 1], &[0], "rf").is_err());
        assert!(ModelEvaluator::evaluate_classification(&[], &[], "rf").is_err());
    }
}
