use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::split::split_dataset;
use crate::config::TrainingConfig;
use crate::data_loading::Dataset;
use crate::error::Result;
use crate::evaluation::{ClassificationReport, ModelEvaluator};
use crate::inference::ModelBundle;
use crate::models::Classifier;
use crate::pipeline::{FittedPipeline, PipelineDirector};

/// Výsledok tréningu s uloženým modelom
#[derive(Debug, Clone)]
pub struct TrainingSummary {
    pub accuracy: f64,
    pub report: ClassificationReport,
    pub train_size: usize,
    pub test_size: usize,
    pub output: PathBuf,
}

/// Tréning: stratifikované delenie, fit na train časti, vyhodnotenie na test časti
#[derive(Debug, Clone, Default)]
pub struct Trainer {
    config: TrainingConfig,
}

impl Trainer {
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    fn fit_split(&self, dataset: &Dataset) -> Result<(FittedPipeline, ClassificationReport, usize, usize)> {
        self.config.validate()?;
        let (train, test) = split_dataset(dataset, self.config.test_fraction, self.config.seed)?;
        info!(
            train = train.num_samples(),
            test = test.num_samples(),
            class_counts = ?dataset.class_counts(),
            "dataset split"
        );

        let pipeline = PipelineDirector::from_config(&self.config)?;
        debug!(stages = ?pipeline.info().stages, "pipeline built");
        let fitted = pipeline.fit(&train.rows, &train.labels)?;

        let predictions = fitted.predict_rows(&test.rows)?;
        let report = ModelEvaluator::evaluate_classification(
            &test.labels,
            &predictions,
            fitted.classifier().get_name(),
        )?;
        info!(accuracy = report.accuracy, "model evaluated on held-out partition");

        Ok((fitted, report, train.num_samples(), test.num_samples()))
    }

    /// Natrénuje pipeline a vráti ho spolu s metrikami na testovacej časti
    pub fn fit_and_evaluate(&self, dataset: &Dataset) -> Result<(FittedPipeline, ClassificationReport)> {
        let (fitted, report, _, _) = self.fit_split(dataset)?;
        Ok((fitted, report))
    }

    /// Natrénuje, vyhodnotí a uloží bundle; existujúci artefakt sa prepíše
    pub fn train_and_save(&self, dataset: &Dataset, out: impl AsRef<Path>) -> Result<TrainingSummary> {
        let out = out.as_ref();
        let (fitted, report, train_size, test_size) = self.fit_split(dataset)?;

        let bundle = ModelBundle::new(fitted, dataset.feature_names.clone())?;
        bundle.save(out)?;

        Ok(TrainingSummary {
            accuracy: report.accuracy,
            report,
            train_size,
            test_size,
            output: out.to_path_buf(),
        })
    }
}

/// Tréning s referenčnými nastaveniami a zvoleným delením
pub fn fit_and_evaluate(
    dataset: &Dataset,
    test_fraction: f64,
    seed: u64,
) -> Result<(FittedPipeline, ClassificationReport)> {
    let config = TrainingConfig::default()
        .with_test_fraction(test_fraction)
        .with_seed(seed);
    Trainer::new(config).fit_and_evaluate(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PotabilityError;

    fn synthetic(n: usize) -> Dataset {
        let names = [
            "ph",
            "Hardness",
            "Solids",
            "Chloramines",
            "Sulfate",
            "Conductivity",
            "Organic_carbon",
            "Trihalomethanes",
            "Turbidity",
        ];
        let mut rows = Vec::with_capacity(n);
        let mut labels = Vec::with_capacity(n);
        for i in 0..n {
            let label = u32::from(i % 5 >= 3);
            let jitter = (i % 7) as f64 * 0.1;
            // každá feature je posunutá podľa triedy
            let shift = 1.0 + 0.5 * label as f64;
            let mut row: Vec<f64> = [5.0, 200.0, 15000.0, 7.0, 300.0, 400.0, 10.0, 80.0, 4.0]
                .iter()
                .map(|base| base * shift + jitter)
                .collect();
            if i % 11 == 0 {
                row[4] = f64::NAN;
            }
            rows.push(row);
            labels.push(label);
        }
        Dataset::new(names.iter().map(|s| s.to_string()).collect(), rows, labels).unwrap()
    }

    fn quick_config() -> TrainingConfig {
        TrainingConfig::default().with_n_trees(15).with_seed(3)
    }

    #[test]
    fn learns_separable_data() {
        let (fitted, report) = Trainer::new(quick_config())
            .fit_and_evaluate(&synthetic(100))
            .unwrap();
        assert_eq!(fitted.n_features(), 9);
        assert_eq!(report.support(), 20);
        assert!(report.accuracy > 0.9, "accuracy {}", report.accuracy);
    }

    #[test]
    fn train_and_save_writes_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("model.pkl");
        let summary = Trainer::new(quick_config())
            .train_and_save(&synthetic(60), &out)
            .unwrap();
        assert_eq!(summary.train_size + summary.test_size, 60);
        assert_eq!(summary.output, out);

        let bundle = ModelBundle::load(&out).unwrap();
        assert_eq!(bundle.feature_names[0], "ph");
        assert_eq!(bundle.pipeline.classifier().n_trees(), 15);
    }

    #[test]
    fn unwritable_output_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("missing_dir").join("model.pkl");
        let err = Trainer::new(quick_config())
            .train_and_save(&synthetic(40), &out)
            .unwrap_err();
        assert!(matches!(err, PotabilityError::ArtifactUnwritable { .. }));
    }

    #[test]
    fn invalid_fraction_fails_before_fit() {
        let err = fit_and_evaluate(&synthetic(40), 0.0, 1).unwrap_err();
        assert!(matches!(err, PotabilityError::InvalidConfig(_)));
    }
}
