use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vodocap_potability::config::{DEFAULT_DATA_PATH, DEFAULT_MODEL_PATH};
use vodocap_potability::data_loading;
use vodocap_potability::{Trainer, TrainingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "train",
    about = "Train the water potability classifier and save the model bundle"
)]
struct Args {
    /// CSV dataset with the nine features and the Potability column
    #[arg(long, default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,
    /// Where to write the trained model bundle
    #[arg(long, default_value = DEFAULT_MODEL_PATH)]
    out: PathBuf,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let dataset = data_loading::load(&args.data)
        .with_context(|| format!("loading dataset {}", args.data.display()))?;
    info!(samples = dataset.num_samples(), "dataset ready");

    let summary = Trainer::new(TrainingConfig::default())
        .train_and_save(&dataset, &args.out)
        .context("training failed")?;

    println!("Test Accuracy: {:.4}", summary.accuracy);
    println!("Classification Report:");
    println!("{}", summary.report);
    println!("Confusion Matrix:");
    println!("{}", summary.report.confusion_matrix);
    println!("Model saved successfully to {}", summary.output.display());
    Ok(())
}
