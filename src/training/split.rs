use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::data_loading::Dataset;
use crate::error::{PotabilityError, Result};

/// Indexy trénovacej a testovacej časti
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Stratifikované delenie: každá trieda prispeje do testu rovnakým podielom
pub fn stratified_split(labels: &[u32], test_fraction: f64, seed: u64) -> Result<SplitIndices> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(PotabilityError::InvalidConfig(format!(
            "test_fraction must lie in (0, 1), got {}",
            test_fraction
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();

    for class in [0u32, 1u32] {
        let mut members: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|(_, l)| **l == class)
            .map(|(i, _)| i)
            .collect();
        if members.is_empty() {
            continue;
        }
        members.shuffle(&mut rng);

        let n = members.len();
        // trieda s aspoň dvomi vzorkami má zástupcu v oboch častiach
        let n_test = if n >= 2 {
            ((n as f64 * test_fraction).round() as usize).clamp(1, n - 1)
        } else {
            0
        };
        test.extend_from_slice(&members[..n_test]);
        train.extend_from_slice(&members[n_test..]);
    }

    if train.is_empty() || test.is_empty() {
        return Err(PotabilityError::InsufficientData(format!(
            "{} samples cannot be split into non-empty train and test partitions",
            labels.len()
        )));
    }

    train.shuffle(&mut rng);
    test.shuffle(&mut rng);
    Ok(SplitIndices { train, test })
}

/// Rozdelí dataset na (train, test)
pub fn split_dataset(dataset: &Dataset, test_fraction: f64, seed: u64) -> Result<(Dataset, Dataset)> {
    let indices = stratified_split(&dataset.labels, test_fraction, seed)?;
    Ok((dataset.subset(&indices.train), dataset.subset(&indices.test)))
}
