use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::matrix::DenseMatrix;

use super::{DataProcessor, MeanImputer, StandardScaler};
use crate::error::{PotabilityError, Result};

/// Konkrétne kroky predspracovania (enum kvôli serializácii)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Processor {
    Imputer(MeanImputer),
    Scaler(StandardScaler),
}

impl DataProcessor for Processor {
    fn get_name(&self) -> &str {
        match self {
            Processor::Imputer(p) => p.get_name(),
            Processor::Scaler(p) => p.get_name(),
        }
    }

    fn fit(&mut self, data: &DenseMatrix<f64>) -> Result<()> {
        match self {
            Processor::Imputer(p) => p.fit(data),
            Processor::Scaler(p) => p.fit(data),
        }
    }

    fn transform(&self, data: &DenseMatrix<f64>) -> Result<DenseMatrix<f64>> {
        match self {
            Processor::Imputer(p) => p.transform(data),
            Processor::Scaler(p) => p.transform(data),
        }
    }

    fn is_fitted(&self) -> bool {
        match self {
            Processor::Imputer(p) => p.is_fitted(),
            Processor::Scaler(p) => p.is_fitted(),
        }
    }
}

/// Decorator pattern pre chain-ovanie viacerých procesorov
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessorChain {
    processors: Vec<Processor>,
}

impl ProcessorChain {
    pub fn new() -> Self {
        Self {
            processors: Vec::new(),
        }
    }

    pub fn add(mut self, processor: Processor) -> Self {
        self.processors.push(processor);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn names(&self) -> Vec<&str> {
        self.processors.iter().map(|p| p.get_name()).collect()
    }
}

impl DataProcessor for ProcessorChain {
    fn get_name(&self) -> &str {
        "Processor Chain"
    }

    /// Každý procesor sa fit-uje na výstupe predchádzajúcich
    fn fit(&mut self, data: &DenseMatrix<f64>) -> Result<()> {
        self.fit_transform(data).map(|_| ())
    }

    fn fit_transform(&mut self, data: &DenseMatrix<f64>) -> Result<DenseMatrix<f64>> {
        let mut current = data.clone();
        for processor in self.processors.iter_mut() {
            current = processor.fit_transform(&current)?;
        }
        Ok(current)
    }

    fn transform(&self, data: &DenseMatrix<f64>) -> Result<DenseMatrix<f64>> {
        if !self.is_fitted() {
            return Err(PotabilityError::InferenceFailure(
                "processor chain is not fitted".to_string(),
            ));
        }
        let mut result = data.clone();
        for processor in &self.processors {
            result = processor.transform(&result)?;
        }
        Ok(result)
    }

    fn is_fitted(&self) -> bool {
        self.processors.iter().all(|p| p.is_fitted())
    }
}
