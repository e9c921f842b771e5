pub mod data_loader; // Strategy trait
pub mod csv_data_loader; // CSV implementation of strategy
pub mod json_data_loader; // JSON implementation of strategy
pub mod factory; // Factory for loaders
pub mod schema;
pub mod sample;
pub mod dataset;

pub use data_loader::{DataLoader, RawTable};
pub use csv_data_loader::CsvDataLoader;
pub use json_data_loader::JsonDataLoader;
pub use factory::DataLoaderFactory;
pub use schema::{FeatureSchema, FeatureSpec, RangePolicy};
pub use sample::{Sample, WaterSample};
pub use dataset::{load, load_samples, load_with, Dataset};
