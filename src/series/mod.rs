//! Historical component series and dataset loading

mod data;
pub mod loader;

pub use data::{ComponentSeries, Dataset, Period};
pub use loader::{default_dataset, load_dataset, load_dataset_from_reader, DEFAULT_AGGREGATE_COLUMN};
