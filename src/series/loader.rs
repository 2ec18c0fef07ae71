//! Load datasets from wide CSV tables
//!
//! Layout: one row per period. The first column holds the year, the column
//! named by `aggregate_column` holds the ground-truth aggregate, and every
//! other column is a component series (kept in column order).

use super::{ComponentSeries, Dataset, Period};
use crate::error::{Result, ScenarioError};
use log::debug;
use std::io::Read;
use std::path::Path;

/// Ground-truth column in the bundled table (UAH billion)
pub const DEFAULT_AGGREGATE_COLUMN: &str = "nom_gdp_uah_total_byexp";

const DEFAULT_DATASET_CSV: &str = include_str!("../../data/gdp_expenditure.csv");

/// Load a dataset from a CSV file on disk
pub fn load_dataset<P: AsRef<Path>>(path: P, aggregate_column: &str) -> Result<Dataset> {
    let file = std::fs::File::open(path.as_ref())?;
    debug!("Loading dataset from {}", path.as_ref().display());
    load_dataset_from_reader(file, aggregate_column)
}

/// Load a dataset from any CSV reader
pub fn load_dataset_from_reader<R: Read>(reader: R, aggregate_column: &str) -> Result<Dataset> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.len() < 2 {
        return Err(ScenarioError::invalid_series(
            "CSV needs a period column and at least one value column",
        ));
    }
    let agg_idx = headers
        .iter()
        .position(|h| h == aggregate_column)
        .ok_or_else(|| {
            ScenarioError::invalid_series(format!("aggregate column '{}' not found", aggregate_column))
        })?;
    if agg_idx == 0 {
        return Err(ScenarioError::invalid_series(
            "aggregate column cannot be the period column",
        ));
    }

    let component_cols: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(idx, _)| *idx != agg_idx)
        .map(|(idx, name)| (idx, name.to_string()))
        .collect();

    let mut periods: Vec<Period> = Vec::new();
    let mut ground_truth = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); component_cols.len()];

    for (row_idx, record) in rdr.records().enumerate() {
        let record = record?;
        let line = row_idx + 2;

        let period_str = record.get(0).unwrap_or_default();
        let period: Period = period_str.parse().map_err(|_| {
            ScenarioError::invalid_series(format!("line {}: bad period '{}'", line, period_str))
        })?;
        periods.push(period);

        ground_truth.push(parse_value(&record, agg_idx, aggregate_column, line)?);
        for (slot, (idx, name)) in columns.iter_mut().zip(&component_cols) {
            slot.push(parse_value(&record, *idx, name, line)?);
        }
    }

    let components = component_cols
        .into_iter()
        .zip(columns)
        .map(|((_, name), values)| ComponentSeries::new(name, values))
        .collect();

    let dataset = Dataset::new(periods, components, aggregate_column, ground_truth)?;
    debug!(
        "Loaded {} components over {} periods",
        dataset.components().len(),
        dataset.n_periods()
    );
    Ok(dataset)
}

fn parse_value(record: &csv::StringRecord, idx: usize, column: &str, line: usize) -> Result<f64> {
    let raw = record.get(idx).unwrap_or_default();
    raw.parse::<f64>().map_err(|_| {
        ScenarioError::invalid_series(format!(
            "line {}: column '{}' has non-numeric value '{}'",
            line, column, raw
        ))
    })
}

/// The bundled 2019-2027 expenditure-approach table
///
/// Components are in UAH million; the aggregate is in UAH billion.
pub fn default_dataset() -> Result<Dataset> {
    load_dataset_from_reader(DEFAULT_DATASET_CSV.as_bytes(), DEFAULT_AGGREGATE_COLUMN)
}
