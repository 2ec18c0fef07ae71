//! CSV and JSON output for scenario results

use super::ScenarioResult;
use crate::error::Result;
use crate::series::Period;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct ComponentRow<'a> {
    component: &'a str,
    period: Period,
    historical: f64,
    projected: f64,
    lower: f64,
    upper: f64,
}

/// Long-format table: one row per component and period
pub fn write_components_csv<W: Write>(result: &ScenarioResult, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for component in &result.components {
        let p = &component.projection;
        for (t, &period) in result.periods.iter().enumerate() {
            wtr.serialize(ComponentRow {
                component: &component.name,
                period,
                historical: component.historical[t],
                projected: p.projected[t],
                lower: p.lower[t],
                upper: p.upper[t],
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Reconstructed vs. historical aggregate, one row per period
pub fn write_aggregate_csv<W: Write>(result: &ScenarioResult, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in &result.comparison.rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(result: &ScenarioResult, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, result)?;
    Ok(())
}
