//! Tabular (CSV) export of an analysis report
//!
//! One row per bar in series order; missing indicator values are empty cells.

use std::io::Write;
use std::path::Path;

use crate::indicators::registry::{IndicatorKind, IndicatorRegistry};
use crate::models::indicators::IndicatorPoint;
use crate::models::report::AnalysisReport;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn header() -> Vec<&'static str> {
    let mut columns = vec!["timestamp", "close"];
    columns.extend(IndicatorRegistry::new().column_names());
    columns
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn indicator_value(point: &IndicatorPoint, kind: IndicatorKind) -> Option<f64> {
    match kind {
        IndicatorKind::RollingMa => point.rolling_ma,
        IndicatorKind::Rsi => point.rsi,
        IndicatorKind::UpperBand => point.upper_band,
        IndicatorKind::LowerBand => point.lower_band,
    }
}

/// Write `report` as CSV to any writer
pub fn write_report_csv<W: Write>(report: &AnalysisReport, writer: W) -> Result<(), ExportError> {
    let registry = IndicatorRegistry::new();
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(header())?;

    for (bar, point) in report.rows() {
        let mut record = vec![bar.timestamp.to_rfc3339(), bar.close.to_string()];
        record.extend(
            registry
                .kinds()
                .iter()
                .map(|&kind| cell(indicator_value(point, kind))),
        );
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_report_csv_to_path(report: &AnalysisReport, path: &Path) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    write_report_csv(report, file)
}
