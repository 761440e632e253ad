//! CSV report adapter implementing ReportPort.
//!
//! Writes the run's three output tables into a directory:
//! `tracks.csv`, `summary.csv`, `selections.csv`.

use std::fs;
use std::path::Path;

use crate::domain::error::RotraderError;
use crate::domain::run::RotationRun;
use crate::ports::report_port::ReportPort;

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn csv_error(path: &Path, err: impl std::fmt::Display) -> RotraderError {
    RotraderError::Data {
        reason: format!("failed to write {}: {}", path.display(), err),
    }
}

fn write_tracks(run: &RotationRun, path: &Path) -> Result<(), RotraderError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| csv_error(path, e))?;
    writer
        .write_record(["year", "top_value", "bottom_value"])
        .map_err(|e| csv_error(path, e))?;

    for (top, bottom) in run.top.points.iter().zip(run.bottom.points.iter()) {
        writer
            .write_record([
                top.year.to_string(),
                top.value.to_string(),
                bottom.value.to_string(),
            ])
            .map_err(|e| csv_error(path, e))?;
    }
    writer.flush().map_err(|e| csv_error(path, e))?;
    Ok(())
}

fn write_summary(run: &RotationRun, path: &Path) -> Result<(), RotraderError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| csv_error(path, e))?;
    writer
        .write_record([
            "year",
            "top_return_pct",
            "bottom_return_pct",
            "top_end_value",
            "bottom_end_value",
            "top_cumulative_pct",
            "bottom_cumulative_pct",
        ])
        .map_err(|e| csv_error(path, e))?;

    for row in &run.summary {
        writer
            .write_record([
                row.year.to_string(),
                format!("{:.2}", row.top_return_pct),
                format!("{:.2}", row.bottom_return_pct),
                format!("{:.2}", row.top_end_value),
                format!("{:.2}", row.bottom_end_value),
                format!("{:.2}", row.top_cumulative_pct),
                format!("{:.2}", row.bottom_cumulative_pct),
            ])
            .map_err(|e| csv_error(path, e))?;
    }
    writer.flush().map_err(|e| csv_error(path, e))?;
    Ok(())
}

fn write_selections(run: &RotationRun, path: &Path) -> Result<(), RotraderError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| csv_error(path, e))?;
    writer
        .write_record(["year", "category", "symbol", "ranking_return_pct"])
        .map_err(|e| csv_error(path, e))?;

    for record in &run.selections {
        writer
            .write_record([
                record.year.to_string(),
                record.category.to_string(),
                record.symbol.clone(),
                format!("{:.2}", record.ranking_return_pct),
            ])
            .map_err(|e| csv_error(path, e))?;
    }
    writer.flush().map_err(|e| csv_error(path, e))?;
    Ok(())
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, run: &RotationRun, output_dir: &Path) -> Result<(), RotraderError> {
        fs::create_dir_all(output_dir)?;
        write_tracks(run, &output_dir.join("tracks.csv"))?;
        write_summary(run, &output_dir.join("summary.csv"))?;
        write_selections(run, &output_dir.join("selections.csv"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::annual_returns::{AnnualReturnPanel, ReturnRow};
    use crate::domain::price_panel::PricePanel;
    use crate::domain::rotation::run_rotation;
    use crate::domain::summary::summarize;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn sample_run() -> RotationRun {
        let returns = AnnualReturnPanel {
            rows: vec![
                ReturnRow {
                    year: 2004,
                    returns: HashMap::from([("A".to_string(), 0.5), ("B".to_string(), -0.3)]),
                },
                ReturnRow {
                    year: 2005,
                    returns: HashMap::from([("A".to_string(), 0.1), ("B".to_string(), 0.2)]),
                },
            ],
        };
        let outcome = run_rotation(&returns, 10_000.0, 1).unwrap();
        let summary = summarize(&outcome.top, &outcome.bottom, 10_000.0);
        RotationRun {
            panel: PricePanel::new(),
            returns,
            top: outcome.top,
            bottom: outcome.bottom,
            selections: outcome.selections,
            summary,
            initial_value: 10_000.0,
        }
    }

    #[test]
    fn writes_all_three_tables() {
        let dir = TempDir::new().unwrap();
        CsvReportAdapter::new()
            .write(&sample_run(), dir.path())
            .unwrap();

        assert!(dir.path().join("tracks.csv").exists());
        assert!(dir.path().join("summary.csv").exists());
        assert!(dir.path().join("selections.csv").exists());
    }

    #[test]
    fn tracks_table_contents() {
        let dir = TempDir::new().unwrap();
        CsvReportAdapter::new()
            .write(&sample_run(), dir.path())
            .unwrap();

        let content = fs::read_to_string(dir.path().join("tracks.csv")).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("year,top_value,bottom_value"));
        assert_eq!(lines.next(), Some("2004,10000,10000"));
        assert_eq!(lines.next(), Some("2005,11000,12000"));
    }

    #[test]
    fn summary_table_contents() {
        let dir = TempDir::new().unwrap();
        CsvReportAdapter::new()
            .write(&sample_run(), dir.path())
            .unwrap();

        let content = fs::read_to_string(dir.path().join("summary.csv")).unwrap();
        let mut lines = content.lines();
        lines.next(); // header
        assert_eq!(
            lines.next(),
            Some("2005,10.00,20.00,11000.00,12000.00,10.00,20.00")
        );
    }

    #[test]
    fn selections_table_contents() {
        let dir = TempDir::new().unwrap();
        CsvReportAdapter::new()
            .write(&sample_run(), dir.path())
            .unwrap();

        let content = fs::read_to_string(dir.path().join("selections.csv")).unwrap();
        assert!(content.starts_with("year,category,symbol,ranking_return_pct\n"));
        assert!(content.contains("2005,Top,A,50.00"));
        assert!(content.contains("2005,Bottom,B,-30.00"));
    }

    #[test]
    fn creates_missing_output_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("report").join("latest");
        CsvReportAdapter::new().write(&sample_run(), &nested).unwrap();
        assert!(nested.join("tracks.csv").exists());
    }
}
