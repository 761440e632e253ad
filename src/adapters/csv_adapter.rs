//! CSV close-price data adapter.
//!
//! One file per symbol under a base directory: `{SYMBOL}.csv` with a
//! `date,close` header. A blank close cell is a missing observation, not a
//! zero.

use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

use crate::domain::error::RotraderError;
use crate::domain::price_panel::{PricePanel, PricePoint};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::PriceDataPort;

pub struct CsvPriceAdapter {
    base_path: PathBuf,
}

impl CsvPriceAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, RotraderError> {
        let dir = config
            .get_string("data", "prices_dir")
            .ok_or_else(|| RotraderError::ConfigMissing {
                section: "data".to_string(),
                key: "prices_dir".to_string(),
            })?;
        Ok(Self::new(PathBuf::from(dir)))
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    fn read_series(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PricePoint>, RotraderError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| RotraderError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut reader = csv::Reader::from_reader(content.as_bytes());
        let mut points = Vec::new();

        for result in reader.records() {
            let record = result.map_err(|e| RotraderError::Data {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;

            let date_str = record.get(0).ok_or_else(|| RotraderError::Data {
                reason: format!("missing date column in {}", path.display()),
            })?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                RotraderError::Data {
                    reason: format!("invalid date in {}: {}", path.display(), e),
                }
            })?;

            if date < start_date || date > end_date {
                continue;
            }

            let close_str = record.get(1).unwrap_or("").trim();
            if close_str.is_empty() {
                // Missing observation for this date.
                continue;
            }
            let close: f64 = close_str.parse().map_err(|e| RotraderError::Data {
                reason: format!("invalid close value in {}: {}", path.display(), e),
            })?;

            points.push(PricePoint { date, close });
        }

        points.sort_by_key(|p| p.date);
        Ok(points)
    }
}

impl PriceDataPort for CsvPriceAdapter {
    fn fetch_closes(
        &self,
        symbols: &[String],
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PricePanel, RotraderError> {
        let mut panel = PricePanel::new();

        for symbol in symbols {
            if !self.csv_path(symbol).exists() {
                eprintln!("warning: no price file for {}, excluding", symbol);
                continue;
            }
            let points = self.read_series(symbol, start_date, end_date)?;
            if points.is_empty() {
                eprintln!("warning: {} has no observations in window, excluding", symbol);
                continue;
            }
            panel.insert(symbol.clone(), points);
        }

        Ok(panel)
    }

    fn list_symbols(&self) -> Result<Vec<String>, RotraderError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| RotraderError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| RotraderError::Data {
                reason: format!("directory entry error: {}", e),
            })?;
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(symbol) = name_str.strip_suffix(".csv") {
                symbols.push(symbol.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, RotraderError> {
        if !self.csv_path(symbol).exists() {
            return Ok(None);
        }
        let points = self.read_series(symbol, NaiveDate::MIN, NaiveDate::MAX)?;
        match (points.first(), points.last()) {
            (Some(first), Some(last)) => Ok(Some((first.date, last.date, points.len()))),
            _ => Ok(None),
        }
    }
}
