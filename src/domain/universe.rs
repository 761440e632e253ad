//! Company-name to ticker universe table.
//!
//! The universe is static configuration, not logic: it is loaded from a CSV
//! file (`name,ticker` header) rather than baked into the code.

use std::collections::HashSet;
use std::path::Path;

use crate::domain::error::{RotraderError, UniverseError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniverseEntry {
    pub name: String,
    pub ticker: String,
}

/// The fixed set of symbols eligible for selection, with display names.
#[derive(Debug, Clone, Default)]
pub struct Universe {
    pub entries: Vec<UniverseEntry>,
}

impl Universe {
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, RotraderError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_csv_str(&content)?)
    }

    /// Parse a `name,ticker` CSV. Tickers are uppercased; empty fields and
    /// duplicate tickers are rejected.
    pub fn from_csv_str(content: &str) -> Result<Self, UniverseError> {
        let mut reader = csv::Reader::from_reader(content.as_bytes());
        let mut entries = Vec::new();
        let mut seen = HashSet::new();

        for (i, record) in reader.records().enumerate() {
            let line = i + 2; // header is line 1
            let record = record.map_err(|_| UniverseError::MalformedRow { line })?;

            let name = record.get(0).unwrap_or("").trim();
            let ticker = record.get(1).unwrap_or("").trim();
            if name.is_empty() || ticker.is_empty() {
                return Err(UniverseError::EmptyField { line });
            }

            let ticker = ticker.to_uppercase();
            if !seen.insert(ticker.clone()) {
                return Err(UniverseError::DuplicateTicker(ticker));
            }
            entries.push(UniverseEntry {
                name: name.to_string(),
                ticker,
            });
        }

        if entries.is_empty() {
            return Err(UniverseError::Empty);
        }
        Ok(Self { entries })
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn tickers(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.ticker.clone()).collect()
    }

    pub fn contains(&self, ticker: &str) -> bool {
        self.entries.iter().any(|e| e.ticker == ticker)
    }

    pub fn name_for(&self, ticker: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.ticker == ticker)
            .map(|e| e.name.as_str())
    }
}
