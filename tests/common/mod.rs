#![allow(dead_code)]

use chrono::NaiveDate;
use rotrader::domain::annual_returns::{AnnualReturnPanel, ReturnRow};
use rotrader::domain::error::RotraderError;
use rotrader::domain::price_panel::{PricePanel, PricePoint};
use rotrader::domain::run::RunConfig;
use rotrader::domain::universe::Universe;
use rotrader::ports::data_port::PriceDataPort;
use std::collections::HashMap;

pub struct MockPricePort {
    pub data: HashMap<String, Vec<PricePoint>>,
    pub fail_with: Option<String>,
}

impl MockPricePort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            fail_with: None,
        }
    }

    pub fn with_series(mut self, symbol: &str, points: Vec<PricePoint>) -> Self {
        self.data.insert(symbol.to_string(), points);
        self
    }

    pub fn failing(mut self, reason: &str) -> Self {
        self.fail_with = Some(reason.to_string());
        self
    }
}

impl PriceDataPort for MockPricePort {
    fn fetch_closes(
        &self,
        symbols: &[String],
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PricePanel, RotraderError> {
        if let Some(reason) = &self.fail_with {
            return Err(RotraderError::Data {
                reason: reason.clone(),
            });
        }
        let mut panel = PricePanel::new();
        for symbol in symbols {
            if let Some(points) = self.data.get(symbol) {
                let windowed: Vec<PricePoint> = points
                    .iter()
                    .filter(|p| p.date >= start_date && p.date <= end_date)
                    .copied()
                    .collect();
                if !windowed.is_empty() {
                    panel.insert(symbol.clone(), windowed);
                }
            }
        }
        Ok(panel)
    }

    fn list_symbols(&self) -> Result<Vec<String>, RotraderError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, RotraderError> {
        match self.data.get(symbol) {
            Some(points) if !points.is_empty() => {
                let min = points.iter().map(|p| p.date).min().unwrap();
                let max = points.iter().map(|p| p.date).max().unwrap();
                Ok(Some((min, max, points.len())))
            }
            _ => Ok(None),
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn point(date_str: &str, close: f64) -> PricePoint {
    PricePoint {
        date: NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap(),
        close,
    }
}

/// Year-end observations for `closes[i]` in year `start_year + i`.
pub fn yearly_series(start_year: i32, closes: &[f64]) -> Vec<PricePoint> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PricePoint {
            date: NaiveDate::from_ymd_opt(start_year + i as i32, 12, 30).unwrap(),
            close,
        })
        .collect()
}

pub fn return_row(year: i32, returns: &[(&str, f64)]) -> ReturnRow {
    ReturnRow {
        year,
        returns: returns
            .iter()
            .map(|(s, r)| (s.to_string(), *r))
            .collect::<HashMap<_, _>>(),
    }
}

pub fn return_panel(rows: Vec<ReturnRow>) -> AnnualReturnPanel {
    AnnualReturnPanel { rows }
}

pub fn sample_universe(tickers: &[&str]) -> Universe {
    let mut csv = String::from("name,ticker\n");
    for ticker in tickers {
        csv.push_str(&format!("{} Inc,{}\n", ticker, ticker));
    }
    Universe::from_csv_str(&csv).unwrap()
}

pub fn sample_run_config() -> RunConfig {
    RunConfig {
        start_date: date(2003, 1, 1),
        end_date: date(2010, 12, 31),
        initial_value: 10_000.0,
        bucket_size: 10,
    }
}
