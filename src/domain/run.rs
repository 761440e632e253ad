//! One complete backtest run and its configuration.

use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::domain::annual_returns::{build_annual_returns, AnnualReturnPanel};
use crate::domain::error::RotraderError;
use crate::domain::price_panel::{PricePanel, PricePoint};
use crate::domain::rotation::{run_rotation, PortfolioTrack, SelectionRecord};
use crate::domain::summary::{summarize, SummaryRow};
use crate::domain::universe::Universe;
use crate::ports::data_port::PriceDataPort;

pub const DEFAULT_INITIAL_VALUE: f64 = 10_000.0;

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub initial_value: f64,
    pub bucket_size: usize,
}

/// Everything one backtest produced, owned as a single value.
///
/// There is no process-wide cache: every run recomputes from its own
/// immutable price snapshot, so repeated or concurrent runs cannot
/// interfere with each other.
#[derive(Debug, Clone)]
pub struct RotationRun {
    pub panel: PricePanel,
    pub returns: AnnualReturnPanel,
    pub top: PortfolioTrack,
    pub bottom: PortfolioTrack,
    pub selections: Vec<SelectionRecord>,
    pub summary: Vec<SummaryRow>,
    pub initial_value: f64,
}

impl RotationRun {
    /// Fetch the price snapshot and run the full pipeline.
    ///
    /// The fetch is a single synchronous call that gates everything
    /// downstream; its failure is fatal to the run.
    pub fn execute(
        data_port: &dyn PriceDataPort,
        universe: &Universe,
        config: &RunConfig,
    ) -> Result<Self, RotraderError> {
        let panel =
            data_port.fetch_closes(&universe.tickers(), config.start_date, config.end_date)?;
        if panel.is_empty() {
            return Err(RotraderError::Data {
                reason: "price panel is empty for the configured universe and window".into(),
            });
        }

        let returns = build_annual_returns(&panel);
        let outcome = run_rotation(&returns, config.initial_value, config.bucket_size)?;
        let summary = summarize(&outcome.top, &outcome.bottom, config.initial_value);

        Ok(Self {
            panel,
            returns,
            top: outcome.top,
            bottom: outcome.bottom,
            selections: outcome.selections,
            summary,
            initial_value: config.initial_value,
        })
    }

    /// Years with selection records, ascending and deduplicated.
    pub fn selection_years(&self) -> Vec<i32> {
        let years: BTreeSet<i32> = self.selections.iter().map(|s| s.year).collect();
        years.into_iter().collect()
    }

    pub fn selections_for_year(&self, year: i32) -> Vec<&SelectionRecord> {
        self.selections.iter().filter(|s| s.year == year).collect()
    }

    /// Normalized (first observation = 100) series for one symbol; `None`
    /// when the symbol has no data.
    pub fn normalized(&self, symbol: &str) -> Option<Vec<PricePoint>> {
        self.panel.normalized(symbol)
    }
}
