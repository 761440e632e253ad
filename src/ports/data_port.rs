//! Price history access port trait.

use chrono::NaiveDate;

use crate::domain::error::RotraderError;
use crate::domain::price_panel::PricePanel;

pub trait PriceDataPort {
    /// Fetch daily adjusted closes for `symbols` within the window.
    ///
    /// Symbols with no observations at all are left out of the returned
    /// panel; an unreadable or corrupt source is an error and fatal to the
    /// run.
    fn fetch_closes(
        &self,
        symbols: &[String],
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PricePanel, RotraderError>;

    fn list_symbols(&self) -> Result<Vec<String>, RotraderError>;

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, RotraderError>;
}
