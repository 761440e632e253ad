//! Close-price panel for a universe of symbols.

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// A snapshot of daily adjusted closes, one ordered series per symbol.
///
/// A date with no observation for a symbol is simply absent from that
/// symbol's series. The panel is built once per run and never mutated
/// afterwards.
#[derive(Debug, Clone, Default)]
pub struct PricePanel {
    series: BTreeMap<String, Vec<PricePoint>>,
}

impl PricePanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a symbol's series, sorting it by date.
    pub fn insert(&mut self, symbol: impl Into<String>, mut points: Vec<PricePoint>) {
        points.sort_by_key(|p| p.date);
        self.series.insert(symbol.into(), points);
    }

    /// Symbols in the panel, in sorted order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    pub fn symbol_count(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.values().all(|points| points.is_empty())
    }

    pub fn series(&self, symbol: &str) -> Option<&[PricePoint]> {
        self.series.get(symbol).map(Vec::as_slice)
    }

    /// Last observed close in each calendar year for one symbol.
    pub fn year_end_closes(&self, symbol: &str) -> BTreeMap<i32, f64> {
        let mut closes = BTreeMap::new();
        if let Some(points) = self.series.get(symbol) {
            for point in points {
                // Series is date-sorted, so the last write per year wins.
                closes.insert(point.date.year(), point.close);
            }
        }
        closes
    }

    /// Earliest and latest observed calendar years across all symbols.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let mut span: Option<(i32, i32)> = None;
        for point in self.series.values().flatten() {
            let year = point.date.year();
            span = Some(match span {
                None => (year, year),
                Some((min, max)) => (min.min(year), max.max(year)),
            });
        }
        span
    }

    /// The series rescaled so its first observation is exactly 100.
    ///
    /// `None` for unknown symbols, empty series, or a non-positive first
    /// print (nothing meaningful to rescale against).
    pub fn normalized(&self, symbol: &str) -> Option<Vec<PricePoint>> {
        let points = self.series.get(symbol)?;
        let first = points.first()?.close;
        if first <= 0.0 {
            return None;
        }
        Some(
            points
                .iter()
                .map(|p| PricePoint {
                    date: p.date,
                    close: p.close / first * 100.0,
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(date: &str, close: f64) -> PricePoint {
        PricePoint {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            close,
        }
    }

    fn sample_panel() -> PricePanel {
        let mut panel = PricePanel::new();
        panel.insert(
            "AAPL",
            vec![
                point("2004-01-02", 10.0),
                point("2004-12-30", 12.0),
                point("2005-12-29", 15.0),
            ],
        );
        panel.insert(
            "MSFT",
            vec![point("2005-03-01", 25.0), point("2005-11-15", 27.5)],
        );
        panel
    }

    #[test]
    fn insert_sorts_by_date() {
        let mut panel = PricePanel::new();
        panel.insert(
            "AAPL",
            vec![point("2004-12-30", 12.0), point("2004-01-02", 10.0)],
        );
        let series = panel.series("AAPL").unwrap();
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2004, 1, 2).unwrap());
        assert_eq!(series[1].date, NaiveDate::from_ymd_opt(2004, 12, 30).unwrap());
    }

    #[test]
    fn symbols_sorted() {
        let panel = sample_panel();
        let symbols: Vec<&str> = panel.symbols().collect();
        assert_eq!(symbols, vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn year_end_closes_takes_last_observation() {
        let panel = sample_panel();
        let closes = panel.year_end_closes("AAPL");
        assert_eq!(closes.len(), 2);
        assert!((closes[&2004] - 12.0).abs() < f64::EPSILON);
        assert!((closes[&2005] - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn year_end_closes_missing_year_absent() {
        let panel = sample_panel();
        let closes = panel.year_end_closes("MSFT");
        assert!(!closes.contains_key(&2004));
        assert!((closes[&2005] - 27.5).abs() < f64::EPSILON);
    }

    #[test]
    fn year_end_closes_unknown_symbol_empty() {
        let panel = sample_panel();
        assert!(panel.year_end_closes("XYZ").is_empty());
    }

    #[test]
    fn year_span_covers_panel() {
        let panel = sample_panel();
        assert_eq!(panel.year_span(), Some((2004, 2005)));
    }

    #[test]
    fn year_span_empty_panel() {
        assert_eq!(PricePanel::new().year_span(), None);
    }

    #[test]
    fn normalized_starts_at_100() {
        let panel = sample_panel();
        let series = panel.normalized("AAPL").unwrap();
        assert!((series[0].close - 100.0).abs() < f64::EPSILON);
        assert!((series[1].close - 120.0).abs() < 1e-9);
        assert!((series[2].close - 150.0).abs() < 1e-9);
    }

    #[test]
    fn normalized_unknown_symbol_none() {
        let panel = sample_panel();
        assert!(panel.normalized("XYZ").is_none());
    }

    #[test]
    fn normalized_empty_series_none() {
        let mut panel = PricePanel::new();
        panel.insert("EMPTY", vec![]);
        assert!(panel.normalized("EMPTY").is_none());
    }

    #[test]
    fn is_empty_ignores_symbols_without_points() {
        let mut panel = PricePanel::new();
        panel.insert("EMPTY", vec![]);
        assert!(panel.is_empty());
        panel.insert("AAPL", vec![point("2004-01-02", 10.0)]);
        assert!(!panel.is_empty());
    }
}
