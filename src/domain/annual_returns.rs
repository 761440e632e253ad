//! Year-over-year return panel derived from a price panel.

use std::collections::HashMap;

use super::price_panel::PricePanel;

/// Returns for one calendar year, keyed by symbol.
#[derive(Debug, Clone)]
pub struct ReturnRow {
    pub year: i32,
    pub returns: HashMap<String, f64>,
}

/// Ordered annual return rows.
///
/// Invariant: years strictly increasing, at most one row per calendar year,
/// every row holds at least one return.
#[derive(Debug, Clone, Default)]
pub struct AnnualReturnPanel {
    pub rows: Vec<ReturnRow>,
}

impl AnnualReturnPanel {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn years(&self) -> Vec<i32> {
        self.rows.iter().map(|row| row.year).collect()
    }
}

/// Resample the panel to year-end observations and derive percentage returns.
///
/// For each symbol the last observed price in each calendar year stands in
/// for that year-end; `return[y] = close[y] / close[y-1] - 1` exists only
/// when both adjacent years have an observation. Nothing is interpolated or
/// zero-filled, and years with no defined return at all (always including
/// the first observed year) produce no row.
pub fn build_annual_returns(panel: &PricePanel) -> AnnualReturnPanel {
    let Some((first_year, last_year)) = panel.year_span() else {
        return AnnualReturnPanel::default();
    };

    let yearly: Vec<(&str, std::collections::BTreeMap<i32, f64>)> = panel
        .symbols()
        .map(|symbol| (symbol, panel.year_end_closes(symbol)))
        .collect();

    let mut rows = Vec::new();
    for year in (first_year + 1)..=last_year {
        let mut returns = HashMap::new();
        for (symbol, closes) in &yearly {
            if let (Some(&prev), Some(&curr)) = (closes.get(&(year - 1)), closes.get(&year)) {
                if prev != 0.0 {
                    returns.insert(symbol.to_string(), curr / prev - 1.0);
                }
            }
        }
        if !returns.is_empty() {
            rows.push(ReturnRow { year, returns });
        }
    }

    AnnualReturnPanel { rows }
}
