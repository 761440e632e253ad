//! Annual rotation backtest: bucket selection and compounding.

use super::annual_returns::{AnnualReturnPanel, ReturnRow};
use super::error::RotraderError;

/// Names held on each side of the rotation by default.
pub const DEFAULT_BUCKET_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Top,
    Bottom,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Top => write!(f, "Top"),
            Category::Bottom => write!(f, "Bottom"),
        }
    }
}

/// One bucket membership row in the append-only selection log.
///
/// `year` is the target year the bucket is held through, while
/// `ranking_return_pct` is the return of the *prior* (ranking) year. The
/// original report keyed the ranking return by the target year; that
/// labeling is kept verbatim for output compatibility.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionRecord {
    pub year: i32,
    pub category: Category,
    pub symbol: String,
    pub ranking_return_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPoint {
    pub year: i32,
    pub value: f64,
}

/// Portfolio value by year.
///
/// Invariant: the first point carries the initial value, and each later
/// point is the previous value compounded by that transition's realized
/// return. Values stay full precision; rounding is presentation-side.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PortfolioTrack {
    pub points: Vec<TrackPoint>,
}

impl PortfolioTrack {
    fn seeded(year: i32, initial_value: f64) -> Self {
        Self {
            points: vec![TrackPoint {
                year,
                value: initial_value,
            }],
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn years(&self) -> Vec<i32> {
        self.points.iter().map(|p| p.year).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn final_value(&self) -> Option<f64> {
        self.points.last().map(|p| p.value)
    }

    fn compound(&mut self, year: i32, realized_return: f64) {
        let prev = self.points.last().map(|p| p.value).unwrap_or_default();
        self.points.push(TrackPoint {
            year,
            value: prev * (1.0 + realized_return),
        });
    }
}

/// Everything one rotation pass produces.
#[derive(Debug, Clone)]
pub struct RotationOutcome {
    pub top: PortfolioTrack,
    pub bottom: PortfolioTrack,
    pub selections: Vec<SelectionRecord>,
}

/// Round to two decimals for presentation fields.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Run the winner/loser rotation over consecutive return rows.
///
/// For each transition the universe is narrowed to symbols with a return in
/// both years, the best and worst `bucket_size` names by ranking-year return
/// form the two buckets, and each track compounds by the mean realized
/// return of its bucket in the target year. Fewer than `bucket_size` valid
/// names is not an error: the buckets shrink to what is available.
pub fn run_rotation(
    returns: &AnnualReturnPanel,
    initial_value: f64,
    bucket_size: usize,
) -> Result<RotationOutcome, RotraderError> {
    let rows = &returns.rows;
    if rows.len() < 2 {
        return Err(RotraderError::NotEnoughYears { years: rows.len() });
    }

    let mut top = PortfolioTrack::seeded(rows[0].year, initial_value);
    let mut bottom = PortfolioTrack::seeded(rows[0].year, initial_value);
    let mut selections = Vec::new();

    for window in rows.windows(2) {
        let (current, next) = (&window[0], &window[1]);

        let top_bucket = rank(current, next, bucket_size, Direction::Descending);
        let bottom_bucket = rank(current, next, bucket_size, Direction::Ascending);

        if top_bucket.is_empty() || bottom_bucket.is_empty() {
            return Err(RotraderError::EmptySelection { year: next.year });
        }

        top.compound(next.year, realized_mean(next, &top_bucket));
        bottom.compound(next.year, realized_mean(next, &bottom_bucket));

        log_bucket(&mut selections, next.year, Category::Top, &top_bucket);
        log_bucket(&mut selections, next.year, Category::Bottom, &bottom_bucket);
    }

    Ok(RotationOutcome {
        top,
        bottom,
        selections,
    })
}

#[derive(Clone, Copy)]
enum Direction {
    Descending,
    Ascending,
}

/// Best (or worst) `bucket_size` symbols by ranking-year return, restricted
/// to symbols that also have a realized return in the target year.
///
/// Symbols enter the sort in alphabetical order and the sort is stable, so
/// equal returns keep alphabetical order.
fn rank<'a>(
    current: &'a ReturnRow,
    next: &ReturnRow,
    bucket_size: usize,
    direction: Direction,
) -> Vec<(&'a str, f64)> {
    let mut valid: Vec<&str> = current
        .returns
        .keys()
        .filter(|symbol| next.returns.contains_key(*symbol))
        .map(String::as_str)
        .collect();
    valid.sort_unstable();

    let mut ranked: Vec<(&str, f64)> = valid
        .into_iter()
        .map(|symbol| (symbol, current.returns[symbol]))
        .collect();
    match direction {
        Direction::Descending => ranked.sort_by(|a, b| b.1.total_cmp(&a.1)),
        Direction::Ascending => ranked.sort_by(|a, b| a.1.total_cmp(&b.1)),
    }
    ranked.truncate(bucket_size);
    ranked
}

fn realized_mean(next: &ReturnRow, bucket: &[(&str, f64)]) -> f64 {
    let sum: f64 = bucket.iter().map(|(symbol, _)| next.returns[*symbol]).sum();
    sum / bucket.len() as f64
}

fn log_bucket(
    selections: &mut Vec<SelectionRecord>,
    target_year: i32,
    category: Category,
    bucket: &[(&str, f64)],
) {
    for &(symbol, ranking_return) in bucket {
        selections.push(SelectionRecord {
            year: target_year,
            category,
            symbol: symbol.to_string(),
            ranking_return_pct: round2(ranking_return * 100.0),
        });
    }
}
