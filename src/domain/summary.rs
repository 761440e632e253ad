//! Summary statistics derived from the two portfolio tracks.

use super::rotation::{round2, PortfolioTrack};

/// Per-year performance of both tracks, one row per transition.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub year: i32,
    pub top_return_pct: f64,
    pub bottom_return_pct: f64,
    pub top_end_value: f64,
    pub bottom_end_value: f64,
    pub top_cumulative_pct: f64,
    pub bottom_cumulative_pct: f64,
}

/// Derive the summary table from a pair of tracks.
///
/// All percentages and end values are rounded to two decimals here, at the
/// presentation boundary; the tracks themselves stay full precision so
/// compounding never accumulates rounding error.
pub fn summarize(
    top: &PortfolioTrack,
    bottom: &PortfolioTrack,
    initial_value: f64,
) -> Vec<SummaryRow> {
    top.points
        .windows(2)
        .zip(bottom.points.windows(2))
        .map(|(t, b)| {
            let (top_start, top_end) = (t[0].value, t[1].value);
            let (bottom_start, bottom_end) = (b[0].value, b[1].value);
            SummaryRow {
                year: t[1].year,
                top_return_pct: round2((top_end - top_start) / top_start * 100.0),
                bottom_return_pct: round2((bottom_end - bottom_start) / bottom_start * 100.0),
                top_end_value: round2(top_end),
                bottom_end_value: round2(bottom_end),
                top_cumulative_pct: round2((top_end / initial_value - 1.0) * 100.0),
                bottom_cumulative_pct: round2((bottom_end / initial_value - 1.0) * 100.0),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rotation::TrackPoint;
    use approx::assert_relative_eq;

    fn track(points: &[(i32, f64)]) -> PortfolioTrack {
        PortfolioTrack {
            points: points
                .iter()
                .map(|&(year, value)| TrackPoint { year, value })
                .collect(),
        }
    }

    #[test]
    fn one_row_per_transition() {
        let top = track(&[(2004, 10_000.0), (2005, 11_000.0), (2006, 12_100.0)]);
        let bottom = track(&[(2004, 10_000.0), (2005, 9_000.0), (2006, 9_900.0)]);

        let summary = summarize(&top, &bottom, 10_000.0);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].year, 2005);
        assert_eq!(summary[1].year, 2006);
    }

    #[test]
    fn per_year_returns() {
        let top = track(&[(2004, 10_000.0), (2005, 11_000.0), (2006, 12_100.0)]);
        let bottom = track(&[(2004, 10_000.0), (2005, 9_000.0), (2006, 9_900.0)]);

        let summary = summarize(&top, &bottom, 10_000.0);
        assert_relative_eq!(summary[0].top_return_pct, 10.0);
        assert_relative_eq!(summary[1].top_return_pct, 10.0);
        assert_relative_eq!(summary[0].bottom_return_pct, -10.0);
        assert_relative_eq!(summary[1].bottom_return_pct, 10.0);
    }

    #[test]
    fn end_values_rounded() {
        let top = track(&[(2004, 10_000.0), (2005, 10_333.3333)]);
        let bottom = track(&[(2004, 10_000.0), (2005, 9_666.6666)]);

        let summary = summarize(&top, &bottom, 10_000.0);
        assert_relative_eq!(summary[0].top_end_value, 10_333.33);
        assert_relative_eq!(summary[0].bottom_end_value, 9_666.67);
    }

    #[test]
    fn cumulative_measured_from_initial_value() {
        let top = track(&[(2004, 10_000.0), (2005, 11_000.0), (2006, 12_100.0)]);
        let bottom = track(&[(2004, 10_000.0), (2005, 9_000.0), (2006, 9_900.0)]);

        let summary = summarize(&top, &bottom, 10_000.0);
        assert_relative_eq!(summary[1].top_cumulative_pct, 21.0);
        assert_relative_eq!(summary[1].bottom_cumulative_pct, -1.0);
    }

    #[test]
    fn final_cumulative_matches_final_track_value() {
        let top = track(&[(2004, 10_000.0), (2005, 13_572.9182)]);
        let bottom = track(&[(2004, 10_000.0), (2005, 8_214.57)]);

        let summary = summarize(&top, &bottom, 10_000.0);
        let last = summary.last().unwrap();
        let expected = round2((13_572.9182 / 10_000.0 - 1.0) * 100.0);
        assert_relative_eq!(last.top_cumulative_pct, expected);
    }

    #[test]
    fn single_point_tracks_produce_no_rows() {
        let top = track(&[(2004, 10_000.0)]);
        let bottom = track(&[(2004, 10_000.0)]);
        assert!(summarize(&top, &bottom, 10_000.0).is_empty());
    }
}
