//! Inline SVG line charts for the dashboard.

use crate::domain::price_panel::PricePoint;
use crate::domain::rotation::PortfolioTrack;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 320.0;
const PADDING: f64 = 45.0;

struct Scale {
    min: f64,
    scale_x: f64,
    scale_y: f64,
    count: usize,
}

impl Scale {
    fn new(min: f64, max: f64, count: usize) -> Self {
        let plot_width = WIDTH - 2.0 * PADDING;
        let plot_height = HEIGHT - 2.0 * PADDING;
        let range = max - min;
        Self {
            min,
            scale_x: if count > 1 {
                plot_width / (count - 1) as f64
            } else {
                0.0
            },
            scale_y: if range > 0.0 { plot_height / range } else { 1.0 },
            count,
        }
    }

    fn polyline(&self, values: impl Iterator<Item = f64>) -> String {
        values
            .take(self.count)
            .enumerate()
            .map(|(i, value)| {
                let x = PADDING + i as f64 * self.scale_x;
                let y = HEIGHT - PADDING - (value - self.min) * self.scale_y;
                format!("{:.1},{:.1}", x, y)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn frame(title: &str, body: &str) -> String {
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">
<rect width="{w:.0}" height="{h:.0}" fill="white"/>
<text x="{tx:.0}" y="20" text-anchor="middle" font-family="sans-serif" font-size="14">{title}</text>
<line x1="{p:.0}" y1="{p:.0}" x2="{p:.0}" y2="{bot:.0}" stroke="#333"/>
<line x1="{p:.0}" y1="{bot:.0}" x2="{right:.0}" y2="{bot:.0}" stroke="#333"/>
{body}
</svg>
"##,
        w = WIDTH,
        h = HEIGHT,
        tx = WIDTH / 2.0,
        p = PADDING,
        bot = HEIGHT - PADDING,
        right = WIDTH - PADDING,
        title = title,
        body = body,
    )
}

/// Two-track portfolio value chart: top bucket in green, bottom in red.
pub fn portfolio_chart_svg(top: &PortfolioTrack, bottom: &PortfolioTrack) -> String {
    if top.is_empty() || bottom.is_empty() {
        return frame("No portfolio data available", "");
    }

    let values: Vec<f64> = top.values().into_iter().chain(bottom.values()).collect();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let scale = Scale::new(min, max, top.len().min(bottom.len()));

    let body = format!(
        r#"<polyline points="{}" fill="none" stroke="green" stroke-width="2"/>
<polyline points="{}" fill="none" stroke="red" stroke-width="2"/>"#,
        scale.polyline(top.values().into_iter()),
        scale.polyline(bottom.values().into_iter()),
    );
    frame("Cumulative Portfolio Value", &body)
}

/// Single normalized price series chart.
pub fn series_chart_svg(symbol: &str, points: &[PricePoint]) -> String {
    if points.is_empty() {
        return frame(&format!("No data available for {}", symbol), "");
    }

    let min = points.iter().map(|p| p.close).fold(f64::INFINITY, f64::min);
    let max = points
        .iter()
        .map(|p| p.close)
        .fold(f64::NEG_INFINITY, f64::max);
    let scale = Scale::new(min, max, points.len());

    let body = format!(
        r#"<polyline points="{}" fill="none" stroke="steelblue" stroke-width="1.5"/>"#,
        scale.polyline(points.iter().map(|p| p.close)),
    );
    frame(
        &format!("{} Normalized Price (100 = start)", symbol),
        &body,
    )
}
