//! HTTP request handlers for the web adapter.

use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::domain::rotation::SelectionRecord;
use crate::domain::summary::SummaryRow;

use super::{chart_svg, AppState, WebError};

#[derive(serde::Serialize)]
pub struct TrackRowDto {
    pub year: i32,
    pub top_value: f64,
    pub bottom_value: f64,
}

#[derive(serde::Serialize)]
pub struct SummaryRowDto {
    pub year: i32,
    pub top_return_pct: f64,
    pub bottom_return_pct: f64,
    pub top_end_value: f64,
    pub bottom_end_value: f64,
    pub top_cumulative_pct: f64,
    pub bottom_cumulative_pct: f64,
}

impl From<&SummaryRow> for SummaryRowDto {
    fn from(row: &SummaryRow) -> Self {
        Self {
            year: row.year,
            top_return_pct: row.top_return_pct,
            bottom_return_pct: row.bottom_return_pct,
            top_end_value: row.top_end_value,
            bottom_end_value: row.bottom_end_value,
            top_cumulative_pct: row.top_cumulative_pct,
            bottom_cumulative_pct: row.bottom_cumulative_pct,
        }
    }
}

#[derive(serde::Serialize)]
pub struct SelectionDto {
    pub year: i32,
    pub category: String,
    pub symbol: String,
    pub ranking_return_pct: f64,
}

impl From<&SelectionRecord> for SelectionDto {
    fn from(record: &SelectionRecord) -> Self {
        Self {
            year: record.year,
            category: record.category.to_string(),
            symbol: record.symbol.clone(),
            ranking_return_pct: record.ranking_return_pct,
        }
    }
}

#[derive(serde::Serialize)]
pub struct PointDto {
    pub date: String,
    pub close: f64,
}

pub async fn tracks(State(state): State<Arc<AppState>>) -> Json<Vec<TrackRowDto>> {
    let rows = state
        .run
        .top
        .points
        .iter()
        .zip(state.run.bottom.points.iter())
        .map(|(top, bottom)| TrackRowDto {
            year: top.year,
            top_value: top.value,
            bottom_value: bottom.value,
        })
        .collect();
    Json(rows)
}

pub async fn summary(State(state): State<Arc<AppState>>) -> Json<Vec<SummaryRowDto>> {
    Json(state.run.summary.iter().map(SummaryRowDto::from).collect())
}

pub async fn selections_for_year(
    State(state): State<Arc<AppState>>,
    Path(year): Path<i32>,
) -> Json<Vec<SelectionDto>> {
    Json(
        state
            .run
            .selections_for_year(year)
            .into_iter()
            .map(SelectionDto::from)
            .collect(),
    )
}

pub async fn stock_series(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> Result<Json<Vec<PointDto>>, WebError> {
    let symbol = symbol.to_uppercase();
    match state.run.normalized(&symbol) {
        Some(points) => Ok(Json(
            points
                .iter()
                .map(|p| PointDto {
                    date: p.date.to_string(),
                    close: p.close,
                })
                .collect(),
        )),
        None => Err(WebError::not_found(format!(
            "no data available for {}",
            symbol
        ))),
    }
}

pub async fn portfolio_chart(State(state): State<Arc<AppState>>) -> Response {
    let svg = chart_svg::portfolio_chart_svg(&state.run.top, &state.run.bottom);
    ([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response()
}

pub async fn stock_chart(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> Result<Response, WebError> {
    let symbol = symbol
        .strip_suffix(".svg")
        .unwrap_or(&symbol)
        .to_uppercase();
    match state.run.normalized(&symbol) {
        Some(points) => {
            let svg = chart_svg::series_chart_svg(&symbol, &points);
            Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
        }
        None => Err(WebError::not_found(format!(
            "no data available for {}",
            symbol
        ))),
    }
}

pub async fn dashboard(State(state): State<Arc<AppState>>) -> Html<String> {
    let run = &state.run;
    let mut html = String::from(
        "<!DOCTYPE html><html><head><title>Winner vs Loser Portfolio Strategy</title></head><body>",
    );
    html.push_str("<h1>Winner vs Loser Portfolio Strategy</h1>");

    html.push_str("<img src=\"/chart/portfolio.svg\" alt=\"Cumulative Portfolio Value\">");

    html.push_str("<h2>Summary Table (Portfolio Stats)</h2>");
    html.push_str("<table border=\"1\"><tr><th>Year</th><th>Top Return %</th><th>Bottom Return %</th><th>Top End Value</th><th>Bottom End Value</th><th>Top Cumulative %</th><th>Bottom Cumulative %</th></tr>");
    for row in &run.summary {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td></tr>",
            row.year,
            row.top_return_pct,
            row.bottom_return_pct,
            row.top_end_value,
            row.bottom_end_value,
            row.top_cumulative_pct,
            row.bottom_cumulative_pct,
        ));
    }
    html.push_str("</table>");

    html.push_str("<h2>Top &amp; Bottom Stocks by Year</h2><ul>");
    for year in run.selection_years() {
        html.push_str(&format!(
            "<li><a href=\"/api/selections/{year}\">{year}</a></li>",
        ));
    }
    html.push_str("</ul>");

    html.push_str("<h2>Individual Stock Analysis</h2><ul>");
    for entry in &state.universe.entries {
        html.push_str(&format!(
            "<li><a href=\"/chart/stock/{}.svg\">{} ({})</a></li>",
            entry.ticker, entry.name, entry.ticker,
        ));
    }
    html.push_str("</ul></body></html>");

    Html(html)
}

pub async fn not_found() -> WebError {
    WebError::not_found("page not found")
}
