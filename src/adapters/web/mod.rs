//! Web dashboard adapter.
//!
//! Serves one computed backtest over HTTP: JSON for the output tables, SVG
//! for the charts, and a small server-rendered dashboard page. State is an
//! immutable snapshot taken at startup; every request is a read-only lookup.

mod chart_svg;
mod error;
mod handlers;

pub use error::WebError;

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::domain::run::RotationRun;
use crate::domain::universe::Universe;

pub struct AppState {
    pub run: Arc<RotationRun>,
    pub universe: Arc<Universe>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/api/tracks", get(handlers::tracks))
        .route("/api/summary", get(handlers::summary))
        .route("/api/selections/{year}", get(handlers::selections_for_year))
        .route("/api/stock/{symbol}", get(handlers::stock_series))
        .route("/chart/portfolio.svg", get(handlers::portfolio_chart))
        // The captured segment may carry a ".svg" suffix; the handler strips it.
        .route("/chart/stock/{symbol}", get(handlers::stock_chart))
        .fallback(handlers::not_found)
        .with_state(Arc::new(state))
}
