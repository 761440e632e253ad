//! rotrader — winner vs loser annual rotation backtester.
//!
//! Ranks a fixed stock universe by trailing annual return, holds the best and
//! worst ten names for the following year, and compounds both portfolios into
//! cumulative value tracks.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in
//! [`ports`], concrete implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
