//! Pre-run validation of the backtest configuration.
//!
//! Validates every config field before any data is touched.

use chrono::NaiveDate;

use crate::domain::error::RotraderError;
use crate::domain::run::DEFAULT_INITIAL_VALUE;
use crate::ports::config_port::ConfigPort;

pub fn validate_run_config(config: &dyn ConfigPort) -> Result<(), RotraderError> {
    validate_prices_dir(config)?;
    validate_universe_file(config)?;
    validate_initial_value(config)?;
    validate_bucket_size(config)?;
    validate_dates(config)?;
    Ok(())
}

fn validate_prices_dir(config: &dyn ConfigPort) -> Result<(), RotraderError> {
    match config.get_string("data", "prices_dir") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(RotraderError::ConfigMissing {
            section: "data".to_string(),
            key: "prices_dir".to_string(),
        }),
    }
}

fn validate_universe_file(config: &dyn ConfigPort) -> Result<(), RotraderError> {
    match config.get_string("data", "universe_file") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(RotraderError::ConfigMissing {
            section: "data".to_string(),
            key: "universe_file".to_string(),
        }),
    }
}

fn validate_initial_value(config: &dyn ConfigPort) -> Result<(), RotraderError> {
    let value = config.get_double("backtest", "initial_value", DEFAULT_INITIAL_VALUE);
    if value <= 0.0 {
        return Err(RotraderError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "initial_value".to_string(),
            reason: "initial_value must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_bucket_size(config: &dyn ConfigPort) -> Result<(), RotraderError> {
    let value = config.get_int("backtest", "bucket_size", 10);
    if value < 1 {
        return Err(RotraderError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "bucket_size".to_string(),
            reason: "bucket_size must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), RotraderError> {
    let start_str =
        config
            .get_string("backtest", "start_date")
            .ok_or_else(|| RotraderError::ConfigMissing {
                section: "backtest".to_string(),
                key: "start_date".to_string(),
            })?;
    let start_date = parse_date(&start_str, "start_date")?;

    // end_date is optional; it defaults to today at config-build time.
    if let Some(end_str) = config.get_string("backtest", "end_date") {
        let end_date = parse_date(&end_str, "end_date")?;
        if start_date >= end_date {
            return Err(RotraderError::ConfigInvalid {
                section: "backtest".to_string(),
                key: "start_date".to_string(),
                reason: "start_date must be before end_date".to_string(),
            });
        }
    }
    Ok(())
}

fn parse_date(value: &str, key: &str) -> Result<NaiveDate, RotraderError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| RotraderError::ConfigInvalid {
        section: "backtest".to_string(),
        key: key.to_string(),
        reason: format!("invalid {} format, expected YYYY-MM-DD", key),
    })
}
