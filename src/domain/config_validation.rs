//! Configuration validation.
//!
//! Validates every run setting before any price data is read.

use crate::domain::error::FrontierError;
use crate::domain::universe::parse_assets;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;
use std::path::PathBuf;

/// Command-line values that take precedence over the config file.
/// A key with an override is not read from the file at all.
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    pub output: Option<PathBuf>,
    pub assets: Option<String>,
    pub trials: Option<usize>,
    pub seed: Option<u64>,
    pub risk_free_rate: Option<f64>,
}

pub fn validate_frontier_config(
    config: &dyn ConfigPort,
    overrides: &RunOverrides,
) -> Result<(), FrontierError> {
    validate_data_directory(config)?;
    if overrides.assets.is_none() {
        validate_assets(config)?;
    }
    if overrides.trials.is_none() {
        validate_trials(config)?;
    }
    if overrides.seed.is_none() {
        validate_seed(config)?;
    }
    if overrides.risk_free_rate.is_none() {
        validate_risk_free_rate(config)?;
    }
    config.get_bool("frontier", "align_dates")?;
    config.get_bool("frontier", "parallel")?;
    validate_dates(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> FrontierError {
    FrontierError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn validate_data_directory(config: &dyn ConfigPort) -> Result<(), FrontierError> {
    match config.get_string("data", "directory") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(FrontierError::ConfigMissing {
            section: "data".to_string(),
            key: "directory".to_string(),
        }),
    }
}

fn validate_assets(config: &dyn ConfigPort) -> Result<(), FrontierError> {
    let assets = config
        .get_string("frontier", "assets")
        .ok_or_else(|| FrontierError::ConfigMissing {
            section: "frontier".to_string(),
            key: "assets".to_string(),
        })?;
    parse_assets(&assets).map_err(|e| invalid("frontier", "assets", e.to_string()))?;
    Ok(())
}

fn validate_trials(config: &dyn ConfigPort) -> Result<(), FrontierError> {
    if let Some(trials) = config.get_int("frontier", "trials")? {
        if trials < 1 {
            return Err(invalid("frontier", "trials", "trials must be at least 1"));
        }
    }
    Ok(())
}

fn validate_seed(config: &dyn ConfigPort) -> Result<(), FrontierError> {
    if let Some(seed) = config.get_int("frontier", "seed")? {
        if seed < 0 {
            return Err(invalid("frontier", "seed", "seed must be non-negative"));
        }
    }
    Ok(())
}

fn validate_risk_free_rate(config: &dyn ConfigPort) -> Result<(), FrontierError> {
    match config.get_double("frontier", "risk_free_rate")? {
        Some(v) if !v.is_finite() => Err(invalid(
            "frontier",
            "risk_free_rate",
            "risk_free_rate must be a finite number",
        )),
        _ => Ok(()),
    }
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), FrontierError> {
    let start = parse_date(config, "start_date")?;
    let end = parse_date(config, "end_date")?;

    if let (Some(start), Some(end)) = (start, end) {
        if start >= end {
            return Err(invalid(
                "frontier",
                "start_date",
                "start_date must be before end_date",
            ));
        }
    }
    Ok(())
}

pub fn parse_date(config: &dyn ConfigPort, key: &str) -> Result<Option<NaiveDate>, FrontierError> {
    match config.get_string("frontier", key) {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| invalid("frontier", key, format!("invalid {} format, expected YYYY-MM-DD", key))),
    }
}
