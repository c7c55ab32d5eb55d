//! Core domain types and logic.

pub mod price_series;
pub mod universe;
pub mod moments;
pub mod weights;
pub mod scorer;
pub mod frontier;
pub mod config_validation;
pub mod error;
