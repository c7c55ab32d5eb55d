//! frontier — Monte Carlo efficient-frontier estimation from daily closes.
//!
//! Hexagonal architecture: numerical core in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
