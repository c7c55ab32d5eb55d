//! Port traits for the I/O around the numerical core.

pub mod config_port;
pub mod data_port;
pub mod report_port;
