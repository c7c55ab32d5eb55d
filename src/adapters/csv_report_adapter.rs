//! CSV frontier report adapter.
//!
//! Columns: `Return,Volatility,SharpeRatio,{asset}_Weight...` with weight
//! columns in universe order. Rows follow the frontier order.

use crate::domain::error::FrontierError;
use crate::domain::frontier::FrontierResult;
use crate::domain::universe::AssetUniverse;
use crate::ports::report_port::FrontierReportPort;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }

    pub fn header(universe: &AssetUniverse) -> Vec<String> {
        let mut header = vec![
            "Return".to_string(),
            "Volatility".to_string(),
            "SharpeRatio".to_string(),
        ];
        header.extend(universe.assets().iter().map(|a| format!("{}_Weight", a)));
        header
    }

    /// Write the report to any sink.
    pub fn write_to<W: Write>(
        &self,
        sink: W,
        result: &FrontierResult,
        universe: &AssetUniverse,
    ) -> Result<(), FrontierError> {
        let mut wtr = csv::Writer::from_writer(sink);
        wtr.write_record(Self::header(universe)).map_err(report_error)?;

        for (row, portfolio) in result.iter().enumerate() {
            if portfolio.weights.len() != universe.len() {
                return Err(FrontierError::DimensionMismatch {
                    context: format!("report row {}", row),
                    expected: universe.len(),
                    found: portfolio.weights.len(),
                });
            }
            let mut record = Vec::with_capacity(3 + universe.len());
            record.push(portfolio.expected_return.to_string());
            record.push(portfolio.volatility.to_string());
            record.push(portfolio.sharpe_ratio.to_string());
            record.extend(portfolio.weights.as_slice().iter().map(|w| w.to_string()));
            wtr.write_record(&record).map_err(report_error)?;
        }

        wtr.flush().map_err(|e| FrontierError::Report {
            reason: format!("failed to flush report: {}", e),
        })?;
        Ok(())
    }
}

impl Default for CsvReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn report_error(e: csv::Error) -> FrontierError {
    FrontierError::Report {
        reason: format!("CSV write error: {}", e),
    }
}

impl FrontierReportPort for CsvReportAdapter {
    fn write(
        &self,
        result: &FrontierResult,
        universe: &AssetUniverse,
        output_path: &Path,
    ) -> Result<(), FrontierError> {
        let file = File::create(output_path).map_err(|e| FrontierError::Report {
            reason: format!("failed to create {}: {}", output_path.display(), e),
        })?;
        self.write_to(file, result, universe)
    }
}
