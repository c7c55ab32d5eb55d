//! CSV price file adapter.
//!
//! Reads `<base_path>/<asset>.csv`. The header row must name a `date` column
//! and either an `adj close` or a `close` column (case-insensitive); `adj close`
//! wins when both are present. Dates are `YYYY-MM-DD`.

use crate::domain::error::FrontierError;
use crate::domain::price_series::{PricePoint, PriceSeries};
use crate::ports::data_port::PriceDataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

pub struct CsvPriceAdapter {
    base_path: PathBuf,
}

impl CsvPriceAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, asset: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", asset))
    }

    fn read_points(&self, asset: &str) -> Result<Vec<PricePoint>, FrontierError> {
        let path = self.csv_path(asset);
        let content = fs::read_to_string(&path).map_err(|e| FrontierError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr.headers().map_err(|e| FrontierError::Data {
            reason: format!("CSV header error in {}: {}", path.display(), e),
        })?;
        let (date_col, price_col) = locate_columns(headers).ok_or_else(|| FrontierError::Data {
            reason: format!("{} needs a date column and a close column", path.display()),
        })?;

        let mut points = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| FrontierError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(date_col).ok_or_else(|| FrontierError::Data {
                reason: "missing date column".into(),
            })?;
            let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|e| {
                FrontierError::Data {
                    reason: format!("invalid date format '{}': {}", date_str, e),
                }
            })?;

            let price: f64 = record
                .get(price_col)
                .ok_or_else(|| FrontierError::Data {
                    reason: "missing close column".into(),
                })?
                .trim()
                .parse()
                .map_err(|e| FrontierError::Data {
                    reason: format!("invalid close value on {}: {}", date, e),
                })?;

            points.push(PricePoint { date, price });
        }

        points.sort_by_key(|p| p.date);
        Ok(points)
    }
}

fn locate_columns(headers: &csv::StringRecord) -> Option<(usize, usize)> {
    let position = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };
    let date = position("date")?;
    let price = position("adj close").or_else(|| position("close"))?;
    Some((date, price))
}

impl PriceDataPort for CsvPriceAdapter {
    fn fetch_prices(
        &self,
        asset: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<PriceSeries, FrontierError> {
        let points: Vec<PricePoint> = self
            .read_points(asset)?
            .into_iter()
            .filter(|p| start_date.is_none_or(|s| p.date >= s))
            .filter(|p| end_date.is_none_or(|e| p.date <= e))
            .collect();

        debug!(asset, points = points.len(), "loaded price series");
        PriceSeries::new(asset, points)
    }

    fn list_assets(&self) -> Result<Vec<String>, FrontierError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| FrontierError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut assets = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| FrontierError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if let Some(asset) = name_str.strip_suffix(".csv") {
                if !asset.is_empty() {
                    assets.push(asset.to_string());
                }
            }
        }

        assets.sort();
        Ok(assets)
    }

    fn get_data_range(
        &self,
        asset: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, FrontierError> {
        let points = self.read_points(asset)?;
        Ok(match (points.first(), points.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date, points.len())),
            _ => None,
        })
    }
}
