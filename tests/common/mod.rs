#![allow(dead_code)]

use chrono::NaiveDate;
use frontier::domain::error::FrontierError;
use frontier::domain::frontier::{FrontierParams, FrontierResult};
use frontier::domain::price_series::{PricePoint, PriceSeries};
use frontier::domain::universe::AssetUniverse;
use frontier::ports::data_port::PriceDataPort;
use frontier::ports::report_port::FrontierReportPort;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct MockPriceDataPort {
    pub data: HashMap<String, Vec<PricePoint>>,
    pub errors: HashMap<String, String>,
}

impl MockPriceDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_prices(mut self, asset: &str, start: &str, prices: &[f64]) -> Self {
        let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap();
        let points = prices
            .iter()
            .enumerate()
            .map(|(i, &price)| PricePoint {
                date: start + chrono::Duration::days(i as i64),
                price,
            })
            .collect();
        self.data.insert(asset.to_string(), points);
        self
    }

    pub fn with_points(mut self, asset: &str, points: Vec<PricePoint>) -> Self {
        self.data.insert(asset.to_string(), points);
        self
    }

    pub fn with_error(mut self, asset: &str, reason: &str) -> Self {
        self.errors.insert(asset.to_string(), reason.to_string());
        self
    }
}

impl PriceDataPort for MockPriceDataPort {
    fn fetch_prices(
        &self,
        asset: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<PriceSeries, FrontierError> {
        if let Some(reason) = self.errors.get(asset) {
            return Err(FrontierError::Data {
                reason: reason.clone(),
            });
        }
        let points = self
            .data
            .get(asset)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .filter(|p| start_date.is_none_or(|s| p.date >= s))
            .filter(|p| end_date.is_none_or(|e| p.date <= e))
            .collect();
        PriceSeries::new(asset, points)
    }

    fn list_assets(&self) -> Result<Vec<String>, FrontierError> {
        let mut assets: Vec<String> = self.data.keys().cloned().collect();
        assets.sort();
        Ok(assets)
    }

    fn get_data_range(
        &self,
        asset: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, FrontierError> {
        Ok(self.data.get(asset).and_then(|points| {
            Some((points.first()?.date, points.last()?.date, points.len()))
        }))
    }
}

/// Captures what the pipeline hands to the output adapter.
pub struct RecordingReportPort {
    pub written: RefCell<Vec<(FrontierResult, AssetUniverse, PathBuf)>>,
}

impl RecordingReportPort {
    pub fn new() -> Self {
        Self {
            written: RefCell::new(Vec::new()),
        }
    }
}

impl FrontierReportPort for RecordingReportPort {
    fn write(
        &self,
        result: &FrontierResult,
        universe: &AssetUniverse,
        output_path: &Path,
    ) -> Result<(), FrontierError> {
        self.written.borrow_mut().push((
            result.clone(),
            universe.clone(),
            output_path.to_path_buf(),
        ));
        Ok(())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn params(trials: usize, seed: u64, risk_free_rate: f64) -> FrontierParams {
    FrontierParams {
        trials,
        seed,
        risk_free_rate,
        parallel: false,
    }
}

/// Deterministic but irregular price path.
pub fn generate_prices(count: usize, start_price: f64, drift: f64, wobble: f64) -> Vec<f64> {
    let mut price = start_price;
    (0..count)
        .map(|i| {
            let step = drift + wobble * ((i as f64) * 1.7).sin();
            price *= 1.0 + step;
            price
        })
        .collect()
}
