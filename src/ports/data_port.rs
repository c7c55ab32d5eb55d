//! Price data access port trait.

use crate::domain::error::FrontierError;
use crate::domain::price_series::PriceSeries;
use chrono::NaiveDate;

pub trait PriceDataPort {
    /// Closing prices for `asset` in ascending date order, restricted to the
    /// inclusive `[start_date, end_date]` range when bounds are given.
    fn fetch_prices(
        &self,
        asset: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<PriceSeries, FrontierError>;

    fn list_assets(&self) -> Result<Vec<String>, FrontierError>;

    fn get_data_range(
        &self,
        asset: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, FrontierError>;
}
