//! Price and return series.
//!
//! A [`PriceSeries`] holds one asset's closing prices in strictly increasing
//! date order. [`build_returns`] turns it into simple period returns:
//! r[i] = (p[i+1] - p[i]) / p[i].

use crate::domain::error::FrontierError;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Minimum number of prices needed to produce a single return.
pub const MIN_PRICE_POINTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    asset: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series, rejecting non-increasing dates and prices that are
    /// not positive finite numbers.
    pub fn new(asset: impl Into<String>, points: Vec<PricePoint>) -> Result<Self, FrontierError> {
        let asset = asset.into();

        for (i, point) in points.iter().enumerate() {
            if !point.price.is_finite() || point.price <= 0.0 {
                return Err(FrontierError::InvalidSeries {
                    asset,
                    reason: format!("price {} on {} is not positive", point.price, point.date),
                });
            }
            if i > 0 && points[i - 1].date >= point.date {
                return Err(FrontierError::InvalidSeries {
                    asset,
                    reason: format!(
                        "dates not strictly increasing at {} (after {})",
                        point.date,
                        points[i - 1].date
                    ),
                });
            }
        }

        Ok(Self { asset, points })
    }

    pub fn asset(&self) -> &str {
        &self.asset
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}

/// Simple period returns of one asset, in chronological order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSeries {
    pub asset: String,
    pub values: Vec<f64>,
}

impl ReturnSeries {
    pub fn new(asset: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            asset: asset.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

pub fn build_returns(series: &PriceSeries) -> Result<ReturnSeries, FrontierError> {
    if series.len() < MIN_PRICE_POINTS {
        return Err(FrontierError::InsufficientData {
            asset: series.asset.clone(),
            observations: series.len(),
            minimum: MIN_PRICE_POINTS,
        });
    }

    let values = series
        .points
        .windows(2)
        .map(|w| (w[1].price - w[0].price) / w[0].price)
        .collect();

    Ok(ReturnSeries::new(series.asset.clone(), values))
}

/// Restrict every series to the dates present in all of them.
pub fn align_on_common_dates(series: &[PriceSeries]) -> Vec<PriceSeries> {
    let Some((first, rest)) = series.split_first() else {
        return Vec::new();
    };

    let mut common: BTreeSet<NaiveDate> = first.points.iter().map(|p| p.date).collect();
    for s in rest {
        let dates: BTreeSet<NaiveDate> = s.points.iter().map(|p| p.date).collect();
        common = common.intersection(&dates).copied().collect();
    }

    series
        .iter()
        .map(|s| PriceSeries {
            asset: s.asset.clone(),
            points: s
                .points
                .iter()
                .filter(|p| common.contains(&p.date))
                .copied()
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn make_series(asset: &str, prices: &[f64]) -> PriceSeries {
        let points = prices
            .iter()
            .enumerate()
            .map(|(i, &price)| PricePoint {
                date: date(i as u32 + 1),
                price,
            })
            .collect();
        PriceSeries::new(asset, points).unwrap()
    }

    #[test]
    fn returns_are_simple_period_returns() {
        let series = make_series("A", &[100.0, 101.0, 102.0, 101.0]);
        let returns = build_returns(&series).unwrap();

        assert_eq!(returns.asset, "A");
        assert_eq!(returns.len(), 3);
        assert!((returns.values[0] - 0.01).abs() < 1e-12);
        assert!((returns.values[1] - 1.0 / 101.0).abs() < 1e-12);
        assert!((returns.values[2] - (-1.0 / 102.0)).abs() < 1e-12);
    }

    #[test]
    fn two_points_give_one_return() {
        let series = make_series("A", &[50.0, 55.0]);
        let returns = build_returns(&series).unwrap();
        assert_eq!(returns.values.len(), 1);
        assert!((returns.values[0] - 0.1).abs() < 1e-12);
    }

    #[test]
    fn single_point_is_insufficient() {
        let series = make_series("A", &[100.0]);
        let err = build_returns(&series).unwrap_err();
        assert!(matches!(
            err,
            FrontierError::InsufficientData { observations: 1, minimum: 2, .. }
        ));
    }

    #[test]
    fn empty_series_is_insufficient() {
        let series = PriceSeries::new("A", vec![]).unwrap();
        assert!(matches!(
            build_returns(&series),
            Err(FrontierError::InsufficientData { observations: 0, .. })
        ));
    }

    #[test]
    fn rejects_non_positive_price() {
        let points = vec![
            PricePoint { date: date(1), price: 10.0 },
            PricePoint { date: date(2), price: 0.0 },
        ];
        let err = PriceSeries::new("A", points).unwrap_err();
        assert!(matches!(err, FrontierError::InvalidSeries { asset, .. } if asset == "A"));
    }

    #[test]
    fn rejects_nan_price() {
        let points = vec![PricePoint { date: date(1), price: f64::NAN }];
        assert!(PriceSeries::new("A", points).is_err());
    }

    #[test]
    fn rejects_duplicate_dates() {
        let points = vec![
            PricePoint { date: date(1), price: 10.0 },
            PricePoint { date: date(1), price: 11.0 },
        ];
        assert!(matches!(
            PriceSeries::new("A", points),
            Err(FrontierError::InvalidSeries { .. })
        ));
    }

    #[test]
    fn rejects_descending_dates() {
        let points = vec![
            PricePoint { date: date(2), price: 10.0 },
            PricePoint { date: date(1), price: 11.0 },
        ];
        assert!(PriceSeries::new("A", points).is_err());
    }

    #[test]
    fn align_keeps_only_shared_dates() {
        let a = PriceSeries::new(
            "A",
            vec![
                PricePoint { date: date(1), price: 1.0 },
                PricePoint { date: date(2), price: 2.0 },
                PricePoint { date: date(3), price: 3.0 },
            ],
        )
        .unwrap();
        let b = PriceSeries::new(
            "B",
            vec![
                PricePoint { date: date(1), price: 10.0 },
                PricePoint { date: date(3), price: 30.0 },
                PricePoint { date: date(4), price: 40.0 },
            ],
        )
        .unwrap();

        let aligned = align_on_common_dates(&[a, b]);

        assert_eq!(aligned.len(), 2);
        assert_eq!(aligned[0].asset(), "A");
        assert_eq!(aligned[1].asset(), "B");
        let a_prices: Vec<f64> = aligned[0].points().iter().map(|p| p.price).collect();
        let b_prices: Vec<f64> = aligned[1].points().iter().map(|p| p.price).collect();
        assert_eq!(a_prices, vec![1.0, 3.0]);
        assert_eq!(b_prices, vec![10.0, 30.0]);
    }

    #[test]
    fn align_empty_input() {
        assert!(align_on_common_dates(&[]).is_empty());
    }

    #[test]
    fn first_and_last_dates() {
        let series = make_series("A", &[1.0, 2.0, 3.0]);
        assert_eq!(series.first_date(), Some(date(1)));
        assert_eq!(series.last_date(), Some(date(3)));
    }
}
