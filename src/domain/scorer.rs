//! Portfolio scoring.
//!
//! expected_return = w . mu
//! volatility      = sqrt(w . (Sigma w)), radicand clamped at 0
//! sharpe_ratio    = (expected_return - rf) / volatility
//!
//! A zero volatility yields +inf, -inf or NaN under IEEE-754 and is returned
//! as is.

use crate::domain::error::FrontierError;
use crate::domain::moments::{CovarianceMatrix, MeanReturnVector};
use crate::domain::weights::WeightVector;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPortfolio {
    pub expected_return: f64,
    pub volatility: f64,
    pub sharpe_ratio: f64,
    pub weights: WeightVector,
}

pub fn score(
    weights: WeightVector,
    mean: &MeanReturnVector,
    covariance: &CovarianceMatrix,
    risk_free_rate: f64,
) -> Result<ScoredPortfolio, FrontierError> {
    check_dimensions(weights.len(), mean, covariance)?;

    let w = weights.as_array();
    let expected_return = w.dot(mean.as_array());
    let variance = w.dot(&covariance.as_array().dot(w));
    // Rounding can push a PSD quadratic form just below zero.
    let volatility = if variance < 0.0 { 0.0 } else { variance.sqrt() };
    let sharpe_ratio = (expected_return - risk_free_rate) / volatility;

    Ok(ScoredPortfolio {
        expected_return,
        volatility,
        sharpe_ratio,
        weights,
    })
}

pub(crate) fn check_dimensions(
    n: usize,
    mean: &MeanReturnVector,
    covariance: &CovarianceMatrix,
) -> Result<(), FrontierError> {
    if mean.len() != n {
        return Err(FrontierError::DimensionMismatch {
            context: "mean return vector".into(),
            expected: n,
            found: mean.len(),
        });
    }
    if covariance.dimension() != n {
        return Err(FrontierError::DimensionMismatch {
            context: "covariance matrix".into(),
            expected: n,
            found: covariance.dimension(),
        });
    }
    Ok(())
}
