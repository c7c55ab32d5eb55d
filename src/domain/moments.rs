//! Annualized moment estimation.
//!
//! Mean: sample arithmetic mean of each return series times the annualization
//! factor. Covariance: unbiased sample covariance (divide by count - 1) over
//! the paired series, times the same factor. Cov[i,j] is computed once for
//! i <= j and mirrored, so the matrix is exactly symmetric.

use crate::domain::error::FrontierError;
use crate::domain::price_series::ReturnSeries;
use crate::domain::universe::AssetUniverse;
use ndarray::{Array1, Array2};
use tracing::debug;

/// Trading days per year.
pub const ANNUALIZATION_FACTOR: f64 = 252.0;

/// The unbiased estimator divides by count - 1.
pub const MIN_RETURN_OBSERVATIONS: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct MeanReturnVector(Array1<f64>);

impl MeanReturnVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self(Array1::from(values))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, i: usize) -> f64 {
        self.0[i]
    }

    pub fn as_array(&self) -> &Array1<f64> {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CovarianceMatrix(Array2<f64>);

impl CovarianceMatrix {
    /// Build from a square matrix. Squareness is checked; symmetry and
    /// positive semi-definiteness are the caller's responsibility.
    pub fn new(matrix: Array2<f64>) -> Result<Self, FrontierError> {
        let (rows, cols) = matrix.dim();
        if rows != cols {
            return Err(FrontierError::DimensionMismatch {
                context: "covariance matrix columns".into(),
                expected: rows,
                found: cols,
            });
        }
        Ok(Self(matrix))
    }

    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, FrontierError> {
        let n = rows.len();
        let mut matrix = Array2::zeros((n, n));
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(FrontierError::DimensionMismatch {
                    context: format!("covariance matrix row {}", i),
                    expected: n,
                    found: row.len(),
                });
            }
            for (j, &v) in row.iter().enumerate() {
                matrix[[i, j]] = v;
            }
        }
        Ok(Self(matrix))
    }

    pub fn dimension(&self) -> usize {
        self.0.nrows()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.0[[i, j]]
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Moments {
    pub mean: MeanReturnVector,
    pub covariance: CovarianceMatrix,
}

pub fn estimate_moments(
    universe: &AssetUniverse,
    returns: &[ReturnSeries],
) -> Result<Moments, FrontierError> {
    estimate_moments_with_factor(universe, returns, ANNUALIZATION_FACTOR)
}

/// As [`estimate_moments`], with an explicit annualization factor.
pub fn estimate_moments_with_factor(
    universe: &AssetUniverse,
    returns: &[ReturnSeries],
    factor: f64,
) -> Result<Moments, FrontierError> {
    if universe.is_empty() {
        return Err(FrontierError::InvalidDimension { dimension: 0 });
    }
    if returns.len() != universe.len() {
        return Err(FrontierError::DimensionMismatch {
            context: "return series per asset".into(),
            expected: universe.len(),
            found: returns.len(),
        });
    }

    for (index, (expected, series)) in universe.assets().iter().zip(returns).enumerate() {
        if *expected != series.asset {
            return Err(FrontierError::UniverseMismatch {
                index,
                expected: expected.clone(),
                found: series.asset.clone(),
            });
        }
        if series.len() < MIN_RETURN_OBSERVATIONS {
            return Err(FrontierError::InsufficientData {
                asset: series.asset.clone(),
                observations: series.len(),
                minimum: MIN_RETURN_OBSERVATIONS,
            });
        }
    }

    let count = returns[0].len();
    if let Some(series) = returns.iter().find(|s| s.len() != count) {
        return Err(FrontierError::LengthMismatch {
            asset: series.asset.clone(),
            expected: count,
            found: series.len(),
        });
    }

    let n = returns.len();
    let daily_means: Vec<f64> = returns
        .iter()
        .map(|s| s.values.iter().sum::<f64>() / count as f64)
        .collect();

    let mut covariance = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in i..n {
            let sum: f64 = returns[i]
                .values
                .iter()
                .zip(&returns[j].values)
                .map(|(a, b)| (a - daily_means[i]) * (b - daily_means[j]))
                .sum();
            let cov = sum / (count - 1) as f64 * factor;
            covariance[[i, j]] = cov;
            covariance[[j, i]] = cov;
        }
    }

    let mean = Array1::from(daily_means) * factor;

    debug!(assets = n, observations = count, factor, "estimated moments");

    Ok(Moments {
        mean: MeanReturnVector(mean),
        covariance: CovarianceMatrix(covariance),
    })
}
