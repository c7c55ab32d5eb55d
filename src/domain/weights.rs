//! Long-only, fully invested weight vectors.
//!
//! [`sample_weights`] draws n independent uniform(0,1) values and divides by
//! their sum. The result lies on the simplex but is not a uniform
//! (Dirichlet(1, ..., 1)) draw over it; mass concentrates toward the centre.
//! The sampling method is part of the reproducible output and must not be
//! swapped for a Dirichlet draw.

use crate::domain::error::FrontierError;
use ndarray::Array1;
use rand::Rng;
use rand::distributions::Open01;

/// Tolerance on the unit-sum invariant.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct WeightVector(Array1<f64>);

impl WeightVector {
    /// Scale non-negative raw values so they sum to one.
    pub fn normalized(raw: Vec<f64>) -> Result<Self, FrontierError> {
        if raw.is_empty() {
            return Err(FrontierError::InvalidDimension { dimension: 0 });
        }
        if let Some(v) = raw.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(FrontierError::InvalidWeights {
                reason: format!("entry {} is not a non-negative number", v),
            });
        }
        let total: f64 = raw.iter().sum();
        if total <= 0.0 || !total.is_finite() {
            return Err(FrontierError::InvalidWeights {
                reason: format!("weights sum to {}", total),
            });
        }
        Ok(Self(Array1::from(raw) / total))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_array(&self) -> &Array1<f64> {
        &self.0
    }

    pub fn as_slice(&self) -> &[f64] {
        self.0.as_slice().unwrap_or(&[])
    }

    pub fn sum(&self) -> f64 {
        self.0.sum()
    }
}

pub fn sample_weights<R: Rng>(n: usize, rng: &mut R) -> Result<WeightVector, FrontierError> {
    if n == 0 {
        return Err(FrontierError::InvalidDimension { dimension: 0 });
    }
    let raw: Vec<f64> = (0..n).map(|_| rng.sample(Open01)).collect();
    WeightVector::normalized(raw)
}
