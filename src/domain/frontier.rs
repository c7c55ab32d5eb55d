//! Monte Carlo frontier sampling.
//!
//! One generator drives every trial in order. Results are stably sorted by
//! volatility ascending, so equal volatilities keep trial order. NaN
//! volatilities sort after every number.

use crate::domain::error::FrontierError;
use crate::domain::moments::{CovarianceMatrix, MeanReturnVector};
use crate::domain::scorer::{ScoredPortfolio, check_dimensions, score};
use crate::domain::weights::{WeightVector, sample_weights};
use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::debug;

pub const DEFAULT_TRIALS: usize = 1000;
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.02;

#[derive(Debug, Clone, PartialEq)]
pub struct FrontierParams {
    pub trials: usize,
    pub seed: u64,
    pub risk_free_rate: f64,
    /// Score pre-drawn weights on the rayon pool. Output is identical either way.
    pub parallel: bool,
}

impl Default for FrontierParams {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: DEFAULT_SEED,
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            parallel: false,
        }
    }
}

/// Scored portfolios in ascending volatility order.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontierResult {
    portfolios: Vec<ScoredPortfolio>,
}

impl FrontierResult {
    /// Stable-sorts `portfolios` by volatility.
    pub fn from_unsorted(mut portfolios: Vec<ScoredPortfolio>) -> Self {
        portfolios.sort_by_key(|p| OrderedFloat(p.volatility));
        Self { portfolios }
    }

    pub fn portfolios(&self) -> &[ScoredPortfolio] {
        &self.portfolios
    }

    pub fn len(&self) -> usize {
        self.portfolios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.portfolios.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoredPortfolio> {
        self.portfolios.iter()
    }

    pub fn min_volatility(&self) -> Option<&ScoredPortfolio> {
        self.portfolios.first()
    }

    /// Highest Sharpe ratio, ignoring NaN. The earliest entry wins ties.
    pub fn max_sharpe(&self) -> Option<&ScoredPortfolio> {
        self.portfolios
            .iter()
            .filter(|p| !p.sharpe_ratio.is_nan())
            .fold(None, |best: Option<&ScoredPortfolio>, p| match best {
                Some(b) if b.sharpe_ratio >= p.sharpe_ratio => Some(b),
                _ => Some(p),
            })
    }

    pub fn into_portfolios(self) -> Vec<ScoredPortfolio> {
        self.portfolios
    }
}

impl<'a> IntoIterator for &'a FrontierResult {
    type Item = &'a ScoredPortfolio;
    type IntoIter = std::slice::Iter<'a, ScoredPortfolio>;

    fn into_iter(self) -> Self::IntoIter {
        self.portfolios.iter()
    }
}

/// Run `params.trials` trials from a generator seeded with `params.seed`.
pub fn generate_frontier(
    mean: &MeanReturnVector,
    covariance: &CovarianceMatrix,
    params: &FrontierParams,
) -> Result<FrontierResult, FrontierError> {
    let mut rng = StdRng::seed_from_u64(params.seed);
    generate_frontier_with_rng(mean, covariance, params, &mut rng)
}

/// As [`generate_frontier`], drawing from a caller-owned generator.
/// `params.seed` is ignored.
pub fn generate_frontier_with_rng<R: Rng>(
    mean: &MeanReturnVector,
    covariance: &CovarianceMatrix,
    params: &FrontierParams,
    rng: &mut R,
) -> Result<FrontierResult, FrontierError> {
    validate_params(params)?;
    let n = mean.len();
    check_dimensions(n, mean, covariance)?;
    if params.trials.checked_mul(n).is_none() {
        return Err(FrontierError::InvalidParameter {
            name: "trials".into(),
            reason: format!("{} trials of {} weights cannot be held in memory", params.trials, n),
        });
    }

    let rf = params.risk_free_rate;
    let scored = if params.parallel {
        let draws = (0..params.trials)
            .map(|_| sample_weights(n, rng))
            .collect::<Result<Vec<WeightVector>, _>>()?;
        draws
            .into_par_iter()
            .map(|w| score(w, mean, covariance, rf))
            .collect::<Result<Vec<_>, _>>()?
    } else {
        let mut scored = Vec::new();
        for _ in 0..params.trials {
            let w = sample_weights(n, rng)?;
            scored.push(score(w, mean, covariance, rf)?);
        }
        scored
    };

    let result = FrontierResult::from_unsorted(scored);
    debug!(
        trials = params.trials,
        assets = n,
        parallel = params.parallel,
        "frontier sampled"
    );
    Ok(result)
}

fn validate_params(params: &FrontierParams) -> Result<(), FrontierError> {
    if params.trials == 0 {
        return Err(FrontierError::InvalidParameter {
            name: "trials".into(),
            reason: "must be a positive integer".into(),
        });
    }
    if !params.risk_free_rate.is_finite() {
        return Err(FrontierError::InvalidParameter {
            name: "risk_free_rate".into(),
            reason: format!("{} is not finite", params.risk_free_rate),
        });
    }
    Ok(())
}
