//! Remaining-time estimator math.
//!
//! The tracker feeds these functions the per-task duration samples it has
//! recorded so far; the weighting decides how much recent samples count.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Weight distribution applied to historical per-task timings when
/// estimating remaining time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weighting {
    /// Uniform average over all samples.
    #[default]
    None,
    /// Weight the i-th sample (1-indexed, oldest first) by i, biasing the
    /// estimate toward recent timings.
    Linear,
}

impl FromStr for Weighting {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(Weighting::None),
            "linear" => Ok(Weighting::Linear),
            other => Err(Error::UnknownWeighting(other.to_string())),
        }
    }
}

/// Mean of `samples` under the given weighting.
pub fn mean(samples: &[f64], weighting: Weighting) -> Result<f64> {
    match weighting {
        Weighting::None => uniform_mean(samples),
        Weighting::Linear => linear_weighted_mean(samples),
    }
}

/// Arithmetic mean.
pub fn uniform_mean(samples: &[f64]) -> Result<f64> {
    if samples.is_empty() {
        return Err(Error::NoSamples);
    }
    Ok(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Mean with the i-th sample (1-indexed, oldest first) weighted by i,
/// normalized by the triangular number n(n-1)/2.
///
/// A single sample gives a zero normalizer, so at least two are required.
pub fn linear_weighted_mean(samples: &[f64]) -> Result<f64> {
    let n = samples.len();
    if n < 2 {
        return Err(Error::InsufficientSamples { needed: 2, got: n });
    }
    let weighted: f64 = samples
        .iter()
        .enumerate()
        .map(|(i, s)| (i + 1) as f64 * s)
        .sum();
    Ok(weighted / (0.5 * (n * (n - 1)) as f64))
}
