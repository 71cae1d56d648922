//! Typed errors for the tracker, estimators, and formatter.
//!
//! Every failure here is a caller/precondition violation; nothing is caught
//! or retried internally.

use thiserror::Error;

/// Errors surfaced by the tracker and its helpers.
#[derive(Debug, Error)]
pub enum Error {
    /// Construction with zero tasks; progress and estimates divide by the total.
    #[error("task total must be positive")]
    InvalidTaskCount,

    /// Print interval outside [0, 1].
    #[error("print interval must be in [0, 1], got {0}")]
    InvalidPrintInterval(f64),

    /// `record(0)` would split the interval across zero tasks.
    #[error("cannot record an interval of zero tasks")]
    ZeroTaskRecord,

    /// Averages and estimates are undefined before the first `record()`.
    #[error("no recorded samples yet")]
    NoSamples,

    /// The linear estimator normalizes by n(n-1)/2 and needs two samples.
    #[error("estimator needs at least {needed} samples, got {got}")]
    InsufficientSamples { needed: usize, got: usize },

    /// Weighting name that maps to no known strategy.
    #[error("unknown weighting strategy {0:?} (expected \"none\" or \"linear\")")]
    UnknownWeighting(String),

    /// Operation declared in the public contract without an implementation.
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    /// Writing a progress or report line to the sink failed.
    #[error("write to progress sink failed")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
