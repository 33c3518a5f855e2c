use thiserror::Error;

use crate::variable::Value;

/// All failure conditions surfaced by this crate. Every error is synchronous
/// and raised to the immediate caller; nothing is retried or swallowed.
#[derive(Debug, Error)]
pub enum Error {

    /// A variable value fell outside its open-interval bounds at construction.
    #[error("input parameter \"{name}\" needs to be in range ({lower}, {upper}), currently set to {value}")]
    Domain { name : String, lower : f64, upper : f64, value : Value },

    /// A model specification assigned something other than a distribution to
    /// one of its prior slots.
    #[error("input parameter \"{key}\" of \"{model}\" needs to be a distribution, but is of type {found}")]
    InvalidPrior { model : String, key : String, found : String },

    /// Observed quantile values outside the open support of the target family.
    #[error("some elements of X are not in the domain of the model, which is ({lower}, {upper}): {values:?}")]
    OutsideDomain { lower : f64, upper : f64, values : Vec<f64> },

    /// Quantile levels must lie strictly inside the unit interval.
    #[error("quantile levels need to be in range (0, 1), but got {values:?}")]
    Level { values : Vec<f64> },

    /// A fit query asked for a parameter the underlying result does not carry.
    #[error("fit carries no parameter named \"{0}\"")]
    UnknownParameter(String),

    /// A textual model specification could not be interpreted.
    #[error("could not parse specification: {0}")]
    Parse(String),

    /// Filesystem failure while reading or writing a model specification.
    #[error("specification io: {0}")]
    Io(#[from] std::io::Error),

    /// An evaluable density or sampler rejected its parameters. Unreachable
    /// for inputs that passed variable validation.
    #[error("invalid density parameters: {0}")]
    Density(String),

    /// Failure inside the external inference engine, propagated unmodified.
    #[error(transparent)]
    Engine(#[from] anyhow::Error),

}
