/// Scalar model constants: values carrying their own name and open-interval
/// bounds, validated at construction.
pub mod variable;

/// Closed set of parametric distribution families (Normal, Gamma, Lognormal,
/// Weibull); each knows its support, emits declaration/prior code fragments
/// and evaluates its density, cumulative and quantile functions.
pub mod distr;

/// Quantile matching models: named prior distributions over the parameters of
/// a target family, rendered into a full probabilistic program by template
/// substitution and handed to an external inference engine.
pub mod model;

/// Interface to the external inference engine (compile/sampling/optimizing)
/// and the unified query object wrapping posterior draws or point estimates.
pub mod fit;

/// Error taxonomy shared by all modules.
pub mod error;
