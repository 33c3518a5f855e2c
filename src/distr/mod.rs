use std::fmt::{self, Display};
use std::str::FromStr;

use nalgebra::*;

use crate::error::Error;
use crate::variable::{Value, Variable};

pub mod normal;

pub use normal::*;

pub mod gamma;

pub use gamma::*;

pub mod lognormal;

pub use lognormal::*;

pub mod weibull;

pub use weibull::*;

/// Open interval of values a random variable of a given family may take.
/// Both comparisons are strict, also at a finite lower bound: a Gamma-shaped
/// quantity at exactly zero is outside its domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    lower : Value,
    upper : Value
}

impl Domain {

    pub const REAL : Domain = Domain {
        lower : Value::Real(f64::NEG_INFINITY),
        upper : Value::Real(f64::INFINITY)
    };

    pub const POSITIVE : Domain = Domain {
        lower : Value::Int(0),
        upper : Value::Real(f64::INFINITY)
    };

    pub fn bounds(&self) -> (f64, f64) {
        (self.lower.as_f64(), self.upper.as_f64())
    }

    pub fn contains(&self, x : f64) -> bool {
        self.lower.as_f64() < x && x < self.upper.as_f64()
    }

    /// Bound clause interpolated into a parameter declaration. Infinite
    /// bounds are omitted; finite bounds keep the numeric form they were
    /// declared with (`lower=0`, not `lower=0.0`).
    pub fn constraint(&self) -> Option<String> {
        match (self.lower.is_finite(), self.upper.is_finite()) {
            (false, false) => None,
            (true, false) => Some(format!("lower={}", self.lower)),
            (false, true) => Some(format!("upper={}", self.upper)),
            (true, true) => Some(format!("lower={}, upper={}", self.lower, self.upper))
        }
    }

}

impl Display for Domain {

    fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lower, self.upper)
    }

}

/// Declaration and prior statement emitted for one model parameter, ready to
/// be spliced into the program template.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeFragment {
    pub declaration : String,
    pub prior : String
}

/// Pointwise evaluation of a univariate density, fixed at the parameter
/// values the distribution was built with.
pub trait Density {

    fn pdf(&self, x : f64) -> f64;

    fn cdf(&self, x : f64) -> f64;

    fn log_pdf(&self, x : f64) -> f64;

    fn log_cdf(&self, x : f64) -> f64;

    /// Inverse of the cumulative function; the level must lie in (0, 1).
    fn quantile(&self, p : f64) -> f64;

    /// One draw from the distribution.
    fn draw(&self) -> f64;

}

/// The four parametric families understood by the code generator. The set is
/// closed: every dispatch over families is an exhaustive match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Normal,
    Gamma,
    Lognormal,
    Weibull
}

impl Family {

    pub fn domain(&self) -> Domain {
        match self {
            Family::Normal => Domain::REAL,
            Family::Gamma | Family::Lognormal | Family::Weibull => Domain::POSITIVE
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Family::Normal => "Normal",
            Family::Gamma => "Gamma",
            Family::Lognormal => "Lognormal",
            Family::Weibull => "Weibull"
        }
    }

    /// Model title used in display strings and specification files.
    pub fn qm_title(&self) -> &'static str {
        match self {
            Family::Normal => "NormalQm",
            Family::Gamma => "GammaQm",
            Family::Lognormal => "LognormalQm",
            Family::Weibull => "WeibullQm"
        }
    }

    /// Lowercase family name; prefix of the `_cdf`/`_lpdf`/`_rng` entry
    /// points in the generated program.
    pub fn stan_name(&self) -> &'static str {
        match self {
            Family::Normal => "normal",
            Family::Gamma => "gamma",
            Family::Lognormal => "lognormal",
            Family::Weibull => "weibull"
        }
    }

    /// Role names of the two parameters, in declaration order. This order is
    /// a hard invariant: it fixes the positional argument order of the code
    /// generator and of density reconstruction after a fit.
    pub fn roles(&self) -> [&'static str; 2] {
        match self {
            Family::Normal | Family::Lognormal => ["mu", "sigma"],
            Family::Gamma => ["alpha", "beta"],
            Family::Weibull => ["alpha", "sigma"]
        }
    }

    /// Rebuilds a concrete distribution of this family from two parameter
    /// values in role order, as when evaluating a fitted model.
    pub fn distribution(&self, a : f64, b : f64, name : &str) -> Result<Distribution, Error> {
        match self {
            Family::Normal => Normal::new(a, b, name).map(Distribution::Normal),
            Family::Gamma => Gamma::new(a, b, name).map(Distribution::Gamma),
            Family::Lognormal => Lognormal::new(a, b, name).map(Distribution::Lognormal),
            Family::Weibull => Weibull::new(a, b, name).map(Distribution::Weibull)
        }
    }

}

impl FromStr for Family {

    type Err = Error;

    fn from_str(s : &str) -> Result<Self, Error> {
        match s {
            "normal" => Ok(Family::Normal),
            "gamma" => Ok(Family::Gamma),
            "lognormal" => Ok(Family::Lognormal),
            "weibull" => Ok(Family::Weibull),
            other => Err(Error::Parse(format!("unknown family \"{}\"", other)))
        }
    }

}

/// A named parametric distribution, usable both as a prior over a model
/// parameter (code generation) and as an evaluable density. Immutable value
/// object: parameters are validated once, at construction.
#[derive(Debug, Clone)]
pub enum Distribution {
    Normal(Normal),
    Gamma(Gamma),
    Lognormal(Lognormal),
    Weibull(Weibull)
}

impl Distribution {

    pub fn normal(mu : impl Into<Value>, sigma : impl Into<Value>, name : &str) -> Result<Self, Error> {
        Normal::new(mu, sigma, name).map(Distribution::Normal)
    }

    pub fn gamma(alpha : impl Into<Value>, beta : impl Into<Value>, name : &str) -> Result<Self, Error> {
        Gamma::new(alpha, beta, name).map(Distribution::Gamma)
    }

    pub fn lognormal(mu : impl Into<Value>, sigma : impl Into<Value>, name : &str) -> Result<Self, Error> {
        Lognormal::new(mu, sigma, name).map(Distribution::Lognormal)
    }

    pub fn weibull(alpha : impl Into<Value>, sigma : impl Into<Value>, name : &str) -> Result<Self, Error> {
        Weibull::new(alpha, sigma, name).map(Distribution::Weibull)
    }

    pub fn family(&self) -> Family {
        match self {
            Distribution::Normal(_) => Family::Normal,
            Distribution::Gamma(_) => Family::Gamma,
            Distribution::Lognormal(_) => Family::Lognormal,
            Distribution::Weibull(_) => Family::Weibull
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Distribution::Normal(d) => d.name(),
            Distribution::Gamma(d) => d.name(),
            Distribution::Lognormal(d) => d.name(),
            Distribution::Weibull(d) => d.name()
        }
    }

    /// Role/variable pairs in declaration order.
    pub fn parameters(&self) -> Vec<(&'static str, &Variable)> {
        match self {
            Distribution::Normal(d) => d.parameters().to_vec(),
            Distribution::Gamma(d) => d.parameters().to_vec(),
            Distribution::Lognormal(d) => d.parameters().to_vec(),
            Distribution::Weibull(d) => d.parameters().to_vec()
        }
    }

    pub fn domain(&self) -> Domain {
        self.family().domain()
    }

    pub fn density(&self) -> &dyn Density {
        match self {
            Distribution::Normal(d) => d,
            Distribution::Gamma(d) => d,
            Distribution::Lognormal(d) => d,
            Distribution::Weibull(d) => d
        }
    }

    /// Parameter declaration for the generated program, bounded to the
    /// support of this family: `real mu;` or `real<lower=0> sigma;`.
    pub fn declaration(&self) -> String {
        match self.domain().constraint() {
            Some(c) => format!("real<{}> {};", c, self.name()),
            None => format!("real {};", self.name())
        }
    }

    /// Prior statement for the generated program: `mu ~ normal(0.0, 1.0);`,
    /// parameter values in declaration order.
    pub fn prior(&self) -> String {
        let args : Vec<String> = self.parameters().iter()
            .map(|(_, v)| v.value().to_string())
            .collect();
        format!("{} ~ {}({});", self.name(), self.family().stan_name(), args.join(", "))
    }

    pub fn code(&self) -> CodeFragment {
        CodeFragment { declaration : self.declaration(), prior : self.prior() }
    }

    pub fn pdf(&self, x : &[f64]) -> DVector<f64> {
        self.eval(x, |d, x| d.pdf(x))
    }

    pub fn cdf(&self, x : &[f64]) -> DVector<f64> {
        self.eval(x, |d, x| d.cdf(x))
    }

    pub fn log_pdf(&self, x : &[f64]) -> DVector<f64> {
        self.eval(x, |d, x| d.log_pdf(x))
    }

    pub fn log_cdf(&self, x : &[f64]) -> DVector<f64> {
        self.eval(x, |d, x| d.log_cdf(x))
    }

    /// Quantile (inverse cumulative) function. Levels outside the open unit
    /// interval are rejected before any evaluation happens.
    pub fn ppf(&self, q : &[f64]) -> Result<DVector<f64>, Error> {
        let offending : Vec<f64> = q.iter()
            .filter(|p| !(0.0 < **p && **p < 1.0))
            .cloned()
            .collect();
        if !offending.is_empty() {
            return Err(Error::Level { values : offending });
        }
        Ok(self.eval(q, |d, p| d.quantile(p)))
    }

    /// n independent draws from this distribution.
    pub fn sample(&self, n : usize) -> DVector<f64> {
        let dens = self.density();
        DVector::from_iterator(n, (0..n).map(|_| dens.draw()))
    }

    fn eval(&self, x : &[f64], f : impl Fn(&dyn Density, f64) -> f64) -> DVector<f64> {
        let dens = self.density();
        DVector::from_iterator(x.len(), x.iter().map(|&x| f(dens, x)))
    }

}

impl Display for Distribution {

    fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distribution::Normal(d) => d.fmt(f),
            Distribution::Gamma(d) => d.fmt(f),
            Distribution::Lognormal(d) => d.fmt(f),
            Distribution::Weibull(d) => d.fmt(f)
        }
    }

}

// Shared by the per-family Display impls: `Title(a=va, b=vb, name="n")`.
fn fmt_distribution(
    f : &mut fmt::Formatter<'_>,
    title : &str,
    params : &[(&str, &Variable)],
    name : &str
) -> fmt::Result {
    let body : Vec<String> = params.iter()
        .map(|(role, v)| format!("{}={}", role, v.value()))
        .collect();
    write!(f, "{}({}, name=\"{}\")", title, body.join(", "), name)
}
