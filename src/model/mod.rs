use std::cell::RefCell;
use std::fmt::{self, Display};

use crate::distr::{Distribution, Domain, Family};
use crate::error::Error;
use crate::fit::{CompiledModel, Engine, Fit, QuantileData};

pub mod parse;

// Fixed program template; the six $token$ substitution points are replaced
// verbatim, without escaping.
const TEMPLATE : &str = include_str!("template.stan");

/// Quantile matching model: a prior distribution for each parameter of a
/// target family, able to render the full probabilistic program tying those
/// parameters to observed quantiles and to run it through an external engine.
///
/// Priors keep their insertion order, which fixes the positional layout of
/// the generated program and of every fitted-parameter matrix derived from
/// it. The compiled program handle is created on the first sampling or
/// optimizing call and reused for the life of the model; the interior
/// mutability makes a model single-threaded by construction.
pub struct QmModel {
    family : Family,
    priors : Vec<(&'static str, Distribution)>,
    compiled : RefCell<Option<Box<dyn CompiledModel>>>
}

impl QmModel {

    pub fn new(family : Family, a : Distribution, b : Distribution) -> Self {
        let [ra, rb] = family.roles();
        Self {
            family,
            priors : vec![(ra, a), (rb, b)],
            compiled : RefCell::new(None)
        }
    }

    /// Matches quantiles of a Normal: priors over mu (location) and sigma
    /// (scale).
    pub fn normal(mu : Distribution, sigma : Distribution) -> Self {
        Self::new(Family::Normal, mu, sigma)
    }

    /// Matches quantiles of a Gamma: priors over alpha (shape) and beta
    /// (rate).
    pub fn gamma(alpha : Distribution, beta : Distribution) -> Self {
        Self::new(Family::Gamma, alpha, beta)
    }

    /// Matches quantiles of a Lognormal: priors over the location and scale
    /// of the log-variable.
    pub fn lognormal(mu : Distribution, sigma : Distribution) -> Self {
        Self::new(Family::Lognormal, mu, sigma)
    }

    /// Matches quantiles of a Weibull: priors over alpha (shape) and sigma
    /// (scale).
    pub fn weibull(alpha : Distribution, sigma : Distribution) -> Self {
        Self::new(Family::Weibull, alpha, sigma)
    }

    pub fn family(&self) -> Family {
        self.family
    }

    /// Role/prior pairs in declaration order.
    pub fn priors(&self) -> &[(&'static str, Distribution)] {
        &self.priors
    }

    /// Support of the target family, against which observed quantile values
    /// are validated. The priors play no role here.
    pub fn domain(&self) -> Domain {
        self.family.domain()
    }

    /// Rejects any observed value outside the open support interval,
    /// listing every offender.
    pub fn check_domain(&self, x : &[f64]) -> Result<(), Error> {
        let domain = self.domain();
        let offending : Vec<f64> = x.iter()
            .filter(|v| !domain.contains(**v))
            .cloned()
            .collect();
        if offending.is_empty() {
            Ok(())
        } else {
            let (lower, upper) = domain.bounds();
            Err(Error::OutsideDomain { lower, upper, values : offending })
        }
    }

    /// Token/value pairs substituted into the template: the comma-joined
    /// parameter names, the declaration and prior blocks (one line per prior,
    /// at the template's indentation), and the family-derived names of the
    /// `_cdf`/`_lpdf`/`_rng` entry points.
    pub fn replacements(&self) -> Vec<(&'static str, String)> {
        let names = self.priors.iter()
            .map(|(_, p)| p.name().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let declarations = self.priors.iter()
            .map(|(_, p)| p.declaration())
            .collect::<Vec<_>>()
            .join("\n    ");
        let priors = self.priors.iter()
            .map(|(_, p)| p.prior())
            .collect::<Vec<_>>()
            .join("\n    ");
        let stan = self.family.stan_name();
        vec![
            ("parametersnames", names),
            ("parameters", declarations),
            ("priors", priors),
            ("cdf", format!("{}_cdf", stan)),
            ("lpdf", format!("{}_lpdf", stan)),
            ("rng", format!("{}_rng", stan))
        ]
    }

    /// The final program text handed to the engine.
    pub fn code(&self) -> String {
        let mut code = TEMPLATE.to_string();
        for (token, value) in self.replacements() {
            code = code.replace(&format!("${}$", token), &value);
        }
        code
    }

    /// Compiles the rendered program through the engine, keeping the handle
    /// for later calls. Subsequent calls are no-ops.
    pub fn compile(&self, engine : &dyn Engine) -> Result<(), Error> {
        let mut slot = self.compiled.borrow_mut();
        if slot.is_none() {
            *slot = Some(engine.compile(&self.code())?);
        }
        Ok(())
    }

    /// Posterior sampling of the model parameters given N (size of the
    /// sample the quantiles were taken from), the quantile levels q and the
    /// observed quantile values X. Blocks until the engine finishes.
    pub fn sampling(&self, engine : &dyn Engine, n : usize, q : &[f64], x : &[f64]) -> Result<Fit<'_>, Error> {
        self.check_domain(x)?;
        self.compile(engine)?;
        let data = QuantileData::new(n, q, x);
        let slot = self.compiled.borrow();
        let program = match slot.as_ref() {
            Some(p) => p,
            None => unreachable!()
        };
        let draws = program.sampling(&data)?;
        Ok(Fit::sampled(self, draws))
    }

    /// Point estimation counterpart of `sampling`; identical validation and
    /// compilation path.
    pub fn optimizing(&self, engine : &dyn Engine, n : usize, q : &[f64], x : &[f64]) -> Result<Fit<'_>, Error> {
        self.check_domain(x)?;
        self.compile(engine)?;
        let data = QuantileData::new(n, q, x);
        let slot = self.compiled.borrow();
        let program = match slot.as_ref() {
            Some(p) => p,
            None => unreachable!()
        };
        let estimate = program.optimizing(&data)?;
        Ok(Fit::optimized(self, estimate))
    }

}

impl Display for QmModel {

    fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result {
        let priors : Vec<String> = self.priors.iter()
            .map(|(_, p)| p.to_string())
            .collect();
        write!(f, "{}({})", self.family.qm_title(), priors.join(", "))
    }

}
