use std::fmt::{self, Display};

use statrs::distribution::{Continuous, ContinuousCDF};

use crate::distr::Density;
use crate::error::Error;
use crate::variable::{Value, Variable};

/// Normal distribution parameterized by location and scale. The location is
/// unconstrained, the scale strictly positive; both are checked when the
/// distribution is built. Used either as a prior over an unconstrained model
/// parameter or as the target family of a quantile matching model.
///
/// The evaluable density and the sampler are fixed at construction from the
/// variable values, so evaluation never re-validates parameters.
#[derive(Debug, Clone)]
pub struct Normal {
    mu : Variable,
    sigma : Variable,
    name : String,
    dens : statrs::distribution::Normal,
    sampler : rand_distr::Normal<f64>
}

impl Normal {

    pub fn new(mu : impl Into<Value>, sigma : impl Into<Value>, name : &str) -> Result<Self, Error> {
        let mu = Variable::continuous(mu, "mu")?;
        let sigma = Variable::positive(sigma, "sigma")?;
        let (m, s) = (mu.value().as_f64(), sigma.value().as_f64());
        let dens = statrs::distribution::Normal::new(m, s)
            .map_err(|e| Error::Density(format!("{:?}", e)))?;
        let sampler = rand_distr::Normal::new(m, s)
            .map_err(|e| Error::Density(format!("{:?}", e)))?;
        Ok(Self { mu, sigma, name : name.to_string(), dens, sampler })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Role/variable pairs in declaration order: (mu, sigma).
    pub fn parameters(&self) -> [(&'static str, &Variable); 2] {
        [("mu", &self.mu), ("sigma", &self.sigma)]
    }

}

impl Density for Normal {

    fn pdf(&self, x : f64) -> f64 {
        self.dens.pdf(x)
    }

    fn cdf(&self, x : f64) -> f64 {
        self.dens.cdf(x)
    }

    fn log_pdf(&self, x : f64) -> f64 {
        self.dens.ln_pdf(x)
    }

    fn log_cdf(&self, x : f64) -> f64 {
        self.dens.cdf(x).ln()
    }

    fn quantile(&self, p : f64) -> f64 {
        self.dens.inverse_cdf(p)
    }

    fn draw(&self) -> f64 {
        rand_distr::Distribution::sample(&self.sampler, &mut rand::thread_rng())
    }

}

impl Display for Normal {

    fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result {
        super::fmt_distribution(f, "Normal", &self.parameters(), &self.name)
    }

}
