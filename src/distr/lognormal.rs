use std::fmt::{self, Display};

use statrs::distribution::{Continuous, ContinuousCDF};

use crate::distr::Density;
use crate::error::Error;
use crate::variable::{Value, Variable};

/// Lognormal distribution; mu and sigma are the location and scale of the
/// underlying normal of log(X), not of X itself.
#[derive(Debug, Clone)]
pub struct Lognormal {
    mu : Variable,
    sigma : Variable,
    name : String,
    dens : statrs::distribution::LogNormal,
    sampler : rand_distr::LogNormal<f64>
}

impl Lognormal {

    pub fn new(mu : impl Into<Value>, sigma : impl Into<Value>, name : &str) -> Result<Self, Error> {
        let mu = Variable::continuous(mu, "mu")?;
        let sigma = Variable::positive(sigma, "sigma")?;
        let (m, s) = (mu.value().as_f64(), sigma.value().as_f64());
        let dens = statrs::distribution::LogNormal::new(m, s)
            .map_err(|e| Error::Density(format!("{:?}", e)))?;
        let sampler = rand_distr::LogNormal::new(m, s)
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

impl Density for Lognormal {

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

impl Display for Lognormal {

    fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result {
        super::fmt_distribution(f, "Lognormal", &self.parameters(), &self.name)
    }

}
