use std::fmt::{self, Display};

use statrs::distribution::{Continuous, ContinuousCDF};

use crate::distr::Density;
use crate::error::Error;
use crate::variable::{Value, Variable};

/// Gamma distribution in the shape/rate parameterization: alpha is the shape
/// and beta the rate, both strictly positive. The sampler expects a scale,
/// so it is built with 1/beta.
#[derive(Debug, Clone)]
pub struct Gamma {
    alpha : Variable,
    beta : Variable,
    name : String,
    dens : statrs::distribution::Gamma,
    sampler : rand_distr::Gamma<f64>
}

impl Gamma {

    pub fn new(alpha : impl Into<Value>, beta : impl Into<Value>, name : &str) -> Result<Self, Error> {
        let alpha = Variable::positive(alpha, "alpha")?;
        let beta = Variable::positive(beta, "beta")?;
        let (a, b) = (alpha.value().as_f64(), beta.value().as_f64());
        let dens = statrs::distribution::Gamma::new(a, b)
            .map_err(|e| Error::Density(format!("{:?}", e)))?;
        let sampler = rand_distr::Gamma::new(a, 1.0 / b)
            .map_err(|e| Error::Density(format!("{:?}", e)))?;
        Ok(Self { alpha, beta, name : name.to_string(), dens, sampler })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Role/variable pairs in declaration order: (alpha, beta).
    pub fn parameters(&self) -> [(&'static str, &Variable); 2] {
        [("alpha", &self.alpha), ("beta", &self.beta)]
    }

}

impl Density for Gamma {

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

impl Display for Gamma {

    fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result {
        super::fmt_distribution(f, "Gamma", &self.parameters(), &self.name)
    }

}
