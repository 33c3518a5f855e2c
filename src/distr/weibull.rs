use std::fmt::{self, Display};

use statrs::distribution::{Continuous, ContinuousCDF};

use crate::distr::Density;
use crate::error::Error;
use crate::variable::{Value, Variable};

/// Weibull distribution with shape alpha and scale sigma, both strictly
/// positive.
#[derive(Debug, Clone)]
pub struct Weibull {
    alpha : Variable,
    sigma : Variable,
    name : String,
    dens : statrs::distribution::Weibull,
    sampler : rand_distr::Weibull<f64>
}

impl Weibull {

    pub fn new(alpha : impl Into<Value>, sigma : impl Into<Value>, name : &str) -> Result<Self, Error> {
        let alpha = Variable::positive(alpha, "alpha")?;
        let sigma = Variable::positive(sigma, "sigma")?;
        let (a, s) = (alpha.value().as_f64(), sigma.value().as_f64());
        let dens = statrs::distribution::Weibull::new(a, s)
            .map_err(|e| Error::Density(format!("{:?}", e)))?;
        // The sampler takes the scale first.
        let sampler = rand_distr::Weibull::new(s, a)
            .map_err(|e| Error::Density(format!("{:?}", e)))?;
        Ok(Self { alpha, sigma, name : name.to_string(), dens, sampler })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Role/variable pairs in declaration order: (alpha, sigma).
    pub fn parameters(&self) -> [(&'static str, &Variable); 2] {
        [("alpha", &self.alpha), ("sigma", &self.sigma)]
    }

}

impl Density for Weibull {

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

impl Display for Weibull {

    fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result {
        super::fmt_distribution(f, "Weibull", &self.parameters(), &self.name)
    }

}
