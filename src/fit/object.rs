use nalgebra::*;

use crate::error::Error;
use crate::fit::{PointEstimate, PosteriorDraws};
use crate::model::QmModel;

/// How a query aggregates over posterior draws: elementwise mean, elementwise
/// median, or the full draws-by-points matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    Mean,
    Median,
    Full
}

/// Result of a statistical query, squeezed of unit axes: a single reduced
/// point collapses to a scalar, a single row or column to a vector.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    Scalar(f64),
    Vector(DVector<f64>),
    Matrix(DMatrix<f64>)
}

impl Evaluation {

    pub fn scalar(&self) -> Option<f64> {
        match self {
            Evaluation::Scalar(s) => Some(*s),
            _ => None
        }
    }

    pub fn vector(&self) -> Option<&DVector<f64>> {
        match self {
            Evaluation::Vector(v) => Some(v),
            _ => None
        }
    }

    pub fn matrix(&self) -> Option<&DMatrix<f64>> {
        match self {
            Evaluation::Matrix(m) => Some(m),
            _ => None
        }
    }

}

/// Raw engine result together with the access-mode tag: either the full
/// posterior draw arrays of a sampling run or the point estimate mapping of
/// an optimizing run.
#[derive(Debug, Clone)]
pub enum FitResult {
    Samples(PosteriorDraws),
    Estimate(PointEstimate)
}

/// Outcome of a sampling or optimizing call, bound to the model that produced
/// it. Fully determined at construction and read-only afterwards; every query
/// is a pure function of the stored result.
///
/// The statistical queries rebuild one concrete distribution of the model's
/// target family per draw (per the single estimate for optimizing results)
/// and evaluate it at the requested points, reducing across draws as asked.
pub struct Fit<'a> {
    model : &'a QmModel,
    result : FitResult
}

impl<'a> Fit<'a> {

    pub(crate) fn sampled(model : &'a QmModel, draws : PosteriorDraws) -> Self {
        Self { model, result : FitResult::Samples(draws) }
    }

    pub(crate) fn optimized(model : &'a QmModel, estimate : PointEstimate) -> Self {
        Self { model, result : FitResult::Estimate(estimate) }
    }

    pub fn model(&self) -> &QmModel {
        self.model
    }

    pub fn result(&self) -> &FitResult {
        &self.result
    }

    pub fn samples(&self) -> Option<&PosteriorDraws> {
        match &self.result {
            FitResult::Samples(draws) => Some(draws),
            FitResult::Estimate(_) => None
        }
    }

    pub fn estimate(&self) -> Option<&PointEstimate> {
        match &self.result {
            FitResult::Samples(_) => None,
            FitResult::Estimate(est) => Some(est)
        }
    }

    /// Draw sequence of the named parameter. A sampling fit yields the full
    /// posterior draws, an optimizing fit a length-one vector. Unknown names
    /// fail identically for both variants.
    pub fn parameter(&self, name : &str) -> Result<DVector<f64>, Error> {
        match &self.result {
            FitResult::Samples(draws) => draws.extract(name)
                .cloned()
                .ok_or_else(|| Error::UnknownParameter(name.to_string())),
            FitResult::Estimate(est) => est.get(name)
                .map(|v| DVector::from_element(1, v))
                .ok_or_else(|| Error::UnknownParameter(name.to_string()))
        }
    }

    /// All parameter draws as a parameters-by-draws matrix, rows in the
    /// model's declaration order. Optimizing fits have a single column.
    pub fn parameter_matrix(&self) -> Result<DMatrix<f64>, Error> {
        let rows : Vec<DVector<f64>> = self.model.priors().iter()
            .map(|(_, prior)| self.parameter(prior.name()))
            .collect::<Result<_, _>>()?;
        let ncols = rows.first().map(|r| r.len()).unwrap_or(0);
        Ok(DMatrix::from_fn(rows.len(), ncols, |i, j| rows[i][j]))
    }

    /// Density of the fitted family at the given points, averaged over draws.
    pub fn pdf(&self, x : &[f64]) -> Result<Evaluation, Error> {
        self.pdf_with(x, Reduction::Mean)
    }

    pub fn pdf_with(&self, x : &[f64], reduce : Reduction) -> Result<Evaluation, Error> {
        self.evaluate(x, reduce, |d, x| d.pdf(x))
    }

    /// Cumulative function of the fitted family, averaged over draws.
    pub fn cdf(&self, x : &[f64]) -> Result<Evaluation, Error> {
        self.cdf_with(x, Reduction::Mean)
    }

    pub fn cdf_with(&self, x : &[f64], reduce : Reduction) -> Result<Evaluation, Error> {
        self.evaluate(x, reduce, |d, x| d.cdf(x))
    }

    /// Quantile function of the fitted family at the given levels. Unlike the
    /// density queries, the default keeps the full draws-by-levels matrix.
    pub fn ppf(&self, q : &[f64]) -> Result<Evaluation, Error> {
        self.ppf_with(q, Reduction::Full)
    }

    pub fn ppf_with(&self, q : &[f64], reduce : Reduction) -> Result<Evaluation, Error> {
        let offending : Vec<f64> = q.iter()
            .filter(|p| !(0.0 < **p && **p < 1.0))
            .cloned()
            .collect();
        if !offending.is_empty() {
            return Err(Error::Level { values : offending });
        }
        self.evaluate(q, reduce, |d, p| d.quantile(p))
    }

    fn evaluate(
        &self,
        points : &[f64],
        reduce : Reduction,
        f : impl Fn(&dyn crate::distr::Density, f64) -> f64
    ) -> Result<Evaluation, Error> {
        let params = self.parameter_matrix()?;
        let k = params.ncols();
        let family = self.model.family();
        let mut out = DMatrix::zeros(k, points.len());
        for i in 0..k {
            let d = family.distribution(params[(0, i)], params[(1, i)], family.stan_name())?;
            let dens = d.density();
            for (j, &x) in points.iter().enumerate() {
                out[(i, j)] = f(dens, x);
            }
        }
        let reduced = match (&self.result, reduce) {
            // A point estimate has a single row; reductions cannot aggregate.
            (FitResult::Estimate(_), _) => out,
            (FitResult::Samples(_), Reduction::Full) => out,
            (FitResult::Samples(_), Reduction::Mean) => {
                DMatrix::from_fn(1, points.len(), |_, j| out.column(j).sum() / k as f64)
            },
            (FitResult::Samples(_), Reduction::Median) => {
                DMatrix::from_fn(1, points.len(), |_, j| median(out.column(j).iter().cloned().collect()))
            }
        };
        Ok(squeeze(reduced))
    }

}

fn median(mut values : Vec<f64>) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = values.len();
    if n % 2 == 1 {
        values[n / 2]
    } else {
        0.5 * (values[n / 2 - 1] + values[n / 2])
    }
}

fn squeeze(m : DMatrix<f64>) -> Evaluation {
    match (m.nrows(), m.ncols()) {
        (1, 1) => Evaluation::Scalar(m[(0, 0)]),
        (1, _) => Evaluation::Vector(m.row(0).transpose()),
        (_, 1) => Evaluation::Vector(m.column(0).into_owned()),
        _ => Evaluation::Matrix(m)
    }
}
