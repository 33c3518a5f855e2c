use nalgebra::*;
use serde::Serialize;

pub mod object;

pub use object::*;

/// Data dictionary handed to the engine together with the compiled program:
/// the size N of the sample the quantiles were taken from, the M quantile
/// levels q and the M observed quantile values X. Serializes under the field
/// names the generated program declares.
#[derive(Debug, Clone, Serialize)]
pub struct QuantileData {

    #[serde(rename = "N")]
    pub n : usize,

    #[serde(rename = "M")]
    pub m : usize,

    pub q : Vec<f64>,

    #[serde(rename = "X")]
    pub x : Vec<f64>

}

impl QuantileData {

    pub fn new(n : usize, q : &[f64], x : &[f64]) -> Self {
        Self { n, m : q.len(), q : q.to_vec(), x : x.to_vec() }
    }

}

/// External inference engine. The engine receives the rendered program text,
/// compiles it into an executable model and is otherwise a black box; any
/// failure it reports crosses this boundary unmodified.
pub trait Engine {

    fn compile(&self, code : &str) -> Result<Box<dyn CompiledModel>, anyhow::Error>;

}

/// Handle to a compiled program. Both entry points block until the engine
/// finishes; no cancellation or timeout is exposed here.
pub trait CompiledModel {

    /// Full posterior exploration; returns one draw array per model parameter.
    fn sampling(&self, data : &QuantileData) -> Result<PosteriorDraws, anyhow::Error>;

    /// Point estimation; returns one value per model parameter.
    fn optimizing(&self, data : &QuantileData) -> Result<PointEstimate, anyhow::Error>;

}

/// Posterior draw arrays keyed by parameter name, in the order the engine
/// reported them. All arrays are expected to have the same length (one entry
/// per draw).
#[derive(Debug, Clone, Default)]
pub struct PosteriorDraws {
    draws : Vec<(String, DVector<f64>)>
}

impl PosteriorDraws {

    pub fn new() -> Self {
        Self { draws : Vec::new() }
    }

    pub fn insert(&mut self, name : &str, values : DVector<f64>) {
        self.draws.push((name.to_string(), values));
    }

    pub fn extract(&self, name : &str) -> Option<&DVector<f64>> {
        self.draws.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn names(&self) -> Vec<&str> {
        self.draws.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn draw_count(&self) -> usize {
        self.draws.first().map(|(_, v)| v.len()).unwrap_or(0)
    }

}

impl std::iter::FromIterator<(String, DVector<f64>)> for PosteriorDraws {

    fn from_iter<I : IntoIterator<Item = (String, DVector<f64>)>>(iter : I) -> Self {
        Self { draws : iter.into_iter().collect() }
    }

}

/// Point estimate mapping produced by the optimizing entry point.
#[derive(Debug, Clone, Default)]
pub struct PointEstimate {
    values : Vec<(String, f64)>
}

impl PointEstimate {

    pub fn new() -> Self {
        Self { values : Vec::new() }
    }

    pub fn insert(&mut self, name : &str, value : f64) {
        self.values.push((name.to_string(), value));
    }

    pub fn get(&self, name : &str) -> Option<f64> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }

    pub fn names(&self) -> Vec<&str> {
        self.values.iter().map(|(n, _)| n.as_str()).collect()
    }

}

impl std::iter::FromIterator<(String, f64)> for PointEstimate {

    fn from_iter<I : IntoIterator<Item = (String, f64)>>(iter : I) -> Self {
        Self { values : iter.into_iter().collect() }
    }

}
