use std::fmt::{self, Display};

use crate::error::Error;

/// Scalar that remembers whether the caller supplied an integer or a float,
/// so rendered code fragments and display strings keep the original form
/// (`gamma(1, 1.0)` rather than `gamma(1.0, 1.0)`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(i64),
    Real(f64)
}

impl Value {

    pub fn as_f64(&self) -> f64 {
        match self {
            Value::Int(i) => *i as f64,
            Value::Real(r) => *r
        }
    }

    pub fn is_finite(&self) -> bool {
        match self {
            Value::Int(_) => true,
            Value::Real(r) => r.is_finite()
        }
    }

}

impl From<i32> for Value {

    fn from(i : i32) -> Self {
        Value::Int(i as i64)
    }

}

impl From<i64> for Value {

    fn from(i : i64) -> Self {
        Value::Int(i)
    }

}

impl From<f64> for Value {

    fn from(r : f64) -> Self {
        Value::Real(r)
    }

}

impl Display for Value {

    fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            // The {:?} form is the round-trip float text: 0.0 stays "0.0".
            Value::Real(r) => write!(f, "{:?}", r)
        }
    }

}

/// Named scalar bounded to an open interval. Construction fails unless
/// `lower < value < upper`, strictly on both sides; the value is immutable
/// afterwards. Variables are owned by the distribution that declares them.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    value : Value,
    name : String,
    lower : f64,
    upper : f64
}

impl Variable {

    pub fn new(value : impl Into<Value>, name : &str, lower : f64, upper : f64) -> Result<Self, Error> {
        let value = value.into();
        let v = value.as_f64();
        if lower < v && v < upper {
            Ok(Self { value, name : name.to_string(), lower, upper })
        } else {
            Err(Error::Domain { name : name.to_string(), lower, upper, value })
        }
    }

    /// Unconstrained continuous variable over (-inf, inf).
    pub fn continuous(value : impl Into<Value>, name : &str) -> Result<Self, Error> {
        Self::new(value, name, f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Positive continuous variable over (0, inf). The lower bound is strict:
    /// zero itself is rejected.
    pub fn positive(value : impl Into<Value>, name : &str) -> Result<Self, Error> {
        Self::new(value, name, 0.0, f64::INFINITY)
    }

    pub fn value(&self) -> Value {
        self.value
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

}

impl Display for Variable {

    fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }

}
