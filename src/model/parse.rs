use std::convert::TryFrom;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;

use serde_json::{map::Map, Value};

use crate::distr::{Distribution, Family, Gamma, Lognormal, Normal, Weibull};
use crate::error::Error;
use crate::model::QmModel;
use crate::variable;

/// Specification format for a distribution: a single-key object naming the
/// family, with the parameter values and the declared name inside. Numbers
/// keep their integer/float form across a round trip.
///
/// ```text
/// { "normal" : { "mu" : 0.0, "sigma" : 1.0, "name" : "mu" } }
/// ```
impl TryFrom<&Value> for Distribution {

    type Error = Error;

    fn try_from(val : &Value) -> Result<Self, Error> {
        let obj = val.as_object().ok_or_else(|| Error::Parse(
            format!("distribution specification needs to be an object, got {}", json_type_name(val))
        ))?;
        if obj.len() != 1 {
            return Err(Error::Parse(
                "distribution specification needs a single family key".to_string()
            ));
        }
        let (key, body) = match obj.iter().next() {
            Some(entry) => entry,
            None => unreachable!()
        };
        let family = Family::from_str(key)?;
        let body = body.as_object().ok_or_else(|| Error::Parse(
            format!("parameters of \"{}\" need to be an object, got {}", key, json_type_name(body))
        ))?;
        let name = body.get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::Parse(format!("missing name entry for \"{}\"", key)))?;
        let [ra, rb] = family.roles();
        let a = parse_number(body, ra)?;
        let b = parse_number(body, rb)?;
        match family {
            Family::Normal => Normal::new(a, b, name).map(Distribution::Normal),
            Family::Gamma => Gamma::new(a, b, name).map(Distribution::Gamma),
            Family::Lognormal => Lognormal::new(a, b, name).map(Distribution::Lognormal),
            Family::Weibull => Weibull::new(a, b, name).map(Distribution::Weibull)
        }
    }

}

impl Distribution {

    pub fn to_value(&self) -> Value {
        let mut params = Map::new();
        for (role, var) in self.parameters() {
            params.insert(role.to_string(), number(var.value()));
        }
        params.insert("name".to_string(), Value::from(self.name()));
        let mut outer = Map::new();
        outer.insert(self.family().stan_name().to_string(), Value::Object(params));
        Value::Object(outer)
    }

}

/// Specification format for a model: the target family plus one prior
/// specification per parameter role. Every prior slot must hold a
/// distribution specification; anything else fails naming the slot and the
/// offending type.
///
/// ```text
/// { "model" : "normal",
///   "priors" : { "mu" : { "normal" : { ... } }, "sigma" : { "gamma" : { ... } } } }
/// ```
impl TryFrom<&Value> for QmModel {

    type Error = Error;

    fn try_from(val : &Value) -> Result<Self, Error> {
        let obj = val.as_object().ok_or_else(|| Error::Parse(
            format!("model specification needs to be an object, got {}", json_type_name(val))
        ))?;
        let family = obj.get("model")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::Parse("missing model entry".to_string()))?;
        let family = Family::from_str(family)?;
        let priors = obj.get("priors")
            .ok_or_else(|| Error::Parse("missing priors entry".to_string()))?;
        let priors = priors.as_object().ok_or_else(|| Error::Parse(
            format!("priors entry needs to be an object, got {}", json_type_name(priors))
        ))?;
        let [ra, rb] = family.roles();
        for key in priors.keys() {
            if key != ra && key != rb {
                return Err(Error::Parse(format!(
                    "unexpected prior \"{}\" for \"{}\"", key, family.qm_title()
                )));
            }
        }
        let a = parse_prior(family, priors, ra)?;
        let b = parse_prior(family, priors, rb)?;
        Ok(QmModel::new(family, a, b))
    }

}

impl QmModel {

    pub fn to_value(&self) -> Value {
        let mut priors = Map::new();
        for (role, p) in self.priors() {
            priors.insert(role.to_string(), p.to_value());
        }
        let mut outer = Map::new();
        outer.insert("model".to_string(), Value::from(self.family().stan_name()));
        outer.insert("priors".to_string(), Value::Object(priors));
        Value::Object(outer)
    }

    pub fn load_from_path<P>(path : P) -> Result<Self, Error>
    where
        P : AsRef<Path>
    {
        let f = File::open(path)?;
        Self::load(f)
    }

    pub fn load<R>(mut reader : R) -> Result<Self, Error>
    where
        R : Read
    {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        let val : Value = serde_json::from_str(&content)
            .map_err(|e| Error::Parse(e.to_string()))?;
        Self::try_from(&val)
    }

    pub fn save_to_path<P>(&self, path : P) -> Result<(), Error>
    where
        P : AsRef<Path>
    {
        let file = OpenOptions::new().write(true).create(true).truncate(true).open(path)?;
        self.save(file)
    }

    pub fn save<W>(&self, mut writer : W) -> Result<(), Error>
    where
        W : Write
    {
        let content = serde_json::to_string_pretty(&self.to_value())
            .map_err(|e| Error::Parse(e.to_string()))?;
        writer.write_all(content.as_bytes())?;
        Ok(())
    }

}

fn parse_prior(family : Family, map : &Map<String, Value>, key : &str) -> Result<Distribution, Error> {
    let val = map.get(key).ok_or_else(|| Error::Parse(
        format!("missing prior \"{}\" for \"{}\"", key, family.qm_title())
    ))?;
    if !val.is_object() {
        return Err(Error::InvalidPrior {
            model : family.qm_title().to_string(),
            key : key.to_string(),
            found : json_type_name(val).to_string()
        });
    }
    Distribution::try_from(val)
}

fn parse_number(obj : &Map<String, Value>, key : &str) -> Result<variable::Value, Error> {
    let val = obj.get(key).ok_or_else(|| Error::Parse(format!("missing parameter {}", key)))?;
    match val {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(variable::Value::Int(i))
            } else if let Some(r) = n.as_f64() {
                Ok(variable::Value::Real(r))
            } else {
                Err(Error::Parse(format!("parameter {} is out of range", key)))
            }
        },
        other => Err(Error::Parse(
            format!("parameter {} needs to be a number, got {}", key, json_type_name(other))
        ))
    }
}

fn number(v : variable::Value) -> Value {
    match v {
        variable::Value::Int(i) => Value::from(i),
        variable::Value::Real(r) => Value::from(r)
    }
}

fn json_type_name(v : &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object"
    }
}
