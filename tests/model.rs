use std::collections::HashMap;
use std::convert::TryFrom;

use qme::distr::Distribution;
use qme::error::Error;
use qme::fit::{CompiledModel, Engine, PointEstimate, PosteriorDraws, QuantileData};
use qme::model::QmModel;

// Engine stub for paths that must fail before any engine work happens.
struct UnreachableEngine;

impl Engine for UnreachableEngine {

    fn compile(&self, _code : &str) -> Result<Box<dyn CompiledModel>, anyhow::Error> {
        panic!("the engine must not be reached");
    }

}

fn normal_model() -> QmModel {
    QmModel::normal(
        Distribution::normal(0.0, 1.0, "mu").unwrap(),
        Distribution::gamma(1.0, 1.0, "sigma").unwrap()
    )
}

#[test]
fn model_display_lists_priors_in_order() {
    let model = normal_model();
    assert_eq!(
        model.to_string(),
        "NormalQm(Normal(mu=0.0, sigma=1.0, name=\"mu\"), Gamma(alpha=1.0, beta=1.0, name=\"sigma\"))"
    );

    let model = QmModel::weibull(
        Distribution::weibull(1.0, 1.0, "alpha").unwrap(),
        Distribution::weibull(1.0, 1.0, "sigma").unwrap()
    );
    assert_eq!(
        model.to_string(),
        "WeibullQm(Weibull(alpha=1.0, sigma=1.0, name=\"alpha\"), Weibull(alpha=1.0, sigma=1.0, name=\"sigma\"))"
    );
}

#[test]
fn template_replacements() {
    let model = QmModel::normal(
        Distribution::normal(0.0, 1.0, "loc").unwrap(),
        Distribution::gamma(1.0, 1.0, "scale").unwrap()
    );
    let replacements : HashMap<&str, String> = model.replacements().into_iter().collect();
    assert_eq!(replacements["parametersnames"], "loc, scale");
    assert_eq!(replacements["parameters"], "real loc;\n    real<lower=0> scale;");
    assert_eq!(replacements["priors"], "loc ~ normal(0.0, 1.0);\n    scale ~ gamma(1.0, 1.0);");
    assert_eq!(replacements["cdf"], "normal_cdf");
    assert_eq!(replacements["lpdf"], "normal_lpdf");
    assert_eq!(replacements["rng"], "normal_rng");
}

#[test]
fn family_tokens_follow_the_model_family() {
    let model = QmModel::lognormal(
        Distribution::normal(1.0, 1.0, "mu").unwrap(),
        Distribution::lognormal(1.0, 1.0, "sigma").unwrap()
    );
    let replacements : HashMap<&str, String> = model.replacements().into_iter().collect();
    assert_eq!(replacements["cdf"], "lognormal_cdf");
    assert_eq!(replacements["lpdf"], "lognormal_lpdf");
    assert_eq!(replacements["rng"], "lognormal_rng");
}

#[test]
fn rendered_program_has_no_tokens_left() {
    let model = normal_model();
    let code = model.code();
    assert!(!code.contains('$'));
    assert!(code.contains("real mu;"));
    assert!(code.contains("real<lower=0> sigma;"));
    assert!(code.contains("mu ~ normal(0.0, 1.0);"));
    assert!(code.contains("normal_lpdf"));
    assert!(code.contains("normal_rng"));
    assert!(code.contains("vector<lower=0, upper=1>[M] q;"));
}

#[test]
fn observed_values_must_lie_in_the_target_domain() {
    let model = QmModel::gamma(
        Distribution::gamma(1.0, 1.2, "alpha").unwrap(),
        Distribution::gamma(2.1, 2.2, "beta").unwrap()
    );
    let q = [0.25, 0.5, 0.75];
    let x = [-0.1, 1.0, 1.4];
    match model.sampling(&UnreachableEngine, 1000, &q, &x) {
        Err(Error::OutsideDomain { lower, values, .. }) => {
            assert_eq!(lower, 0.0);
            assert_eq!(values, vec![-0.1]);
        },
        _ => panic!("expected domain rejection")
    }
    assert!(model.optimizing(&UnreachableEngine, 1000, &q, &x).is_err());

    // The boundary itself is outside the open interval.
    assert!(model.check_domain(&[0.0]).is_err());
    assert!(model.check_domain(&[0.1, 1.0, 1.4]).is_ok());
}

#[test]
fn normal_domain_accepts_any_finite_value() {
    let model = normal_model();
    assert!(model.check_domain(&[-10.0, 0.0, 25.0]).is_ok());
}

#[test]
fn specification_round_trip_preserves_numeric_form() {
    let model = QmModel::gamma(
        Distribution::gamma(1, 1.2, "alpha").unwrap(),
        Distribution::gamma(2.1, 2.2, "beta").unwrap()
    );
    let val = model.to_value();
    let parsed = QmModel::try_from(&val).unwrap();
    assert_eq!(parsed.to_string(), model.to_string());
    assert_eq!(
        parsed.to_string(),
        "GammaQm(Gamma(alpha=1, beta=1.2, name=\"alpha\"), Gamma(alpha=2.1, beta=2.2, name=\"beta\"))"
    );
}

#[test]
fn non_distribution_prior_is_rejected_naming_the_key() {
    let val = serde_json::json!({
        "model" : "normal",
        "priors" : {
            "mu" : { "normal" : { "mu" : 0.0, "sigma" : 1.0, "name" : "a" } },
            "sigma" : 1.0
        }
    });
    match QmModel::try_from(&val) {
        Err(Error::InvalidPrior { model, key, found }) => {
            assert_eq!(model, "NormalQm");
            assert_eq!(key, "sigma");
            assert_eq!(found, "number");
        },
        _ => panic!("expected prior validation failure")
    }
}

#[test]
fn malformed_specifications_are_rejected() {
    let unknown_family = serde_json::json!({
        "model" : "cauchy",
        "priors" : {}
    });
    assert!(QmModel::try_from(&unknown_family).is_err());

    let missing_prior = serde_json::json!({
        "model" : "normal",
        "priors" : {
            "mu" : { "normal" : { "mu" : 0.0, "sigma" : 1.0, "name" : "a" } }
        }
    });
    assert!(QmModel::try_from(&missing_prior).is_err());

    let extra_prior = serde_json::json!({
        "model" : "normal",
        "priors" : {
            "mu" : { "normal" : { "mu" : 0.0, "sigma" : 1.0, "name" : "a" } },
            "sigma" : { "gamma" : { "alpha" : 1.0, "beta" : 1.0, "name" : "b" } },
            "tau" : { "gamma" : { "alpha" : 1.0, "beta" : 1.0, "name" : "c" } }
        }
    });
    assert!(QmModel::try_from(&extra_prior).is_err());
}

#[test]
fn distribution_specification_round_trip() {
    let d = Distribution::lognormal(0, 1.5, "sigma").unwrap();
    let val = d.to_value();
    let parsed = Distribution::try_from(&val).unwrap();
    assert_eq!(parsed.to_string(), "Lognormal(mu=0, sigma=1.5, name=\"sigma\")");
}

#[test]
fn quantile_data_serializes_with_engine_field_names() {
    let data = QuantileData::new(100, &[0.25, 0.5, 0.75], &[0.1, 1.0, 1.4]);
    assert_eq!(data.m, 3);
    let json = serde_json::to_value(&data).unwrap();
    assert_eq!(json["N"], 100);
    assert_eq!(json["M"], 3);
    assert_eq!(json["q"][1], 0.5);
    assert_eq!(json["X"][2], 1.4);
}

#[test]
fn point_estimate_and_draws_lookup() {
    let mut est = PointEstimate::new();
    est.insert("mu", 0.5);
    assert_eq!(est.get("mu"), Some(0.5));
    assert_eq!(est.get("nope"), None);
    assert_eq!(est.names(), vec!["mu"]);

    let mut draws = PosteriorDraws::new();
    draws.insert("mu", nalgebra::DVector::from_vec(vec![0.1, 0.2]));
    assert_eq!(draws.draw_count(), 2);
    assert!(draws.extract("mu").is_some());
    assert!(draws.extract("sigma").is_none());
}
