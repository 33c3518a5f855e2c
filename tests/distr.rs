use qme::distr::*;
use qme::error::Error;
use qme::variable::Variable;

const EPS : f64 = 1e-9;

// Quantile inversion is iterative for some families; allow a looser margin.
const Q_EPS : f64 = 1e-6;

#[test]
fn variable_bounds_are_strictly_open() {
    assert!(Variable::continuous(0.0, "mu").is_ok());
    assert!(Variable::continuous(-1e12, "mu").is_ok());
    assert!(Variable::positive(0.5, "sigma").is_ok());
    assert!(Variable::positive(0.0, "sigma").is_err());
    assert!(Variable::positive(-1.0, "sigma").is_err());
    assert!(Variable::new(0.5, "p", 0.0, 1.0).is_ok());
    assert!(Variable::new(0.0, "p", 0.0, 1.0).is_err());
    assert!(Variable::new(1.0, "p", 0.0, 1.0).is_err());
}

#[test]
fn variable_violation_cites_name_bounds_and_value() {
    match Variable::positive(-2.0, "beta") {
        Err(Error::Domain { name, lower, upper, value }) => {
            assert_eq!(name, "beta");
            assert_eq!(lower, 0.0);
            assert!(upper.is_infinite());
            assert!((value.as_f64() + 2.0).abs() < EPS);
        },
        other => panic!("expected domain error, got {:?}", other.map(|_| ()))
    }
}

#[test]
fn construction_rejects_invalid_parameters() {
    assert!(Distribution::normal(0.0, 0.0, "mu").is_err());
    assert!(Distribution::gamma(-1.0, 2.0, "alpha").is_err());
    assert!(Distribution::lognormal(1.0, -0.1, "sigma").is_err());
    assert!(Distribution::weibull(0.0, 1.0, "alpha").is_err());
}

#[test]
fn display_keeps_the_numeric_form_of_the_caller() {
    let mu = Distribution::normal(0, 1, "mu").unwrap();
    let mu2 = Distribution::normal(1.0, 2, "mu2").unwrap();
    assert_eq!(mu.to_string(), "Normal(mu=0, sigma=1, name=\"mu\")");
    assert_eq!(mu2.to_string(), "Normal(mu=1.0, sigma=2, name=\"mu2\")");

    let alpha = Distribution::gamma(1, 1, "alpha").unwrap();
    let beta = Distribution::gamma(1, 1.2, "somethingelse").unwrap();
    assert_eq!(alpha.to_string(), "Gamma(alpha=1, beta=1, name=\"alpha\")");
    assert_eq!(beta.to_string(), "Gamma(alpha=1, beta=1.2, name=\"somethingelse\")");

    let sigma = Distribution::lognormal(1.0, 1.0, "sigma").unwrap();
    assert_eq!(sigma.to_string(), "Lognormal(mu=1.0, sigma=1.0, name=\"sigma\")");

    let scale = Distribution::weibull(2.5, 1, "scale").unwrap();
    assert_eq!(scale.to_string(), "Weibull(alpha=2.5, sigma=1, name=\"scale\")");
}

#[test]
fn code_fragments_follow_the_declaration_grammar() {
    let code = Distribution::normal(0.0, 1.0, "mu").unwrap().code();
    assert_eq!(code.declaration, "real mu;");
    assert_eq!(code.prior, "mu ~ normal(0.0, 1.0);");

    let code = Distribution::gamma(1, 1.0, "beta").unwrap().code();
    assert_eq!(code.declaration, "real<lower=0> beta;");
    assert_eq!(code.prior, "beta ~ gamma(1, 1.0);");

    let code = Distribution::gamma(1.1, 1.0, "sigma").unwrap().code();
    assert_eq!(code.declaration, "real<lower=0> sigma;");
    assert_eq!(code.prior, "sigma ~ gamma(1.1, 1.0);");

    let code = Distribution::lognormal(0.5, 1.5, "sigma").unwrap().code();
    assert_eq!(code.declaration, "real<lower=0> sigma;");
    assert_eq!(code.prior, "sigma ~ lognormal(0.5, 1.5);");

    let code = Distribution::weibull(1.0, 2.0, "alpha").unwrap().code();
    assert_eq!(code.declaration, "real<lower=0> alpha;");
    assert_eq!(code.prior, "alpha ~ weibull(1.0, 2.0);");
}

#[test]
fn constraints_render_only_finite_bounds() {
    let domain = Domain::REAL;
    assert!(domain.constraint().is_none());
    let positive = Domain::POSITIVE;
    assert_eq!(positive.constraint().unwrap(), "lower=0");
    assert_eq!(positive.to_string(), "(0, inf)");
}

#[test]
fn family_domains() {
    assert_eq!(Family::Normal.domain().bounds(), (f64::NEG_INFINITY, f64::INFINITY));
    for family in [Family::Gamma, Family::Lognormal, Family::Weibull].iter() {
        let (lower, upper) = family.domain().bounds();
        assert_eq!(lower, 0.0);
        assert!(upper.is_infinite());
        assert!(!family.domain().contains(0.0));
        assert!(family.domain().contains(1e-12));
    }
}

#[test]
fn standard_normal_reference_values() {
    let d = Distribution::normal(0.0, 1.0, "z").unwrap();
    let pdf = d.pdf(&[0.0, 1.0]);
    assert!((pdf[0] - 0.3989422804014327).abs() < EPS);
    assert!((pdf[1] - 0.24197072451914337).abs() < EPS);
    let cdf = d.cdf(&[0.0]);
    assert!((cdf[0] - 0.5).abs() < EPS);
    let lp = d.log_pdf(&[0.0]);
    assert!((lp[0] + 0.5 * (2.0 * std::f64::consts::PI).ln()).abs() < EPS);
    let lc = d.log_cdf(&[0.0]);
    assert!((lc[0] - 0.5f64.ln()).abs() < EPS);
    let ppf = d.ppf(&[0.975]).unwrap();
    assert!((ppf[0] - 1.959963984540054).abs() < Q_EPS);
}

#[test]
fn gamma_uses_the_rate_parameterization() {
    // Gamma(1, beta) is Exponential(beta); a scale mixup would show here.
    let d = Distribution::gamma(1.0, 2.0, "g").unwrap();
    for &x in [0.5, 1.0, 2.0].iter() {
        assert!((d.pdf(&[x])[0] - 2.0 * (-2.0 * x).exp()).abs() < EPS);
        assert!((d.cdf(&[x])[0] - (1.0 - (-2.0 * x).exp())).abs() < EPS);
        assert!((d.log_pdf(&[x])[0] - (2.0f64.ln() - 2.0 * x)).abs() < EPS);
    }
    for &p in [0.1, 0.5, 0.9].iter() {
        assert!((d.ppf(&[p]).unwrap()[0] + (1.0 - p).ln() / 2.0).abs() < Q_EPS);
    }
}

#[test]
fn weibull_uses_the_shape_scale_parameterization() {
    // Weibull(1, sigma) is Exponential(1/sigma).
    let d = Distribution::weibull(1.0, 2.0, "w").unwrap();
    for &x in [0.5, 1.0, 3.0].iter() {
        assert!((d.pdf(&[x])[0] - 0.5 * (-x / 2.0).exp()).abs() < EPS);
        assert!((d.cdf(&[x])[0] - (1.0 - (-x / 2.0).exp())).abs() < EPS);
    }
    for &p in [0.25, 0.5, 0.75].iter() {
        assert!((d.ppf(&[p]).unwrap()[0] + 2.0 * (1.0 - p).ln()).abs() < Q_EPS);
    }
}

#[test]
fn lognormal_parameters_refer_to_the_log_variable() {
    let (mu, sigma) = (0.3, 0.8);
    let d = Distribution::lognormal(mu, sigma, "ln").unwrap();
    let z = Distribution::normal(0.0, 1.0, "z").unwrap();
    for &x in [0.2f64, 1.0, 2.5].iter() {
        let t = (x.ln() - mu) / sigma;
        assert!((d.cdf(&[x])[0] - z.cdf(&[t])[0]).abs() < EPS);
        assert!((d.pdf(&[x])[0] - z.pdf(&[t])[0] / (sigma * x)).abs() < EPS);
    }
    // Median of the lognormal is exp(mu).
    assert!((d.ppf(&[0.5]).unwrap()[0] - mu.exp()).abs() < Q_EPS);
}

#[test]
fn quantile_levels_outside_the_unit_interval_are_rejected() {
    let d = Distribution::normal(0.0, 1.0, "z").unwrap();
    match d.ppf(&[0.5, 1.5, -0.2]) {
        Err(Error::Level { values }) => assert_eq!(values, vec![1.5, -0.2]),
        other => panic!("expected level error, got {:?}", other.map(|_| ()))
    }
    assert!(d.ppf(&[0.0]).is_err());
    assert!(d.ppf(&[1.0]).is_err());
}

#[test]
fn samples_respect_the_support() {
    let d = Distribution::gamma(2.0, 1.0, "g").unwrap();
    let draws = d.sample(200);
    assert_eq!(draws.len(), 200);
    assert!(draws.iter().all(|x| *x > 0.0));

    let w = Distribution::weibull(1.5, 2.0, "w").unwrap();
    assert!(w.sample(200).iter().all(|x| *x > 0.0));
}

#[test]
fn parameters_keep_declaration_order() {
    let d = Distribution::gamma(1.0, 2.0, "g").unwrap();
    let roles : Vec<&str> = d.parameters().iter().map(|(r, _)| *r).collect();
    assert_eq!(roles, vec!["alpha", "beta"]);
    assert_eq!(d.parameters()[0].1.value().as_f64(), 1.0);
    assert_eq!(d.parameters()[1].1.value().as_f64(), 2.0);
}
