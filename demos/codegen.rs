use qme::distr::Distribution;
use qme::model::QmModel;

// Builds a quantile matching model, prints the program handed to the
// inference engine and the equivalent specification file.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let model = QmModel::normal(
        Distribution::normal(0.0, 1.0, "mu")?,
        Distribution::gamma(1.0, 1.2, "sigma")?
    );
    println!("{}", model);
    println!();
    println!("{}", model.code());
    println!("{}", serde_json::to_string_pretty(&model.to_value())?);
    Ok(())
}
