use clap::Parser;

use bde_rs::history::DelayedValues;
use bde_rs::model::Unforced;
use bde_rs::plot::{to_table, Trace};
use bde_rs::series::BooleanTimeSeries;
use bde_rs::solver::BdeSolver;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Simulation end time.
    #[arg(long, value_name = "FLOAT", default_value = "5")]
    end_time: f64,

    /// The delay of the negative feedback.
    #[arg(long, value_name = "FLOAT", default_value = "1")]
    delay: f64,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let args = Cli::parse();
    println!("args = {:?}", args);

    // x(t) = NOT x(t - tau)
    let model = Unforced(|z: &DelayedValues| vec![!z[0][0]]);
    let history = BooleanTimeSeries::new(vec![0.0], &[true], args.delay)?;

    let solver = BdeSolver::new(model, vec![args.delay], vec![history]);
    let output = solver.solve(args.end_time)?;

    print!("{}", to_table(&[Trace::new(&output[0], "x")])?);

    Ok(())
}
