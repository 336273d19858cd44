//! Command-line front end: reads a problem from a file or stdin, resolves it
//! with the selected strategy, and prints the proportions or a plain
//! no-solution message.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use ratio_constraints_system_solver::{
    read_problem, resolve, resolve_by_merging, InputError, Resolution,
};

/// Determines normalized mixing proportions for a set of ingredients from
/// pairwise ratio constraints.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// File holding the problem input; reads stdin when omitted.
    input: Option<PathBuf>,

    /// Decimal places in the printed proportions.
    #[arg(long, default_value_t = 4)]
    precision: usize,

    /// Resolution strategy.
    #[arg(long, value_enum, default_value = "traversal")]
    strategy: Strategy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// Anchor propagation over the constraint graph.
    Traversal,
    /// Incremental disjoint-group merging.
    Merging,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<ExitCode, InputError> {
    let problem = match &args.input {
        Some(path) => read_problem(BufReader::new(File::open(path)?))?,
        None => read_problem(io::stdin().lock())?,
    };
    let resolution = match args.strategy {
        Strategy::Traversal => resolve(problem.ingredient_count, &problem.constraints)?,
        Strategy::Merging => resolve_by_merging(problem.ingredient_count, &problem.constraints)?,
    };
    match resolution {
        Resolution::Solved(proportions) => {
            println!(
                "Proportions = {}",
                proportions.display_with_precision(args.precision)
            );
        }
        Resolution::NoUniqueSolution => {
            println!("No solution exists.");
        }
    }
    Ok(ExitCode::SUCCESS)
}
