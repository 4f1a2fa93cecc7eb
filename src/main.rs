use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, LevelFilter};

use cdclsat::dimacs;
use cdclsat::format::write_result;
use cdclsat::Solver;

/// A CDCL-based SAT solver for DIMACS CNF input.
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// DIMACS CNF file to solve. Reads standard input if omitted.
    input: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output except errors.
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(args: &Args) {
    let level = if args.quiet {
        LevelFilter::Error
    } else {
        match args.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_env("RUST_LOG")
        .init();
}

fn read_input(path: &Option<PathBuf>) -> Result<Box<dyn Read>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open '{}'", path.display()))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdin())),
    }
}

fn run(args: Args) -> Result<()> {
    let input = read_input(&args.input)?;
    let formula = dimacs::parse(input).context("failed to parse DIMACS CNF input")?;
    info!(
        "parsed formula with {} variables and {} clauses",
        formula.num_variables(),
        formula.num_clauses()
    );

    let solver = Solver::new(formula);
    let result = solver.solve();

    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write_result(&mut lock, &result).context("failed to write result")?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
