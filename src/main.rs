use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

use cryptarith::cryptarithm::{output_path_for, Puzzle};
use cryptarith::csp::{SearchConfig, SearchStatus, TieBreak};
use cryptarith::error::PuzzleError;

/// Solve a two-addend cryptarithm such as SEND + MORE = MONEY
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Puzzle file: first addend, second addend and sum, one word per line
    input: PathBuf,

    /// Where to write the digits (default: "<input stem> Output.txt")
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Which variable MRV picks among equally small domains
    #[arg(long, value_enum, default_value_t = TieBreakArg::Last)]
    tie_break: TieBreakArg,

    /// Stop after this many bindings (0 = no limit)
    #[arg(long, default_value_t = 0)]
    max_nodes: usize,

    /// Explore the first decision in parallel (needs the `parallel` feature)
    #[arg(long)]
    parallel: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TieBreakArg {
    Last,
    First,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::Last => TieBreak::Last,
            TieBreakArg::First => TieBreak::First,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    cryptarith::logging::init_logger(cli.debug);

    match try_main(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Reads the puzzle, solves it and writes the digits.
///
/// "No solution" is a normal outcome: it is reported, nothing is written
/// and the exit code is still success.
fn try_main(cli: &Cli) -> Result<ExitCode, PuzzleError> {
    let puzzle = Puzzle::from_file(&cli.input)?;
    log::info!("loaded {puzzle} from {}", cli.input.display());

    let config = SearchConfig::default()
        .with_tie_break(cli.tie_break.into())
        .with_max_nodes(cli.max_nodes)
        .with_parallel(cli.parallel);

    let result = puzzle.solve(&config)?;
    log::info!(
        "search {:?}: {} nodes, {} backtracks in {} ms",
        result.status,
        result.nodes,
        result.backtracks,
        result.elapsed_ms
    );

    match (result.status, result.assignment) {
        (SearchStatus::Solved, Some(solution)) => {
            let output = cli
                .output
                .clone()
                .unwrap_or_else(|| output_path_for(&cli.input));
            puzzle.write_solution(&output, &solution)?;
            println!("Output file produced as {}", output.display());
        }
        (SearchStatus::NoSolution, _) => println!("No solution exists"),
        (SearchStatus::NodeLimit, _) => {
            println!("No solution found within {} nodes", cli.max_nodes)
        }
        (SearchStatus::ConfigInvalid, _) => {
            eprintln!("Error: --parallel requires building with the `parallel` feature");
            return Ok(ExitCode::FAILURE);
        }
        (status, _) => println!("Search ended without a solution ({status:?})"),
    }
    Ok(ExitCode::SUCCESS)
}
