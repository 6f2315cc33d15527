mod result;

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;
use log::error;
use log::info;
use log::LevelFilter;
use result::TennerResult;
use tenner_solver::models::tenner;
use tenner_solver::models::tenner::TennerBoard;
use tenner_solver::models::tenner::TennerModel;
use tenner_solver::propagation::Backtracking;
use tenner_solver::propagation::ForwardChecking;
use tenner_solver::propagation::GeneralisedArcConsistency;
use tenner_solver::propagation::Propagator;
use tenner_solver::search::solve;
use tenner_solver::search::SearchResult;

#[derive(Debug, Parser)]
#[command(author, version, about, arg_required_else_help = true)]
struct Args {
    /// The board to solve: one line per grid row with `.` or `-1` marking
    /// empty cells, followed by one line of 10 column sums.
    board_path: PathBuf,

    /// The constraint encoding used to model the board.
    #[arg(long, value_enum, default_value_t)]
    model: Model,

    /// The propagator paired with the backtracking search.
    #[arg(long, value_enum, default_value_t)]
    propagator: PropagatorChoice,

    /// Log search progress next to the solution.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Model {
    /// Binary not-equal constraints plus per-column sums.
    #[default]
    Binary,
    /// N-ary all-different constraints plus per-column sums.
    AllDifferent,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum PropagatorChoice {
    /// Plain backtracking without inference.
    Bt,
    /// Forward checking.
    Fc,
    /// Generalised arc consistency.
    #[default]
    Gac,
}

fn configure_logging(verbose: bool) {
    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(move |buf, record| writeln!(buf, "% {}", record.args()))
        .filter_level(level_filter)
        .target(env_logger::Target::Stdout)
        .init();
    info!("Logging successfully configured");
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> TennerResult<()> {
    let args = Args::parse();
    configure_logging(args.verbose);

    let board: TennerBoard = std::fs::read_to_string(&args.board_path)?.parse()?;
    let TennerModel { mut csp, grid } = match args.model {
        Model::Binary => tenner::binary_model(&board),
        Model::AllDifferent => tenner::all_different_model(&board),
    };

    let propagator: &dyn Propagator = match args.propagator {
        PropagatorChoice::Bt => &Backtracking,
        PropagatorChoice::Fc => &ForwardChecking,
        PropagatorChoice::Gac => &GeneralisedArcConsistency,
    };
    let result = solve(&mut csp, propagator);

    match result {
        SearchResult::Satisfiable(solution) => {
            for row in &grid {
                let line: Vec<String> = row
                    .iter()
                    .map(|&variable| solution.value(variable).to_string())
                    .collect();
                println!("{}", line.join(" "));
            }
        }
        SearchResult::Unsatisfiable => println!("=====UNSATISFIABLE====="),
    }

    Ok(())
}
