//! orchard CLI - Command-line driver for the orchard solver
//!
//! Selects strategies and evaluators, runs them, and prints the win
//! probabilities. All computation lives in the engine and tree crates.

use clap::{Args, Parser, Subcommand, ValueEnum};
use orchard_engine::solver::{self, Algorithm};
use orchard_engine::{GameState, StrategyKind};
use orchard_tree::build_graph;

#[derive(Parser)]
#[command(name = "orchard", version, about = "Exact win probabilities for the orchard game")]
struct Cli {
    /// Log cache and table sizes
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate strategies with one or both algorithms
    Eval(EvalArgs),
    /// Summarize the reachable state space
    Space(SpaceArgs),
}

#[derive(Args, Default)]
struct EvalArgs {
    /// Strategies to evaluate (default: all)
    #[arg(short, long, value_enum)]
    strategy: Vec<StrategyArg>,

    /// Algorithms to run (default: both)
    #[arg(short, long, value_enum)]
    algorithm: Vec<AlgorithmArg>,

    /// Starting state as "a,b,c,d,r" (fruit order is free)
    #[arg(long)]
    state: Option<GameState>,

    /// Largest accepted difference between algorithms
    #[arg(long, default_value_t = 1e-9)]
    tolerance: f64,
}

#[derive(Args)]
struct SpaceArgs {
    #[arg(short, long, value_enum, default_value_t = StrategyArg::Greedy)]
    strategy: StrategyArg,

    /// Root state as "a,b,c,d,r"
    #[arg(long)]
    state: Option<GameState>,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Greedy,
    Variety,
}

impl From<StrategyArg> for StrategyKind {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Greedy => StrategyKind::Greedy,
            StrategyArg::Variety => StrategyKind::Variety,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    Recursive,
    Sweep,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Recursive => Algorithm::Recursive,
            AlgorithmArg::Sweep => Algorithm::Sweep,
        }
    }
}

fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Warn };
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    simplelog::TermLogger::init(
        level,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;
    Ok(())
}

fn run_eval(args: EvalArgs) -> anyhow::Result<()> {
    let strategies: Vec<StrategyKind> = if args.strategy.is_empty() {
        StrategyKind::ALL.to_vec()
    } else {
        args.strategy.into_iter().map(StrategyKind::from).collect()
    };
    let algorithms: Vec<Algorithm> = if args.algorithm.is_empty() {
        Algorithm::ALL.to_vec()
    } else {
        args.algorithm.into_iter().map(Algorithm::from).collect()
    };
    let state = args.state.unwrap_or_default();

    let results = solver::evaluate_all(&strategies, &algorithms, state);
    for evaluation in &results {
        println!("{}", evaluation);
    }

    let mismatched = solver::disagreements(&results, args.tolerance);
    if !mismatched.is_empty() {
        anyhow::bail!("{} evaluator pair(s) disagree beyond {}", mismatched.len(), args.tolerance);
    }
    Ok(())
}

fn run_space(args: SpaceArgs) -> anyhow::Result<()> {
    let root = args.state.unwrap_or_default();
    let strategy = StrategyKind::from(args.strategy);
    let graph = build_graph(root, &strategy);

    println!("Root: {}", root);
    println!("Reachable states: {}", graph.len());
    println!("Terminal states: {}", graph.terminal_count());
    for (raven, count) in graph.by_raven().iter().enumerate().rev() {
        println!("  raven {}: {}", raven, count);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Some(Command::Eval(args)) => run_eval(args),
        Some(Command::Space(args)) => run_space(args),
        None => run_eval(EvalArgs { tolerance: 1e-9, ..EvalArgs::default() }),
    }
}
