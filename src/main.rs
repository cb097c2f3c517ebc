//! Mastermind Client - CLI
//!
//! Plays the Mastermind protocol against a server, or offline against a local referee.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mastermind_client::{
    commands::{PlayConfig, SolveConfig, analyze_guess, play_game, run_benchmark, solve_secret},
    core::{ColorCode, Geometry},
    output::{print_analysis_result, print_benchmark_result, print_outcome, print_session_report},
    session::{CancelToken, Outcome, SessionConfig},
};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "mastermind_client",
    about = "Mastermind code-breaking client with candidate-space pruning",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Strategy: random (default), minimax, hybrid
    #[arg(short, long, global = true, default_value = "random")]
    strategy: String,

    /// Number of slots per code
    #[arg(long, global = true, default_value = "5")]
    slots: usize,

    /// Number of colors per slot
    #[arg(long, global = true, default_value = "8")]
    colors: usize,

    /// Seed for reproducible random choices
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Fixed first guess, e.g. 00142
    #[arg(short, long, global = true)]
    opening: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against a server
    Play {
        /// Server hostname or address
        host: String,

        /// Server port
        port: u16,

        /// Timeout for connecting and for each read and write, in milliseconds
        #[arg(short, long)]
        timeout_ms: Option<u64>,

        /// Print every round after the game ends
        #[arg(short, long)]
        rounds: bool,
    },

    /// Solve a known secret against a local referee
    Solve {
        /// The secret code, e.g. 31415
        secret: String,

        /// Rounds before the referee declares the game lost
        #[arg(short, long)]
        max_rounds: Option<u32>,

        /// Show colors and candidate counts per round
        #[arg(short, long)]
        detail: bool,
    },

    /// Benchmark the strategy on random secrets
    Benchmark {
        /// Number of random secrets to play
        #[arg(short = 'n', long, default_value = "100")]
        count: usize,

        /// Rounds before the referee declares the game lost
        #[arg(short, long)]
        max_rounds: Option<u32>,
    },

    /// Analyze how a guess splits the full candidate space
    Analyze {
        /// Code to analyze
        code: String,
    },
}

fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Build the session configuration from global flags
fn session_config(cli: &Cli) -> Result<SessionConfig> {
    let geometry = Geometry::new(cli.slots, cli.colors)?;
    let mut config = SessionConfig::new(geometry);

    if let Some(opening) = &cli.opening {
        let code = ColorCode::parse(opening, geometry)
            .with_context(|| format!("invalid opening guess '{opening}'"))?;
        config = config.with_opening(code);
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    Ok(config)
}

fn exit_code(outcome: Outcome) -> ExitCode {
    ExitCode::from(u8::try_from(outcome.exit_code()).unwrap_or(1))
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = session_config(&cli)?;
    let geometry = config.geometry;

    match cli.command {
        Commands::Play {
            ref host,
            port,
            timeout_ms,
            rounds,
        } => {
            if let Some(ms) = timeout_ms {
                config = config.with_io_timeout(Duration::from_millis(ms));
            }
            let play = PlayConfig {
                host: host.clone(),
                port,
                strategy: cli.strategy.clone(),
                session: config,
            };

            // No signal handler is installed, so this token is never cancelled
            let report = play_game(&play, CancelToken::new())
                .with_context(|| format!("cannot play against {host}:{port}"))?;

            if rounds {
                print_session_report(&report, geometry, false);
            } else if report.outcome.is_win() {
                println!("{}", report.rounds);
            } else {
                print_outcome(&report);
            }
            Ok(exit_code(report.outcome))
        }
        Commands::Solve {
            ref secret,
            max_rounds,
            detail,
        } => {
            if let Some(max) = max_rounds {
                config = config.with_max_rounds(max);
            }
            let solve = SolveConfig {
                secret: secret.clone(),
                strategy: cli.strategy.clone(),
                session: config,
            };

            let report = solve_secret(&solve)?;
            print_session_report(&report, geometry, detail);
            Ok(exit_code(report.outcome))
        }
        Commands::Benchmark { count, max_rounds } => {
            if let Some(max) = max_rounds {
                config = config.with_max_rounds(max);
            }
            println!(
                "Running benchmark on {count} random secrets ({geometry}, {} strategy)...",
                cli.strategy
            );

            let result = run_benchmark(count, &cli.strategy, &config, true)?;
            print_benchmark_result(&result);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Analyze { ref code } => {
            let result = analyze_guess(code, geometry)?;
            print_analysis_result(&result);
            Ok(ExitCode::SUCCESS)
        }
    }
}
