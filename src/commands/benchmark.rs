//! Benchmark command
//!
//! Plays many random secrets offline and collects round statistics.

use crate::core::ColorCode;
use crate::error::Result;
use crate::session::{GameLoop, Outcome, Referee, SessionConfig};
use crate::solver::StrategyType;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

/// Result of a benchmark run
pub struct BenchmarkResult {
    pub strategy: String,
    pub total_games: usize,
    pub won: usize,
    pub total_rounds: u64,
    pub average_rounds: f64,
    pub min_rounds: u32,
    pub max_rounds: u32,
    /// Rounds needed, for won games only
    pub distribution: BTreeMap<u32, usize>,
    pub outcomes: HashMap<Outcome, usize>,
    pub duration: Duration,
    pub games_per_second: f64,
}

/// Draw a uniformly random secret
fn random_secret<R: Rng>(rng: &mut R, config: &SessionConfig) -> ColorCode {
    let geometry = config.geometry;
    let pegs: Vec<u8> = (0..geometry.slots())
        .map(|_| rng.random_range(0..geometry.colors()) as u8)
        .collect();
    ColorCode::from_pegs_unchecked(&pegs)
}

/// Run `count` offline games with random secrets
///
/// With `config.seed` set, secrets and strategy draws are reproducible.
///
/// # Errors
///
/// Returns an error if the session configuration is invalid.
pub fn run_benchmark(
    count: usize,
    strategy: &str,
    config: &SessionConfig,
    show_progress: bool,
) -> Result<BenchmarkResult> {
    config.validate()?;

    let mut rng = config
        .seed
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

    let pb = if show_progress {
        ProgressBar::new(count as u64)
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
    {
        pb.set_style(style.progress_chars("█▓▒░"));
    }

    let start = Instant::now();
    let mut won = 0;
    let mut total_rounds = 0u64;
    let mut min_rounds = u32::MAX;
    let mut max_rounds = 0;
    let mut distribution: BTreeMap<u32, usize> = BTreeMap::new();
    let mut outcomes: HashMap<Outcome, usize> = HashMap::new();

    for game in 0..count {
        let secret = random_secret(&mut rng, config);
        let referee = Referee::new(secret, config.geometry)
            .with_max_rounds(config.max_rounds.unwrap_or(Referee::DEFAULT_MAX_ROUNDS));
        let selector = StrategyType::from_name(strategy, Some(rng.random()));

        let mut session = config.clone();
        session.max_rounds = None;
        let report = GameLoop::new(referee, selector, session)?.run();

        *outcomes.entry(report.outcome).or_insert(0) += 1;
        if report.outcome.is_win() {
            won += 1;
            total_rounds += u64::from(report.rounds);
            min_rounds = min_rounds.min(report.rounds);
            max_rounds = max_rounds.max(report.rounds);
            *distribution.entry(report.rounds).or_insert(0) += 1;
        }

        if game % 10 == 0 && won > 0 {
            pb.set_message(format!("Avg: {:.2}", total_rounds as f64 / won as f64));
        }
        pb.inc(1);
    }

    pb.finish_with_message("Complete!");
    let duration = start.elapsed();

    Ok(BenchmarkResult {
        strategy: strategy.to_string(),
        total_games: count,
        won,
        total_rounds,
        average_rounds: if won > 0 {
            total_rounds as f64 / won as f64
        } else {
            0.0
        },
        min_rounds: if won > 0 { min_rounds } else { 0 },
        max_rounds,
        distribution,
        outcomes,
        duration,
        games_per_second: count as f64 / duration.as_secs_f64().max(f64::EPSILON),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Geometry;

    fn small() -> SessionConfig {
        SessionConfig::new(Geometry::new(4, 6).unwrap()).with_seed(17)
    }

    #[test]
    fn benchmark_runs() {
        let result = run_benchmark(10, "random", &small(), false).unwrap();

        assert_eq!(result.total_games, 10);
        assert_eq!(result.won, 10);
        assert!(result.average_rounds >= 1.0);
        assert!(result.min_rounds >= 1);
        assert!(result.max_rounds <= Referee::DEFAULT_MAX_ROUNDS);
    }

    #[test]
    fn benchmark_distribution_sums_correctly() {
        let result = run_benchmark(12, "hybrid", &small(), false).unwrap();

        let distribution_sum: usize = result.distribution.values().sum();
        assert_eq!(distribution_sum, result.won);
        let outcome_sum: usize = result.outcomes.values().sum();
        assert_eq!(outcome_sum, result.total_games);
    }

    #[test]
    fn benchmark_is_reproducible_with_seed() {
        let a = run_benchmark(5, "random", &small(), false).unwrap();
        let b = run_benchmark(5, "random", &small(), false).unwrap();
        assert_eq!(a.distribution, b.distribution);
        assert_eq!(a.total_rounds, b.total_rounds);
    }

    #[test]
    fn benchmark_metrics_consistency() {
        let result = run_benchmark(8, "minimax", &small(), false).unwrap();

        assert!(result.average_rounds >= f64::from(result.min_rounds));
        assert!(result.average_rounds <= f64::from(result.max_rounds));
    }

    #[test]
    fn benchmark_zero_games() {
        let result = run_benchmark(0, "random", &small(), false).unwrap();
        assert_eq!(result.total_games, 0);
        assert_eq!(result.won, 0);
        assert_eq!(result.min_rounds, 0);
        assert!(result.distribution.is_empty());
    }
}
