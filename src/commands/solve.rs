//! Offline solve command
//!
//! Plays a full session against the in-process referee holding a known secret.

use crate::core::ColorCode;
use crate::error::Result;
use crate::session::{GameLoop, Referee, SessionConfig, SessionReport};
use crate::solver::StrategyType;

/// Configuration for solving a known secret
pub struct SolveConfig {
    pub secret: String,
    pub strategy: String,
    pub session: SessionConfig,
}

/// Solve a specific secret using the configured strategy
///
/// The referee flags the game as lost after `session.max_rounds` guesses, or its
/// default limit when none is set.
///
/// # Errors
///
/// Returns an error if the secret does not parse for the configured geometry or the
/// configuration cannot be sent on the wire.
pub fn solve_secret(config: &SolveConfig) -> Result<SessionReport> {
    let geometry = config.session.geometry;
    let secret = ColorCode::parse(&config.secret, geometry)?;

    let referee = Referee::new(secret, geometry).with_max_rounds(
        config
            .session
            .max_rounds
            .unwrap_or(Referee::DEFAULT_MAX_ROUNDS),
    );
    let strategy = StrategyType::from_name(&config.strategy, config.session.seed);

    // The referee enforces the limit; the session itself runs uncapped
    let mut session = config.session.clone();
    session.max_rounds = None;

    Ok(GameLoop::new(referee, strategy, session)?.run())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Feedback, Geometry};
    use crate::error::ClientError;
    use crate::session::Outcome;

    fn config(secret: &str, strategy: &str, seed: u64) -> SolveConfig {
        SolveConfig {
            secret: secret.to_string(),
            strategy: strategy.to_string(),
            session: SessionConfig::default().with_seed(seed),
        }
    }

    #[test]
    fn solve_finds_secret() {
        let report = solve_secret(&config("76012", "random", 1)).unwrap();
        assert_eq!(report.outcome, Outcome::Won);
        assert_eq!(report.last_guess.unwrap().to_string(), "76012");
        assert_eq!(report.history.len() as u32, report.rounds);
    }

    #[test]
    fn solve_records_shrinking_space() {
        let report = solve_secret(&config("33333", "hybrid", 2)).unwrap();
        assert_eq!(report.outcome, Outcome::Won);

        for step in &report.history {
            assert!(step.candidates_after <= step.candidates_before);
        }
        let last = report.history.last().unwrap();
        assert_eq!(last.feedback, Feedback::perfect(5));
    }

    #[test]
    fn every_guess_consistent_with_history() {
        let report = solve_secret(&config("10101", "random", 3)).unwrap();

        for (i, step) in report.history.iter().enumerate() {
            for earlier in &report.history[..i] {
                assert_eq!(
                    Feedback::score(&earlier.guess, &step.guess),
                    earlier.feedback,
                    "guess {} contradicts round {}",
                    step.guess,
                    earlier.round
                );
            }
        }
    }

    #[test]
    fn solve_with_opening() {
        let opening = ColorCode::parse("00142", Geometry::STANDARD).unwrap();
        let mut cfg = config("24100", "random", 4);
        cfg.session = cfg.session.with_opening(opening);

        let report = solve_secret(&cfg).unwrap();
        assert_eq!(report.history[0].guess, opening);
        assert_eq!(report.outcome, Outcome::Won);
    }

    #[test]
    fn round_limit_loses() {
        let opening = ColorCode::parse("00142", Geometry::STANDARD).unwrap();
        let mut cfg = config("76543", "random", 5);
        cfg.session = cfg.session.with_opening(opening).with_max_rounds(1);

        let report = solve_secret(&cfg).unwrap();
        // The opening is not the secret, so the only allowed round cannot win
        assert_eq!(report.outcome, Outcome::GameLost);
        assert_eq!(report.outcome.exit_code(), 3);
        assert_eq!(report.rounds, 1);
        assert!(report.history.is_empty());
    }

    #[test]
    fn solve_small_geometry() {
        let mut cfg = config("0120", "minimax", 6);
        cfg.session = SessionConfig::new(Geometry::new(4, 3).unwrap());

        let report = solve_secret(&cfg).unwrap();
        assert_eq!(report.outcome, Outcome::Won);
    }

    #[test]
    fn solve_invalid_secret_returns_error() {
        let result = solve_secret(&config("9999", "random", 0));
        assert!(matches!(result, Err(ClientError::InvalidCode(_))));
    }
}
