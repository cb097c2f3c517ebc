//! Game loop: one session of guess, send, receive, prune
//!
//! ```text
//! Selecting -> Sending -> AwaitingResponse -> Scoring -> Pruning -> Selecting
//!                                                     \-> Terminal
//! ```
//!
//! Every terminal condition is reported once and ends the session. Nothing is retried.

use super::{CancelToken, SessionConfig};
use crate::core::{ColorCode, Feedback};
use crate::error::{ClientError, Result};
use crate::protocol::{Transport, decode_response, encode_guess};
use crate::solver::{CandidateSpace, Strategy};
use std::fmt;
use tracing::{debug, error, info, warn};

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The secret was guessed
    Won,
    /// The peer reported a parity error
    ParityError,
    /// The peer reported the game as lost
    GameLost,
    /// The peer reported both a parity error and a lost game
    CombinedError,
    /// Writing, reading or the connection itself failed
    TransportError,
    /// No candidate remained consistent with the feedback
    InvariantViolation,
    /// The session was cancelled before it finished
    Cancelled,
}

impl Outcome {
    /// Process exit code for this outcome
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Won => 0,
            Self::TransportError => 1,
            Self::ParityError => 2,
            Self::GameLost => 3,
            Self::CombinedError => 4,
            Self::InvariantViolation => 5,
            Self::Cancelled => 130,
        }
    }

    #[must_use]
    pub const fn is_win(self) -> bool {
        matches!(self, Self::Won)
    }

    /// Outcome for a response carrying at least one error flag
    const fn from_flags(parity_error: bool, game_lost: bool) -> Option<Self> {
        match (parity_error, game_lost) {
            (true, true) => Some(Self::CombinedError),
            (true, false) => Some(Self::ParityError),
            (false, true) => Some(Self::GameLost),
            (false, false) => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Won => "won",
            Self::ParityError => "parity error",
            Self::GameLost => "game lost",
            Self::CombinedError => "parity error and game lost",
            Self::TransportError => "transport error",
            Self::InvariantViolation => "no consistent candidate left",
            Self::Cancelled => "cancelled",
        };
        f.write_str(text)
    }
}

/// A single scored round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundRecord {
    pub round: u32,
    pub guess: ColorCode,
    pub feedback: Feedback,
    pub candidates_before: usize,
    pub candidates_after: usize,
}

/// Everything a finished session has to say
#[derive(Debug)]
pub struct SessionReport {
    pub outcome: Outcome,
    /// Number of guesses actually sent
    pub rounds: u32,
    pub history: Vec<RoundRecord>,
    pub last_guess: Option<ColorCode>,
    /// Underlying cause for transport errors and invariant violations
    pub error: Option<ClientError>,
}

/// State of the round state machine
#[derive(Debug)]
enum Phase {
    Selecting,
    Sending(ColorCode),
    AwaitingResponse(ColorCode),
    Scoring(ColorCode, u8),
    Pruning(ColorCode, Feedback),
    Terminal(Outcome),
}

/// One game session over a connected transport
///
/// Owns the transport, the candidate space and the strategy for its whole lifetime.
/// Teardown (releasing the transport and discarding the space) runs exactly once,
/// either at the end of `run` or on drop.
pub struct GameLoop<T: Transport, S: Strategy> {
    transport: Option<T>,
    strategy: S,
    config: SessionConfig,
    space: CandidateSpace,
    cancel: CancelToken,
    round: u32,
    sent: u32,
    last_guess: Option<ColorCode>,
    candidates_before: usize,
    history: Vec<RoundRecord>,
    error: Option<ClientError>,
    torn_down: bool,
}

impl<T: Transport, S: Strategy> GameLoop<T, S> {
    /// Create a session with a fresh, fully enumerated candidate space
    ///
    /// # Errors
    /// Returns an error if the configuration fails `SessionConfig::validate`.
    pub fn new(transport: T, strategy: S, config: SessionConfig) -> Result<Self> {
        config.validate()?;
        let space = CandidateSpace::enumerate_all(config.geometry);

        Ok(Self {
            transport: Some(transport),
            strategy,
            config,
            space,
            cancel: CancelToken::new(),
            round: 1,
            sent: 0,
            last_guess: None,
            candidates_before: 0,
            history: Vec::new(),
            error: None,
            torn_down: false,
        })
    }

    /// Use an externally owned cancellation token
    #[must_use]
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Handle for cancelling this session from elsewhere
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Play until a terminal outcome, then tear down
    pub fn run(mut self) -> SessionReport {
        let mut phase = Phase::Selecting;
        let outcome = loop {
            phase = match phase {
                Phase::Terminal(outcome) => break outcome,
                other => self.step(other),
            };
        };

        match outcome {
            Outcome::Won => info!(rounds = self.sent, "secret found"),
            Outcome::Cancelled => info!(round = self.round, "session cancelled"),
            other => warn!(round = self.round, outcome = %other, "session ended"),
        }

        self.teardown();

        SessionReport {
            outcome,
            rounds: self.sent,
            history: std::mem::take(&mut self.history),
            last_guess: self.last_guess,
            error: self.error.take(),
        }
    }

    /// Advance the state machine by one transition
    fn step(&mut self, phase: Phase) -> Phase {
        match phase {
            Phase::Selecting => self.select(),
            Phase::Sending(guess) => self.send(guess),
            Phase::AwaitingResponse(guess) => self.receive(guess),
            Phase::Scoring(guess, byte) => self.score(guess, byte),
            Phase::Pruning(guess, feedback) => self.prune(guess, feedback),
            Phase::Terminal(outcome) => Phase::Terminal(outcome),
        }
    }

    fn select(&mut self) -> Phase {
        if self.config.max_rounds.is_some_and(|max| self.round > max) {
            warn!(round = self.round, "round limit reached");
            return Phase::Terminal(Outcome::GameLost);
        }

        self.candidates_before = self.space.len();
        let opening = if self.round == 1 {
            self.config.opening
        } else {
            None
        };

        match opening.or_else(|| self.strategy.select_guess(&self.space).copied()) {
            Some(guess) => Phase::Sending(guess),
            None => self.fail(
                Outcome::InvariantViolation,
                ClientError::InvariantViolation { round: self.round },
            ),
        }
    }

    fn send(&mut self, guess: ColorCode) -> Phase {
        if self.cancel.is_cancelled() {
            return Phase::Terminal(Outcome::Cancelled);
        }

        let bytes = encode_guess(&guess);
        debug!(
            round = self.round,
            guess = %guess,
            word = format_args!("{:#06x}", u16::from_le_bytes(bytes)),
            candidates = self.space.len(),
            "sending guess"
        );

        let written = match self.transport.as_mut() {
            Some(transport) => bytes
                .iter()
                .try_for_each(|&byte| transport.write_byte(byte))
                .map_err(ClientError::from),
            None => Err(ClientError::ConnectionClosed),
        };
        if let Err(e) = written {
            return self.fail(Outcome::TransportError, e);
        }

        self.sent += 1;
        self.last_guess = Some(guess);
        Phase::AwaitingResponse(guess)
    }

    fn receive(&mut self, guess: ColorCode) -> Phase {
        let read = match self.transport.as_mut() {
            Some(transport) => transport.read_byte().map_err(ClientError::from),
            None => Err(ClientError::ConnectionClosed),
        };
        let byte = match read {
            Ok(Some(byte)) => byte,
            Ok(None) => return self.fail(Outcome::TransportError, ClientError::ConnectionClosed),
            Err(e) => return self.fail(Outcome::TransportError, e),
        };
        debug!(round = self.round, response = format_args!("{byte:#04x}"), "received");

        if self.cancel.is_cancelled() {
            return Phase::Terminal(Outcome::Cancelled);
        }

        Phase::Scoring(guess, byte)
    }

    fn score(&mut self, guess: ColorCode, byte: u8) -> Phase {
        let response = decode_response(byte);

        if let Some(outcome) = Outcome::from_flags(response.parity_error, response.game_lost) {
            return Phase::Terminal(outcome);
        }

        let slots = self.config.geometry.slots();
        if !response.feedback.is_valid_for(slots) {
            warn!(round = self.round, feedback = %response.feedback, "feedback exceeds slot count");
        }
        if response.feedback.is_win(slots) {
            self.record(guess, response.feedback, 1);
            return Phase::Terminal(Outcome::Won);
        }

        Phase::Pruning(guess, response.feedback)
    }

    fn prune(&mut self, guess: ColorCode, feedback: Feedback) -> Phase {
        let pruned = self.space.prune(&guess, feedback);
        debug!(
            round = self.round,
            %feedback,
            before = self.space.len(),
            after = pruned.len(),
            "pruned candidates"
        );
        self.record(guess, feedback, pruned.len());

        if pruned.is_empty() {
            return self.fail(
                Outcome::InvariantViolation,
                ClientError::InvariantViolation { round: self.round },
            );
        }

        self.space = pruned;
        self.round += 1;
        Phase::Selecting
    }

    fn record(&mut self, guess: ColorCode, feedback: Feedback, candidates_after: usize) {
        self.history.push(RoundRecord {
            round: self.round,
            guess,
            feedback,
            candidates_before: self.candidates_before,
            candidates_after,
        });
    }

    fn fail(&mut self, outcome: Outcome, err: ClientError) -> Phase {
        error!(round = self.round, error = %err, "session failed");
        self.error = Some(err);
        Phase::Terminal(outcome)
    }

    /// Release the transport and discard the candidate space. Runs once.
    fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        if let Some(mut transport) = self.transport.take()
            && let Err(e) = transport.shutdown()
        {
            warn!(error = %e, "transport shutdown failed");
        }
        self.space = CandidateSpace::empty(self.config.geometry);
        debug!("session torn down");
    }
}

impl<T: Transport, S: Strategy> Drop for GameLoop<T, S> {
    fn drop(&mut self) {
        self.teardown();
    }
}
