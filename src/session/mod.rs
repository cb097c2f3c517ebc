//! Game sessions
//!
//! The round state machine, its configuration, cancellation, and an offline peer.

mod cancel;
mod config;
mod game;
mod referee;

pub use cancel::CancelToken;
pub use config::SessionConfig;
pub use game::{GameLoop, Outcome, RoundRecord, SessionReport};
pub use referee::Referee;
