//! Mastermind Client
//!
//! A code-breaking client for the Mastermind network protocol: it keeps every code still
//! consistent with the feedback received, picks the next guess from that set, and speaks
//! the 2-byte guess / 1-byte response wire format.
//!
//! # Quick Start
//!
//! ```rust
//! use mastermind_client::core::{ColorCode, Feedback, Geometry};
//! use mastermind_client::solver::CandidateSpace;
//!
//! let g = Geometry::STANDARD;
//! let guess = ColorCode::parse("00142", g).unwrap();
//! let secret = ColorCode::parse("01234", g).unwrap();
//!
//! let feedback = Feedback::score(&guess, &secret);
//! let space = CandidateSpace::enumerate_all(g).prune(&guess, feedback);
//! assert!(space.contains(&secret));
//! ```

// Core domain types
pub mod core;

// Candidate space and guess selection
pub mod solver;

// Wire codec and transport
pub mod protocol;

// Round state machine
pub mod session;

// Error taxonomy
pub mod error;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

pub use error::{ClientError, Result};
