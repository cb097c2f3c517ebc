//! Core domain types for Mastermind
//!
//! Codes, geometry and feedback scoring. No I/O and no external dependencies.

mod code;
mod feedback;

pub use code::{CodeError, ColorCode, Geometry, MAX_COLORS, MAX_SLOTS, MAX_SPACE};
pub use feedback::Feedback;
