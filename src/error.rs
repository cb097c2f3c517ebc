//! Error types for the client
//!
//! Every variant is fatal for the session it occurs in. Protocol-level endings
//! (parity error, game lost) are not errors here; they are session outcomes.

use crate::core::CodeError;
use thiserror::Error;

/// Top-level error type for library operations
#[derive(Debug, Error)]
pub enum ClientError {
    /// Write or read on the transport failed
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// The peer closed the stream while a response was expected
    #[error("connection closed by peer")]
    ConnectionClosed,

    /// Pruning left no consistent candidate
    #[error("no candidate is consistent with the feedback of round {round}")]
    InvariantViolation { round: u32 },

    /// A code could not be built, parsed or decoded
    #[error("invalid code: {0}")]
    InvalidCode(#[from] CodeError),

    /// The geometry does not fit the 2-byte wire message
    #[error("geometry of {slots} slots x {colors} colors cannot be sent on the wire")]
    InvalidGeometry { slots: usize, colors: usize },
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn io_errors_convert_to_transport() {
        let err: ClientError = io::Error::new(io::ErrorKind::BrokenPipe, "pipe").into();
        assert!(matches!(err, ClientError::Transport(_)));
        assert!(err.to_string().starts_with("transport error"));
    }

    #[test]
    fn invariant_violation_names_round() {
        let err = ClientError::InvariantViolation { round: 4 };
        assert_eq!(
            err.to_string(),
            "no candidate is consistent with the feedback of round 4"
        );
    }
}
