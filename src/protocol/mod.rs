//! Wire protocol
//!
//! The 2-byte guess encoding, the 1-byte response encoding and the transport seam.

mod codec;
mod transport;

pub use codec::{
    DecodedGuess, GAME_LOST_BIT, PARITY_BIT, PARITY_ERR_BIT, Response, SHIFT_WIDTH,
    decode_guess, decode_response, encode_guess, encode_response, encode_word, parity,
};
pub use transport::{StreamPair, Transport};
