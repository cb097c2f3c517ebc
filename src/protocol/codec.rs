//! Bit-exact wire codec
//!
//! Outbound guess (2 bytes, low byte first):
//!
//! ```text
//!  15 | 14..12 | 11..9 | 8..6 | 5..3 | 2..0
//!   P | slot 4 | slot 3| slot 2| slot 1| slot 0
//! ```
//!
//! `P` is the XOR of every slot's 3-bit XOR reduction. Unused bits are zero.
//!
//! Inbound response (1 byte):
//!
//! ```text
//!   7   |    6   |  5..3 | 2..0
//!  lost | parity | white |  red
//! ```

use crate::core::{CodeError, ColorCode, Feedback, Geometry};

/// Width of one slot's color field
pub const SHIFT_WIDTH: u32 = 3;
/// Bit position of the parity bit in the outbound word
pub const PARITY_BIT: u32 = 15;
/// Bit position of the parity-error flag in the response byte
pub const PARITY_ERR_BIT: u32 = 6;
/// Bit position of the game-lost flag in the response byte
pub const GAME_LOST_BIT: u32 = 7;

const FIELD_MASK: u16 = 0b111;

/// Fold the three bits of one color into a single parity bit
#[inline]
const fn fold_color(color: u8) -> u16 {
    let c = color as u16;
    (c ^ (c >> 1) ^ (c >> 2)) & 1
}

/// Cumulative parity of a code: per-slot XOR reduction, XOR-accumulated across slots
///
/// # Examples
/// ```
/// use mastermind_client::core::{ColorCode, Geometry};
/// use mastermind_client::protocol::parity;
///
/// let code = ColorCode::new(&[0, 0, 1, 4, 2], Geometry::STANDARD).unwrap();
/// assert!(parity(&code)); // three set bits in total
/// ```
#[must_use]
pub fn parity(code: &ColorCode) -> bool {
    code.pegs()
        .iter()
        .fold(0u16, |acc, &color| acc ^ fold_color(color))
        == 1
}

/// Pack a code and its parity bit into the 16-bit wire word
#[must_use]
pub fn encode_word(code: &ColorCode) -> u16 {
    let payload = code
        .pegs()
        .iter()
        .enumerate()
        .fold(0u16, |word, (slot, &color)| {
            word | (u16::from(color) << (slot as u32 * SHIFT_WIDTH))
        });

    payload | (u16::from(parity(code)) << PARITY_BIT)
}

/// Encode a guess as the two bytes sent on the wire, low byte first
///
/// The code must be wire-compatible (`Geometry::is_wire_compatible`).
///
/// # Examples
/// ```
/// use mastermind_client::core::{ColorCode, Geometry};
/// use mastermind_client::protocol::encode_guess;
///
/// let code = ColorCode::new(&[0, 0, 1, 4, 2], Geometry::STANDARD).unwrap();
/// // word = 0b1_010_100_001_000_000 = 0xA840
/// assert_eq!(encode_guess(&code), [0x40, 0xA8]);
/// ```
#[must_use]
pub fn encode_guess(code: &ColorCode) -> [u8; 2] {
    debug_assert!(code.len() as u32 * SHIFT_WIDTH <= PARITY_BIT);
    encode_word(code).to_le_bytes()
}

/// A guess as seen by the receiving peer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedGuess {
    pub code: ColorCode,
    /// Parity bit as transmitted
    pub parity: bool,
    /// Whether the transmitted parity matches the recomputed one
    pub parity_ok: bool,
}

/// Decode a 2-byte guess message
///
/// # Errors
/// Returns `CodeError` if a field holds a color outside the geometry.
pub fn decode_guess(bytes: [u8; 2], geometry: Geometry) -> Result<DecodedGuess, CodeError> {
    let word = u16::from_le_bytes(bytes);

    let pegs: Vec<u8> = (0..geometry.slots())
        .map(|slot| ((word >> (slot as u32 * SHIFT_WIDTH)) & FIELD_MASK) as u8)
        .collect();
    let code = ColorCode::new(&pegs, geometry)?;

    let transmitted = (word >> PARITY_BIT) & 1 == 1;
    Ok(DecodedGuess {
        code,
        parity: transmitted,
        parity_ok: transmitted == parity(&code),
    })
}

/// The peer's answer to one guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Response {
    pub feedback: Feedback,
    pub parity_error: bool,
    pub game_lost: bool,
}

impl Response {
    #[must_use]
    pub const fn scored(feedback: Feedback) -> Self {
        Self {
            feedback,
            parity_error: false,
            game_lost: false,
        }
    }

    /// Either status flag is set
    #[must_use]
    pub const fn is_error(self) -> bool {
        self.parity_error || self.game_lost
    }
}

/// Decode the 1-byte response by isolating each bit field
///
/// # Examples
/// ```
/// use mastermind_client::core::Feedback;
/// use mastermind_client::protocol::decode_response;
///
/// let response = decode_response(0b0001_0011);
/// assert_eq!(response.feedback, Feedback::new(3, 2));
/// assert!(!response.parity_error);
/// assert!(!response.game_lost);
/// ```
#[must_use]
pub const fn decode_response(byte: u8) -> Response {
    Response {
        feedback: Feedback::new(byte & 0x07, (byte >> SHIFT_WIDTH) & 0x07),
        parity_error: byte & (1 << PARITY_ERR_BIT) != 0,
        game_lost: byte & (1 << GAME_LOST_BIT) != 0,
    }
}

/// Encode a response byte
#[must_use]
pub const fn encode_response(response: Response) -> u8 {
    (response.feedback.red() & 0x07)
        | ((response.feedback.white() & 0x07) << SHIFT_WIDTH)
        | ((response.parity_error as u8) << PARITY_ERR_BIT)
        | ((response.game_lost as u8) << GAME_LOST_BIT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::CandidateSpace;

    fn code(pegs: &[u8]) -> ColorCode {
        ColorCode::new(pegs, Geometry::STANDARD).unwrap()
    }

    #[test]
    fn encode_places_fields_low_slot_first() {
        let word = encode_word(&code(&[1, 0, 0, 0, 0]));
        assert_eq!(word, 0b1 | (1 << 15));

        let word = encode_word(&code(&[0, 0, 0, 0, 7]));
        // 7 = 0b111 folds to 1
        assert_eq!(word, (7 << 12) | (1 << 15));
    }

    #[test]
    fn encode_reference_opening() {
        // 0 0 1 4 2: payload 0x2840, three set bits -> parity 1
        let bytes = encode_guess(&code(&[0, 0, 1, 4, 2]));
        assert_eq!(bytes, [0x40, 0xA8]);
    }

    #[test]
    fn parity_even_clears_top_bit() {
        // 3 = 0b011 folds to 0, 5 = 0b101 folds to 0
        let c = code(&[3, 5, 0, 6, 0]);
        assert!(!parity(&c));
        assert_eq!(encode_guess(&c)[1] & 0x80, 0);
    }

    #[test]
    fn parity_equals_payload_popcount_parity() {
        for c in CandidateSpace::enumerate_all(Geometry::STANDARD).iter().step_by(11) {
            let payload = encode_word(c) & 0x7FFF;
            assert_eq!(parity(c), payload.count_ones() % 2 == 1, "code {c}");
        }
    }

    #[test]
    fn guess_roundtrip_whole_space() {
        for c in &CandidateSpace::enumerate_all(Geometry::STANDARD) {
            let decoded = decode_guess(encode_guess(c), Geometry::STANDARD).unwrap();
            assert_eq!(decoded.code, *c);
            assert_eq!(decoded.parity, parity(c));
            assert!(decoded.parity_ok);
        }
    }

    #[test]
    fn decode_detects_flipped_payload_bit() {
        let mut bytes = encode_guess(&code(&[2, 4, 6, 1, 3]));
        bytes[0] ^= 0b0000_0100;
        let decoded = decode_guess(bytes, Geometry::STANDARD).unwrap();
        assert!(!decoded.parity_ok);
    }

    #[test]
    fn decode_guess_rejects_out_of_range_colors() {
        let g = Geometry::new(5, 6).unwrap();
        // slot 0 = 7
        assert!(decode_guess([0x07, 0x00], g).is_err());
    }

    #[test]
    fn decode_response_fields() {
        let r = decode_response(0x00);
        assert_eq!(r, Response::default());

        let r = decode_response(0b0000_0101);
        assert_eq!(r.feedback, Feedback::new(5, 0));

        let r = decode_response(0b0010_1001);
        assert_eq!(r.feedback, Feedback::new(1, 5));
    }

    #[test]
    fn decode_response_flags_independent() {
        let parity_only = decode_response(1 << 6);
        assert!(parity_only.parity_error && !parity_only.game_lost);

        let lost_only = decode_response(1 << 7);
        assert!(!lost_only.parity_error && lost_only.game_lost);

        let both = decode_response(0xC0 | 0b010_001);
        assert!(both.parity_error && both.game_lost);
        assert_eq!(both.feedback, Feedback::new(1, 2));
        assert!(both.is_error());
    }

    #[test]
    fn response_byte_roundtrip() {
        for byte in 0..=u8::MAX {
            assert_eq!(encode_response(decode_response(byte)), byte);
        }
    }
}
