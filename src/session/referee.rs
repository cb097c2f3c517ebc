//! In-process peer that keeps a secret and scores guesses
//!
//! Speaks the same wire format as a remote server, so a full session can run offline
//! for the `solve` and `benchmark` commands and for tests.

use crate::core::{ColorCode, Feedback, Geometry};
use crate::protocol::{Response, Transport, decode_guess, encode_response};
use std::collections::VecDeque;
use std::io;

/// Scores guesses against a fixed secret
#[derive(Debug, Clone)]
pub struct Referee {
    geometry: Geometry,
    secret: ColorCode,
    max_rounds: u32,
    rounds: u32,
    pending: Vec<u8>,
    outbox: VecDeque<u8>,
    parity_error_round: Option<u32>,
    hangup_after: Option<u32>,
}

impl Referee {
    /// Tries allowed before the game is lost
    pub const DEFAULT_MAX_ROUNDS: u32 = 35;

    #[must_use]
    pub fn new(secret: ColorCode, geometry: Geometry) -> Self {
        Self {
            geometry,
            secret,
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
            rounds: 0,
            pending: Vec::with_capacity(2),
            outbox: VecDeque::new(),
            parity_error_round: None,
            hangup_after: None,
        }
    }

    #[must_use]
    pub const fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Flag a parity error in the given round regardless of what was received
    #[must_use]
    pub const fn with_parity_error_in(mut self, round: u32) -> Self {
        self.parity_error_round = Some(round);
        self
    }

    /// Close the stream instead of answering once `rounds` guesses were received
    #[must_use]
    pub const fn with_hangup_after(mut self, rounds: u32) -> Self {
        self.hangup_after = Some(rounds);
        self
    }

    /// Guesses received so far
    #[must_use]
    pub const fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Score one complete 2-byte guess
    fn answer(&mut self, bytes: [u8; 2]) -> io::Result<()> {
        self.rounds += 1;
        if self.hangup_after.is_some_and(|n| self.rounds > n) {
            return Ok(());
        }

        let decoded = decode_guess(bytes, self.geometry)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let feedback = Feedback::score(&decoded.code, &self.secret);
        let won = feedback.is_win(self.geometry.slots());

        let response = Response {
            feedback,
            parity_error: !decoded.parity_ok || self.parity_error_round == Some(self.rounds),
            game_lost: !won && self.rounds >= self.max_rounds,
        };
        self.outbox.push_back(encode_response(response));
        Ok(())
    }
}

impl Transport for Referee {
    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.pending.push(byte);
        if let [low, high] = self.pending[..] {
            self.pending.clear();
            self.answer([low, high])?;
        }
        Ok(())
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.outbox.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{decode_response, encode_guess};

    fn code(s: &str) -> ColorCode {
        ColorCode::parse(s, Geometry::STANDARD).unwrap()
    }

    fn play(referee: &mut Referee, guess: &str) -> Option<Response> {
        for byte in encode_guess(&code(guess)) {
            referee.write_byte(byte).unwrap();
        }
        referee.read_byte().unwrap().map(decode_response)
    }

    #[test]
    fn scores_guess_against_secret() {
        let mut referee = Referee::new(code("01234"), Geometry::STANDARD);
        let response = play(&mut referee, "04321").unwrap();
        assert_eq!(response.feedback, Feedback::new(1, 4));
        assert!(!response.is_error());
        assert_eq!(referee.rounds(), 1);
    }

    #[test]
    fn no_answer_before_second_byte() {
        let mut referee = Referee::new(code("01234"), Geometry::STANDARD);
        referee.write_byte(0x00).unwrap();
        assert_eq!(referee.read_byte().unwrap(), None);
        assert_eq!(referee.rounds(), 0);
    }

    #[test]
    fn flags_game_lost_on_last_round() {
        let mut referee = Referee::new(code("01234"), Geometry::STANDARD).with_max_rounds(2);
        assert!(!play(&mut referee, "55555").unwrap().game_lost);
        assert!(play(&mut referee, "55555").unwrap().game_lost);
    }

    #[test]
    fn win_on_last_round_is_not_lost() {
        let mut referee = Referee::new(code("01234"), Geometry::STANDARD).with_max_rounds(1);
        let response = play(&mut referee, "01234").unwrap();
        assert_eq!(response.feedback, Feedback::perfect(5));
        assert!(!response.game_lost);
    }

    #[test]
    fn detects_corrupted_parity() {
        let mut referee = Referee::new(code("01234"), Geometry::STANDARD);
        let [low, high] = encode_guess(&code("01234"));
        referee.write_byte(low).unwrap();
        referee.write_byte(high ^ 0x80).unwrap();
        let response = decode_response(referee.read_byte().unwrap().unwrap());
        assert!(response.parity_error);
    }

    #[test]
    fn forced_parity_error_round() {
        let mut referee = Referee::new(code("01234"), Geometry::STANDARD).with_parity_error_in(2);
        assert!(!play(&mut referee, "00000").unwrap().parity_error);
        assert!(play(&mut referee, "00000").unwrap().parity_error);
    }

    #[test]
    fn hangup_closes_stream() {
        let mut referee = Referee::new(code("01234"), Geometry::STANDARD).with_hangup_after(1);
        assert!(play(&mut referee, "00000").is_some());
        assert!(play(&mut referee, "00000").is_none());
    }
}
