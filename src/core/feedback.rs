//! Feedback calculation and representation
//!
//! Feedback for a guess is a pair of peg counts:
//! - red: slots where the guess matches the secret exactly
//! - white: colors present in the secret but in a different slot
//!
//! Duplicate colors are counted without double-using either side's matches.

use super::code::{ColorCode, MAX_COLORS};
use std::fmt;

/// Scored result of one guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Feedback {
    red: u8,
    white: u8,
}

impl Feedback {
    #[inline]
    #[must_use]
    pub const fn new(red: u8, white: u8) -> Self {
        Self { red, white }
    }

    /// Feedback of a guess that equals the secret
    #[inline]
    #[must_use]
    pub const fn perfect(slots: usize) -> Self {
        Self::new(slots as u8, 0)
    }

    #[inline]
    #[must_use]
    pub const fn red(self) -> u8 {
        self.red
    }

    #[inline]
    #[must_use]
    pub const fn white(self) -> u8 {
        self.white
    }

    /// Check if every slot matched
    #[inline]
    #[must_use]
    pub const fn is_win(self, slots: usize) -> bool {
        self.red as usize == slots
    }

    /// Check the count invariants for a given slot count
    #[must_use]
    pub const fn is_valid_for(self, slots: usize) -> bool {
        self.red as usize + self.white as usize <= slots
    }

    /// Score `guess` as if `secret` were the hidden code
    ///
    /// # Algorithm
    /// 1. First pass: count reds, and tally the secret's unmatched colors
    /// 2. Second pass: for every unmatched guess slot, consume one tallied color if present
    ///
    /// The result is symmetric in its arguments.
    ///
    /// # Examples
    /// ```
    /// use mastermind_client::core::{ColorCode, Feedback, Geometry};
    ///
    /// let g = Geometry::new(2, 2).unwrap();
    /// let guess = ColorCode::new(&[0, 0], g).unwrap();
    /// let secret = ColorCode::new(&[0, 1], g).unwrap();
    ///
    /// assert_eq!(Feedback::score(&guess, &secret), Feedback::new(1, 0));
    /// ```
    #[must_use]
    pub fn score(guess: &ColorCode, secret: &ColorCode) -> Self {
        debug_assert_eq!(guess.len(), secret.len(), "codes must share a geometry");

        let mut red = 0u8;
        let mut white = 0u8;
        let mut remaining = [0u8; MAX_COLORS];

        for (&g, &s) in guess.pegs().iter().zip(secret.pegs()) {
            if g == s {
                red += 1;
            } else {
                remaining[s as usize] += 1;
            }
        }

        for (&g, &s) in guess.pegs().iter().zip(secret.pegs()) {
            if g != s && remaining[g as usize] > 0 {
                white += 1;
                remaining[g as usize] -= 1;
            }
        }

        Self { red, white }
    }

    /// Score via color multiset intersection
    ///
    /// Slower than `score`, but written independently so the two can check each other.
    #[must_use]
    pub fn score_by_counts(guess: &ColorCode, secret: &ColorCode) -> Self {
        let red = guess
            .pegs()
            .iter()
            .zip(secret.pegs())
            .filter(|(g, s)| g == s)
            .count();

        let guess_counts = guess.color_counts();
        let secret_counts = secret.color_counts();
        let common: usize = guess_counts
            .iter()
            .zip(&secret_counts)
            .map(|(&a, &b)| usize::from(a.min(b)))
            .sum();

        Self::new(red as u8, (common - red) as u8)
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} red / {} white", self.red, self.white)
    }
}
