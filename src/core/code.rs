//! Color code representation
//!
//! A `ColorCode` is a fixed-length sequence of color indices. The length and the
//! number of colors are described by a `Geometry`, which is a parameter of the whole
//! design rather than a compile-time constant.

use std::fmt;

/// Upper bound on slots a code can hold
pub const MAX_SLOTS: usize = 8;

/// Upper bound on distinct colors the scorer can track
pub const MAX_COLORS: usize = 16;

/// Upper bound on `colors ^ slots`, the number of codes a space enumerates
pub const MAX_SPACE: usize = 1 << 24;

/// Shape of the game: how many slots a code has and how many colors each slot may take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Geometry {
    slots: u8,
    colors: u8,
}

/// Error type for invalid codes and geometries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeError {
    InvalidLength { expected: usize, got: usize },
    ColorOutOfRange { slot: usize, color: u8, colors: u8 },
    InvalidCharacter(char),
    InvalidGeometry { slots: usize, colors: usize },
}

impl fmt::Display for CodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength { expected, got } => {
                write!(f, "Code must have exactly {expected} slots, got {got}")
            }
            Self::ColorOutOfRange {
                slot,
                color,
                colors,
            } => write!(
                f,
                "Color {color} in slot {slot} is out of range (0..{colors})"
            ),
            Self::InvalidCharacter(c) => write!(f, "Code contains invalid character {c:?}"),
            Self::InvalidGeometry { slots, colors } => write!(
                f,
                "Unsupported geometry: {slots} slots x {colors} colors \
                 (slots must be 1..={MAX_SLOTS}, colors 1..={MAX_COLORS}, \
                 at most {MAX_SPACE} codes)"
            ),
        }
    }
}

impl std::error::Error for CodeError {}

impl Geometry {
    /// The reference configuration: 5 slots, 8 colors
    pub const STANDARD: Self = Self {
        slots: 5,
        colors: 8,
    };

    /// Create a new geometry
    ///
    /// # Errors
    /// Returns `CodeError::InvalidGeometry` if either dimension is zero or exceeds
    /// `MAX_SLOTS` / `MAX_COLORS`, or if the space would hold more than `MAX_SPACE` codes.
    pub fn new(slots: usize, colors: usize) -> Result<Self, CodeError> {
        if !(1..=MAX_SLOTS).contains(&slots) || !(1..=MAX_COLORS).contains(&colors) {
            return Err(CodeError::InvalidGeometry { slots, colors });
        }
        if (colors as u64).pow(slots as u32) > MAX_SPACE as u64 {
            return Err(CodeError::InvalidGeometry { slots, colors });
        }

        Ok(Self {
            slots: slots as u8,
            colors: colors as u8,
        })
    }

    #[inline]
    #[must_use]
    pub const fn slots(self) -> usize {
        self.slots as usize
    }

    #[inline]
    #[must_use]
    pub const fn colors(self) -> usize {
        self.colors as usize
    }

    /// Number of distinct codes (`colors ^ slots`)
    #[must_use]
    pub const fn space_size(self) -> usize {
        (self.colors as usize).pow(self.slots as u32)
    }

    /// Whether codes of this shape fit the 2-byte wire message
    ///
    /// Every slot occupies a 3-bit field below the parity bit at position 15.
    #[must_use]
    pub const fn is_wire_compatible(self) -> bool {
        self.slots as usize * 3 <= 15 && self.colors <= 8
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} slots x {} colors", self.slots, self.colors)
    }
}

/// A fixed-length sequence of color indices
///
/// Immutable once constructed. Unused trailing slots are always zero so that
/// derived equality and hashing only see the meaningful prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorCode {
    len: u8,
    pegs: [u8; MAX_SLOTS],
}

impl ColorCode {
    /// Create a code, validating it against the geometry
    ///
    /// # Errors
    /// Returns `CodeError` if the number of pegs does not match the slot count or a
    /// color is outside `[0, colors)`.
    ///
    /// # Examples
    /// ```
    /// use mastermind_client::core::{ColorCode, Geometry};
    ///
    /// let code = ColorCode::new(&[0, 0, 1, 4, 2], Geometry::STANDARD).unwrap();
    /// assert_eq!(code.pegs(), &[0, 0, 1, 4, 2]);
    ///
    /// assert!(ColorCode::new(&[0, 1], Geometry::STANDARD).is_err());
    /// assert!(ColorCode::new(&[0, 0, 0, 0, 9], Geometry::STANDARD).is_err());
    /// ```
    pub fn new(pegs: &[u8], geometry: Geometry) -> Result<Self, CodeError> {
        if pegs.len() != geometry.slots() {
            return Err(CodeError::InvalidLength {
                expected: geometry.slots(),
                got: pegs.len(),
            });
        }

        if let Some((slot, &color)) = pegs
            .iter()
            .enumerate()
            .find(|&(_, &c)| c as usize >= geometry.colors())
        {
            return Err(CodeError::ColorOutOfRange {
                slot,
                color,
                colors: geometry.colors,
            });
        }

        Ok(Self::from_pegs_unchecked(pegs))
    }

    /// Build a code without range validation
    ///
    /// Callers must guarantee `pegs.len() <= MAX_SLOTS`.
    pub(crate) fn from_pegs_unchecked(pegs: &[u8]) -> Self {
        debug_assert!(pegs.len() <= MAX_SLOTS, "too many pegs");
        let mut buf = [0u8; MAX_SLOTS];
        buf[..pegs.len()].copy_from_slice(pegs);
        Self {
            len: pegs.len() as u8,
            pegs: buf,
        }
    }

    /// Parse a code from a digit string such as `"00142"`
    ///
    /// Whitespace and commas between digits are ignored.
    ///
    /// # Errors
    /// Returns `CodeError` on non-digit characters or if the parsed code does not
    /// fit the geometry.
    pub fn parse(s: &str, geometry: Geometry) -> Result<Self, CodeError> {
        let mut pegs = Vec::with_capacity(geometry.slots());
        for ch in s.chars().filter(|c| !c.is_whitespace() && *c != ',') {
            let digit = ch.to_digit(16).ok_or(CodeError::InvalidCharacter(ch))?;
            pegs.push(digit as u8);
        }
        Self::new(&pegs, geometry)
    }

    /// The color indices, one per slot
    #[inline]
    #[must_use]
    pub fn pegs(&self) -> &[u8] {
        &self.pegs[..self.len as usize]
    }

    /// Number of slots in this code
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Color at a specific slot
    ///
    /// # Panics
    /// Panics if `slot >= self.len()`
    #[inline]
    #[must_use]
    pub fn color_at(&self, slot: usize) -> u8 {
        self.pegs()[slot]
    }

    /// Count how often each color appears
    pub(crate) fn color_counts(&self) -> [u8; MAX_COLORS] {
        let mut counts = [0u8; MAX_COLORS];
        for &color in self.pegs() {
            counts[color as usize] += 1;
        }
        counts
    }
}

impl fmt::Display for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &color in self.pegs() {
            write!(f, "{color:x}")?;
        }
        Ok(())
    }
}
