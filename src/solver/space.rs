//! Candidate space: every code still consistent with the feedback seen so far

use crate::core::{ColorCode, Feedback, Geometry, MAX_SLOTS};
use rayon::prelude::*;

/// Set of codes that could still be the secret
///
/// Starts as the full Cartesian product of colors over slots and only ever shrinks.
/// Order is lexicographic by color index, slot 0 most significant, and pruning
/// preserves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSpace {
    geometry: Geometry,
    codes: Vec<ColorCode>,
}

impl CandidateSpace {
    /// Enumerate every code of the given geometry
    ///
    /// # Examples
    /// ```
    /// use mastermind_client::core::Geometry;
    /// use mastermind_client::solver::CandidateSpace;
    ///
    /// let space = CandidateSpace::enumerate_all(Geometry::new(2, 2).unwrap());
    /// let codes: Vec<String> = space.iter().map(ToString::to_string).collect();
    /// assert_eq!(codes, ["00", "01", "10", "11"]);
    /// ```
    #[must_use]
    pub fn enumerate_all(geometry: Geometry) -> Self {
        let slots = geometry.slots();
        let colors = geometry.colors();

        let codes = (0..geometry.space_size())
            .map(|mut index| {
                let mut pegs = [0u8; MAX_SLOTS];
                for slot in (0..slots).rev() {
                    pegs[slot] = (index % colors) as u8;
                    index /= colors;
                }
                ColorCode::from_pegs_unchecked(&pegs[..slots])
            })
            .collect();

        Self { geometry, codes }
    }

    /// An empty space, used once a session has been torn down
    #[must_use]
    pub const fn empty(geometry: Geometry) -> Self {
        Self {
            geometry,
            codes: Vec::new(),
        }
    }

    /// Keep only candidates that would have produced `feedback` against `guess`
    ///
    /// Each candidate is treated as the hypothetical secret. If the observed feedback
    /// was honest, the true secret always survives.
    #[must_use]
    pub fn prune(&self, guess: &ColorCode, feedback: Feedback) -> Self {
        let codes = self
            .codes
            .par_iter()
            .filter(|candidate| Feedback::score(guess, candidate) == feedback)
            .copied()
            .collect();

        Self {
            geometry: self.geometry,
            codes,
        }
    }

    #[inline]
    #[must_use]
    pub const fn geometry(&self) -> Geometry {
        self.geometry
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    #[must_use]
    pub fn contains(&self, code: &ColorCode) -> bool {
        self.codes.binary_search(code).is_ok()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ColorCode> {
        self.codes.get(index)
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[ColorCode] {
        &self.codes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColorCode> {
        self.codes.iter()
    }
}

impl<'a> IntoIterator for &'a CandidateSpace {
    type Item = &'a ColorCode;
    type IntoIter = std::slice::Iter<'a, ColorCode>;

    fn into_iter(self) -> Self::IntoIter {
        self.codes.iter()
    }
}
