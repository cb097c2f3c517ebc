//! Minimax worst-case calculation
//!
//! Given a guess and the remaining candidates, computes the largest group of candidates
//! that would all answer the guess with the same feedback.

use crate::core::{ColorCode, Feedback};
use rayon::prelude::*;
use rustc_hash::FxHashMap;

/// Calculate the maximum remaining candidates for a guess
///
/// # Strategy
/// For each feedback the guess could receive:
/// - Count how many candidates would produce that feedback
/// - Return the maximum count (worst case)
///
/// # Examples
/// ```
/// use mastermind_client::core::{ColorCode, Geometry};
/// use mastermind_client::solver::minimax::calculate_max_remaining;
///
/// let g = Geometry::new(2, 2).unwrap();
/// let candidates: Vec<ColorCode> = [[0, 1], [1, 0]]
///     .iter()
///     .map(|p| ColorCode::new(p, g).unwrap())
///     .collect();
///
/// let guess = ColorCode::new(&[0, 1], g).unwrap();
/// assert_eq!(calculate_max_remaining(&guess, &candidates), 1);
/// ```
#[must_use]
pub fn calculate_max_remaining(guess: &ColorCode, candidates: &[ColorCode]) -> usize {
    group_by_feedback(guess, candidates)
        .values()
        .max()
        .copied()
        .unwrap_or(0)
}

/// Group candidates by the feedback they produce with the guess
#[must_use]
pub fn group_by_feedback(guess: &ColorCode, candidates: &[ColorCode]) -> FxHashMap<Feedback, usize> {
    let mut counts = FxHashMap::default();

    for candidate in candidates {
        *counts.entry(Feedback::score(guess, candidate)).or_insert(0) += 1;
    }

    counts
}

/// Select the guess that minimizes the worst-case remaining candidates
///
/// Returns the chosen guess and its worst case, or `None` if the guess pool is empty.
/// Ties resolve to the earliest guess in the pool.
#[must_use]
pub fn select_best_guess<'a>(
    guess_pool: &'a [ColorCode],
    candidates: &[ColorCode],
) -> Option<(&'a ColorCode, usize)> {
    guess_pool
        .par_iter()
        .map(|guess| (guess, calculate_max_remaining(guess, candidates)))
        .min_by_key(|&(_, max)| max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Geometry;
    use crate::solver::CandidateSpace;

    fn codes(pegs: &[&[u8]], g: Geometry) -> Vec<ColorCode> {
        pegs.iter().map(|p| ColorCode::new(p, g).unwrap()).collect()
    }

    #[test]
    fn max_remaining_empty_candidates() {
        let g = Geometry::STANDARD;
        let guess = ColorCode::new(&[0, 0, 0, 0, 0], g).unwrap();
        assert_eq!(calculate_max_remaining(&guess, &[]), 0);
    }

    #[test]
    fn max_remaining_all_same_feedback() {
        let g = Geometry::new(3, 4).unwrap();
        let guess = ColorCode::new(&[3, 3, 3], g).unwrap();
        let candidates = codes(&[&[0, 0, 0], &[1, 1, 1], &[2, 2, 2]], g);
        assert_eq!(calculate_max_remaining(&guess, &candidates), 3);
    }

    #[test]
    fn groups_sum_to_candidate_count() {
        let g = Geometry::new(3, 4).unwrap();
        let space = CandidateSpace::enumerate_all(g);
        let guess = ColorCode::new(&[0, 1, 2], g).unwrap();

        let groups = group_by_feedback(&guess, space.as_slice());
        assert_eq!(groups.values().sum::<usize>(), space.len());
        assert_eq!(groups.get(&Feedback::perfect(3)), Some(&1));
    }

    #[test]
    fn selects_splitting_guess() {
        let g = Geometry::new(3, 4).unwrap();
        // 333 cannot tell these apart, 012 can
        let pool = codes(&[&[3, 3, 3], &[0, 1, 2]], g);
        let candidates = codes(&[&[0, 0, 0], &[1, 1, 1], &[2, 2, 2]], g);

        let (best, max) = select_best_guess(&pool, &candidates).unwrap();
        assert_eq!(best.pegs(), &[0, 1, 2]);
        assert!(max < 3);
    }

    #[test]
    fn ties_resolve_to_first() {
        let g = Geometry::new(3, 4).unwrap();
        let pool = codes(&[&[3, 3, 3], &[2, 2, 2]], g);
        let candidates = codes(&[&[0, 0, 0], &[1, 1, 1]], g);

        let (best, max) = select_best_guess(&pool, &candidates).unwrap();
        assert_eq!(best.pegs(), &[3, 3, 3]);
        assert_eq!(max, 2);
    }

    #[test]
    fn returns_none_on_empty_pool() {
        let g = Geometry::new(3, 4).unwrap();
        let candidates = codes(&[&[0, 0, 0]], g);
        assert!(select_best_guess(&[], &candidates).is_none());
    }
}
