//! Guess selection strategies
//!
//! Defines the Strategy trait and concrete implementations.

use super::CandidateSpace;
use crate::core::ColorCode;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A strategy for selecting the next guess from the remaining candidates
pub trait Strategy {
    /// Select the next guess
    ///
    /// Returns `None` if the candidate space is empty.
    fn select_guess<'a>(&mut self, space: &'a CandidateSpace) -> Option<&'a ColorCode>;
}

/// Enum wrapper for all strategy types
///
/// Allows runtime selection of strategy while maintaining static dispatch.
pub enum StrategyType {
    /// Uniform random candidate (default)
    Random(RandomStrategy),
    /// Pure minimax over the remaining candidates
    Minimax(MinimaxStrategy),
    /// Random while the space is large, minimax near the end
    Hybrid(HybridStrategy),
}

impl Strategy for StrategyType {
    fn select_guess<'a>(&mut self, space: &'a CandidateSpace) -> Option<&'a ColorCode> {
        match self {
            Self::Random(s) => s.select_guess(space),
            Self::Minimax(s) => s.select_guess(space),
            Self::Hybrid(s) => s.select_guess(space),
        }
    }
}

impl StrategyType {
    /// Create strategy from name string
    ///
    /// Supported names: "random", "minimax", "hybrid".
    /// Defaults to random if name is unrecognized. `seed` makes random draws reproducible.
    #[must_use]
    pub fn from_name(name: &str, seed: Option<u64>) -> Self {
        let random = RandomStrategy::from_seed(seed);
        match name {
            "minimax" => Self::Minimax(MinimaxStrategy),
            "hybrid" => Self::Hybrid(HybridStrategy::with_random(
                HybridStrategy::DEFAULT_THRESHOLD,
                random,
            )),
            _ => Self::Random(random),
        }
    }

    /// Name of the wrapped strategy
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Random(_) => "random",
            Self::Minimax(_) => "minimax",
            Self::Hybrid(_) => "hybrid",
        }
    }
}

/// Random strategy
///
/// Draws a uniform index in `[0, remaining)`. Terminates with probability 1 but has no
/// worst-case bound on rounds.
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    /// Random strategy seeded from the operating system
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Random strategy with a fixed seed, for reproducible runs
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::seeded)
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for RandomStrategy {
    fn select_guess<'a>(&mut self, space: &'a CandidateSpace) -> Option<&'a ColorCode> {
        if space.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..space.len());
        space.get(index)
    }
}

/// Pure minimax strategy
///
/// Picks the candidate whose worst feedback bucket is smallest. Quadratic in the
/// number of candidates, so slow on a full standard space.
pub struct MinimaxStrategy;

impl Strategy for MinimaxStrategy {
    fn select_guess<'a>(&mut self, space: &'a CandidateSpace) -> Option<&'a ColorCode> {
        if space.len() <= 2 {
            return space.get(0);
        }
        super::minimax::select_best_guess(space.as_slice(), space.as_slice()).map(|(best, _)| best)
    }
}

/// Hybrid strategy combining random selection and minimax
pub struct HybridStrategy {
    /// Switch to minimax when candidates <= this threshold
    pub minimax_threshold: usize,
    random: RandomStrategy,
}

impl HybridStrategy {
    pub const DEFAULT_THRESHOLD: usize = 256;

    /// Create a new hybrid strategy
    ///
    /// # Parameters
    /// - `minimax_threshold`: Switch to minimax when candidates <= this value (default: 256)
    #[must_use]
    pub fn new(minimax_threshold: usize) -> Self {
        Self::with_random(minimax_threshold, RandomStrategy::new())
    }

    #[must_use]
    pub const fn with_random(minimax_threshold: usize, random: RandomStrategy) -> Self {
        Self {
            minimax_threshold,
            random,
        }
    }
}

impl Default for HybridStrategy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD)
    }
}

impl Strategy for HybridStrategy {
    fn select_guess<'a>(&mut self, space: &'a CandidateSpace) -> Option<&'a ColorCode> {
        if space.len() <= self.minimax_threshold {
            MinimaxStrategy.select_guess(space)
        } else {
            self.random.select_guess(space)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Feedback, Geometry};

    fn small_space() -> CandidateSpace {
        CandidateSpace::enumerate_all(Geometry::new(3, 4).unwrap())
    }

    #[test]
    fn random_selects_member() {
        let space = small_space();
        let mut strategy = RandomStrategy::seeded(7);
        for _ in 0..50 {
            let guess = strategy.select_guess(&space).unwrap();
            assert!(space.contains(guess));
        }
    }

    #[test]
    fn random_is_reproducible_with_seed() {
        let space = small_space();
        let mut a = RandomStrategy::seeded(42);
        let mut b = RandomStrategy::seeded(42);
        for _ in 0..20 {
            assert_eq!(a.select_guess(&space), b.select_guess(&space));
        }
    }

    #[test]
    fn random_reaches_beyond_first_candidate() {
        // Draws must cover the whole space, not just its head
        let space = small_space();
        let mut strategy = RandomStrategy::seeded(1);
        let picks: Vec<ColorCode> = (0..32)
            .filter_map(|_| strategy.select_guess(&space).copied())
            .collect();
        assert!(picks.iter().any(|c| c != space.get(0).unwrap()));
    }

    #[test]
    fn strategies_return_none_on_empty() {
        let space = CandidateSpace::empty(Geometry::STANDARD);
        assert!(RandomStrategy::seeded(0).select_guess(&space).is_none());
        assert!(MinimaxStrategy.select_guess(&space).is_none());
        assert!(HybridStrategy::new(4).select_guess(&space).is_none());
    }

    #[test]
    fn minimax_selects_member() {
        let space = small_space();
        let guess = *small_space().get(0).unwrap();
        let pruned = space.prune(&guess, Feedback::new(1, 0));

        let choice = MinimaxStrategy.select_guess(&pruned).unwrap();
        assert!(pruned.contains(choice));
    }

    #[test]
    fn single_candidate_is_selected() {
        let space = small_space();
        let target = *space.get(17).unwrap();
        let pruned = space.prune(&target, Feedback::perfect(3));

        assert_eq!(RandomStrategy::seeded(3).select_guess(&pruned), Some(&target));
        assert_eq!(MinimaxStrategy.select_guess(&pruned), Some(&target));
    }

    #[test]
    fn hybrid_default_threshold() {
        let strategy = HybridStrategy::default();
        assert_eq!(strategy.minimax_threshold, 256);
    }

    #[test]
    fn from_name_maps_strategies() {
        assert_eq!(StrategyType::from_name("minimax", None).name(), "minimax");
        assert_eq!(StrategyType::from_name("hybrid", Some(1)).name(), "hybrid");
        assert_eq!(StrategyType::from_name("random", Some(1)).name(), "random");
        assert_eq!(StrategyType::from_name("bogus", None).name(), "random");
    }
}
