//! Guess analysis command
//!
//! Splits the full candidate space by the feedback a guess would receive.

use crate::core::{ColorCode, Feedback, Geometry};
use crate::error::Result;
use crate::solver::CandidateSpace;
use crate::solver::minimax::group_by_feedback;

/// Result of analyzing a guess
pub struct AnalysisResult {
    pub guess: ColorCode,
    pub total_candidates: usize,
    /// Feedbacks ordered by bucket size, largest first
    pub partition: Vec<(Feedback, usize)>,
    pub max_remaining: usize,
    pub expected_remaining: f64,
}

impl AnalysisResult {
    #[must_use]
    pub fn distinct_feedbacks(&self) -> usize {
        self.partition.len()
    }
}

/// Analyze how well a guess splits the full candidate space
///
/// # Errors
///
/// Returns an error if the code does not parse for the geometry.
pub fn analyze_guess(code: &str, geometry: Geometry) -> Result<AnalysisResult> {
    let guess = ColorCode::parse(code, geometry)?;
    let space = CandidateSpace::enumerate_all(geometry);

    let mut partition: Vec<(Feedback, usize)> =
        group_by_feedback(&guess, space.as_slice()).into_iter().collect();
    partition.sort_by(|(fa, a), (fb, b)| {
        b.cmp(a)
            .then(fb.red().cmp(&fa.red()))
            .then(fb.white().cmp(&fa.white()))
    });

    let total_candidates = space.len();
    let max_remaining = partition.first().map_or(0, |&(_, n)| n);

    // Expected bucket size when the secret is uniform: sum(n^2) / N
    let expected_remaining = partition
        .iter()
        .map(|&(_, n)| (n * n) as f64)
        .sum::<f64>()
        / total_candidates as f64;

    Ok(AnalysisResult {
        guess,
        total_candidates,
        partition,
        max_remaining,
        expected_remaining,
    })
}
