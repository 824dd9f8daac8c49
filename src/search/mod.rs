//! Search strategies over seatings.
//!
//! Both strategies maximize [`SeatingScorer::score`] and are heuristic: they
//! return a good seating, not a provably optimal one.
//!
//! | Strategy | Approach | Cost |
//! |----------|----------|------|
//! | [`GreedySearch`] | random start + strict pairwise-swap hill climbing | `min(50, 2n)` evaluations |
//! | [`GeneticSearch`] | elitist GA with half-split crossover and swap mutation | `P · G` evaluations |
//!
//! # Degenerate input
//! With no students or no seats, every strategy returns an empty seating
//! scored 0 instead of failing.
//!
//! # Failures
//! A non-finite score (e.g. NaN edge weights) aborts the run with
//! [`SearchRuntimeFailure`](crate::error::SeatingError::SearchRuntimeFailure); the caller decides whether to
//! fall back (see [`crate::optimizer::FailurePolicy`]).

mod genetic;
mod greedy;

pub use genetic::GeneticSearch;
pub use greedy::{GreedySearch, MAX_GREEDY_TRIALS};

use rand::Rng;

use crate::error::Result;
use crate::models::SeatingResult;
use crate::scoring::SeatingScorer;

/// A search over seatings for one graph and layout.
pub trait SearchStrategy {
    /// Strategy name (e.g., "greedy", "genetic").
    fn name(&self) -> &'static str;

    /// Runs the search to completion and returns the best seating found.
    ///
    /// All randomness is drawn from `rng`, so a seeded generator makes the
    /// run reproducible.
    fn search<R: Rng>(&self, scorer: &SeatingScorer<'_>, rng: &mut R) -> Result<SeatingResult>;
}

/// Whether there is nothing to search over.
pub(crate) fn is_degenerate(scorer: &SeatingScorer<'_>) -> bool {
    scorer.graph().student_count() == 0 || scorer.layout().total_seats() == 0
}
