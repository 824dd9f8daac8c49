//! Population-based evolutionary search.
//!
//! Wraps [`GaRunner`] over a [`SeatingGaProblem`]: `P` random seatings
//! evolved for exactly `G` generations with top-half elitism, half-split
//! crossover, and swap mutation. Returns the best seating observed in any
//! generation.

use rand::Rng;

use super::{SearchStrategy, is_degenerate};
use crate::error::Result;
use crate::ga::{GaConfig, GaResult, GaRunner, SeatingChromosome, SeatingGaProblem};
use crate::models::SeatingResult;
use crate::scoring::SeatingScorer;

/// Genetic search over seatings.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_seating::ga::GaConfig;
/// use u_seating::models::{ClassroomLayout, RelationshipGraph, TeacherPosition};
/// use u_seating::scoring::SeatingScorer;
/// use u_seating::search::{GeneticSearch, SearchStrategy};
///
/// let mut graph = RelationshipGraph::new();
/// graph.add_relationship("A", "B", 5.0);
/// graph.add_relationship("A", "C", -2.0);
/// let layout = ClassroomLayout::new(3, 3, TeacherPosition::Front).unwrap();
///
/// let search = GeneticSearch::new(
///     GaConfig::default().with_population_size(10).with_max_generations(5),
/// );
/// let scorer = SeatingScorer::new(&graph, &layout);
/// let result = search.search(&scorer, &mut StdRng::seed_from_u64(3)).unwrap();
/// assert_eq!(result.seating.occupied_count(), 3);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneticSearch {
    config: GaConfig,
}

impl GeneticSearch {
    /// Creates the strategy with the given GA parameters.
    pub fn new(config: GaConfig) -> Self {
        Self { config }
    }

    /// GA parameters.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Runs the GA and returns the full run record.
    ///
    /// Unlike [`search`](SearchStrategy::search) this does not special-case
    /// degenerate input; an empty roster evolves empty seatings.
    pub fn evolve<R: Rng>(
        &self,
        scorer: &SeatingScorer<'_>,
        rng: &mut R,
    ) -> Result<GaResult<SeatingChromosome>> {
        let problem = SeatingGaProblem::new(scorer);
        GaRunner::run(&problem, &self.config, rng)
    }
}

impl SearchStrategy for GeneticSearch {
    fn name(&self) -> &'static str {
        "genetic"
    }

    fn search<R: Rng>(&self, scorer: &SeatingScorer<'_>, rng: &mut R) -> Result<SeatingResult> {
        let total_seats = scorer.layout().total_seats();
        if is_degenerate(scorer) {
            tracing::debug!(strategy = self.name(), "nothing to seat");
            return Ok(SeatingResult::empty(total_seats));
        }

        let run = self.evolve(scorer, rng)?;
        tracing::info!(
            strategy = self.name(),
            students = run.best.seating.occupied_count(),
            seats = total_seats,
            population = self.config.population_size,
            generations = run.generations,
            score = run.best_fitness,
            "search finished"
        );
        Ok(SeatingResult {
            seating: run.best.seating,
            score: run.best_fitness,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SeatingError;
    use crate::models::{ClassroomLayout, RelationshipGraph, TeacherPosition};
    use crate::scoring::score;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn class_graph() -> RelationshipGraph {
        let mut g = RelationshipGraph::new();
        for (a, b, w) in [
            ("A", "B", 5.0),
            ("B", "C", 3.0),
            ("C", "A", 4.0),
            ("D", "E", -2.0),
            ("E", "F", 2.0),
            ("F", "D", -2.0),
            ("G", "H", 5.0),
            ("H", "G", 5.0),
            ("I", "A", 3.0),
        ] {
            g.add_relationship(a, b, w);
        }
        g
    }

    fn small_config() -> GaConfig {
        GaConfig::default()
            .with_population_size(16)
            .with_max_generations(20)
            .with_mutation_rate(0.2)
    }

    #[test]
    fn test_search_places_every_student() {
        let graph = class_graph();
        let layout = ClassroomLayout::new(3, 4, TeacherPosition::Front).unwrap();
        let scorer = SeatingScorer::new(&graph, &layout);
        let mut rng = SmallRng::seed_from_u64(42);

        let result = GeneticSearch::new(small_config())
            .search(&scorer, &mut rng)
            .unwrap();
        assert_eq!(result.seating.occupied_count(), graph.student_count());
        assert!(result.seating.is_injective());
        assert!((result.score - score(&result.seating, &graph, &layout)).abs() < 1e-12);
    }

    #[test]
    fn test_best_tracks_or_exceeds_first_generation() {
        let graph = class_graph();
        let layout = ClassroomLayout::new(3, 3, TeacherPosition::Back).unwrap();
        let scorer = SeatingScorer::new(&graph, &layout);

        for seed in 0..5 {
            let run = GeneticSearch::new(small_config())
                .evolve(&scorer, &mut SmallRng::seed_from_u64(seed))
                .unwrap();
            assert_eq!(run.generations, 20);
            assert!(run.best_fitness >= run.history[0]);
            assert!(run
                .history
                .iter()
                .all(|&leader| run.best_fitness >= leader));
        }
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let graph = class_graph();
        let layout = ClassroomLayout::new(3, 3, TeacherPosition::Front).unwrap();
        let scorer = SeatingScorer::new(&graph, &layout);
        let search = GeneticSearch::new(small_config());

        let a = search.search(&scorer, &mut SmallRng::seed_from_u64(5)).unwrap();
        let b = search.search(&scorer, &mut SmallRng::seed_from_u64(5)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_degenerate_input() {
        let layout = ClassroomLayout::new(2, 2, TeacherPosition::Front).unwrap();
        let graph = RelationshipGraph::new();
        let scorer = SeatingScorer::new(&graph, &layout);
        let mut rng = SmallRng::seed_from_u64(42);

        let result = GeneticSearch::default().search(&scorer, &mut rng).unwrap();
        assert!(result.seating.is_empty());
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let graph = class_graph();
        let layout = ClassroomLayout::new(3, 3, TeacherPosition::Front).unwrap();
        let scorer = SeatingScorer::new(&graph, &layout);
        let mut rng = SmallRng::seed_from_u64(42);

        let err = GeneticSearch::new(small_config().with_mutation_rate(2.0))
            .search(&scorer, &mut rng)
            .unwrap_err();
        assert!(matches!(err, SeatingError::InvalidConfig(_)));
    }

    #[test]
    fn test_nan_weight_is_runtime_failure() {
        let mut graph = RelationshipGraph::new();
        graph.add_relationship("A", "B", f64::NAN);
        let layout = ClassroomLayout::new(2, 2, TeacherPosition::Front).unwrap();
        let scorer = SeatingScorer::new(&graph, &layout);
        let mut rng = SmallRng::seed_from_u64(42);

        let err = GeneticSearch::new(small_config())
            .search(&scorer, &mut rng)
            .unwrap_err();
        assert!(matches!(err, SeatingError::SearchRuntimeFailure(_)));
    }
}
