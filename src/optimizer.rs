//! Seating optimization entry point.
//!
//! [`SeatingOptimizer`] checks a request, runs the chosen strategy on its
//! own random generator, and applies the configured [`FailurePolicy`] when
//! the search aborts. Each call is a pure function of (graph, layout,
//! config) plus the generator; nothing is stored between calls.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SeatingError};
use crate::ga::GaConfig;
use crate::models::{ClassroomLayout, RelationshipGraph, Seating, SeatingResult};
use crate::scoring::SeatingScorer;
use crate::search::{GeneticSearch, GreedySearch, SearchStrategy};
use crate::validation::{into_seating_error, validate_request};

/// Which search to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Random start + swap hill climbing.
    Greedy,
    /// Elitist genetic algorithm.
    #[default]
    Genetic,
}

/// What to do when a search aborts with `SearchRuntimeFailure`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Return one random seating and its score instead.
    #[default]
    FallbackToRandom,
    /// Return the error to the caller.
    Propagate,
}

/// Search configuration.
///
/// # Example
///
/// ```
/// use u_seating::optimizer::{FailurePolicy, SearchConfig};
///
/// let config = SearchConfig::default()
///     .with_population_size(30)
///     .with_generations(50)
///     .with_seed(7)
///     .with_failure_policy(FailurePolicy::Propagate);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// GA population size.
    pub population_size: usize,
    /// GA generation budget.
    pub generations: usize,
    /// GA per-child mutation probability (0.0..=1.0).
    pub mutation_rate: f64,
    /// Seed for a reproducible run; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Handling of mid-search failures.
    pub failure_policy: FailurePolicy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let ga = GaConfig::default();
        Self {
            population_size: ga.population_size,
            generations: ga.max_generations,
            mutation_rate: ga.mutation_rate,
            seed: None,
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl SearchConfig {
    /// Sets the GA population size.
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }

    /// Sets the GA generation budget.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Sets the GA mutation probability.
    pub fn with_mutation_rate(mut self, mutation_rate: f64) -> Self {
        self.mutation_rate = mutation_rate;
        self
    }

    /// Fixes the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the failure policy.
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// GA parameters derived from this config.
    pub fn ga_config(&self) -> GaConfig {
        GaConfig::default()
            .with_population_size(self.population_size)
            .with_max_generations(self.generations)
            .with_mutation_rate(self.mutation_rate)
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> Result<()> {
        self.ga_config().validate()
    }
}

/// Runs seating searches.
///
/// # Example
///
/// ```
/// use u_seating::models::{LayoutRequest, RelationshipGraph, RelationshipKind, TeacherPosition};
/// use u_seating::optimizer::{SearchConfig, SeatingOptimizer, Strategy};
///
/// let mut graph = RelationshipGraph::new();
/// graph.add_mention("Ana", "Ben", RelationshipKind::ClosestFriend);
/// graph.add_mention("Ben", "Cy", RelationshipKind::Conflict);
/// let layout = LayoutRequest::new(3, 3, TeacherPosition::Front).into_layout().unwrap();
///
/// let optimizer = SeatingOptimizer::new(SearchConfig::default().with_seed(1));
/// let result = optimizer.optimize(&graph, &layout, Strategy::Greedy).unwrap();
/// assert_eq!(result.seating.occupied_count(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SeatingOptimizer {
    config: SearchConfig,
}

impl SeatingOptimizer {
    /// Creates an optimizer.
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Validates the request and runs `strategy` on a generator built from
    /// the configured seed.
    ///
    /// # Errors
    /// - `InvalidLayout` when there are fewer seats than students.
    /// - `DegenerateInput` when the graph has no students.
    /// - `InvalidConfig` for out-of-range GA parameters ([`Strategy::Genetic`] only).
    /// - `SearchRuntimeFailure` only under [`FailurePolicy::Propagate`].
    pub fn optimize(
        &self,
        graph: &RelationshipGraph,
        layout: &ClassroomLayout,
        strategy: Strategy,
    ) -> Result<SeatingResult> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.optimize_with_rng(graph, layout, strategy, &mut rng)
    }

    /// Like [`optimize`](Self::optimize) but draws from a caller-owned generator.
    pub fn optimize_with_rng<R: Rng>(
        &self,
        graph: &RelationshipGraph,
        layout: &ClassroomLayout,
        strategy: Strategy,
        rng: &mut R,
    ) -> Result<SeatingResult> {
        validate_request(graph, layout).map_err(into_seating_error)?;

        let scorer = SeatingScorer::new(graph, layout);
        tracing::info!(
            ?strategy,
            students = graph.student_count(),
            seats = layout.total_seats(),
            relationships = graph.edge_count(),
            "starting seating search"
        );

        let outcome = match strategy {
            Strategy::Greedy => GreedySearch::new().search(&scorer, rng),
            Strategy::Genetic => GeneticSearch::new(self.config.ga_config()).search(&scorer, rng),
        };

        match outcome {
            Err(SeatingError::SearchRuntimeFailure(cause))
                if self.config.failure_policy == FailurePolicy::FallbackToRandom =>
            {
                tracing::warn!(%cause, ?strategy, "search failed, falling back to a random seating");
                Ok(random_fallback(&scorer, rng))
            }
            other => other,
        }
    }
}

/// One random seating and its score.
///
/// The score is reported as computed and may be non-finite when the graph
/// itself carries non-finite weights.
fn random_fallback<R: Rng>(scorer: &SeatingScorer<'_>, rng: &mut R) -> SeatingResult {
    let seating = Seating::random(
        scorer.graph().students(),
        scorer.layout().total_seats(),
        rng,
    );
    let score = scorer.score(&seating);
    SeatingResult { seating, score }
}
