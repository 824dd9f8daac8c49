//! Generational GA loop with half-population elitism.
//!
//! # Algorithm
//!
//! 1. Create `population_size` individuals.
//! 2. Each generation: evaluate, sort descending by fitness, record the
//!    leader, keep the top half unchanged, and refill the population with
//!    children of two distinct elites (crossover, then mutation with
//!    probability `mutation_rate`).
//! 3. Stop after exactly `max_generations` generations and return the best
//!    individual observed in any generation.
//!
//! Fitness is maximized.

use rand::Rng;
use rand::seq::index;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SeatingError};
use crate::scoring::ensure_finite;

/// An individual with a cached fitness.
pub trait Individual: Clone {
    /// Cached fitness (higher = better).
    fn fitness(&self) -> f64;

    /// Stores an evaluated fitness.
    fn set_fitness(&mut self, fitness: f64);
}

/// Problem-specific GA hooks.
pub trait GaProblem {
    /// Individual type.
    type Individual: Individual;

    /// Creates a random individual for the initial population.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Computes fitness (higher = better).
    fn evaluate(&self, individual: &Self::Individual) -> f64;

    /// Produces one child from two parents.
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        parent2: &Self::Individual,
        rng: &mut R,
    ) -> Self::Individual;

    /// Mutates an individual in place.
    fn mutate<R: Rng>(&self, individual: &mut Self::Individual, rng: &mut R);
}

/// GA parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaConfig {
    /// Individuals per generation.
    pub population_size: usize,
    /// Generations to run.
    pub max_generations: usize,
    /// Probability that a child is mutated (0.0..=1.0).
    pub mutation_rate: f64,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 100,
            mutation_rate: 0.1,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }

    /// Sets the generation budget.
    pub fn with_max_generations(mut self, max_generations: usize) -> Self {
        self.max_generations = max_generations;
        self
    }

    /// Sets the mutation probability.
    pub fn with_mutation_rate(mut self, mutation_rate: f64) -> Self {
        self.mutation_rate = mutation_rate;
        self
    }

    /// Number of individuals carried over unchanged each generation.
    pub fn elite_size(&self) -> usize {
        (self.population_size / 2).max(1)
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(SeatingError::InvalidConfig(
                "population_size must be positive".into(),
            ));
        }
        if self.max_generations == 0 {
            return Err(SeatingError::InvalidConfig(
                "generations must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(SeatingError::InvalidConfig(format!(
                "mutation_rate must be in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        Ok(())
    }
}

/// Outcome of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult<I> {
    /// Best individual seen in any generation.
    pub best: I,
    /// Its fitness.
    pub best_fitness: f64,
    /// Generations evaluated.
    pub generations: usize,
    /// Leader fitness of each generation, in order.
    pub history: Vec<f64>,
}

/// Runs a [`GaProblem`] under a [`GaConfig`].
pub struct GaRunner;

impl GaRunner {
    /// Evolves a population and returns the best individual observed.
    ///
    /// # Errors
    /// `InvalidConfig` for out-of-range parameters; `SearchRuntimeFailure`
    /// if any evaluation is not finite.
    pub fn run<P, R>(problem: &P, config: &GaConfig, rng: &mut R) -> Result<GaResult<P::Individual>>
    where
        P: GaProblem,
        R: Rng,
    {
        config.validate()?;
        let size = config.population_size;
        let elite_size = config.elite_size();

        let mut population: Vec<P::Individual> =
            (0..size).map(|_| problem.create_individual(rng)).collect();
        let mut best: Option<P::Individual> = None;
        let mut best_fitness = f64::NEG_INFINITY;
        let mut history = Vec::with_capacity(config.max_generations);

        for generation in 0..config.max_generations {
            for individual in population.iter_mut() {
                let fitness = ensure_finite(problem.evaluate(individual))?;
                individual.set_fitness(fitness);
            }
            population.sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));

            let leader = &population[0];
            if leader.fitness() > best_fitness {
                best_fitness = leader.fitness();
                best = Some(leader.clone());
            }
            history.push(leader.fitness());
            tracing::debug!(
                generation,
                leader = leader.fitness(),
                best = best_fitness,
                "generation evaluated"
            );

            if generation + 1 == config.max_generations {
                break;
            }

            population.truncate(elite_size);
            while population.len() < size {
                let (i, j) = pick_parents(elite_size, rng);
                let mut child = problem.crossover(&population[i], &population[j], rng);
                if rng.random_bool(config.mutation_rate) {
                    problem.mutate(&mut child, rng);
                }
                population.push(child);
            }
        }

        let best = best.ok_or_else(|| {
            SeatingError::SearchRuntimeFailure("no generation produced an individual".into())
        })?;
        Ok(GaResult {
            best,
            best_fitness,
            generations: history.len(),
            history,
        })
    }
}

/// Two distinct elite indices, or the sole elite twice.
fn pick_parents<R: Rng>(elite_size: usize, rng: &mut R) -> (usize, usize) {
    if elite_size < 2 {
        return (0, 0);
    }
    let picked = index::sample(rng, elite_size, 2);
    (picked.index(0), picked.index(1))
}
