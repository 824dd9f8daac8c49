//! Seating GA problem definition.
//!
//! Implements [`GaProblem`] for seating optimization, bridging the domain
//! models (graph, layout) to the generic GA loop through a shared
//! [`SeatingScorer`].

use rand::Rng;

use super::chromosome::{SeatingChromosome, half_split_crossover, swap_mutation};
use super::GaProblem;
use crate::scoring::SeatingScorer;

/// GA problem definition for seating optimization.
///
/// Individuals are random seatings of the graph's roster; fitness is the
/// seating score.
pub struct SeatingGaProblem<'a> {
    scorer: &'a SeatingScorer<'a>,
}

impl<'a> SeatingGaProblem<'a> {
    /// Creates a problem scored by `scorer`.
    pub fn new(scorer: &'a SeatingScorer<'a>) -> Self {
        Self { scorer }
    }

    /// Roster being seated.
    pub fn students(&self) -> &'a [String] {
        self.scorer.graph().students()
    }

    /// Seats per individual.
    pub fn total_seats(&self) -> usize {
        self.scorer.layout().total_seats()
    }
}

impl GaProblem for SeatingGaProblem<'_> {
    type Individual = SeatingChromosome;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> SeatingChromosome {
        SeatingChromosome::random(self.students(), self.total_seats(), rng)
    }

    fn evaluate(&self, individual: &SeatingChromosome) -> f64 {
        self.scorer.score(&individual.seating)
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &SeatingChromosome,
        parent2: &SeatingChromosome,
        _rng: &mut R,
    ) -> SeatingChromosome {
        half_split_crossover(parent1, parent2, self.students())
    }

    fn mutate<R: Rng>(&self, individual: &mut SeatingChromosome, rng: &mut R) {
        swap_mutation(individual, rng);
    }
}
