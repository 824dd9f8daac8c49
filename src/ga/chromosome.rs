//! Seating chromosome and its genetic operators.
//!
//! # Encoding
//!
//! A chromosome is a full [`Seating`]: one slot per seat in the layout's
//! row-major enumeration, each holding at most one student. Operators work
//! on slot indices, so the crossover split point is the same for every
//! implementation that enumerates seats the same way.

use rand::Rng;
use std::collections::HashSet;

use super::Individual;
use crate::models::Seating;

/// Seating chromosome for the seating GA.
///
/// Higher fitness = better seating (maximization convention).
#[derive(Debug, Clone, PartialEq)]
pub struct SeatingChromosome {
    /// The encoded seating.
    pub seating: Seating,
    /// Fitness value (higher = better).
    pub fitness: f64,
}

impl Individual for SeatingChromosome {
    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}

impl SeatingChromosome {
    /// Wraps a seating with unevaluated fitness.
    pub fn new(seating: Seating) -> Self {
        Self {
            seating,
            fitness: f64::NEG_INFINITY,
        }
    }

    /// Creates a random chromosome (shuffled roster, seats in order).
    pub fn random<R: Rng>(students: &[String], total_seats: usize, rng: &mut R) -> Self {
        Self::new(Seating::random(students, total_seats, rng))
    }

    /// Validates the chromosome against the roster and seat count.
    ///
    /// Valid means: right number of slots, no student twice, only roster
    /// students, and every roster student seated when there is room.
    pub fn is_valid(&self, students: &[String], total_seats: usize) -> bool {
        if self.seating.total_seats() != total_seats || !self.seating.is_injective() {
            return false;
        }
        let roster: HashSet<&str> = students.iter().map(String::as_str).collect();
        if !self.seating.iter().all(|(_, name)| roster.contains(name)) {
            return false;
        }
        self.seating.occupied_count() == students.len().min(total_seats)
    }
}

// ======================== Crossover ========================

/// Half-split crossover.
///
/// Copies parent 1's occupants for the first half of the seat enumeration,
/// then fills every still-empty seat in enumeration order with parent 2's
/// occupant of that seat if unused, otherwise with the next unused student
/// from the roster in list order. The child is always injective and seats
/// `min(students, seats)` students.
pub fn half_split_crossover(
    p1: &SeatingChromosome,
    p2: &SeatingChromosome,
    students: &[String],
) -> SeatingChromosome {
    let total = p1.seating.total_seats();
    let split = total / 2;
    let mut slots: Vec<Option<String>> = vec![None; total];
    let mut used: HashSet<&str> = HashSet::with_capacity(students.len());

    for (idx, slot) in slots.iter_mut().enumerate().take(split) {
        if let Some(name) = p1.seating.student_at(idx) {
            if used.insert(name) {
                *slot = Some(name.to_string());
            }
        }
    }

    let mut pool = students.iter().map(String::as_str);
    for (idx, slot) in slots.iter_mut().enumerate() {
        if slot.is_some() {
            continue;
        }
        let donor = p2
            .seating
            .student_at(idx)
            .filter(|name| !used.contains(name));
        let pick = donor.or_else(|| pool.by_ref().find(|name| !used.contains(name)));
        match pick {
            Some(name) => {
                used.insert(name);
                *slot = Some(name.to_string());
            }
            None => break,
        }
    }

    SeatingChromosome::new(Seating::from_slots(slots))
}

// ======================== Mutation ========================

/// Swap mutation: exchanges the occupants of two distinct occupied seats.
pub fn swap_mutation<R: Rng>(chromosome: &mut SeatingChromosome, rng: &mut R) {
    if chromosome.seating.swap_random_pair(rng).is_some() {
        chromosome.fitness = f64::NEG_INFINITY;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn roster(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("S{i}")).collect()
    }

    fn chromosome(slots: &[Option<&str>]) -> SeatingChromosome {
        SeatingChromosome::new(Seating::from_slots(
            slots.iter().map(|s| s.map(str::to_string)).collect(),
        ))
    }

    #[test]
    fn test_random_chromosome() {
        let students = roster(5);
        let mut rng = SmallRng::seed_from_u64(42);
        let ch = SeatingChromosome::random(&students, 6, &mut rng);

        assert!(ch.is_valid(&students, 6));
        assert_eq!(ch.fitness, f64::NEG_INFINITY);
    }

    #[test]
    fn test_crossover_takes_first_half_from_parent1() {
        let students = roster(4);
        let p1 = chromosome(&[Some("S0"), Some("S1"), Some("S2"), Some("S3")]);
        let p2 = chromosome(&[Some("S3"), Some("S2"), Some("S1"), Some("S0")]);

        let child = half_split_crossover(&p1, &p2, &students);
        assert_eq!(child.seating.student_at(0), Some("S0"));
        assert_eq!(child.seating.student_at(1), Some("S1"));
        // p2's occupants of seats 2 and 3 (S1, S0) are taken; fall back to roster order
        assert_eq!(child.seating.student_at(2), Some("S2"));
        assert_eq!(child.seating.student_at(3), Some("S3"));
        assert!(child.is_valid(&students, 4));
    }

    #[test]
    fn test_crossover_prefers_parent2_for_second_half() {
        let students = roster(4);
        let p1 = chromosome(&[Some("S0"), Some("S1"), Some("S2"), Some("S3")]);
        let p2 = chromosome(&[Some("S1"), Some("S0"), Some("S3"), Some("S2")]);

        let child = half_split_crossover(&p1, &p2, &students);
        assert_eq!(child.seating.student_at(2), Some("S3"));
        assert_eq!(child.seating.student_at(3), Some("S2"));
    }

    #[test]
    fn test_crossover_fills_empty_first_half_seats() {
        let students = roster(3);
        // p1 leaves seat 1 empty; p2 seats S2 there
        let p1 = chromosome(&[Some("S0"), None, Some("S1"), Some("S2"), None, None]);
        let p2 = chromosome(&[None, Some("S2"), Some("S0"), Some("S1"), None, None]);

        let child = half_split_crossover(&p1, &p2, &students);
        assert_eq!(child.seating.student_at(0), Some("S0"));
        assert_eq!(child.seating.student_at(1), Some("S2"));
        assert_eq!(child.seating.student_at(2), Some("S1"));
        assert_eq!(child.seating.occupied_count(), 3);
        assert!(child.is_valid(&students, 6));
    }

    #[test]
    fn test_crossover_always_valid() {
        let students = roster(7);
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..200 {
            let p1 = SeatingChromosome::random(&students, 9, &mut rng);
            let p2 = SeatingChromosome::random(&students, 9, &mut rng);
            let child = half_split_crossover(&p1, &p2, &students);
            assert!(child.is_valid(&students, 9));
        }
    }

    #[test]
    fn test_swap_mutation_keeps_roster() {
        let students = roster(6);
        let mut rng = SmallRng::seed_from_u64(42);
        let mut ch = SeatingChromosome::random(&students, 8, &mut rng);
        ch.fitness = 3.0;

        swap_mutation(&mut ch, &mut rng);
        assert!(ch.is_valid(&students, 8));
        assert_eq!(ch.fitness, f64::NEG_INFINITY);
    }

    #[test]
    fn test_invalid_chromosome() {
        let students = roster(3);
        // S2 missing although there is room
        let ch = chromosome(&[Some("S0"), Some("S1"), None]);
        assert!(!ch.is_valid(&students, 3));
        // Wrong seat count
        assert!(!ch.is_valid(&students[..2], 4));
    }
}
