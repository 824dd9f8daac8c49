//! Seating (solution) model.
//!
//! A seating is a partial injective mapping from seats to students, stored
//! as one slot per seat in the layout's enumeration order. Empty slots are
//! unoccupied seats, not errors.

use rand::Rng;
use rand::seq::{SliceRandom, index};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{ClassroomLayout, Seat};
use crate::scoring::Score;

/// Students placed on seats, indexed by seat enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seating {
    slots: Vec<Option<String>>,
}

/// Best seating found by a search, with its score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeatingResult {
    /// The seating.
    pub seating: Seating,
    /// Its score (higher = better).
    pub score: Score,
}

impl SeatingResult {
    /// Empty seating with score 0, returned for degenerate input.
    pub fn empty(total_seats: usize) -> Self {
        Self {
            seating: Seating::empty(total_seats),
            score: 0.0,
        }
    }
}

impl Seating {
    /// Creates a seating with every seat empty.
    pub fn empty(total_seats: usize) -> Self {
        Self {
            slots: vec![None; total_seats],
        }
    }

    /// Shuffles the roster and fills seats in enumeration order.
    ///
    /// Students beyond `total_seats` are dropped; callers must check
    /// capacity first.
    pub fn random<R: Rng>(students: &[String], total_seats: usize, rng: &mut R) -> Self {
        let mut order: Vec<&String> = students.iter().collect();
        order.shuffle(rng);

        if order.len() > total_seats {
            tracing::warn!(
                students = order.len(),
                seats = total_seats,
                "more students than seats, dropping the overflow"
            );
        }

        let mut seating = Self::empty(total_seats);
        for (slot, student) in seating.slots.iter_mut().zip(order) {
            *slot = Some(student.clone());
        }
        seating
    }

    /// Places `student` on seat `idx`.
    ///
    /// Returns `false` (and changes nothing) if the seat does not exist, is
    /// taken, or the student is already seated.
    pub fn place(&mut self, idx: usize, student: impl Into<String>) -> bool {
        let student = student.into();
        if self.seat_index_of(&student).is_some() {
            return false;
        }
        match self.slots.get_mut(idx) {
            Some(slot) if slot.is_none() => {
                *slot = Some(student);
                true
            }
            _ => false,
        }
    }

    /// Student on seat `idx`.
    pub fn student_at(&self, idx: usize) -> Option<&str> {
        self.slots.get(idx).and_then(|s| s.as_deref())
    }

    /// Seat index of `student`.
    pub fn seat_index_of(&self, student: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.as_deref() == Some(student))
    }

    /// Number of seats (occupied or not).
    pub fn total_seats(&self) -> usize {
        self.slots.len()
    }

    /// Number of seated students.
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Whether no student is seated.
    pub fn is_empty(&self) -> bool {
        self.occupied_count() == 0
    }

    /// Indices of occupied seats, ascending.
    pub fn occupied_indices(&self) -> Vec<usize> {
        self.iter().map(|(i, _)| i).collect()
    }

    /// Iterates `(seat index, student)` over occupied seats.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_deref().map(|name| (i, name)))
    }

    /// Occupied seats as grid coordinates.
    pub fn assignments<'a>(&'a self, layout: &ClassroomLayout) -> Vec<(Seat, &'a str)> {
        self.iter()
            .filter_map(|(i, name)| layout.seat(i).map(|seat| (seat, name)))
            .collect()
    }

    /// Exchanges the occupants of two seats.
    #[inline]
    pub fn swap(&mut self, i: usize, j: usize) {
        self.slots.swap(i, j);
    }

    /// Swaps the occupants of two distinct occupied seats chosen uniformly.
    ///
    /// Returns the swapped indices, or `None` if fewer than two are occupied.
    pub fn swap_random_pair<R: Rng>(&mut self, rng: &mut R) -> Option<(usize, usize)> {
        let occupied = self.occupied_indices();
        if occupied.len() < 2 {
            return None;
        }
        let picked = index::sample(rng, occupied.len(), 2);
        let (i, j) = (occupied[picked.index(0)], occupied[picked.index(1)]);
        self.swap(i, j);
        Some((i, j))
    }

    /// Whether every seated student appears exactly once.
    pub fn is_injective(&self) -> bool {
        let mut seen = HashSet::new();
        self.iter().all(|(_, name)| seen.insert(name))
    }

    pub(crate) fn slots(&self) -> &[Option<String>] {
        &self.slots
    }

    pub(crate) fn from_slots(slots: Vec<Option<String>>) -> Self {
        Self { slots }
    }
}
