//! Seating objective function.
//!
//! # Terms
//!
//! | Term | Condition | Contribution |
//! |------|-----------|--------------|
//! | Affinity | edge weight `w > 0`, both seated | `w / (1 + d)` |
//! | Conflict | edge weight `w ≤ 0`, both seated | `|w| · d` |
//! | Giver | in-degree < out-degree | `0.5 / (1 + |dt − 2|)` |
//! | Receiver | in-degree > out-degree | `0.3 / (1 + dt)` |
//!
//! `d` is the Euclidean distance between the two students' seats and `dt`
//! the distance from a student's seat to the teacher anchor. Higher is
//! better. Scores are only comparable within one graph and layout.
//!
//! Edges are visited in graph insertion order and students in seat order,
//! so the same inputs always produce a bit-identical sum.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SeatingError};
use crate::models::{ClassroomLayout, RelationshipGraph, Seat, Seating, TeacherAnchor};

/// Scalar fitness of a seating (higher = better).
pub type Score = f64;

/// Weight of the teacher term for students who mention more than they are mentioned.
pub const GIVER_WEIGHT: f64 = 0.5;
/// Preferred distance from the teacher for givers.
pub const GIVER_PREFERRED_DISTANCE: f64 = 2.0;
/// Weight of the teacher term for students mentioned more than they mention.
pub const RECEIVER_WEIGHT: f64 = 0.3;

/// Teacher-proximity preference derived from a student's degree balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeacherPreference {
    /// Gives more than receives: prefers mid distance.
    Giver,
    /// Receives more than gives: prefers proximity.
    Receiver,
    /// Balanced: no teacher term.
    Neutral,
}

impl TeacherPreference {
    /// Classifies a student from their in- and out-degree.
    pub fn from_degrees(in_degree: usize, out_degree: usize) -> Self {
        use std::cmp::Ordering;
        match in_degree.cmp(&out_degree) {
            Ordering::Less => TeacherPreference::Giver,
            Ordering::Greater => TeacherPreference::Receiver,
            Ordering::Equal => TeacherPreference::Neutral,
        }
    }

    /// Contribution for a seat at distance `dt` from the teacher.
    #[inline]
    pub fn reward(self, dt: f64) -> f64 {
        match self {
            TeacherPreference::Giver => {
                GIVER_WEIGHT * (1.0 / (1.0 + (dt - GIVER_PREFERRED_DISTANCE).abs()))
            }
            TeacherPreference::Receiver => RECEIVER_WEIGHT * (1.0 / (1.0 + dt)),
            TeacherPreference::Neutral => 0.0,
        }
    }
}

/// Contribution of one relationship edge at seat distance `d`.
#[inline]
pub fn relationship_reward(weight: f64, d: f64) -> f64 {
    if weight > 0.0 {
        weight * (1.0 / (1.0 + d))
    } else {
        weight.abs() * d
    }
}

/// Score split into its two families of terms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Sum of affinity and conflict terms.
    pub relationship: f64,
    /// Sum of giver and receiver terms.
    pub teacher: f64,
}

impl ScoreBreakdown {
    /// Total score.
    #[inline]
    pub fn total(&self) -> Score {
        self.relationship + self.teacher
    }
}

/// Scores seatings against a fixed graph and layout.
///
/// Precomputes the teacher anchor and each student's teacher preference
/// so repeated evaluation inside a search only walks edges and seats.
///
/// # Example
///
/// ```
/// use u_seating::models::{ClassroomLayout, RelationshipGraph, Seating, TeacherPosition};
/// use u_seating::scoring::SeatingScorer;
///
/// let mut graph = RelationshipGraph::new();
/// graph.add_relationship("A", "B", 5.0);
/// let layout = ClassroomLayout::new(2, 2, TeacherPosition::Front).unwrap();
///
/// let mut seating = Seating::empty(layout.total_seats());
/// seating.place(0, "A");
/// seating.place(1, "B");
///
/// let scorer = SeatingScorer::new(&graph, &layout);
/// assert!(scorer.score(&seating) > 2.5);
/// ```
#[derive(Debug, Clone)]
pub struct SeatingScorer<'a> {
    graph: &'a RelationshipGraph,
    layout: &'a ClassroomLayout,
    anchor: TeacherAnchor,
    preferences: Vec<TeacherPreference>,
}

impl<'a> SeatingScorer<'a> {
    /// Creates a scorer.
    pub fn new(graph: &'a RelationshipGraph, layout: &'a ClassroomLayout) -> Self {
        let preferences = (0..graph.student_count())
            .map(|i| {
                let (in_deg, out_deg) = graph.degrees_at(i);
                TeacherPreference::from_degrees(in_deg, out_deg)
            })
            .collect();
        Self {
            graph,
            layout,
            anchor: layout.teacher_anchor(),
            preferences,
        }
    }

    /// The graph being scored against.
    pub fn graph(&self) -> &'a RelationshipGraph {
        self.graph
    }

    /// The layout being scored against.
    pub fn layout(&self) -> &'a ClassroomLayout {
        self.layout
    }

    /// Teacher preference of a student (`Neutral` if not in the graph).
    pub fn preference(&self, student: &str) -> TeacherPreference {
        self.graph
            .index_of(student)
            .map_or(TeacherPreference::Neutral, |i| self.preferences[i])
    }

    /// Total score of a seating.
    pub fn score(&self, seating: &Seating) -> Score {
        self.breakdown(seating).total()
    }

    /// Score split into relationship and teacher terms.
    pub fn breakdown(&self, seating: &Seating) -> ScoreBreakdown {
        let mut out = ScoreBreakdown::default();
        if seating.is_empty() || self.graph.student_count() == 0 {
            return out;
        }

        // Seat of each graph student, if seated
        let mut seat_of: Vec<Option<Seat>> = vec![None; self.graph.student_count()];
        let mut seated: Vec<(usize, Seat)> = Vec::new();
        for (idx, name) in seating.iter() {
            if let (Some(g), Some(seat)) = (self.graph.index_of(name), self.layout.seat(idx)) {
                seat_of[g] = Some(seat);
                seated.push((g, seat));
            }
        }

        for (u, v, weight) in self.graph.edges_by_index() {
            if let (Some(a), Some(b)) = (seat_of[u], seat_of[v]) {
                out.relationship += relationship_reward(weight, a.distance(&b));
            }
        }

        for (g, seat) in seated {
            out.teacher += self.preferences[g].reward(seat.distance_to(&self.anchor));
        }

        out
    }
}

/// Scores a seating against a graph and layout.
///
/// Convenience for one-off evaluation; searches should hold a
/// [`SeatingScorer`] instead.
pub fn score(seating: &Seating, graph: &RelationshipGraph, layout: &ClassroomLayout) -> Score {
    SeatingScorer::new(graph, layout).score(seating)
}

/// Rejects scores that would poison comparisons inside a search.
pub(crate) fn ensure_finite(score: Score) -> Result<Score> {
    if score.is_finite() {
        Ok(score)
    } else {
        Err(SeatingError::SearchRuntimeFailure(format!(
            "non-finite score {score}; check relationship weights"
        )))
    }
}
