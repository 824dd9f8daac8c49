//! Directed, weighted relationship graph between students.
//!
//! Nodes are student names; an edge `from → to` carries the signed strength
//! of `from`'s stated relationship toward `to` (positive = affinity,
//! negative = conflict). Repeated mentions of the same ordered pair are
//! collapsed into one edge whose weight is the sum of all mentions.
//!
//! Students and edges are kept in insertion order so that every traversal
//! (and therefore every floating-point sum over edges) is reproducible.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Weight applied to a mention that carries no survey category.
pub const DEFAULT_RELATIONSHIP_WEIGHT: f64 = 1.0;

/// Survey categories for peer relationships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipKind {
    /// One of the student's closest friends.
    ClosestFriend,
    /// Someone the student asks for help.
    AsksForHelp,
    /// Someone the student talks to often.
    TalksOften,
    /// Someone the student has helped.
    Helped,
    /// Someone the student would like to be closer to.
    WantsToBeCloser,
    /// Someone the student has had a conflict with.
    Conflict,
}

impl RelationshipKind {
    /// All categories, strongest affinity first.
    pub const ALL: [RelationshipKind; 6] = [
        RelationshipKind::ClosestFriend,
        RelationshipKind::AsksForHelp,
        RelationshipKind::TalksOften,
        RelationshipKind::Helped,
        RelationshipKind::WantsToBeCloser,
        RelationshipKind::Conflict,
    ];

    /// Signed edge weight contributed by one mention of this kind.
    pub fn weight(self) -> f64 {
        match self {
            RelationshipKind::ClosestFriend => 5.0,
            RelationshipKind::AsksForHelp => 4.0,
            RelationshipKind::TalksOften => 3.0,
            RelationshipKind::Helped => 3.0,
            RelationshipKind::WantsToBeCloser => 2.0,
            RelationshipKind::Conflict => -2.0,
        }
    }
}

/// A single directed edge, as handed in by graph builders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Student stating the relationship.
    pub from: String,
    /// Student the relationship is about.
    pub to: String,
    /// Signed strength.
    pub weight: f64,
}

impl Relationship {
    /// Creates a relationship edge.
    pub fn new(from: impl Into<String>, to: impl Into<String>, weight: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
        }
    }

    /// Creates an edge weighted by a survey category.
    pub fn of_kind(from: impl Into<String>, to: impl Into<String>, kind: RelationshipKind) -> Self {
        Self::new(from, to, kind.weight())
    }
}

/// Directed relationship graph over students.
///
/// # Example
///
/// ```
/// use u_seating::models::{RelationshipGraph, RelationshipKind};
///
/// let mut graph = RelationshipGraph::new();
/// graph.add_mention("A", "B", RelationshipKind::ClosestFriend);
/// graph.add_mention("A", "B", RelationshipKind::TalksOften);
/// assert_eq!(graph.weight("A", "B"), Some(8.0));
/// assert_eq!(graph.out_degree("A"), 1);
/// assert_eq!(graph.in_degree("B"), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RelationshipGraph {
    students: Vec<String>,
    index: HashMap<String, usize>,
    /// Outgoing edges per student: (target index, accumulated weight).
    outgoing: Vec<Vec<(usize, f64)>>,
    in_degree: Vec<usize>,
}

impl RelationshipGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from a student roster and a list of edges.
    ///
    /// Edge endpoints missing from the roster are added as students.
    pub fn from_parts<S: Into<String>>(
        students: impl IntoIterator<Item = S>,
        relationships: impl IntoIterator<Item = Relationship>,
    ) -> Self {
        let mut graph = Self::new();
        for s in students {
            graph.add_student(s);
        }
        for r in relationships {
            graph.add_relationship(r.from, r.to, r.weight);
        }
        graph
    }

    /// Adds a student (no-op if already present). Returns its index.
    pub fn add_student(&mut self, name: impl Into<String>) -> usize {
        let name = name.into();
        if let Some(&idx) = self.index.get(&name) {
            return idx;
        }
        let idx = self.students.len();
        self.index.insert(name.clone(), idx);
        self.students.push(name);
        self.outgoing.push(Vec::new());
        self.in_degree.push(0);
        idx
    }

    /// Adds `weight` to the edge `from → to`, creating it if needed.
    ///
    /// Self mentions are ignored and return `false`.
    pub fn add_relationship(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        weight: f64,
    ) -> bool {
        let from = from.into();
        let to = to.into();
        if from == to {
            tracing::debug!(student = %from, "ignoring self relationship");
            return false;
        }
        let u = self.add_student(from);
        let v = self.add_student(to);

        if let Some(edge) = self.outgoing[u].iter_mut().find(|(t, _)| *t == v) {
            edge.1 += weight;
        } else {
            self.outgoing[u].push((v, weight));
            self.in_degree[v] += 1;
        }
        true
    }

    /// Records one survey mention of the given kind.
    pub fn add_mention(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        kind: RelationshipKind,
    ) -> bool {
        self.add_relationship(from, to, kind.weight())
    }

    /// Records one mention with no survey category, weighted
    /// [`DEFAULT_RELATIONSHIP_WEIGHT`].
    pub fn add_unclassified_mention(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> bool {
        self.add_relationship(from, to, DEFAULT_RELATIONSHIP_WEIGHT)
    }

    /// Students in insertion order.
    pub fn students(&self) -> &[String] {
        &self.students
    }

    /// Number of students.
    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    /// Number of distinct directed edges.
    pub fn edge_count(&self) -> usize {
        self.outgoing.iter().map(Vec::len).sum()
    }

    /// Whether the student is in the graph.
    pub fn contains(&self, student: &str) -> bool {
        self.index.contains_key(student)
    }

    /// Index of a student in [`students`](Self::students).
    pub fn index_of(&self, student: &str) -> Option<usize> {
        self.index.get(student).copied()
    }

    /// Accumulated weight of `from → to`, if the edge exists.
    pub fn weight(&self, from: &str, to: &str) -> Option<f64> {
        let u = self.index_of(from)?;
        let v = self.index_of(to)?;
        self.outgoing[u]
            .iter()
            .find(|(t, _)| *t == v)
            .map(|&(_, w)| w)
    }

    /// Whether the edge `from → to` exists.
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.weight(from, to).is_some()
    }

    /// Number of distinct students mentioning `student`.
    pub fn in_degree(&self, student: &str) -> usize {
        self.index_of(student).map_or(0, |i| self.in_degree[i])
    }

    /// Number of distinct students `student` mentions.
    pub fn out_degree(&self, student: &str) -> usize {
        self.index_of(student).map_or(0, |i| self.outgoing[i].len())
    }

    /// Iterates all edges as `(from, to, weight)` in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, f64)> + '_ {
        self.outgoing.iter().enumerate().flat_map(move |(u, targets)| {
            targets
                .iter()
                .map(move |&(v, w)| (self.students[u].as_str(), self.students[v].as_str(), w))
        })
    }

    /// Outgoing edges of `student` as `(to, weight)`.
    pub fn outgoing(&self, student: &str) -> Vec<(&str, f64)> {
        match self.index_of(student) {
            Some(u) => self.outgoing[u]
                .iter()
                .map(|&(v, w)| (self.students[v].as_str(), w))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Incoming edges of `student` as `(from, weight)`.
    pub fn incoming(&self, student: &str) -> Vec<(&str, f64)> {
        let Some(v) = self.index_of(student) else {
            return Vec::new();
        };
        self.outgoing
            .iter()
            .enumerate()
            .filter_map(|(u, targets)| {
                targets
                    .iter()
                    .find(|(t, _)| *t == v)
                    .map(|&(_, w)| (self.students[u].as_str(), w))
            })
            .collect()
    }

    pub(crate) fn edges_by_index(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.outgoing
            .iter()
            .enumerate()
            .flat_map(|(u, targets)| targets.iter().map(move |&(v, w)| (u, v, w)))
    }

    pub(crate) fn degrees_at(&self, idx: usize) -> (usize, usize) {
        (self.in_degree[idx], self.outgoing[idx].len())
    }
}
