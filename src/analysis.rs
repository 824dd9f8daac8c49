//! Seating quality metrics and per-student relationship profiles.
//!
//! Produces the structured data behind seating reports and class
//! overviews. Formatting is left to the caller.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Friendship pair nearby | edge `w > 0`, seats at distance ≤ 2 |
//! | Conflict pair separated | edge `w < 0`, seats at distance > 2 |
//! | Popular | in-degree ≥ 30% of the class |
//! | Isolated | in-degree ≤ 1 |
//! | Low-mentioned | in-degree ≤ 2 |

use serde::{Deserialize, Serialize};

use crate::models::{ClassroomLayout, RelationshipGraph, Seating};
use crate::scoring::{Score, ScoreBreakdown, SeatingScorer};

/// Seat distance at or below which a pair counts as "nearby".
pub const NEARBY_DISTANCE: f64 = 2.0;
/// Share of the class a nearby-friendship count must exceed to be "well placed".
pub const FRIENDSHIP_COVERAGE_RATIO: f64 = 0.3;
/// Share of the class that must mention a student for them to be "popular".
pub const POPULARITY_RATIO: f64 = 0.3;
/// Size of the popularity ranking in [`ClassOverview`].
pub const RANKING_SIZE: usize = 5;

/// A seated pair and how far apart they sit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairDistance {
    /// Student stating the relationship.
    pub from: String,
    /// Student the relationship is about.
    pub to: String,
    /// Seat distance.
    pub distance: f64,
    /// Edge weight (affinity strength or conflict level).
    pub weight: f64,
}

/// Advice derived from a seating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    /// Enough friendship pairs sit close together.
    FriendsWellPlaced,
    /// Too few friendship pairs sit close together.
    MoveFriendsCloser,
    /// At least one conflict pair is kept apart.
    ConflictsSeparated,
}

/// Seating quality indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatingKpi {
    /// Total score.
    pub total_score: Score,
    /// Score by term family.
    pub breakdown: ScoreBreakdown,
    /// Students seated.
    pub seated: usize,
    /// Positive pairs within [`NEARBY_DISTANCE`].
    pub friendship_pairs_nearby: Vec<PairDistance>,
    /// Negative pairs beyond [`NEARBY_DISTANCE`].
    pub conflict_pairs_separated: Vec<PairDistance>,
    /// Advice, in fixed order.
    pub recommendations: Vec<Recommendation>,
}

impl SeatingKpi {
    /// Computes indicators for a seating.
    pub fn calculate(
        seating: &Seating,
        graph: &RelationshipGraph,
        layout: &ClassroomLayout,
    ) -> Self {
        let scorer = SeatingScorer::new(graph, layout);
        let breakdown = scorer.breakdown(seating);

        let seat_of = |name: &str| seating.seat_index_of(name).and_then(|i| layout.seat(i));

        let mut friendship_pairs_nearby = Vec::new();
        let mut conflict_pairs_separated = Vec::new();
        for (from, to, weight) in graph.edges() {
            let (Some(a), Some(b)) = (seat_of(from), seat_of(to)) else {
                continue;
            };
            let distance = a.distance(&b);
            if weight > 0.0 && distance <= NEARBY_DISTANCE {
                friendship_pairs_nearby.push(PairDistance {
                    from: from.to_string(),
                    to: to.to_string(),
                    distance,
                    weight,
                });
            } else if weight < 0.0 && distance > NEARBY_DISTANCE {
                conflict_pairs_separated.push(PairDistance {
                    from: from.to_string(),
                    to: to.to_string(),
                    distance,
                    weight: weight.abs(),
                });
            }
        }

        let mut recommendations = Vec::new();
        let threshold = graph.student_count() as f64 * FRIENDSHIP_COVERAGE_RATIO;
        if friendship_pairs_nearby.len() as f64 > threshold {
            recommendations.push(Recommendation::FriendsWellPlaced);
        } else {
            recommendations.push(Recommendation::MoveFriendsCloser);
        }
        if !conflict_pairs_separated.is_empty() {
            recommendations.push(Recommendation::ConflictsSeparated);
        }

        Self {
            total_score: breakdown.total(),
            breakdown,
            seated: seating.occupied_count(),
            friendship_pairs_nearby,
            conflict_pairs_separated,
            recommendations,
        }
    }
}

/// Relationship profile of one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    /// Student name.
    pub student: String,
    /// Outgoing affinities, strongest first.
    pub positive: Vec<(String, f64)>,
    /// Outgoing conflicts as absolute levels, strongest first.
    pub negative: Vec<(String, f64)>,
    /// Incoming mentions, strongest first.
    pub mentioned_by: Vec<(String, f64)>,
    /// Positive targets who mention this student back.
    pub mutual: Vec<String>,
    /// In-degree.
    pub popularity: usize,
    /// Out-degree.
    pub sociability: usize,
    /// Mentioned by at least [`POPULARITY_RATIO`] of the class.
    pub is_popular: bool,
    /// Mentioned by at most one student.
    pub is_isolated: bool,
    /// Mentioned by at most two students.
    pub is_low_mentioned: bool,
}

impl StudentProfile {
    /// Builds the profile, or `None` if the student is not in the graph.
    pub fn calculate(graph: &RelationshipGraph, student: &str) -> Option<Self> {
        if !graph.contains(student) {
            return None;
        }

        let mut positive = Vec::new();
        let mut negative = Vec::new();
        for (to, w) in graph.outgoing(student) {
            if w > 0.0 {
                positive.push((to.to_string(), w));
            } else {
                negative.push((to.to_string(), w.abs()));
            }
        }
        let mut mentioned_by: Vec<(String, f64)> = graph
            .incoming(student)
            .into_iter()
            .map(|(from, w)| (from.to_string(), w))
            .collect();
        sort_by_strength(&mut positive);
        sort_by_strength(&mut negative);
        sort_by_strength(&mut mentioned_by);

        let mutual = positive
            .iter()
            .filter(|(friend, _)| graph.has_edge(friend, student))
            .map(|(friend, _)| friend.clone())
            .collect();

        let popularity = graph.in_degree(student);
        Some(Self {
            student: student.to_string(),
            positive,
            negative,
            mentioned_by,
            mutual,
            popularity,
            sociability: graph.out_degree(student),
            is_popular: popularity as f64 >= graph.student_count() as f64 * POPULARITY_RATIO,
            is_isolated: popularity <= 1,
            is_low_mentioned: popularity <= 2,
        })
    }
}

fn sort_by_strength(pairs: &mut [(String, f64)]) {
    pairs.sort_by(|a, b| b.1.total_cmp(&a.1));
}

/// Whole-class summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassOverview {
    /// Most-mentioned students with their in-degree, top [`RANKING_SIZE`].
    pub popularity_ranking: Vec<(String, usize)>,
    /// Students mentioned by at most one peer.
    pub isolated: Vec<String>,
    /// Students mentioned by exactly two peers.
    pub low_mentioned: Vec<String>,
    /// Class size.
    pub total_students: usize,
    /// Distinct relationship edges.
    pub total_relationships: usize,
    /// Edges per student.
    pub average_relationships: f64,
}

impl ClassOverview {
    /// Summarizes a graph.
    pub fn calculate(graph: &RelationshipGraph) -> Self {
        let profiles: Vec<StudentProfile> = graph
            .students()
            .iter()
            .filter_map(|s| StudentProfile::calculate(graph, s))
            .collect();

        let mut popularity_ranking: Vec<(String, usize)> = profiles
            .iter()
            .map(|p| (p.student.clone(), p.popularity))
            .collect();
        // Stable: ties keep roster order
        popularity_ranking.sort_by(|a, b| b.1.cmp(&a.1));
        popularity_ranking.truncate(RANKING_SIZE);

        let isolated = profiles
            .iter()
            .filter(|p| p.is_isolated)
            .map(|p| p.student.clone())
            .collect();
        let low_mentioned = profiles
            .iter()
            .filter(|p| p.is_low_mentioned && !p.is_isolated)
            .map(|p| p.student.clone())
            .collect();

        let total_students = graph.student_count();
        let total_relationships = graph.edge_count();
        let average_relationships = if total_students == 0 {
            0.0
        } else {
            total_relationships as f64 / total_students as f64
        };

        Self {
            popularity_ranking,
            isolated,
            low_mentioned,
            total_students,
            total_relationships,
            average_relationships,
        }
    }
}
