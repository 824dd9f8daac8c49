//! Classroom seating optimization.
//!
//! Assigns students to a grid of seats so that friends sit close, students
//! in conflict sit apart, and students who tend to help (or need help) sit
//! at a useful distance from the teacher.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `RelationshipGraph`, `ClassroomLayout`,
//!   `Seat`, `Seating`, `SeatingResult`
//! - **`scoring`**: Seating objective (`SeatingScorer`, `score`)
//! - **`search`**: Greedy swap search and genetic search behind
//!   `SearchStrategy`
//! - **`ga`**: Generational GA loop and the seating encoding it evolves
//! - **`optimizer`**: `SeatingOptimizer` facade with `SearchConfig` and
//!   failure policy
//! - **`analysis`**: Seating KPIs and student/class relationship profiles
//! - **`validation`**: Request and seating integrity checks
//! - **`error`**: `SeatingError`
//!
//! # Example
//!
//! ```
//! use u_seating::models::{ClassroomLayout, RelationshipGraph, RelationshipKind, TeacherPosition};
//! use u_seating::optimizer::{SearchConfig, SeatingOptimizer, Strategy};
//!
//! let mut graph = RelationshipGraph::new();
//! graph.add_mention("Ana", "Ben", RelationshipKind::ClosestFriend);
//! graph.add_mention("Ana", "Cy", RelationshipKind::Conflict);
//! let layout = ClassroomLayout::new(2, 3, TeacherPosition::Front).unwrap();
//!
//! let optimizer = SeatingOptimizer::new(SearchConfig::default().with_seed(1));
//! let result = optimizer.optimize(&graph, &layout, Strategy::Greedy).unwrap();
//! assert_eq!(result.seating.occupied_count(), 3);
//! ```
//!
//! # References
//!
//! - Holland (1975), "Adaptation in Natural and Artificial Systems"
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization, and Machine Learning"

pub mod analysis;
pub mod error;
pub mod ga;
pub mod models;
pub mod optimizer;
pub mod scoring;
pub mod search;
pub mod validation;

pub use error::{Result, SeatingError};
