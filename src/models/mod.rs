//! Seating domain models.
//!
//! Provides the data types for a seating problem and its solutions.
//!
//! | Type | Role |
//! |------|------|
//! | `RelationshipGraph` | Who likes / conflicts with whom (input, read-only) |
//! | `ClassroomLayout` | Seat grid and teacher anchor (input, read-only) |
//! | `Seating` | Partial injective seat → student mapping (solution) |
//! | `SeatingResult` | Best seating plus its score (output) |

mod graph;
mod layout;
mod seating;

pub use graph::{DEFAULT_RELATIONSHIP_WEIGHT, Relationship, RelationshipGraph, RelationshipKind};
pub use layout::{
    ClassroomLayout, LayoutRequest, MAX_GRID_DIMENSION, Seat, TeacherAnchor, TeacherPosition,
};
pub use seating::{Seating, SeatingResult};
