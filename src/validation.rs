//! Input validation for seating problems.
//!
//! Checks that a request can be searched before any search runs, and that
//! an externally supplied seating is consistent with its layout and graph.
//! Detects:
//! - Empty grids and empty rosters
//! - Fewer seats than students
//! - Seatings sized for a different layout
//! - Students seated twice or not in the graph

use std::collections::HashSet;

use crate::error::SeatingError;
use crate::models::{ClassroomLayout, RelationshipGraph, Seating};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The layout has no seats.
    EmptyLayout,
    /// The graph has no students.
    NoStudents,
    /// More students than seats.
    InsufficientSeats,
    /// Seating slot count differs from the layout's seat count.
    SeatCountMismatch,
    /// A student occupies more than one seat.
    DuplicateStudent,
    /// A seated student is not in the graph.
    UnknownStudent,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates that a graph can be seated in a layout.
///
/// Checks:
/// 1. The layout has at least one seat
/// 2. The graph has at least one student
/// 3. `total_seats >= student_count`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_request(graph: &RelationshipGraph, layout: &ClassroomLayout) -> ValidationResult {
    let mut errors = Vec::new();
    let seats = layout.total_seats();
    let students = graph.student_count();

    if seats == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyLayout,
            "Layout has no seats",
        ));
    }
    if students == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoStudents,
            "No students to seat",
        ));
    }
    if students > seats {
        errors.push(ValidationError::new(
            ValidationErrorKind::InsufficientSeats,
            format!(
                "{students} students but only {seats} seats ({}x{}); add at least {} seats",
                layout.rows(),
                layout.cols(),
                students - seats
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a seating against its layout and graph.
///
/// Checks:
/// 1. One slot per layout seat
/// 2. No student seated twice
/// 3. Every seated student is in the graph
pub fn validate_seating(
    seating: &Seating,
    graph: &RelationshipGraph,
    layout: &ClassroomLayout,
) -> ValidationResult {
    let mut errors = Vec::new();

    if seating.total_seats() != layout.total_seats() {
        errors.push(ValidationError::new(
            ValidationErrorKind::SeatCountMismatch,
            format!(
                "Seating has {} seats, layout has {}",
                seating.total_seats(),
                layout.total_seats()
            ),
        ));
    }

    let mut seen = HashSet::new();
    for (_, name) in seating.iter() {
        if !seen.insert(name) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateStudent,
                format!("Student '{name}' is seated more than once"),
            ));
        }
        if !graph.contains(name) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownStudent,
                format!("Student '{name}' is not in the relationship graph"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Folds request validation errors into a single [`SeatingError`].
///
/// A missing roster alone is `DegenerateInput`; anything else is
/// `InvalidLayout` carrying every message.
pub fn into_seating_error(errors: Vec<ValidationError>) -> SeatingError {
    if errors
        .iter()
        .all(|e| e.kind == ValidationErrorKind::NoStudents)
    {
        return SeatingError::DegenerateInput;
    }
    let message = errors
        .iter()
        .filter(|e| e.kind != ValidationErrorKind::NoStudents)
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    SeatingError::InvalidLayout(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TeacherPosition;

    fn roster(n: usize) -> RelationshipGraph {
        RelationshipGraph::from_parts((0..n).map(|i| format!("S{i}")), [])
    }

    #[test]
    fn test_valid_request() {
        let layout = ClassroomLayout::new(2, 2, TeacherPosition::Front).unwrap();
        assert!(validate_request(&roster(4), &layout).is_ok());
        assert!(validate_request(&roster(3), &layout).is_ok());
    }

    #[test]
    fn test_insufficient_seats() {
        let layout = ClassroomLayout::new(2, 2, TeacherPosition::Front).unwrap();
        let errors = validate_request(&roster(5), &layout).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::InsufficientSeats);
        assert!(errors[0].message.contains("5 students"));

        assert!(matches!(
            into_seating_error(errors),
            SeatingError::InvalidLayout(_)
        ));
    }

    #[test]
    fn test_no_students() {
        let layout = ClassroomLayout::new(2, 2, TeacherPosition::Front).unwrap();
        let errors = validate_request(&RelationshipGraph::new(), &layout).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NoStudents);
        assert_eq!(into_seating_error(errors), SeatingError::DegenerateInput);
    }

    #[test]
    fn test_valid_seating() {
        let layout = ClassroomLayout::new(2, 2, TeacherPosition::Front).unwrap();
        let graph = roster(2);
        let mut s = Seating::empty(4);
        s.place(0, "S0");
        s.place(3, "S1");
        assert!(validate_seating(&s, &graph, &layout).is_ok());
    }

    #[test]
    fn test_invalid_seating() {
        let layout = ClassroomLayout::new(2, 2, TeacherPosition::Front).unwrap();
        let graph = roster(2);
        let s = Seating::from_slots(vec![Some("S0".into()), Some("S0".into()), Some("X".into())]);

        let errors = validate_seating(&s, &graph, &layout).unwrap_err();
        let kinds: Vec<_> = errors.iter().map(|e| e.kind.clone()).collect();
        assert!(kinds.contains(&ValidationErrorKind::SeatCountMismatch));
        assert!(kinds.contains(&ValidationErrorKind::DuplicateStudent));
        assert!(kinds.contains(&ValidationErrorKind::UnknownStudent));
    }
}
