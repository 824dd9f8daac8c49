//! Typed errors for layout, configuration, and search failures.

use thiserror::Error;

/// Errors surfaced by seating optimization.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeatingError {
    /// Grid dimensions are invalid or there are fewer seats than students.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// Search configuration is out of range.
    #[error("invalid search config: {0}")]
    InvalidConfig(String),

    /// No students to seat or no seats to fill.
    #[error("degenerate input: no students or no seats")]
    DegenerateInput,

    /// The search aborted mid-run (e.g. a non-finite score).
    #[error("search failed: {0}")]
    SearchRuntimeFailure(String),
}

/// Result type alias for seating operations.
pub type Result<T> = std::result::Result<T, SeatingError>;
