//! Classroom grid and teacher anchor.
//!
//! Seats form a zero-indexed `rows × cols` grid enumerated in row-major
//! order. The enumeration index is the canonical seat identifier used by
//! [`Seating`](super::Seating) and by the genetic crossover split point.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SeatingError};

/// Largest row or column count accepted at the request boundary.
pub const MAX_GRID_DIMENSION: usize = 8;

/// A seat coordinate in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Seat {
    /// Row (0 = front row).
    pub row: usize,
    /// Column.
    pub col: usize,
}

impl Seat {
    /// Creates a seat coordinate.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Euclidean distance to another seat.
    #[inline]
    pub fn distance(&self, other: &Seat) -> f64 {
        euclidean(self.point(), other.point())
    }

    /// Euclidean distance to the teacher anchor.
    #[inline]
    pub fn distance_to(&self, anchor: &TeacherAnchor) -> f64 {
        euclidean(self.point(), (anchor.row as f64, anchor.col as f64))
    }

    fn point(&self) -> (f64, f64) {
        (self.row as f64, self.col as f64)
    }
}

#[inline]
fn euclidean(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

/// Where the teacher stands relative to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeacherPosition {
    /// In front of row 0.
    #[default]
    Front,
    /// Behind the last row.
    Back,
    /// Unspecified; anchored at seat (0, 0).
    Other,
}

impl FromStr for TeacherPosition {
    type Err = SeatingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "front" => Ok(TeacherPosition::Front),
            "back" => Ok(TeacherPosition::Back),
            "other" => Ok(TeacherPosition::Other),
            _ => Err(SeatingError::InvalidLayout(format!(
                "unknown teacher position '{s}'"
            ))),
        }
    }
}

impl fmt::Display for TeacherPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TeacherPosition::Front => "front",
            TeacherPosition::Back => "back",
            TeacherPosition::Other => "other",
        };
        f.write_str(s)
    }
}

/// Virtual coordinate of the teacher; may lie outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherAnchor {
    /// Row (may be -1 or `rows`).
    pub row: i64,
    /// Column.
    pub col: i64,
}

/// Fixed rectangular classroom.
///
/// Built through [`ClassroomLayout::new`] or [`LayoutRequest::into_layout`];
/// not deserializable so the seat list always matches the dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassroomLayout {
    rows: usize,
    cols: usize,
    teacher_position: TeacherPosition,
    seats: Vec<Seat>,
}

impl ClassroomLayout {
    /// Creates a layout and enumerates its seats in row-major order.
    ///
    /// # Errors
    /// `InvalidLayout` if `rows` or `cols` is zero.
    pub fn new(rows: usize, cols: usize, teacher_position: TeacherPosition) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(SeatingError::InvalidLayout(format!(
                "grid must be non-empty, got {rows}x{cols}"
            )));
        }
        let seats = (0..rows)
            .flat_map(|r| (0..cols).map(move |c| Seat::new(r, c)))
            .collect();
        Ok(Self {
            rows,
            cols,
            teacher_position,
            seats,
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `rows * cols`.
    pub fn total_seats(&self) -> usize {
        self.seats.len()
    }

    /// Configured teacher position.
    pub fn teacher_position(&self) -> TeacherPosition {
        self.teacher_position
    }

    /// All seats in row-major order.
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Seat at enumeration index `idx`.
    pub fn seat(&self, idx: usize) -> Option<Seat> {
        self.seats.get(idx).copied()
    }

    /// Enumeration index of a seat, if it lies in the grid.
    pub fn index_of(&self, seat: Seat) -> Option<usize> {
        (seat.row < self.rows && seat.col < self.cols).then(|| seat.row * self.cols + seat.col)
    }

    /// Coordinate the teacher-proximity terms are measured against.
    ///
    /// | Position | Anchor |
    /// |----------|--------|
    /// | Front | `(-1, cols / 2)` |
    /// | Back | `(rows, cols / 2)` |
    /// | Other | `(0, 0)` |
    pub fn teacher_anchor(&self) -> TeacherAnchor {
        let mid = (self.cols / 2) as i64;
        match self.teacher_position {
            TeacherPosition::Front => TeacherAnchor { row: -1, col: mid },
            TeacherPosition::Back => TeacherAnchor {
                row: self.rows as i64,
                col: mid,
            },
            TeacherPosition::Other => TeacherAnchor { row: 0, col: 0 },
        }
    }

    /// In-grid seats within Chebyshev distance `radius` of `seat`, excluding it.
    pub fn adjacent_seats(&self, seat: Seat, radius: usize) -> Vec<Seat> {
        let r_lo = seat.row.saturating_sub(radius);
        let r_hi = (seat.row + radius + 1).min(self.rows);
        let c_lo = seat.col.saturating_sub(radius);
        let c_hi = (seat.col + radius + 1).min(self.cols);

        (r_lo..r_hi)
            .flat_map(|r| (c_lo..c_hi).map(move |c| Seat::new(r, c)))
            .filter(|s| *s != seat)
            .collect()
    }
}

/// Layout parameters as received from a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutRequest {
    /// Rows (1..=8).
    pub rows: usize,
    /// Columns (1..=8).
    pub cols: usize,
    /// Teacher position.
    #[serde(default)]
    pub teacher_position: TeacherPosition,
}

impl LayoutRequest {
    /// Creates a request.
    pub fn new(rows: usize, cols: usize, teacher_position: TeacherPosition) -> Self {
        Self {
            rows,
            cols,
            teacher_position,
        }
    }

    /// Checks bounds and builds the layout.
    pub fn into_layout(self) -> Result<ClassroomLayout> {
        for (name, value) in [("rows", self.rows), ("cols", self.cols)] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                return Err(SeatingError::InvalidLayout(format!(
                    "{name} must be in 1..={MAX_GRID_DIMENSION}, got {value}"
                )));
            }
        }
        ClassroomLayout::new(self.rows, self.cols, self.teacher_position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_enumeration_row_major() {
        let layout = ClassroomLayout::new(2, 3, TeacherPosition::Front).unwrap();
        assert_eq!(layout.total_seats(), 6);
        assert_eq!(layout.seats()[0], Seat::new(0, 0));
        assert_eq!(layout.seats()[2], Seat::new(0, 2));
        assert_eq!(layout.seats()[3], Seat::new(1, 0));
        assert_eq!(layout.index_of(Seat::new(1, 2)), Some(5));
        assert_eq!(layout.index_of(Seat::new(2, 0)), None);
    }

    #[test]
    fn test_teacher_position_text() {
        for pos in [TeacherPosition::Front, TeacherPosition::Back, TeacherPosition::Other] {
            assert_eq!(pos.to_string().parse::<TeacherPosition>().unwrap(), pos);
        }
        assert_eq!(" BACK ".parse::<TeacherPosition>().unwrap(), TeacherPosition::Back);
        assert!(matches!(
            "window".parse::<TeacherPosition>(),
            Err(SeatingError::InvalidLayout(_))
        ));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(matches!(
            ClassroomLayout::new(0, 3, TeacherPosition::Front),
            Err(SeatingError::InvalidLayout(_))
        ));
        assert!(ClassroomLayout::new(3, 0, TeacherPosition::Back).is_err());
    }

    #[test]
    fn test_teacher_anchor() {
        let front = ClassroomLayout::new(4, 5, TeacherPosition::Front).unwrap();
        assert_eq!(front.teacher_anchor(), TeacherAnchor { row: -1, col: 2 });

        let back = ClassroomLayout::new(4, 5, TeacherPosition::Back).unwrap();
        assert_eq!(back.teacher_anchor(), TeacherAnchor { row: 4, col: 2 });

        let other = ClassroomLayout::new(4, 5, TeacherPosition::Other).unwrap();
        assert_eq!(other.teacher_anchor(), TeacherAnchor { row: 0, col: 0 });
    }

    #[test]
    fn test_teacher_position_parse() {
        assert_eq!("front".parse::<TeacherPosition>().unwrap(), TeacherPosition::Front);
        assert_eq!(" Back ".parse::<TeacherPosition>().unwrap(), TeacherPosition::Back);
        assert!(matches!(
            "side".parse::<TeacherPosition>(),
            Err(SeatingError::InvalidLayout(_))
        ));
    }

    #[test]
    fn test_distances() {
        let a = Seat::new(0, 0);
        let b = Seat::new(2, 2);
        assert!((a.distance(&b) - 8f64.sqrt()).abs() < 1e-12);
        let anchor = TeacherAnchor { row: -1, col: 0 };
        assert!((a.distance_to(&anchor) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_adjacent_seats() {
        let layout = ClassroomLayout::new(3, 3, TeacherPosition::Front).unwrap();
        assert_eq!(layout.adjacent_seats(Seat::new(1, 1), 1).len(), 8);
        let corner = layout.adjacent_seats(Seat::new(0, 0), 1);
        assert_eq!(corner, vec![Seat::new(0, 1), Seat::new(1, 0), Seat::new(1, 1)]);
        assert_eq!(layout.adjacent_seats(Seat::new(0, 0), 2).len(), 8);
    }

    #[test]
    fn test_layout_request_bounds() {
        assert!(LayoutRequest::new(8, 8, TeacherPosition::Front).into_layout().is_ok());
        assert!(LayoutRequest::new(9, 3, TeacherPosition::Front).into_layout().is_err());
        assert!(LayoutRequest::new(3, 0, TeacherPosition::Front).into_layout().is_err());
    }

    #[test]
    fn test_layout_request_deserialize() {
        let req: LayoutRequest =
            serde_json::from_str(r#"{"rows":3,"cols":4,"teacher_position":"back"}"#).unwrap();
        assert_eq!(req.teacher_position, TeacherPosition::Back);
        let req: LayoutRequest = serde_json::from_str(r#"{"rows":3,"cols":4}"#).unwrap();
        assert_eq!(req.teacher_position, TeacherPosition::Front);
    }
}
