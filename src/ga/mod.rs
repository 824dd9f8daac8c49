//! GA-based seating optimization.
//!
//! A small generational GA ([`GaRunner`]) driven by problem hooks
//! ([`GaProblem`]), plus the seating-specific encoding and operators.
//!
//! # Encoding
//!
//! An individual is a complete [`Seating`](crate::models::Seating) laid
//! out in seat enumeration order.
//!
//! # Operators
//!
//! - **Crossover**: [`half_split_crossover`]: first half of the seats from
//!   parent 1, the rest from parent 2 where possible, then the roster.
//! - **Mutation**: [`swap_mutation`]: swap two occupied seats.
//!
//! # Selection
//!
//! Truncation: the top half survives unchanged; parents are drawn uniformly
//! from the survivors.

mod chromosome;
mod problem;
mod runner;

pub use chromosome::{SeatingChromosome, half_split_crossover, swap_mutation};
pub use problem::SeatingGaProblem;
pub use runner::{GaConfig, GaProblem, GaResult, GaRunner, Individual};
