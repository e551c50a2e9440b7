//! # Weightwise Core Types
//!
//! The foundational data structures shared by every other crate: weight
//! entries, the weight goal, the `Journal` that keeps entries in date order,
//! and the small enums used for units, chart ranges and BMI bands.

pub mod enums;
pub mod error;
pub mod journal;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{BmiCategory, TimeRange, WeekStart, WeightUnit};
pub use error::CoreError;
pub use journal::Journal;
pub use structs::{validate_weight, EntryId, NewEntry, WeightEntry, WeightGoal, MAX_WEIGHT_KG};
