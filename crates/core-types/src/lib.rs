pub mod error;
pub mod observation;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use observation::{DateRange, Observation, MAX_INDEX, MIN_INDEX};
