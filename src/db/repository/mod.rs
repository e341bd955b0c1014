//! Repository layer: entity-scoped database operations.

mod diagnosis_result;

pub use diagnosis_result::*;
