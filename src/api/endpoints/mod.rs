//! API endpoint handlers, one module per resource.

pub mod diagnosis;
pub mod health;
pub mod results;
pub mod symptoms;
