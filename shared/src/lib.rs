//! Shared types and models for the Crop Yield Advisor
//!
//! This crate contains the domain types shared between the backend and any
//! other components of the system: the typed field observation, the yield
//! regression model, and the validation helpers. It performs no IO.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
