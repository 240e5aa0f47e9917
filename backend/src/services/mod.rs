//! Business logic services for the Crop Yield Advisor

pub mod prediction;
pub mod recommendation;

pub use prediction::{ModelState, PredictionService};
pub use recommendation::Recommender;
