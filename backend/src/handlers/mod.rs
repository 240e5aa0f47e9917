//! HTTP request handlers for the Crop Yield Advisor

pub mod health;
pub mod predict;

pub use health::health_check;
pub use predict::{handle_predict, show_form};
