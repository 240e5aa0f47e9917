//! Domain models for the Crop Yield Advisor

mod observation;
mod regression;

pub use observation::*;
pub use regression::*;
