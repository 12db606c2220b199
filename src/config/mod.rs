//! Environment-driven settings plus crate-wide constants.

mod constants;
mod settings;

pub use constants::*;
pub use settings::Config;
