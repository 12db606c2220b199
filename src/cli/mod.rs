//! Command-line interface: `serve` runs the HTTP API, `migrate`
//! manages the schema.

pub mod args;

pub use args::{Cli, Commands};
