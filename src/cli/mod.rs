//! Command-line interface for refugee-digest.

mod commands;
pub mod helpers;
pub mod icons;

pub use commands::{is_verbose, run};
