//! Shared utility functions.
//!
//! - `text`: case-insensitive keyword matching and whitespace cleanup

mod text;

pub use text::{first_match, lowercase_all, matches_any};
