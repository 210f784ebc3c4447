//! Parsers for specific command-line argument formats

mod filename;
pub use filename::*;
pub mod numbers;
