//! SQL text and bindable parameters. Statements are fixed strings; values always travel as parameters.

pub mod params;
pub mod queries;
pub use params::*;
