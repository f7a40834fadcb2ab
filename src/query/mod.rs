//! Parametrized SQL generation.
//!
//! Builders here only produce text and bind lists; nothing touches the
//! store. Table and column names are compile-time constants supplied by
//! callers, every value travels as a positional parameter (`$1`, `$2`, …),
//! so no caller-provided number is ever spliced into statement text.
mod bind;
mod select;

pub use bind::*;
pub use select::*;
