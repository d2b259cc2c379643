//! Coverage reporting.

mod coverage;

pub use coverage::*;
