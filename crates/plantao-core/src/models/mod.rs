//! Domain models for the shift board.

mod candidacy;
mod patient;
mod professional;
mod slot;
mod text;

pub use candidacy::*;
pub use patient::*;
pub use professional::*;
pub use slot::*;
pub use text::*;
