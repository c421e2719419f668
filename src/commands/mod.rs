//! CLI command implementations.

pub mod check;
pub mod inspect;

pub use check::CheckCommand;
pub use inspect::InspectCommand;
