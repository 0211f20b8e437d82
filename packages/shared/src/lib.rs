//! Utilities shared by the Sajiki crates: logger setup and clock abstraction.

pub mod logger;
pub mod time;
