//! Builder API for declaring a machine up front.
//!
//! This module provides a fluent builder that validates a whole definition
//! in one pass, and a macro for generating state kind enums.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::MachineBuilder;
