//! Build errors for the state machine builder.

use crate::config::ConfigError;
use crate::machine::MachineError;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Errors that can occur when building a state machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Transition from state '{state}' on event {event} is declared more than once")]
    DuplicateTransition { state: String, event: String },

    #[error("Any-state transition on event {event} is declared more than once")]
    DuplicateAnyTransition { event: String },

    #[error("State '{state}' is used by a transition but never declared. Call .state({state})")]
    UndeclaredState { state: String },

    #[error("Invalid machine config: {0}")]
    Config(#[from] ConfigError),

    #[error("Machine definition has {} problem(s)", .0.len())]
    Invalid(Box<NonEmptyVec<BuildError>>),

    #[error(transparent)]
    Machine(#[from] MachineError),
}
