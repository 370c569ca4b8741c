//! Errors reported by the state machine.

use crate::config::ConfigError;
use thiserror::Error;

/// Errors that can occur while configuring or driving a state machine.
///
/// Configuration errors come from registration calls, usage errors from
/// calling the run-loop entry points out of order. Neither leaves the
/// machine partially modified. An event with no matching transition is not
/// an error.
#[derive(Debug, Error)]
pub enum MachineError {
    #[error("Transition from state '{state}' on event {event} is already defined")]
    DuplicateTransition { state: String, event: String },

    #[error("Any-state transition on event {event} is already defined")]
    DuplicateAnyTransition { event: String },

    #[error("State '{state}' is already registered")]
    StateExists { state: String },

    #[error("State machine has not been started")]
    NotStarted,

    #[error("State machine already started in state '{state}'")]
    AlreadyStarted { state: String },

    #[error("Transition chain exceeded the maximum depth of {depth}")]
    ChainTooDeep { depth: usize },

    #[error("Invalid machine config: {0}")]
    Config(#[from] ConfigError),
}

impl MachineError {
    /// Whether the error was raised while registering states or transitions.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateTransition { .. }
                | Self::DuplicateAnyTransition { .. }
                | Self::StateExists { .. }
                | Self::Config(_)
        )
    }

    /// Whether the error comes from driving the machine out of order.
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Self::NotStarted | Self::AlreadyStarted { .. })
    }
}
