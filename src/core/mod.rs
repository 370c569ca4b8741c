//! Core state machine types.
//!
//! This module contains the building blocks every machine is made of:
//! - Kind tags and event identifiers via `StateKind` and `EventId`
//! - State behaviors via the `State` trait, bundled by a `Blueprint`
//! - The `Context` handed to lifecycle hooks
//! - Bounded transition history

mod behavior;
mod context;
mod history;
mod state;

pub(crate) use context::Request;

pub use behavior::{Blueprint, State};
pub use context::Context;
pub use history::{StateHistory, StateTransition};
pub use state::{EventId, StateKind};
