//! The state machine engine.
//!
//! Owns one state per kind, the per-state and any-state transition tables,
//! and the current-state pointer. Drivers call `start` once, then `update`
//! every tick and `dispatch` whenever an event occurs.
//!
//! # Dispatch order
//!
//! For a matching event the machine runs, in order:
//! 1. `on_exit` of the current state, told which state comes next
//! 2. the switch of the current-state pointer
//! 3. `on_enter` of the new state, told which state came before
//!
//! Dispatches requested from inside those hooks run right after, before the
//! outer call returns.

mod error;
mod state_machine;
mod table;

pub use error::MachineError;
pub use state_machine::{Dispatch, StateMachine};
pub use table::TransitionTable;
