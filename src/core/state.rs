//! Identity traits for state kinds and event identifiers.
//!
//! A state kind is the tag that names one behavior in a machine. Kinds are
//! small `Copy` values (usually fieldless enums) so they can key the state
//! registry and be handed to hooks as "previous" and "next" states.

use std::fmt::Debug;
use std::hash::Hash;

/// Tag identifying one concrete state behavior.
///
/// At most one state instance exists per kind within a machine.
///
/// # Example
///
/// ```rust
/// use hookstate::core::StateKind;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Mode {
///     Idle,
///     Running,
///     Done,
/// }
///
/// impl StateKind for Mode {
///     fn name(&self) -> &str {
///         match self {
///             Self::Idle => "Idle",
///             Self::Running => "Running",
///             Self::Done => "Done",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Done)
///     }
/// }
///
/// assert_eq!(Mode::Running.name(), "Running");
/// assert!(Mode::Done.is_final());
/// ```
pub trait StateKind: Copy + Eq + Hash + Debug {
    /// Get the kind's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this kind marks a terminal state.
    ///
    /// The engine does not refuse transitions out of final states; this is
    /// a hint for drivers that stop ticking once the machine is done.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}

/// Identifier used to look up a transition.
///
/// Blanket-implemented, so plain integers and fieldless enums qualify.
pub trait EventId: Copy + Eq + Hash + Debug {}

impl<T: Copy + Eq + Hash + Debug> EventId for T {}
