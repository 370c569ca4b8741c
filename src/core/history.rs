//! State transition history tracking.
//!
//! Keeps a bounded window of the most recent transitions a machine made,
//! for diagnostics and for drivers that branch on how a state was reached.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single state change.
///
/// The entry produced by `start` has no `from` state and no event.
///
/// # Example
///
/// ```rust
/// use hookstate::core::StateTransition;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: Some("Rotation"),
///     to: "MoveForward",
///     event: Some(1_u8),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.to, "MoveForward");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition<K, E> {
    /// The state being left, `None` for the initial entry
    pub from: Option<K>,
    /// The state being entered
    pub to: K,
    /// The event that caused the change, `None` for the initial entry
    pub event: Option<E>,
    /// When the change completed
    pub timestamp: DateTime<Utc>,
}

/// Bounded, ordered history of state transitions.
///
/// Once `capacity` records are held, recording a new one evicts the oldest.
/// A capacity of zero disables recording entirely.
///
/// # Example
///
/// ```rust
/// use hookstate::core::{StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let mut history = StateHistory::with_capacity(8);
///
/// history.record(StateTransition {
///     from: None,
///     to: "Stop",
///     event: None::<u8>,
///     timestamp: Utc::now(),
/// });
/// history.record(StateTransition {
///     from: Some("Stop"),
///     to: "Walk",
///     event: Some(1),
///     timestamp: Utc::now(),
/// });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![&"Stop", &"Walk"]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateHistory<K, E> {
    capacity: usize,
    transitions: VecDeque<StateTransition<K, E>>,
}

impl<K, E> StateHistory<K, E> {
    /// Create an empty history holding at most `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            transitions: VecDeque::with_capacity(capacity),
        }
    }

    /// Record a transition, evicting the oldest one when full.
    pub fn record(&mut self, transition: StateTransition<K, E>) {
        if self.capacity == 0 {
            return;
        }
        if self.transitions.len() == self.capacity {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Get the path of states traversed within the window.
    ///
    /// Starts with the `from` state of the oldest record when it has one,
    /// then the `to` state of each record.
    pub fn get_path(&self) -> Vec<&K> {
        let mut path = Vec::new();
        if let Some(from) = self.transitions.front().and_then(|t| t.from.as_ref()) {
            path.push(from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Duration between the oldest and newest record.
    ///
    /// Returns `None` if there are no records.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.front(), self.transitions.back()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Most recent record.
    pub fn last(&self) -> Option<&StateTransition<K, E>> {
        self.transitions.back()
    }

    /// Records in order, oldest first.
    pub fn transitions(&self) -> impl Iterator<Item = &StateTransition<K, E>> {
        self.transitions.iter()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}
