//! Runtime limits for a state machine.

use serde::{Deserialize, Serialize};

pub mod error;

pub use error::ConfigError;

/// Default bound on follow-on transitions triggered from hooks
pub const DEFAULT_MAX_CHAIN_DEPTH: usize = 32;

/// Default number of history records kept
pub const DEFAULT_HISTORY_CAPACITY: usize = 16;

/// Per-machine settings.
///
/// Missing fields take their defaults when deserializing.
///
/// # Example
///
/// ```rust
/// use hookstate::config::MachineConfig;
///
/// let config = MachineConfig::from_json(r#"{ "history_capacity": 0 }"#).unwrap();
/// assert_eq!(config.history_capacity, 0);
/// assert_eq!(config.max_chain_depth, 32);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// How many transitions requested from hooks may nest inside one
    /// `start`, `update` or `dispatch` call
    pub max_chain_depth: usize,

    /// How many transition records the history keeps (0 disables it)
    pub history_capacity: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            max_chain_depth: DEFAULT_MAX_CHAIN_DEPTH,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl MachineConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_chain_depth == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_chain_depth",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn with_max_chain_depth(mut self, depth: usize) -> Self {
        self.max_chain_depth = depth;
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }
}
