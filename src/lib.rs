//! Hookstate: a generic finite state machine engine.
//!
//! A machine is bound to one owner and holds one state per kind. States
//! react to their lifecycle through `on_enter`, `on_update` and `on_exit`
//! hooks, and transitions are looked up from an event identifier in a
//! per-state table or in a machine-wide any-state table.
//!
//! # Core Concepts
//!
//! - **Kind**: Tag naming one state behavior, via the `StateKind` trait
//! - **State**: Behavior with enter/update/exit hooks, via the `State` trait
//! - **Blueprint**: Binds kind, event, owner and payload types of a machine
//! - **Dispatch**: Submitting an event that may change the current state
//!
//! # Example
//!
//! ```rust
//! use hookstate::core::{Blueprint, Context, State};
//! use hookstate::machine::StateMachine;
//! use hookstate::state_enum;
//!
//! state_enum! {
//!     enum Light {
//!         Red,
//!         Green,
//!     }
//! }
//!
//! const TIMER: u8 = 0;
//!
//! struct Red;
//! impl State<Crossing> for Red {
//!     fn on_enter(&mut self, ctx: &mut Context<'_, Crossing>, _previous: Option<Light>) {
//!         *ctx.owner_mut() += 1;
//!     }
//! }
//!
//! struct Green;
//! impl State<Crossing> for Green {
//!     fn on_update(&mut self, ctx: &mut Context<'_, Crossing>) {
//!         ctx.dispatch(TIMER);
//!     }
//! }
//!
//! struct Crossing;
//! impl Blueprint for Crossing {
//!     type Kind = Light;
//!     type Event = u8;
//!     type Owner = u32;
//!     type Param = ();
//!
//!     fn create(kind: Light) -> Box<dyn State<Self>> {
//!         match kind {
//!             Light::Red => Box::new(Red),
//!             Light::Green => Box::new(Green),
//!         }
//!     }
//! }
//!
//! let mut machine = StateMachine::<Crossing>::new(0);
//! machine.add_transition(Light::Red, Light::Green, TIMER).unwrap();
//! machine.add_transition(Light::Green, Light::Red, TIMER).unwrap();
//!
//! machine.start(Light::Red).unwrap();
//! machine.dispatch(TIMER).unwrap();
//! assert_eq!(machine.current(), Some(Light::Green));
//!
//! machine.update().unwrap();
//! assert_eq!(machine.current(), Some(Light::Red));
//! assert_eq!(*machine.owner(), 2);
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use builder::{BuildError, MachineBuilder};
pub use config::MachineConfig;
pub use self::core::{Blueprint, Context, EventId, State, StateHistory, StateKind, StateTransition};
pub use machine::{Dispatch, MachineError, StateMachine};
