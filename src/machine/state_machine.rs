//! State machine that owns the state registry and drives the hooks.

use crate::config::MachineConfig;
use crate::core::{Blueprint, Context, Request, State, StateHistory, StateKind, StateTransition};
use crate::machine::error::MachineError;
use crate::machine::table::TransitionTable;
use chrono::Utc;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Result of a successful `dispatch` call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch<K> {
    /// A transition matched and ran
    Transitioned { from: K, to: K },

    /// No transition matched, nothing changed
    Ignored,
}

impl<K> Dispatch<K> {
    /// Check if a transition ran
    pub fn is_transitioned(&self) -> bool {
        matches!(self, Self::Transitioned { .. })
    }
}

/// Registry entry for one kind.
struct Slot<B: Blueprint> {
    state: Box<dyn State<B>>,
    transitions: TransitionTable<B::Kind, B::Event>,
    param: Option<B::Param>,
}

impl<B: Blueprint> Slot<B> {
    fn new(state: Box<dyn State<B>>) -> Self {
        Self {
            state,
            transitions: TransitionTable::new(),
            param: None,
        }
    }
}

/// Finite state machine bound to one owner.
///
/// States are created once, on first registration of their kind, and live as
/// long as the machine. Transitions are declared per state with
/// [`add_transition`](Self::add_transition) or for every state at once with
/// [`add_any_transition`](Self::add_any_transition). Any-state transitions
/// are checked first, so they shadow a per-state transition on the same
/// event.
///
/// The machine is single-threaded: one driver calls [`start`](Self::start)
/// once, then [`update`](Self::update) once per tick, and
/// [`dispatch`](Self::dispatch) whenever something happens.
pub struct StateMachine<B: Blueprint> {
    owner: B::Owner,
    states: HashMap<B::Kind, Slot<B>>,
    any_transitions: TransitionTable<B::Kind, B::Event>,
    current: Option<B::Kind>,
    history: StateHistory<B::Kind, B::Event>,
    config: MachineConfig,
}

impl<B: Blueprint> StateMachine<B> {
    /// Create an unstarted machine with the default config.
    pub fn new(owner: B::Owner) -> Self {
        Self::build(owner, MachineConfig::default())
    }

    /// Create an unstarted machine with a validated config.
    pub fn with_config(owner: B::Owner, config: MachineConfig) -> Result<Self, MachineError> {
        config.validate()?;
        Ok(Self::build(owner, config))
    }

    fn build(owner: B::Owner, config: MachineConfig) -> Self {
        Self {
            owner,
            states: HashMap::new(),
            any_transitions: TransitionTable::new(),
            current: None,
            history: StateHistory::with_capacity(config.history_capacity),
            config,
        }
    }

    /// Register `kind`, creating its state unless it already exists.
    pub fn add(&mut self, kind: B::Kind) {
        self.get_or_create(kind);
    }

    /// Register a pre-built state for `kind`.
    ///
    /// The first registration of a kind wins; a second one is rejected.
    pub fn insert(&mut self, kind: B::Kind, state: Box<dyn State<B>>) -> Result<(), MachineError> {
        match self.states.entry(kind) {
            Entry::Occupied(_) => Err(MachineError::StateExists {
                state: kind.name().to_string(),
            }),
            Entry::Vacant(slot) => {
                tracing::debug!("Registered state {}", kind.name());
                slot.insert(Slot::new(state));
                Ok(())
            }
        }
    }

    /// Declare that `event` moves the machine from `from` to `to`.
    ///
    /// Both states are created if missing. A second transition for the same
    /// `(from, event)` pair is rejected and nothing is registered.
    pub fn add_transition(
        &mut self,
        from: B::Kind,
        to: B::Kind,
        event: B::Event,
    ) -> Result<(), MachineError> {
        if self.transition(from, event).is_some() {
            return Err(MachineError::DuplicateTransition {
                state: from.name().to_string(),
                event: format!("{:?}", event),
            });
        }

        self.get_or_create(to);
        let inserted = self.get_or_create(from).transitions.insert(event, to);
        debug_assert!(inserted.is_ok());

        tracing::debug!(
            "Added transition {} -> {} on {:?}",
            from.name(),
            to.name(),
            event
        );
        Ok(())
    }

    /// Declare that `event` moves the machine to `to` from whatever state is
    /// current, including `to` itself.
    pub fn add_any_transition(&mut self, to: B::Kind, event: B::Event) -> Result<(), MachineError> {
        if self.any_transitions.contains(&event) {
            return Err(MachineError::DuplicateAnyTransition {
                event: format!("{:?}", event),
            });
        }

        self.get_or_create(to);
        let inserted = self.any_transitions.insert(event, to);
        debug_assert!(inserted.is_ok());

        tracing::debug!("Added any-state transition -> {} on {:?}", to.name(), event);
        Ok(())
    }

    /// Enter `first` and begin running.
    pub fn start(&mut self, first: B::Kind) -> Result<(), MachineError> {
        self.begin(first, None)
    }

    /// Enter `first` with `param` and begin running.
    pub fn start_with(&mut self, first: B::Kind, param: B::Param) -> Result<(), MachineError> {
        self.begin(first, Some(param))
    }

    fn begin(&mut self, first: B::Kind, param: Option<B::Param>) -> Result<(), MachineError> {
        if let Some(current) = self.current {
            return Err(MachineError::AlreadyStarted {
                state: current.name().to_string(),
            });
        }

        self.get_or_create(first).param = param;
        self.current = Some(first);
        self.record(None, first, None);

        tracing::debug!("Started in state {}", first.name());

        let requests = self.invoke(first, |state, ctx| state.on_enter(ctx, None));
        self.drain(requests, 1)
    }

    /// Run the current state's update hook.
    ///
    /// Dispatches requested by the hook run before this returns. A chain of
    /// them longer than `max_chain_depth` fails with
    /// [`MachineError::ChainTooDeep`]; transitions completed before the cut
    /// stay applied.
    pub fn update(&mut self) -> Result<(), MachineError> {
        let current = self.current.ok_or(MachineError::NotStarted)?;

        tracing::trace!("Updating state {}", current.name());

        let requests = self.invoke(current, |state, ctx| state.on_update(ctx));
        self.drain(requests, 1)
    }

    /// Submit `event` without a payload.
    ///
    /// The matched transition and every follow-up requested by its hooks run
    /// before this returns. If the follow-ups exceed `max_chain_depth` the
    /// result is [`MachineError::ChainTooDeep`], but this transition and the
    /// follow-ups completed before the cut stay applied and recorded.
    pub fn dispatch(&mut self, event: B::Event) -> Result<Dispatch<B::Kind>, MachineError> {
        self.fire(event, None)
    }

    /// Submit `event`, entering the destination with `param`.
    ///
    /// Same chain behavior as [`dispatch`](Self::dispatch).
    pub fn dispatch_with(
        &mut self,
        event: B::Event,
        param: B::Param,
    ) -> Result<Dispatch<B::Kind>, MachineError> {
        self.fire(event, Some(param))
    }

    fn fire(
        &mut self,
        event: B::Event,
        param: Option<B::Param>,
    ) -> Result<Dispatch<B::Kind>, MachineError> {
        let from = self.current.ok_or(MachineError::NotStarted)?;

        let Some(to) = self.resolve(from, event) else {
            tracing::trace!("Ignored event {:?} in state {}", event, from.name());
            return Ok(Dispatch::Ignored);
        };

        let requests = self.change(from, to, event, param);
        self.drain(requests, 1)?;

        Ok(Dispatch::Transitioned { from, to })
    }

    /// Run dispatches requested from hooks, depth-first.
    fn drain(&mut self, requests: Vec<Request<B>>, depth: usize) -> Result<(), MachineError> {
        for request in requests {
            let Some(from) = self.current else {
                continue;
            };

            let Some(to) = self.resolve(from, request.event) else {
                tracing::trace!("Ignored event {:?} in state {}", request.event, from.name());
                continue;
            };

            if depth > self.config.max_chain_depth {
                tracing::warn!(
                    "Transition chain cut at {} -> {} on {:?}: depth limit {} reached",
                    from.name(),
                    to.name(),
                    request.event,
                    self.config.max_chain_depth
                );
                return Err(MachineError::ChainTooDeep {
                    depth: self.config.max_chain_depth,
                });
            }

            let follow_ups = self.change(from, to, request.event, request.param);
            self.drain(follow_ups, depth + 1)?;
        }
        Ok(())
    }

    /// Exit `from`, switch to `to`, enter `to`.
    ///
    /// Returns the dispatches requested by both hooks, exit first.
    fn change(
        &mut self,
        from: B::Kind,
        to: B::Kind,
        event: B::Event,
        param: Option<B::Param>,
    ) -> Vec<Request<B>> {
        tracing::debug!("Transition {} -> {} on {:?}", from.name(), to.name(), event);

        let mut requests = self.invoke(from, |state, ctx| state.on_exit(ctx, Some(to)));

        if let Some(slot) = self.states.get_mut(&to) {
            slot.param = param;
        }
        self.current = Some(to);
        self.record(Some(from), to, Some(event));

        requests.extend(self.invoke(to, |state, ctx| state.on_enter(ctx, Some(from))));
        requests
    }

    fn invoke<F>(&mut self, kind: B::Kind, hook: F) -> Vec<Request<B>>
    where
        F: FnOnce(&mut (dyn State<B> + 'static), &mut Context<'_, B>),
    {
        let mut requests = Vec::new();
        if let Some(slot) = self.states.get_mut(&kind) {
            let Slot { state, param, .. } = slot;
            let mut ctx = Context::new(&mut self.owner, param.as_ref(), kind, &mut requests);
            hook(&mut **state, &mut ctx);
        }
        requests
    }

    /// Any-state table first, then the table of `from`.
    fn resolve(&self, from: B::Kind, event: B::Event) -> Option<B::Kind> {
        self.any_transitions
            .get(&event)
            .or_else(|| self.transition(from, event))
    }

    fn get_or_create(&mut self, kind: B::Kind) -> &mut Slot<B> {
        self.states.entry(kind).or_insert_with(|| {
            tracing::debug!("Registered state {}", kind.name());
            Slot::new(B::create(kind))
        })
    }

    fn record(&mut self, from: Option<B::Kind>, to: B::Kind, event: Option<B::Event>) {
        self.history.record(StateTransition {
            from,
            to,
            event,
            timestamp: Utc::now(),
        });
    }

    /// Kind of the active state, `None` before `start`.
    pub fn current(&self) -> Option<B::Kind> {
        self.current
    }

    /// Check if `kind` is the active state.
    pub fn is_in(&self, kind: B::Kind) -> bool {
        self.current == Some(kind)
    }

    /// Check if `start` has run.
    pub fn is_started(&self) -> bool {
        self.current.is_some()
    }

    /// Check if the active state is final.
    pub fn is_final(&self) -> bool {
        self.current.is_some_and(|kind| kind.is_final())
    }

    /// Payload the active state was entered with.
    pub fn param(&self) -> Option<&B::Param> {
        self.current
            .and_then(|kind| self.states.get(&kind))
            .and_then(|slot| slot.param.as_ref())
    }

    /// Get the owner (pure)
    pub fn owner(&self) -> &B::Owner {
        &self.owner
    }

    /// Get the owner for mutation between ticks.
    pub fn owner_mut(&mut self) -> &mut B::Owner {
        &mut self.owner
    }

    /// Whether a state exists for `kind`.
    pub fn contains(&self, kind: B::Kind) -> bool {
        self.states.contains_key(&kind)
    }

    /// Registered kinds, in no particular order.
    pub fn kinds(&self) -> impl Iterator<Item = B::Kind> + '_ {
        self.states.keys().copied()
    }

    /// Number of registered states.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Destination of the per-state transition `(from, event)`.
    pub fn transition(&self, from: B::Kind, event: B::Event) -> Option<B::Kind> {
        self.states
            .get(&from)
            .and_then(|slot| slot.transitions.get(&event))
    }

    /// Per-state transition table of `from`.
    pub fn transitions_from(&self, from: B::Kind) -> Option<&TransitionTable<B::Kind, B::Event>> {
        self.states.get(&from).map(|slot| &slot.transitions)
    }

    /// Destination of the any-state transition on `event`.
    pub fn any_transition(&self, event: B::Event) -> Option<B::Kind> {
        self.any_transitions.get(&event)
    }

    /// Any-state transition table.
    pub fn any_transitions(&self) -> &TransitionTable<B::Kind, B::Event> {
        &self.any_transitions
    }

    /// Get state history (pure)
    pub fn history(&self) -> &StateHistory<B::Kind, B::Event> {
        &self.history
    }

    /// Config the machine was created with.
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }
}
