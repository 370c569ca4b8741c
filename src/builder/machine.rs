//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::config::MachineConfig;
use crate::core::{Blueprint, StateKind};
use crate::machine::StateMachine;
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder that declares a whole machine, then validates it in one pass.
///
/// Unlike the registration calls on [`StateMachine`], which fail on the
/// first duplicate, [`validate`](Self::validate) reports every problem in
/// the definition at once. In [`strict`](Self::strict) mode every kind an
/// edge mentions must also be declared with [`state`](Self::state).
///
/// The built machine is not started.
pub struct MachineBuilder<B: Blueprint> {
    owner: B::Owner,
    config: MachineConfig,
    declared: Vec<B::Kind>,
    transitions: Vec<(B::Kind, B::Kind, B::Event)>,
    any_transitions: Vec<(B::Kind, B::Event)>,
    strict: bool,
}

impl<B: Blueprint> MachineBuilder<B> {
    /// Create a new builder for a machine bound to `owner`.
    pub fn new(owner: B::Owner) -> Self {
        Self {
            owner,
            config: MachineConfig::default(),
            declared: Vec::new(),
            transitions: Vec::new(),
            any_transitions: Vec::new(),
            strict: false,
        }
    }

    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Declare a state kind.
    pub fn state(mut self, kind: B::Kind) -> Self {
        self.declared.push(kind);
        self
    }

    /// Declare several state kinds at once.
    pub fn states<I>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = B::Kind>,
    {
        self.declared.extend(kinds);
        self
    }

    /// Add a per-state transition.
    pub fn transition(mut self, from: B::Kind, to: B::Kind, event: B::Event) -> Self {
        self.transitions.push((from, to, event));
        self
    }

    /// Add an any-state transition.
    pub fn any_transition(mut self, to: B::Kind, event: B::Event) -> Self {
        self.any_transitions.push((to, event));
        self
    }

    /// Require every kind used by a transition to be declared.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Check the definition, accumulating ALL problems.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<BuildError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<BuildError>>> = Vec::new();

        if let Err(err) = self.config.validate() {
            checks.push(Validation::fail(BuildError::Config(err)));
        }

        let mut seen = HashSet::new();
        for (from, _, event) in &self.transitions {
            if !seen.insert((*from, *event)) {
                checks.push(Validation::fail(BuildError::DuplicateTransition {
                    state: from.name().to_string(),
                    event: format!("{:?}", event),
                }));
            }
        }

        let mut seen_any = HashSet::new();
        for (_, event) in &self.any_transitions {
            if !seen_any.insert(*event) {
                checks.push(Validation::fail(BuildError::DuplicateAnyTransition {
                    event: format!("{:?}", event),
                }));
            }
        }

        if self.strict {
            let declared: HashSet<B::Kind> = self.declared.iter().copied().collect();
            let mut reported = HashSet::new();
            let used = self
                .transitions
                .iter()
                .flat_map(|(from, to, _)| [*from, *to])
                .chain(self.any_transitions.iter().map(|(to, _)| *to));

            for kind in used {
                if !declared.contains(&kind) && reported.insert(kind) {
                    checks.push(Validation::fail(BuildError::UndeclaredState {
                        state: kind.name().to_string(),
                    }));
                }
            }
        }

        if checks.is_empty() {
            return Validation::success(());
        }
        Validation::all_vec(checks).map(|_| ())
    }

    /// Build the state machine.
    /// Returns every validation problem if the definition is invalid.
    pub fn build(self) -> Result<StateMachine<B>, BuildError> {
        if let Validation::Failure(errors) = self.validate() {
            return Err(BuildError::Invalid(Box::new(errors)));
        }

        let mut machine = StateMachine::with_config(self.owner, self.config)?;
        for kind in self.declared {
            machine.add(kind);
        }
        for (from, to, event) in self.transitions {
            machine.add_transition(from, to, event)?;
        }
        for (to, event) in self.any_transitions {
            machine.add_any_transition(to, event)?;
        }

        Ok(machine)
    }
}
