//! State behaviors and the blueprint that ties a machine family together.

use super::context::Context;
use super::state::{EventId, StateKind};

/// Declares the types one family of state machines works with.
///
/// A blueprint is usually a unit struct. It names the kind enumeration, the
/// event identifier, the owner handle the states act upon, and the payload
/// type carried by `start_with`/`dispatch_with`. It also knows how to build
/// the state instance for each kind, which is what makes get-or-create
/// registration possible.
///
/// The payload type is shared by every transition of the family. Use an enum
/// when different transitions carry different data and match on it in the
/// receiving state.
///
/// The owner is whatever handle the application wants the machine to hold:
/// a plain value, `Rc<RefCell<T>>`, or an index into the application's own
/// storage. The machine never drops anything behind that handle.
pub trait Blueprint: Sized {
    type Kind: StateKind;
    type Event: EventId;
    type Owner;
    type Param;

    /// Build the state instance for `kind`.
    ///
    /// Called once per kind, the first time the kind is registered.
    fn create(kind: Self::Kind) -> Box<dyn State<Self>>;
}

/// Lifecycle hooks of one state behavior.
///
/// Every hook has a no-op default. Hooks receive a [`Context`] that exposes
/// the owner, the entry payload and self-dispatch.
pub trait State<B: Blueprint> {
    /// Called when this state becomes current.
    ///
    /// `previous` is `None` only for the state passed to `start`.
    fn on_enter(&mut self, ctx: &mut Context<'_, B>, previous: Option<B::Kind>) {
        let _ = (ctx, previous);
    }

    /// Called once per driver tick while this state is current.
    fn on_update(&mut self, ctx: &mut Context<'_, B>) {
        let _ = ctx;
    }

    /// Called right before control passes to `next`.
    fn on_exit(&mut self, ctx: &mut Context<'_, B>, next: Option<B::Kind>) {
        let _ = (ctx, next);
    }
}
