//! The handle a state's hooks use to reach the owner and the machine.

use super::behavior::Blueprint;

/// A dispatch requested from inside a hook.
pub(crate) struct Request<B: Blueprint> {
    pub(crate) event: B::Event,
    pub(crate) param: Option<B::Param>,
}

/// Hook-side view of a running machine.
///
/// States never hold a reference to their machine. Instead each hook call
/// gets a context with mutable access to the owner, the payload that
/// activated the state, and a way to dispatch events back into the machine.
///
/// Dispatches made through the context run as soon as the hook returns,
/// before the `start`, `update` or `dispatch` call that invoked the hook
/// returns to its caller. Requests run in the order they were made and each
/// one is resolved against the state that is current when it runs.
pub struct Context<'a, B: Blueprint> {
    owner: &'a mut B::Owner,
    param: Option<&'a B::Param>,
    current: B::Kind,
    requests: &'a mut Vec<Request<B>>,
}

impl<'a, B: Blueprint> Context<'a, B> {
    pub(crate) fn new(
        owner: &'a mut B::Owner,
        param: Option<&'a B::Param>,
        current: B::Kind,
        requests: &'a mut Vec<Request<B>>,
    ) -> Self {
        Self {
            owner,
            param,
            current,
            requests,
        }
    }

    pub fn owner(&self) -> &B::Owner {
        &*self.owner
    }

    pub fn owner_mut(&mut self) -> &mut B::Owner {
        &mut *self.owner
    }

    /// Payload supplied when this state was entered.
    ///
    /// `None` when the entry carried no payload. Overwritten on every
    /// re-entry.
    pub fn param(&self) -> Option<&B::Param> {
        self.param
    }

    /// Kind of the state whose hook is running.
    pub fn current(&self) -> B::Kind {
        self.current
    }

    /// Request a transition for `event`.
    pub fn dispatch(&mut self, event: B::Event) {
        self.requests.push(Request { event, param: None });
    }

    /// Request a transition for `event`, entering the destination with `param`.
    pub fn dispatch_with(&mut self, event: B::Event, param: B::Param) {
        self.requests.push(Request {
            event,
            param: Some(param),
        });
    }
}
