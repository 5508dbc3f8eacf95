//! Minimal finite state machine with leave/enter hooks

use std::fmt::Debug;

/// Callbacks run around a transition
///
/// Returning `false` from either hook vetoes the transition and the machine
/// stays where it was. Both default to accepting.
pub trait StateHooks<S> {
    /// Called with the state being left
    fn on_leave(&mut self, _current: S) -> bool {
        true
    }

    /// Called with the state being entered
    fn on_enter(&mut self, _next: S) -> bool {
        true
    }
}

/// Holds the current state; transitions go through [`StateHooks`]
///
/// The hooks live outside the machine so that the owner can implement them
/// on its own data while still holding the machine as a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateMachine<S> {
    state: S,
}

impl<S: Copy + PartialEq + Debug> StateMachine<S> {
    pub fn new(initial: S) -> Self {
        Self { state: initial }
    }

    #[inline]
    pub fn state(&self) -> S {
        self.state
    }

    /// Move to `next`, returning the state held before the call
    ///
    /// Self-transitions are allowed and run both hooks. `on_enter` is only
    /// consulted once `on_leave` has agreed.
    pub fn transition<H: StateHooks<S> + ?Sized>(&mut self, next: S, hooks: &mut H) -> S {
        let previous = self.state;
        if hooks.on_leave(previous) && hooks.on_enter(next) {
            self.state = next;
        }
        previous
    }
}
