//! Lifecycle hooks supplied by the host page.

use crate::state::GridState;

/// Callbacks fired at fixed points of the open/close cycle.
///
/// Each receives a snapshot of the grid state at the moment it fires. The
/// returned flag is reported in the logs but never stops the transition.
pub trait GridHooks {
    /// After the grid has been built and its events wired.
    fn on_init(&self, _state: GridState) -> bool {
        true
    }

    /// On a (throttled) window resize.
    fn on_resize(&self, _state: GridState) -> bool {
        true
    }

    /// Once an open request for `index` has been accepted.
    fn on_open_item(&self, _state: GridState, _index: usize) -> bool {
        true
    }

    /// Once a close request for `index` has been accepted.
    fn on_close_item(&self, _state: GridState, _index: usize) -> bool {
        true
    }

    /// When the preview overlay is marked open.
    fn on_expand(&self, _state: GridState) -> bool {
        true
    }
}

/// Hooks that do nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHooks;

impl GridHooks for NoHooks {}
