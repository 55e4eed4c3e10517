use tracing::debug;

use crate::domain::PostId;

use super::PostStore;
use super::state::State;

/// Operation state a command holds while it waits on the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum InFlight {
    Load,
    Submit,
    Delete(PostId),
}

impl InFlight {
    fn release(self, state: &mut State) {
        match self {
            Self::Load => state.loads_in_flight = state.loads_in_flight.saturating_sub(1),
            Self::Submit => state.submitting = false,
            Self::Delete(id) => {
                state.deleting.remove(&id);
            }
        }
    }
}

/// Releases its [`InFlight`] entry when dropped, so a command future that is
/// abandoned mid-request cannot leave the store busy.
pub(super) struct Pending<'a> {
    store: &'a PostStore,
    op: &'static str,
    in_flight: InFlight,
    armed: bool,
}

impl<'a> Pending<'a> {
    pub(super) fn new(store: &'a PostStore, op: &'static str, in_flight: InFlight) -> Self {
        Self {
            store,
            op,
            in_flight,
            armed: true,
        }
    }

    /// Release the entry and apply the command's outcome in one transition.
    pub(super) fn settle<R>(mut self, apply: impl FnOnce(&mut State) -> R) -> R {
        self.armed = false;
        let in_flight = self.in_flight;
        self.store.transition(self.op, |state| {
            in_flight.release(state);
            apply(state)
        })
    }
}

impl Drop for Pending<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        debug!(
            op = self.op,
            in_flight = ?self.in_flight,
            "Command dropped before the backend answered"
        );
        let in_flight = self.in_flight;
        self.store.transition(self.op, |state| in_flight.release(state));
    }
}
