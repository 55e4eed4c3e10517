//! Client-side post store.
//!
//! `PostStore` owns the posts last returned by the backend, the set of
//! in-flight operations and the open form. Commands are `async fn`s that take
//! `&self`: each one applies its "pending" transition, suspends on the backend
//! call, then applies the outcome. The state lock is never held across an
//! `.await`, so commands interleave and responses land in completion order.
//! A command future dropped mid-request releases whatever it held in flight.
//!
//! Rendering layers either poll [`PostStore::view`] or follow
//! [`PostStore::subscribe`], which yields a fresh [`ViewModel`] after every
//! transition.

mod commands;
mod lock;
mod pending;
mod state;
mod view;


use std::sync::{Arc, Mutex};

use tokio::sync::watch;

use crate::application::backend::PostsBackend;
use crate::application::error::StoreError;

use self::lock::state_lock;
use self::state::State;

pub use self::state::{EditingTarget, Notice, OperationState};
pub use self::view::ViewModel;

pub struct PostStore {
    backend: Arc<dyn PostsBackend>,
    state: Mutex<State>,
    views: watch::Sender<ViewModel>,
}

impl PostStore {
    pub fn new(backend: Arc<dyn PostsBackend>) -> Self {
        let (views, _) = watch::channel(ViewModel::default());
        Self {
            backend,
            state: Mutex::new(State::default()),
            views,
        }
    }

    pub fn view(&self) -> ViewModel {
        let state = state_lock(&self.state, "view");
        ViewModel::from_state(&state)
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewModel> {
        self.views.subscribe()
    }

    fn read<R>(&self, inspect: impl FnOnce(&State) -> R) -> R {
        let state = state_lock(&self.state, "read");
        inspect(&state)
    }

    /// Apply a transition and publish the resulting view.
    fn transition<R>(&self, op: &'static str, apply: impl FnOnce(&mut State) -> R) -> R {
        let mut state = state_lock(&self.state, op);
        let result = apply(&mut state);
        // published under the lock so subscribers see views in transition order
        self.views.send_replace(ViewModel::from_state(&state));
        result
    }

    /// Start a command: run its guard, then either clear the previous
    /// outcome or record the rejection.
    fn begin<T>(
        &self,
        op: &'static str,
        guard: impl FnOnce(&mut State) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        self.transition(op, |state| {
            let result = guard(state);
            match &result {
                Ok(_) => {
                    state.error = None;
                    state.notice = None;
                }
                Err(err) => state.error = Some(err.clone()),
            }
            result
        })
    }
}
