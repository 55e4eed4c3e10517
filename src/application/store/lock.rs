use std::sync::{Mutex, MutexGuard};

use tracing::warn;

/// Lock the store state, recovering the guard if a previous holder panicked.
pub(super) fn state_lock<'a, T>(lock: &'a Mutex<T>, op: &'static str) -> MutexGuard<'a, T> {
    match lock.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn!(
                op,
                lock_kind = "mutex.lock",
                result = "poisoned_recovered",
                hint = "a command panicked mid-transition; view may be stale until the next load",
                "Recovered from poisoned store lock"
            );
            poisoned.into_inner()
        }
    }
}
