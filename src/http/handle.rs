//! Request handles and completion observation

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use uuid::Uuid;

/// Summary of how an exchange ended
#[derive(Debug, Clone, Default)]
pub struct FinishInfo {
    /// Response status, when the exchange produced one
    pub status: Option<u16>,
    /// Failure description, when it did not
    pub error: Option<String>,
    /// Time from initiation to completion
    pub elapsed: Option<Duration>,
}

/// One-shot observer of an exchange's completion
pub type FinishObserver = Box<dyn FnOnce(&FinishInfo) + Send>;

/// The opaque handle contract transports return.
///
/// Implementations are cheap clones over shared state: every clone of a
/// handle refers to the same request.
pub trait Connection: Send + Sync {
    /// Correlation id for this request
    fn id(&self) -> Uuid;

    /// Register a one-shot completion observer. Observers registered after
    /// completion fire immediately with the recorded outcome.
    fn on_finished(&self, observer: FinishObserver);
}

enum LatchState {
    Pending(Vec<FinishObserver>),
    Finished(FinishInfo),
}

/// One-shot completion latch backing [`Connection`] implementations.
///
/// [`finish`](FinishLatch::finish) transitions at most once and drains the
/// pending observers; later calls are ignored. Subscribing after the
/// transition fires the observer immediately with the recorded outcome.
pub struct FinishLatch {
    state: Mutex<LatchState>,
}

impl FinishLatch {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LatchState::Pending(Vec::new())),
        }
    }

    pub fn subscribe(&self, observer: FinishObserver) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match &mut *state {
            LatchState::Pending(observers) => observers.push(observer),
            LatchState::Finished(info) => {
                let recorded = info.clone();
                drop(state);
                observer(&recorded);
            }
        }
    }

    pub fn finish(&self, info: FinishInfo) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if matches!(&*state, LatchState::Finished(_)) {
            return;
        }
        let previous = std::mem::replace(&mut *state, LatchState::Finished(info.clone()));
        drop(state);
        if let LatchState::Pending(observers) = previous {
            for observer in observers {
                observer(&info);
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(
            &*self.state.lock().unwrap_or_else(PoisonError::into_inner),
            LatchState::Finished(_)
        )
    }
}

impl Default for FinishLatch {
    fn default() -> Self {
        Self::new()
    }
}
