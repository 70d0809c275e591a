use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use event_emitter_rs::EventEmitter;
use tracing::warn;

/// Event name dispatched when an asynchronous operation starts.
pub const LOADING_EVENT: &str = "loading";
/// Event name dispatched when an asynchronous operation settles.
pub const DONE_LOADING_EVENT: &str = "doneloading";

/// Enter/exit loading notifications for spinner and overlay observers.
///
/// Both events carry no payload. Every call dispatches, including a redundant
/// `exit`; listeners must tolerate repeats. Dispatch returns only after every
/// listener has run.
pub struct LoadingSignal {
    emitter: Mutex<EventEmitter>,
    active: AtomicUsize,
}

impl Default for LoadingSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingSignal {
    pub fn new() -> Self {
        Self {
            emitter: Mutex::new(EventEmitter::new()),
            active: AtomicUsize::new(0),
        }
    }

    /// Register a listener for [`LOADING_EVENT`]. Returns the listener id.
    pub fn on_loading<F>(&self, listener: F) -> String
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.listen(LOADING_EVENT, listener)
    }

    /// Register a listener for [`DONE_LOADING_EVENT`]. Returns the listener id.
    pub fn on_done_loading<F>(&self, listener: F) -> String
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.listen(DONE_LOADING_EVENT, listener)
    }

    pub fn remove_listener(&self, id: &str) -> bool {
        self.emitter
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove_listener(id)
            .is_some()
    }

    pub fn enter(&self) {
        self.active.fetch_add(1, Ordering::SeqCst);
        self.dispatch(LOADING_EVENT);
    }

    pub fn exit(&self) {
        let _ = self
            .active
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| Some(n.saturating_sub(1)));
        self.dispatch(DONE_LOADING_EVENT);
    }

    /// True while at least one entered operation has not exited.
    pub fn is_loading(&self) -> bool {
        self.active.load(Ordering::SeqCst) > 0
    }

    fn listen<F>(&self, event: &str, listener: F) -> String
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.emitter
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .on(event, move |_: ()| listener())
    }

    fn dispatch(&self, event: &str) {
        let handles = self
            .emitter
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .emit(event, ());
        // The emitter runs each listener on its own thread; wait so observers
        // have seen the event before the caller continues.
        for handle in handles {
            if handle.join().is_err() {
                warn!(event, "loading listener panicked");
            }
        }
    }
}
