//! UI-thread dispatch boundary
//!
//! Workers hand apply callbacks to a [`Dispatcher`]; the embedding
//! application runs them later on its UI thread, in submission order.
//! [`ui_dispatch_queue`] is the channel-backed implementation for run
//! loops that pump messages between events.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

/// A callback queued for the UI thread.
pub type UiCallback = Box<dyn FnOnce() + Send + 'static>;

/// Accepts callbacks and guarantees they run later, on the single UI
/// thread, in submission order, and never synchronously on the caller.
pub trait Dispatcher: Send + Sync {
    /// Queue `callback` to run on the UI thread.
    fn dispatch(&self, callback: UiCallback);
}

/// Producer half handed to workers. Cloneable, cheap, non-blocking.
#[derive(Clone)]
pub struct UiDispatchQueue {
    tx: Sender<UiCallback>,
}

/// Consumer half owned by the UI run loop.
pub struct UiDispatchRunner {
    rx: Receiver<UiCallback>,
}

/// Create the dispatch pair for a run loop that polls between events.
pub fn ui_dispatch_queue() -> (UiDispatchQueue, UiDispatchRunner) {
    let (tx, rx) = mpsc::channel();
    (UiDispatchQueue { tx }, UiDispatchRunner { rx })
}

impl Dispatcher for UiDispatchQueue {
    fn dispatch(&self, callback: UiCallback) {
        // A dropped runner means the UI loop is gone; there is nothing
        // left to refresh, so the callback is discarded.
        let _ = self.tx.send(callback);
    }
}

impl UiDispatchRunner {
    /// Run every queued callback. Call each pass through the UI loop.
    /// Returns how many ran.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        while let Ok(callback) = self.rx.try_recv() {
            callback();
            ran += 1;
        }
        ran
    }

    /// Block until at least one callback arrives or `timeout` passes,
    /// then run everything queued. Returns how many ran.
    pub fn wait_and_run(&self, timeout: Duration) -> usize {
        match self.rx.recv_timeout(timeout) {
            Ok(callback) => {
                callback();
                1 + self.run_pending()
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => 0,
        }
    }
}
