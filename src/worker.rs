//! Hook workers: one background loop per registered hook
//!
//! A worker parks on its wake signal until producers report edits,
//! drains the pending queue in one step, feeds every record to the
//! hook off the UI thread, then schedules one apply per touched editor
//! back on the UI dispatcher. Because the loop always drains fully
//! before parking again, a burst of edits collapses into a single
//! apply per affected editor.

use std::sync::{Arc, Condvar, Mutex};
use std::thread;

use ropey::Rope;

use crate::dispatch::Dispatcher;
use crate::edit::{Edit, EditRecord};
use crate::editor::EditorRef;
use crate::hook::ChangeHook;
use crate::queue::{pending_queue, QueueReader, QueueWriter};

/// Wake protocol between producers and one worker thread.
///
/// The flag under the mutex makes a signal durable: a notify that
/// lands before the worker reaches `wait` is consumed by the next
/// `wait` instead of being lost. The mutex guards only this protocol,
/// never the queue contents.
struct WakeSignal {
    pending: Mutex<bool>,
    wake: Condvar,
}

impl WakeSignal {
    fn new() -> Self {
        Self {
            pending: Mutex::new(false),
            wake: Condvar::new(),
        }
    }

    /// Mark work pending and wake the worker if it is parked.
    fn notify(&self) {
        let mut pending = self.pending.lock().unwrap();
        *pending = true;
        self.wake.notify_one();
    }

    /// Park until work is pending, then consume the flag.
    fn wait(&self) {
        let mut pending = self.pending.lock().unwrap();
        while !*pending {
            pending = self.wake.wait(pending).unwrap();
        }
        *pending = false;
    }
}

/// Handle to one hook's background loop.
///
/// Spawning the worker starts the loop; it runs for the life of the
/// process. The handle is what the registration surface keeps: `init`
/// for newly opened editors, `text_changed` for edit reports.
pub struct HookWorker {
    hook: Arc<dyn ChangeHook>,
    writer: QueueWriter,
    signal: Arc<WakeSignal>,
    _loop_thread: thread::JoinHandle<()>,
}

impl HookWorker {
    /// Spawn the background loop for `hook`, dispatching applies
    /// through `dispatcher`.
    pub fn spawn(hook: Arc<dyn ChangeHook>, dispatcher: Arc<dyn Dispatcher>) -> Self {
        let (writer, reader) = pending_queue();
        let signal = Arc::new(WakeSignal::new());
        let loop_thread = thread::spawn({
            let hook = Arc::clone(&hook);
            let signal = Arc::clone(&signal);
            move || run_loop(reader, signal, hook, dispatcher)
        });
        Self {
            hook,
            writer,
            signal,
            _loop_thread: loop_thread,
        }
    }

    /// Initialize the hook for a newly opened editor and establish its
    /// baseline apply.
    ///
    /// Runs on the calling thread. The editing surface calls this from
    /// the UI thread before reporting any edits, so the baseline apply
    /// always lands before an edit-driven one.
    pub fn init(&self, editor: &EditorRef, text: &Rope) {
        self.hook.init(editor, text);
        if let Err(err) = self.hook.apply(editor) {
            tracing::error!(
                "baseline apply failed for editor {}: {:#}",
                editor.title(),
                err
            );
        }
    }

    /// Report an ordered batch of edits for `editor`.
    ///
    /// Never blocks: the batch is published with one atomic operation
    /// and the worker is woken only if the queue was idle. An empty
    /// batch returns without allocating or signaling.
    pub fn text_changed(&self, editor: &EditorRef, edits: &[Edit]) {
        if edits.is_empty() {
            return;
        }
        let records = edits.iter().map(|edit| EditRecord {
            editor: Arc::clone(editor),
            edit: edit.clone(),
        });
        if self.writer.append(records) {
            self.signal.notify();
        }
    }
}

/// The consume-and-apply loop: park, drain, feed the hook, schedule
/// applies.
fn run_loop(
    mut reader: QueueReader,
    signal: Arc<WakeSignal>,
    hook: Arc<dyn ChangeHook>,
    dispatcher: Arc<dyn Dispatcher>,
) {
    loop {
        signal.wait();
        let records = reader.drain_all();
        if records.is_empty() {
            continue;
        }
        tracing::trace!("drained {} edit(s)", records.len());

        // Distinct editors this cycle, in first-touched order.
        let mut touched: Vec<EditorRef> = Vec::new();
        for record in &records {
            hook.text_changed(&record.editor, &record.edit);
            if !touched.iter().any(|seen| Arc::ptr_eq(seen, &record.editor)) {
                touched.push(Arc::clone(&record.editor));
            }
        }

        for editor in touched {
            let hook = Arc::clone(&hook);
            dispatcher.dispatch(Box::new(move || {
                if let Err(err) = hook.apply(&editor) {
                    tracing::error!(
                        "apply failed for editor {}: {:#}",
                        editor.title(),
                        err
                    );
                }
            }));
        }
    }
}
