//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles
//! separately.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use ropey::Rope;

use ripple::{ChangeHook, Edit, Editor, EditorRef};

/// Editor stub with a rope buffer and a title.
pub struct TestEditor {
    title: String,
    text: Mutex<Rope>,
}

impl TestEditor {
    pub fn new(title: &str, text: &str) -> EditorRef {
        Arc::new(Self {
            title: title.to_string(),
            text: Mutex::new(Rope::from_str(text)),
        })
    }
}

impl Editor for TestEditor {
    fn text(&self) -> Rope {
        self.text.lock().unwrap().clone()
    }

    fn title(&self) -> String {
        self.title.clone()
    }
}

/// One observed hook callback, tagged with the editor title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookEvent {
    Init { editor: String, text: String },
    TextChanged { editor: String, edit: Edit },
    Apply { editor: String },
}

/// Hook that records every callback for later assertions.
///
/// `text_changed` events arrive on the worker thread and `apply`
/// events on whichever thread runs the dispatch queue, so the log
/// lives behind a mutex.
pub struct RecordingHook {
    events: Mutex<Vec<HookEvent>>,
    fail_applies: AtomicBool,
}

impl RecordingHook {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            events: Mutex::new(Vec::new()),
            fail_applies: AtomicBool::new(false),
        })
    }

    /// A hook whose every apply reports an error.
    pub fn failing() -> Arc<Self> {
        let hook = Self::new();
        hook.fail_applies.store(true, Ordering::SeqCst);
        hook
    }

    pub fn events(&self) -> Vec<HookEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn text_changed_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, HookEvent::TextChanged { .. }))
            .count()
    }

    /// Edits observed for one editor, in delivery order.
    pub fn edits_for(&self, editor: &str) -> Vec<Edit> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                HookEvent::TextChanged {
                    editor: title,
                    edit,
                } if title == editor => Some(edit),
                _ => None,
            })
            .collect()
    }

    pub fn apply_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, HookEvent::Apply { .. }))
            .count()
    }

    pub fn apply_count_for(&self, editor: &str) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, HookEvent::Apply { editor: title } if title == editor))
            .count()
    }
}

impl ChangeHook for RecordingHook {
    fn init(&self, editor: &EditorRef, text: &Rope) {
        self.events.lock().unwrap().push(HookEvent::Init {
            editor: editor.title(),
            text: text.to_string(),
        });
    }

    fn text_changed(&self, editor: &EditorRef, edit: &Edit) {
        self.events.lock().unwrap().push(HookEvent::TextChanged {
            editor: editor.title(),
            edit: edit.clone(),
        });
    }

    fn apply(&self, editor: &EditorRef) -> anyhow::Result<()> {
        self.events.lock().unwrap().push(HookEvent::Apply {
            editor: editor.title(),
        });
        if self.fail_applies.load(Ordering::SeqCst) {
            anyhow::bail!("refresh rejected");
        }
        Ok(())
    }
}

/// Poll `predicate` until it holds or `timeout` passes. Returns
/// whether it held.
pub fn wait_until(timeout: Duration, mut predicate: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if predicate() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    predicate()
}
