//! Registration surface wiring hooks to the editing surface
//!
//! One [`ChangePipeline`] per editing session. Hooks are registered
//! during session setup; afterwards the surface reports editor opens
//! and edit batches. Every hook gets its own queue and worker thread,
//! so a slow or broken hook never stalls another; the only thing
//! hooks share is the UI dispatcher.

use std::sync::Arc;

use ropey::Rope;

use crate::dispatch::Dispatcher;
use crate::edit::Edit;
use crate::editor::EditorRef;
use crate::hook::ChangeHook;
use crate::worker::HookWorker;

/// Fans editor lifecycle events and edit reports out to every
/// registered hook's worker.
pub struct ChangePipeline {
    dispatcher: Arc<dyn Dispatcher>,
    workers: Vec<HookWorker>,
}

impl ChangePipeline {
    /// Create an empty pipeline dispatching applies through
    /// `dispatcher`.
    pub fn new(dispatcher: Arc<dyn Dispatcher>) -> Self {
        Self {
            dispatcher,
            workers: Vec::new(),
        }
    }

    /// Register a hook and start its background loop.
    ///
    /// Each hook's loop is started exactly once, here. Registration
    /// takes `&mut self` because it happens during session setup,
    /// before the pipeline is shared with producer threads.
    pub fn add_hook(&mut self, hook: Arc<dyn ChangeHook>) {
        self.workers
            .push(HookWorker::spawn(hook, Arc::clone(&self.dispatcher)));
    }

    /// Number of registered hooks.
    pub fn hook_count(&self) -> usize {
        self.workers.len()
    }

    /// Tell every hook about a newly opened editor and establish each
    /// hook's baseline apply. Call from the UI thread.
    pub fn editor_opened(&self, editor: &EditorRef, text: &Rope) {
        tracing::debug!(
            "editor {} opened, initializing {} hook(s)",
            editor.title(),
            self.workers.len()
        );
        for worker in &self.workers {
            worker.init(editor, text);
        }
    }

    /// Report an ordered batch of edits for `editor` to every hook.
    ///
    /// An empty batch is a no-op. Never blocks the caller: each
    /// worker's queue is appended to with one atomic publish and idle
    /// workers are signaled, nothing more.
    pub fn text_edited(&self, editor: &EditorRef, edits: &[Edit]) {
        if edits.is_empty() {
            return;
        }
        for worker in &self.workers {
            worker.text_changed(editor, edits);
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::*;
    use crate::dispatch::ui_dispatch_queue;

    struct InertHook;

    impl ChangeHook for InertHook {
        fn init(&self, _editor: &EditorRef, _text: &Rope) {}

        fn text_changed(&self, _editor: &EditorRef, _edit: &Edit) {}

        fn apply(&self, _editor: &EditorRef) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_hook_count_tracks_registration() {
        let (queue, _runner) = ui_dispatch_queue();
        let mut pipeline = ChangePipeline::new(Arc::new(queue));
        assert_eq!(pipeline.hook_count(), 0);
        pipeline.add_hook(Arc::new(InertHook));
        pipeline.add_hook(Arc::new(InertHook));
        assert_eq!(pipeline.hook_count(), 2);
    }
}
