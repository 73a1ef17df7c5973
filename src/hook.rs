//! Change-hook capability implemented by analysis plugins
//!
//! Lifecycle per hook instance, per editor:
//!
//! ```text
//! init(editor, text)           once, when the editor opens (UI thread)
//! text_changed(editor, edit)*  per edit, on the hook's worker thread
//! apply(editor)                once per touched editor per drain cycle,
//!                              on the UI thread
//! ```
//!
//! There is no terminal state while the editor stays open; the hook
//! instance is discarded by the embedding surface when the editor
//! closes.

use anyhow::Result;
use ropey::Rope;

use crate::edit::Edit;
use crate::editor::EditorRef;

/// A hook that reacts to text changes.
///
/// Each registered hook gets its own worker thread that feeds it edits
/// one at a time. When a burst of edits subsides, `apply` runs on the
/// UI thread, once per editor the burst touched. That keeps expensive
/// incremental work off the UI thread, and the UI is re-entered at
/// most once per editor per burst.
///
/// Receivers are `&self`: a hook's state is written from the worker
/// thread during `text_changed` and from the UI thread during `apply`,
/// and the pipeline adds no locking of its own. Hooks must synchronize
/// any state shared between the two themselves.
pub trait ChangeHook: Send + Sync {
    /// Called once when an editor opens, with its complete text.
    fn init(&self, editor: &EditorRef, text: &Rope);

    /// Called for every edit, in report order, off the UI thread.
    ///
    /// May run many times before the next `apply` if edits keep
    /// arriving. There is no error channel; a hook that hits a fault
    /// here should surface it from its next `apply`.
    fn text_changed(&self, editor: &EditorRef, edit: &Edit);

    /// Called on the UI thread when a burst of changes subsides.
    ///
    /// Errors are logged with the editor title and dropped: a failed
    /// apply neither stops the worker nor suppresses future applies.
    /// Successive applies for the same editor are strictly ordered but
    /// not necessarily back-to-back: the worker may already be
    /// draining the next burst while an apply waits its turn on the
    /// UI queue.
    fn apply(&self, editor: &EditorRef) -> Result<()>;
}
