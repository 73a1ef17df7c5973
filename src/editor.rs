//! Editor capability consumed by the pipeline
//!
//! The pipeline never reaches into editor internals. It needs the full
//! text once, when a hook is initialized for a freshly opened editor,
//! and a stable identity to group applies by.

use std::sync::Arc;

use ropey::Rope;

/// The editing surface as seen from the pipeline.
///
/// Implementations live on the UI side. `text` is called during hook
/// initialization on the UI thread; `title` may be called from worker
/// threads for log context, so implementations must be `Send + Sync`.
pub trait Editor: Send + Sync {
    /// Full current text of the editor
    fn text(&self) -> Rope;

    /// Human-readable identity (file name, tab title) for diagnostics
    fn title(&self) -> String;
}

/// Shared editor handle.
///
/// Pointer identity (`Arc::ptr_eq`) is the deduplication key when the
/// worker collects the set of editors a drain cycle touched.
pub type EditorRef = Arc<dyn Editor>;
