//! Ripple - change-notification pipeline for text editors
//!
//! Editing surfaces report text edits; registered hooks analyze them
//! on background workers and refresh their UI-visible state on the UI
//! thread, at most once per editor per burst of edits.
//!
//! ## Architecture
//!
//! ```text
//! edit reported → ChangePipeline::text_edited → pending queue (atomic chain)
//!              → hook worker thread → ChangeHook::text_changed (per edit)
//!              → Dispatcher → UI thread → ChangeHook::apply (once per editor)
//! ```
//!
//! Each registered hook gets its own queue and worker thread, so a
//! slow hook never stalls another. Reporting an edit never blocks the
//! reporting thread, and a burst of edits that lands in one drain
//! cycle collapses into a single apply per touched editor.

pub mod dispatch;
pub mod edit;
pub mod editor;
pub mod hook;
pub mod pipeline;
pub mod queue;
pub mod tracing;
pub mod worker;

// Re-export commonly used types
pub use dispatch::{ui_dispatch_queue, Dispatcher, UiCallback, UiDispatchQueue, UiDispatchRunner};
pub use edit::{Edit, EditRecord};
pub use editor::{Editor, EditorRef};
pub use hook::ChangeHook;
pub use pipeline::ChangePipeline;
pub use worker::HookWorker;
