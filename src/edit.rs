//! Edit values reported by the editing surface
//!
//! An [`Edit`] describes one text mutation. An [`EditRecord`] pairs it
//! with the editor it happened in, which is what flows through the
//! pending queue so the worker knows where to deliver it.

use crate::editor::EditorRef;

/// One text mutation: `old` replaced by `new` at char offset `at`.
///
/// Immutable once created; consumers take it by reference or clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Char offset the mutation starts at
    pub at: usize,
    /// Text that was removed (empty for pure insertions)
    pub old: String,
    /// Text that was inserted (empty for pure deletions)
    pub new: String,
}

impl Edit {
    /// Text inserted at `at`, nothing removed
    pub fn insertion(at: usize, new: impl Into<String>) -> Self {
        Self {
            at,
            old: String::new(),
            new: new.into(),
        }
    }

    /// Text removed at `at`, nothing inserted
    pub fn deletion(at: usize, old: impl Into<String>) -> Self {
        Self {
            at,
            old: old.into(),
            new: String::new(),
        }
    }

    /// Text removed and replaced in one step
    pub fn replacement(at: usize, old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            at,
            old: old.into(),
            new: new.into(),
        }
    }
}

/// An edit tagged with the editor it occurred in.
///
/// The editor reference is what the worker deduplicates on when it
/// schedules one apply per touched editor.
#[derive(Clone)]
pub struct EditRecord {
    /// Editor the edit occurred in
    pub editor: EditorRef,
    /// The mutation itself
    pub edit: Edit,
}
