//! Single-slot persistence of unsaved editor content.
//!
//! Exactly one draft exists at a time. Storage failures never reach the caller:
//! a failed write is logged and dropped, a failed read looks like "no draft".

mod redb_store;
mod worker;

pub use redb_store::RedbDraftStore;
pub use worker::BackgroundDraftStore;

use serde::{Deserialize, Serialize};

/// Unsaved content and the language chosen for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub content: String,
    pub language: Option<String>,
}

impl Draft {
    pub fn new(content: impl Into<String>, language: Option<String>) -> Self {
        Self {
            content: content.into(),
            language,
        }
    }
}

/// Durable single-slot draft cache.
pub trait DraftStore {
    /// Overwrite the slot with `draft`.
    fn save(&mut self, draft: &Draft);

    /// Overwrite only the language half of the slot.
    fn save_language(&mut self, language: &str);

    /// Last saved draft, or `None` when the slot is empty or unreadable.
    fn load(&self) -> Option<Draft>;

    /// Remove the slot.
    fn clear(&mut self);
}

impl<S: DraftStore + ?Sized> DraftStore for Box<S> {
    fn save(&mut self, draft: &Draft) {
        (**self).save(draft);
    }

    fn save_language(&mut self, language: &str) {
        (**self).save_language(language);
    }

    fn load(&self) -> Option<Draft> {
        (**self).load()
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}

/// Process-local draft store; contents die with the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryDraftStore {
    content: Option<String>,
    language: Option<String>,
    writes: usize,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `draft`, as if saved by an earlier session.
    pub fn with_draft(draft: Draft) -> Self {
        Self {
            content: Some(draft.content),
            language: draft.language,
            writes: 0,
        }
    }

    /// Number of save calls observed.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl DraftStore for MemoryDraftStore {
    fn save(&mut self, draft: &Draft) {
        self.content = Some(draft.content.clone());
        self.language = draft.language.clone();
        self.writes += 1;
    }

    fn save_language(&mut self, language: &str) {
        self.language = Some(language.to_string());
        self.writes += 1;
    }

    fn load(&self) -> Option<Draft> {
        if self.content.is_none() && self.language.is_none() {
            return None;
        }
        Some(Draft {
            content: self.content.clone().unwrap_or_default(),
            language: self.language.clone(),
        })
    }

    fn clear(&mut self) {
        self.content = None;
        self.language = None;
    }
}
