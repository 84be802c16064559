//! Draft storage backed by redb.

use super::{Draft, DraftStore};
use crate::constants::{DRAFT_CONTENT_KEY, DRAFT_LANGUAGE_KEY};
use crate::error::DraftError;
use redb::{ReadableDatabase, ReadableTable, TableDefinition};
use std::path::Path;
use tracing::warn;

/// Draft slots keyed by [`DRAFT_CONTENT_KEY`] and [`DRAFT_LANGUAGE_KEY`].
const DRAFT: TableDefinition<&str, &str> = TableDefinition::new("draft");

/// Durable draft slot in a redb file.
pub struct RedbDraftStore {
    db: redb::Database,
}

impl RedbDraftStore {
    /// Open (or create) the draft database at `path`.
    ///
    /// # Errors
    /// Returns an error when the parent directory cannot be created or redb fails
    /// to open the file or initialize the table.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DraftError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let db = redb::Database::create(path)?;
        let write_txn = db.begin_write()?;
        write_txn.open_table(DRAFT)?;
        write_txn.commit()?;
        Ok(Self { db })
    }

    fn try_save(&self, draft: &Draft) -> Result<(), DraftError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(DRAFT)?;
            table.insert(DRAFT_CONTENT_KEY, draft.content.as_str())?;
            match draft.language.as_deref() {
                Some(language) => {
                    table.insert(DRAFT_LANGUAGE_KEY, language)?;
                }
                None => {
                    table.remove(DRAFT_LANGUAGE_KEY)?;
                }
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    fn try_save_language(&self, language: &str) -> Result<(), DraftError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(DRAFT)?;
            table.insert(DRAFT_LANGUAGE_KEY, language)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn try_load(&self) -> Result<Option<Draft>, DraftError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(DRAFT)?;
        let content = table
            .get(DRAFT_CONTENT_KEY)?
            .map(|value| value.value().to_string());
        let language = table
            .get(DRAFT_LANGUAGE_KEY)?
            .map(|value| value.value().to_string());
        if content.is_none() && language.is_none() {
            return Ok(None);
        }
        Ok(Some(Draft {
            content: content.unwrap_or_default(),
            language,
        }))
    }

    fn try_clear(&self) -> Result<(), DraftError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(DRAFT)?;
            table.remove(DRAFT_CONTENT_KEY)?;
            table.remove(DRAFT_LANGUAGE_KEY)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

impl DraftStore for RedbDraftStore {
    fn save(&mut self, draft: &Draft) {
        if let Err(err) = self.try_save(draft) {
            warn!("draft save failed: {}", err);
        }
    }

    fn save_language(&mut self, language: &str) {
        if let Err(err) = self.try_save_language(language) {
            warn!("draft language save failed: {}", err);
        }
    }

    fn load(&self) -> Option<Draft> {
        self.try_load().unwrap_or_else(|err| {
            warn!("draft load failed, starting empty: {}", err);
            None
        })
    }

    fn clear(&mut self) {
        if let Err(err) = self.try_clear() {
            warn!("draft clear failed: {}", err);
        }
    }
}
