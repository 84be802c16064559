//! Draft store selection for the binary.

use sharepaste_core::{BackgroundDraftStore, Config, DraftStore, MemoryDraftStore, RedbDraftStore};
use tracing::{debug, warn};

/// Open the configured draft store.
///
/// The redb file is wrapped in a [`BackgroundDraftStore`] unless
/// `config.sync_drafts` is set. A store that cannot be opened degrades to a
/// process-local one so editing still works; the draft just won't survive.
pub fn open_draft_store(config: &Config) -> Box<dyn DraftStore> {
    let store = match RedbDraftStore::open(&config.draft_path) {
        Ok(store) => store,
        Err(err) => {
            warn!(
                "draft store at {} unavailable, drafts will not persist: {}",
                config.draft_path, err
            );
            return Box::new(MemoryDraftStore::new());
        }
    };
    if config.sync_drafts {
        debug!(path = %config.draft_path, "using synchronous draft store");
        return Box::new(store);
    }
    match BackgroundDraftStore::spawn(store) {
        Ok(store) => Box::new(store),
        Err(err) => {
            warn!("draft writer failed to start, drafts will not persist: {}", err);
            Box::new(MemoryDraftStore::new())
        }
    }
}
