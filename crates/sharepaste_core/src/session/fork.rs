//! Fork: turn a viewed paste into a new editable one, locally.

use super::{Mode, Session};
use crate::constants::ROOT_PATH;
use crate::draft::DraftStore;
use crate::editor::EditorWidget;
use crate::location::Navigator;
use tracing::debug;

impl<E: EditorWidget, D: DraftStore> Session<E, D> {
    /// Switch a VIEWING session to NEW at the root path without reloading.
    ///
    /// The viewed content stays in the buffer as the starting point; the draft
    /// store is only written by the next content change. No-op when already NEW.
    pub fn fork<N: Navigator>(&mut self, navigator: &mut N) {
        if self.mode == Mode::New {
            return;
        }
        debug!(from = %self.path, "forking viewed paste");
        navigator.push_path(ROOT_PATH);
        self.editor.set_read_only(false);
        self.mode = Mode::New;
        self.path = ROOT_PATH.to_string();
        self.pending_fetch = None;
    }
}
