//! Core library for the SharePaste client: the editor session state machine and
//! its seams (editor widget, draft store, transport, navigation).

/// Configuration loading and defaults.
pub mod config;
/// Shared constants.
pub mod constants;
/// Single-slot draft persistence.
pub mod draft;
/// Editor widget seam and headless buffer.
pub mod editor;
/// Environment mutation helpers for tests.
pub mod env;
/// Error types (storage, transport, submission).
pub mod error;
/// Keyboard shortcut mapping.
pub mod keymap;
/// Highlighting language resolution.
pub mod language;
/// Page location and navigation.
pub mod location;
/// User prompt seam.
pub mod prompt;
/// Create/fetch wire protocol.
pub mod protocol;
/// NEW/VIEWING session state machine.
pub mod session;
#[cfg(test)]
pub(crate) mod test_support;

pub use config::Config;
pub use constants::{DEFAULT_LANGUAGE, DEFAULT_SERVER_URL, LANGUAGE_HEADER};
pub use draft::{BackgroundDraftStore, Draft, DraftStore, MemoryDraftStore, RedbDraftStore};
pub use editor::{BufferEditor, CursorPosition, EditorWidget};
pub use error::{DraftError, FetchError, SubmitError, TransportError, UnknownLanguage};
pub use location::{HistoryNavigator, Navigator, PageLocation};
pub use prompt::Prompt;
pub use protocol::{Created, PasteTransport, Response};
pub use session::{Mode, Session};
