//! Root crate facade for the SharePaste client.

pub use sharepaste_cli::{open_draft_store, HttpTransport};
pub use sharepaste_core::{
    config, constants, draft, editor, error, keymap, language, location, prompt, protocol,
    session,
};
pub use sharepaste_core::{
    BackgroundDraftStore, BufferEditor, Config, Created, CursorPosition, Draft, DraftError,
    DraftStore, EditorWidget, FetchError, HistoryNavigator, MemoryDraftStore, Mode, Navigator,
    PageLocation, PasteTransport, Prompt, RedbDraftStore, Response, Session, SubmitError,
    TransportError, UnknownLanguage,
};
