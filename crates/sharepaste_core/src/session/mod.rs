//! Editor session: the NEW/VIEWING state machine around one editor widget.
//!
//! A session is opened from a [`PageLocation`]. The root path opens an editable
//! NEW session seeded from the draft store; any other path opens a read-only
//! VIEWING session whose content is fetched with [`Session::load_remote`].
//! A successful [`Session::submit`] freezes the session into VIEWING at the new
//! paste's path; [`Session::fork`] goes the other way without a round trip.

mod fork;
#[cfg(test)]
mod tests;

use crate::constants::LOADING_PLACEHOLDER;
use crate::draft::{Draft, DraftStore};
use crate::editor::{CursorPosition, EditorWidget};
use crate::error::{FetchError, SubmitError};
use crate::keymap::Action;
use crate::language::{self, LanguageInputs, Resolution};
use crate::location::{split_extension, Navigator, PageLocation};
use crate::prompt::Prompt;
use crate::protocol::{self, Created, PasteTransport};
use tracing::{debug, warn};

/// Editing mode of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Editable, not yet submitted, at the root path.
    New,
    /// Read-only view of a stored paste.
    Viewing,
}

/// Owner of the editor widget, the draft store, and the current mode.
pub struct Session<E, D> {
    mode: Mode,
    path: String,
    editor: E,
    drafts: D,
    status: String,
    resolution: Resolution,
    pending_fetch: Option<String>,
}

fn status_text(position: CursorPosition) -> String {
    format!("Ln {}, Col {}", position.line, position.column)
}

fn append_error(content: &str, message: &str) -> String {
    format!("{}\n// Error: {}", content, message)
}

impl<E: EditorWidget, D: DraftStore> Session<E, D> {
    /// Open a session for `location`.
    ///
    /// The mode depends only on whether the path is the root. VIEWING sessions
    /// show [`LOADING_PLACEHOLDER`] until [`Session::load_remote`] runs.
    pub fn open(location: &PageLocation, mut editor: E, drafts: D) -> Self {
        let (mode, resolution, pending_fetch) = if location.is_root() {
            editor.set_read_only(false);
            let draft = drafts.load();
            if let Some(draft) = draft.as_ref().filter(|d| !d.content.is_empty()) {
                editor.set_value(&draft.content);
            }
            let inputs = LanguageInputs {
                draft_language: draft.as_ref().and_then(|d| d.language.as_deref()),
                ..LanguageInputs::new(Mode::New)
            };
            (Mode::New, language::resolve(&inputs), None)
        } else {
            editor.set_read_only(true);
            let (resource, extension) = split_extension(location.path());
            let inputs = LanguageInputs {
                extension,
                header_hint: location.language_hint(),
                ..LanguageInputs::new(Mode::Viewing)
            };
            editor.set_value(LOADING_PLACEHOLDER);
            (
                Mode::Viewing,
                language::resolve(&inputs),
                Some(resource.to_string()),
            )
        };
        language::apply(&mut editor, &resolution.language);
        debug!(
            mode = ?mode,
            path = location.path(),
            language = %resolution.language,
            source = ?resolution.source,
            "session opened"
        );
        let status = status_text(editor.cursor());
        Self {
            mode,
            path: location.path().to_string(),
            editor,
            drafts,
            status,
            resolution,
            pending_fetch,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current URL path of the session.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    /// Direct widget access for drivers feeding user input.
    ///
    /// Call [`Session::on_content_changed`] after editing so the draft stays
    /// current.
    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }

    pub fn drafts(&self) -> &D {
        &self.drafts
    }

    pub fn content(&self) -> String {
        self.editor.value()
    }

    /// Language currently applied to the widget.
    pub fn language(&self) -> String {
        self.editor.language()
    }

    /// How the language was chosen when the session opened.
    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Cursor status text, e.g. `Ln 3, Col 7`.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Resource path still waiting to be fetched, if any.
    pub fn pending_fetch(&self) -> Option<&str> {
        self.pending_fetch.as_deref()
    }

    /// Fetch the viewed paste and replace the loading placeholder.
    ///
    /// Failures are appended to the buffer as an error line and also returned.
    /// Does nothing when no fetch is pending.
    ///
    /// # Errors
    /// Returns [`FetchError`] when the transport fails or the status is not 200.
    pub async fn load_remote<T: PasteTransport>(
        &mut self,
        transport: &T,
    ) -> Result<(), FetchError> {
        let Some(resource) = self.pending_fetch.take() else {
            return Ok(());
        };
        match protocol::fetch(transport, &resource).await {
            Ok(text) => {
                debug!(path = %resource, bytes = text.len(), "paste fetched");
                self.editor.set_value(&text);
                Ok(())
            }
            Err(err) => {
                warn!("fetching {} failed: {}", resource, err);
                let shown = append_error(&self.editor.value(), &err.to_string());
                self.editor.set_value(&shown);
                Err(err)
            }
        }
    }

    /// Content-change handler: persist the buffer while the session is NEW.
    pub fn on_content_changed(&mut self) {
        if self.mode != Mode::New {
            return;
        }
        let draft = Draft::new(self.editor.value(), Some(self.editor.language()));
        self.drafts.save(&draft);
    }

    /// Replace the whole buffer as a user edit.
    ///
    /// # Returns
    /// `false` when the widget is read-only and nothing changed.
    pub fn replace_content(&mut self, text: &str) -> bool {
        if self.editor.is_read_only() {
            return false;
        }
        self.editor.set_value(text);
        self.on_content_changed();
        true
    }

    /// Cursor-move handler: refresh the status text.
    pub fn on_cursor_moved(&mut self, position: CursorPosition) {
        self.status = status_text(position);
    }

    /// Ask for a language id and apply it when the widget recognizes it.
    ///
    /// Accepted languages are saved to the draft's language slot in either mode.
    ///
    /// # Returns
    /// `true` when the language changed.
    pub fn override_language<P: Prompt>(&mut self, prompt: &mut P) -> bool {
        let Some(answer) = prompt.ask("Set language") else {
            return false;
        };
        self.set_language_override(&answer)
    }

    /// Apply an override answer directly (the body of
    /// [`Session::override_language`]).
    pub fn set_language_override(&mut self, answer: &str) -> bool {
        let inputs = LanguageInputs {
            override_language: Some(answer),
            ..LanguageInputs::new(self.mode)
        };
        let resolution = language::resolve(&inputs);
        if resolution.source != language::LanguageSource::Override {
            return false;
        }
        if !language::apply(&mut self.editor, &resolution.language) {
            return false;
        }
        self.drafts.save_language(&self.editor.language());
        true
    }

    /// Ask for a line number and move the cursor there.
    ///
    /// # Returns
    /// The applied position, or `None` for a dismissed or non-numeric answer.
    pub fn goto_line<P: Prompt>(&mut self, prompt: &mut P) -> Option<CursorPosition> {
        let answer = prompt.ask("Enter line number to goto:")?;
        let line = answer.trim().parse::<usize>().ok().filter(|line| *line > 0)?;
        let applied = self.editor.set_cursor(CursorPosition::new(line, 1));
        self.on_cursor_moved(applied);
        Some(applied)
    }

    /// Submit the buffer as a new paste.
    ///
    /// While VIEWING this is a no-op returning `Ok(None)` and no request is sent.
    /// On success the draft is cleared, the navigator performs a full page
    /// transition to `/<id>`, and the session freezes into VIEWING there. On
    /// failure the user-facing message is appended to the buffer and the session
    /// stays NEW.
    ///
    /// # Errors
    /// Returns the [`SubmitError`] after it has been shown in the buffer.
    pub async fn submit<T, N>(
        &mut self,
        transport: &T,
        navigator: &mut N,
    ) -> Result<Option<Created>, SubmitError>
    where
        T: PasteTransport,
        N: Navigator,
    {
        if self.mode != Mode::New {
            debug!(path = %self.path, "submit ignored while viewing");
            return Ok(None);
        }
        let content = self.editor.value();
        let language = self.editor.language();
        match protocol::submit(transport, content.as_bytes(), Some(&language)).await {
            Ok(created) => {
                self.drafts.clear();
                let path = created.path();
                navigator.navigate(&path);
                self.freeze(path);
                Ok(Some(created))
            }
            Err(err) => {
                let message = err.display_message(&navigator.origin());
                warn!("submit failed: {}", message);
                let shown = append_error(&self.editor.value(), &message);
                self.editor.set_value(&shown);
                Err(err)
            }
        }
    }

    /// Dispatch a keyboard action with its mode guard.
    ///
    /// # Errors
    /// Propagates the submit failure for [`Action::Submit`].
    pub async fn perform<T, N, P>(
        &mut self,
        action: Action,
        transport: &T,
        navigator: &mut N,
        prompt: &mut P,
    ) -> Result<(), SubmitError>
    where
        T: PasteTransport,
        N: Navigator,
        P: Prompt,
    {
        match action {
            Action::Submit => {
                self.submit(transport, navigator).await?;
            }
            Action::Fork => self.fork(navigator),
            Action::SetLanguage => {
                self.override_language(prompt);
            }
            Action::GotoLine => {
                self.goto_line(prompt);
            }
        }
        Ok(())
    }

    /// Model the reload that follows navigation to a stored paste.
    fn freeze(&mut self, path: String) {
        debug!(path = %path, "session frozen after submit");
        self.mode = Mode::Viewing;
        self.path = path;
        self.pending_fetch = None;
        self.editor.set_read_only(true);
    }
}

impl<E, D> std::fmt::Debug for Session<E, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("mode", &self.mode)
            .field("path", &self.path)
            .field("status", &self.status)
            .field("pending_fetch", &self.pending_fetch)
            .finish_non_exhaustive()
    }
}
