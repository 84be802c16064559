//! Highlighting language resolution.
//!
//! Precedence, highest first:
//! 1. an explicit user override,
//! 2. the URL extension of a viewed paste,
//! 3. the page's `X-Language` hint when the URL has no extension,
//! 4. the draft language of an editable session,
//! 5. [`DEFAULT_LANGUAGE`].

/// Language registry and alias canonicalization.
pub mod canonical;

use crate::constants::DEFAULT_LANGUAGE;
use crate::editor::EditorWidget;
use crate::session::Mode;

/// Where a resolved language came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageSource {
    Override,
    Extension,
    Header,
    Draft,
    Default,
}

/// Everything that can contribute a language when a session is opened.
#[derive(Debug, Clone, Copy)]
pub struct LanguageInputs<'a> {
    pub mode: Mode,
    pub override_language: Option<&'a str>,
    pub extension: Option<&'a str>,
    pub header_hint: Option<&'a str>,
    pub draft_language: Option<&'a str>,
}

impl<'a> LanguageInputs<'a> {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            override_language: None,
            extension: None,
            header_hint: None,
            draft_language: None,
        }
    }
}

/// A resolved, canonicalized language id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub language: String,
    pub source: LanguageSource,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Pick the language for the given inputs.
///
/// Mode-specific inputs are ignored in the other mode: a draft language never
/// applies to a viewed paste, and URL/header hints never apply to a new one.
pub fn resolve(inputs: &LanguageInputs<'_>) -> Resolution {
    let viewing = inputs.mode == Mode::Viewing;
    let candidates = [
        (non_empty(inputs.override_language), LanguageSource::Override),
        (
            non_empty(inputs.extension).filter(|_| viewing),
            LanguageSource::Extension,
        ),
        (
            non_empty(inputs.header_hint).filter(|_| viewing),
            LanguageSource::Header,
        ),
        (
            non_empty(inputs.draft_language).filter(|_| !viewing),
            LanguageSource::Draft,
        ),
    ];
    candidates
        .into_iter()
        .find_map(|(value, source)| {
            value.map(|value| Resolution {
                language: canonical::canonicalize(value),
                source,
            })
        })
        .unwrap_or_else(|| Resolution {
            language: DEFAULT_LANGUAGE.to_string(),
            source: LanguageSource::Default,
        })
}

/// Apply `language` to the widget, ignoring languages it does not recognize.
///
/// # Returns
/// `true` when the widget accepted the language.
pub fn apply<E: EditorWidget>(editor: &mut E, language: &str) -> bool {
    match editor.set_language(language) {
        Ok(()) => {
            tracing::debug!(language = %editor.language(), "editor language set");
            true
        }
        Err(err) => {
            tracing::warn!("{}; keeping '{}'", err, editor.language());
            false
        }
    }
}
