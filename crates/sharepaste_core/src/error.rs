//! Error types for draft storage, transport, and submission.
use crate::constants::ALREADY_EXISTS_PREFIX;
use thiserror::Error;

/// Failure of the durable draft slot. Never surfaced past the draft store.
#[derive(Error, Debug)]
pub enum DraftError {
    #[error("Database error: {0}")]
    Database(#[from] redb::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Draft worker is unavailable")]
    WorkerGone,
}

impl From<redb::DatabaseError> for DraftError {
    fn from(value: redb::DatabaseError) -> Self {
        Self::Database(value.into())
    }
}

impl From<redb::TransactionError> for DraftError {
    fn from(value: redb::TransactionError) -> Self {
        Self::Database(value.into())
    }
}

impl From<redb::TableError> for DraftError {
    fn from(value: redb::TableError) -> Self {
        Self::Database(value.into())
    }
}

impl From<redb::StorageError> for DraftError {
    fn from(value: redb::StorageError) -> Self {
        Self::Database(value.into())
    }
}

impl From<redb::CommitError> for DraftError {
    fn from(value: redb::CommitError) -> Self {
        Self::Database(value.into())
    }
}

/// The request never produced a response (connection refused, timeout, bad URL).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The editor does not know the requested language id.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown language: {0}")]
pub struct UnknownLanguage(pub String);

/// Failure to load a viewed paste.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("{0}")]
    Transport(#[from] TransportError),

    #[error("Fetch failed ({status}): {message}")]
    Status { status: u16, message: String },
}

/// Outcome of a failed paste creation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("{0}")]
    Transport(#[from] TransportError),

    /// Non-200 response; `message` is the raw response body.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// A 200 response whose body is not `<id> <byte-count>`.
    #[error("Malformed create response: {body:?}")]
    MalformedResponse { body: String },
}

impl SubmitError {
    /// User-facing text for this failure.
    ///
    /// A name conflict (`File already exists: <id>`) is rewritten into a link to the
    /// existing paste at `origin`; every other message, including a conflict
    /// prefix with no id after it, is returned verbatim.
    pub fn display_message(&self, origin: &str) -> String {
        let message = self.to_string();
        let Some(id) = message
            .strip_prefix(ALREADY_EXISTS_PREFIX)
            .and_then(|rest| rest.split_whitespace().last())
        else {
            return message;
        };
        format!(
            "File already exists at {}/{}",
            origin.trim_end_matches('/'),
            id
        )
    }
}
