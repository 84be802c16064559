//! Shared constants used across SharePaste crates.

/// Root path of the page; the only path that opens an editable session.
pub const ROOT_PATH: &str = "/";

/// Default endpoint for paste creation.
pub const DEFAULT_CREATE_PATH: &str = "/create";

/// Default base URL for the CLI client.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Request/response header carrying the paste language.
pub const LANGUAGE_HEADER: &str = "X-Language";

/// Language used when nothing else applies.
pub const DEFAULT_LANGUAGE: &str = "plaintext";

/// Placeholder shown while a viewed paste is being fetched.
pub const LOADING_PLACEHOLDER: &str = "// Loading...";

/// Prefix of the server's name-conflict failure message.
pub const ALREADY_EXISTS_PREFIX: &str = "File already exists: ";

/// Well-known draft slot holding the unsaved content.
pub const DRAFT_CONTENT_KEY: &str = "paste";
/// Well-known draft slot holding the chosen language.
pub const DRAFT_LANGUAGE_KEY: &str = "language";

/// File name of the redb draft database inside the cache directory.
pub const DRAFT_FILE_NAME: &str = "draft.redb";
