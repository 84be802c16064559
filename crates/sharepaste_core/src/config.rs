//! Configuration loading from environment variables.

use crate::constants::{
    DEFAULT_CREATE_PATH, DEFAULT_SERVER_URL, DEFAULT_TIMEOUT_SECS, DRAFT_FILE_NAME,
};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Runtime configuration for the SharePaste client.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server_url: String,
    pub draft_path: String,
    pub create_path: String,
    pub timeout_secs: u64,
    pub sync_drafts: bool,
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: String) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = resolve_home_dir() {
            return home.join(rest).to_string_lossy().to_string();
        }
    }
    path
}

fn resolve_home_dir() -> Option<PathBuf> {
    if let Ok(home) = env::var("HOME") {
        if !home.trim().is_empty() {
            return Some(PathBuf::from(home));
        }
    }

    // Windows
    if let Ok(profile) = env::var("USERPROFILE") {
        if !profile.trim().is_empty() {
            return Some(PathBuf::from(profile));
        }
    }

    std::env::current_dir().ok()
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read a boolean flag from the environment.
///
/// Missing or unrecognized values are treated as `false`.
pub fn env_flag_enabled(name: &str) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| parse_env_flag(&value))
        .unwrap_or(false)
}

/// Default location of the draft database (`~/.cache/sharepaste/draft.redb`).
pub fn default_draft_path() -> String {
    let home = resolve_home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".cache")
        .join("sharepaste")
        .join(DRAFT_FILE_NAME)
        .to_string_lossy()
        .to_string()
}

fn non_blank_env(name: &str) -> Option<String> {
    env::var(name).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing.
    pub fn from_env() -> Self {
        Self {
            server_url: non_blank_env("SHAREPASTE_SERVER")
                .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
            draft_path: non_blank_env("SHAREPASTE_DRAFT_PATH")
                .map(expand_tilde)
                .unwrap_or_else(default_draft_path),
            create_path: non_blank_env("SHAREPASTE_CREATE_PATH")
                .unwrap_or_else(|| DEFAULT_CREATE_PATH.to_string()),
            timeout_secs: env::var("SHAREPASTE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            sync_drafts: env_flag_enabled("SHAREPASTE_SYNC_DRAFTS"),
        }
    }
}
