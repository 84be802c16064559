//! Page location parsing and navigation.

use crate::constants::ROOT_PATH;

/// Location the session is opened at, plus the language hint the page carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    path: String,
    language_hint: Option<String>,
}

impl PageLocation {
    /// Location at `path`; a missing leading slash is added.
    pub fn new(path: &str) -> Self {
        let path = path.trim();
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        Self {
            path,
            language_hint: None,
        }
    }

    pub fn root() -> Self {
        Self::new(ROOT_PATH)
    }

    /// Attach the page's `X-Language` hint (ignored when blank).
    pub fn with_language_hint(mut self, hint: Option<String>) -> Self {
        self.language_hint = hint
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn language_hint(&self) -> Option<&str> {
        self.language_hint.as_deref()
    }

    pub fn is_root(&self) -> bool {
        self.path == ROOT_PATH
    }
}

/// Split a trailing `.<extension>` off the last path segment.
///
/// `/abc.rs` → (`/abc`, `Some("rs")`). Dots in earlier segments, a leading dot
/// (`/.env`), and an empty extension (`/abc.`) do not count.
pub fn split_extension(path: &str) -> (&str, Option<&str>) {
    let segment_start = path.rfind('/').map(|idx| idx + 1).unwrap_or(0);
    let segment = &path[segment_start..];
    match segment.rfind('.') {
        Some(dot) if dot > 0 && dot + 1 < segment.len() => {
            let split_at = segment_start + dot;
            (&path[..split_at], Some(&path[split_at + 1..]))
        }
        _ => (path, None),
    }
}

/// Browser-style location and history.
pub trait Navigator {
    /// Scheme, host and port, without a trailing slash.
    fn origin(&self) -> String;

    fn path(&self) -> String;

    /// Full page transition to `path`.
    fn navigate(&mut self, path: &str);

    /// Replace the visible path without reloading the page.
    fn push_path(&mut self, path: &str);
}

/// In-memory [`Navigator`] that records every transition.
#[derive(Debug, Clone)]
pub struct HistoryNavigator {
    origin: String,
    path: String,
    history: Vec<String>,
    page_loads: usize,
}

impl HistoryNavigator {
    pub fn new(origin: &str, path: &str) -> Self {
        Self {
            origin: origin.trim_end_matches('/').to_string(),
            path: path.to_string(),
            history: vec![path.to_string()],
            page_loads: 1,
        }
    }

    /// Every path visited, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Number of full page loads, including the initial one.
    pub fn page_loads(&self) -> usize {
        self.page_loads
    }

    /// Absolute URL of the current path.
    pub fn href(&self) -> String {
        format!("{}{}", self.origin, self.path)
    }
}

impl Navigator for HistoryNavigator {
    fn origin(&self) -> String {
        self.origin.clone()
    }

    fn path(&self) -> String {
        self.path.clone()
    }

    fn navigate(&mut self, path: &str) {
        self.path = path.to_string();
        self.history.push(self.path.clone());
        self.page_loads += 1;
    }

    fn push_path(&mut self, path: &str) {
        self.path = path.to_string();
        self.history.push(self.path.clone());
    }
}
