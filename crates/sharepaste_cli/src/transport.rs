//! reqwest-backed [`PasteTransport`] for a SharePaste server.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Url;
use sharepaste_core::{PasteTransport, Response, TransportError, LANGUAGE_HEADER};
use std::time::Duration;
use tracing::debug;

/// HTTP client bound to one server origin.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    server: String,
    create_path: String,
}

impl HttpTransport {
    /// Build a client for `server` with a per-request `timeout`.
    ///
    /// # Errors
    /// Returns an error when the server URL cannot be used as a request base or
    /// the client cannot be built.
    pub fn new(
        server: &str,
        create_path: &str,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let server = normalize_server(server.to_string());
        api_url(&server, "")?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| TransportError::new(format!("failed to build client: {}", err)))?;
        Ok(Self {
            client,
            server,
            create_path: create_path.to_string(),
        })
    }

    /// Normalized server origin, without a trailing slash.
    pub fn server(&self) -> &str {
        &self.server
    }

    fn url_for(&self, path: &str) -> Result<Url, TransportError> {
        api_url(&self.server, path)
    }

    /// Load the HTML page at `path` and read its language hint.
    ///
    /// The `X-Language` response header wins over a
    /// `<meta http-equiv="X-Language">` tag in the body. Pages that answer with
    /// a non-success status carry no hint.
    ///
    /// # Errors
    /// Returns [`TransportError`] when no response was received.
    pub async fn page_language_hint(
        &self,
        path: &str,
    ) -> Result<Option<String>, TransportError> {
        let url = self.url_for(path)?;
        let res = self
            .client
            .get(url)
            .header(ACCEPT, "text/html")
            .send()
            .await
            .map_err(request_error)?;
        if !res.status().is_success() {
            debug!(status = %res.status(), path, "page returned no language hint");
            return Ok(None);
        }
        let from_header = res
            .headers()
            .get(LANGUAGE_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        if from_header.is_some() {
            return Ok(from_header);
        }
        let body = res.text().await.map_err(request_error)?;
        Ok(extract_meta_language(&body))
    }
}

impl PasteTransport for HttpTransport {
    async fn create(
        &self,
        content: &[u8],
        language: Option<&str>,
    ) -> Result<Response, TransportError> {
        let url = self.url_for(&self.create_path)?;
        let mut req = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(content.to_vec());
        if let Some(language) = language {
            req = req.header(LANGUAGE_HEADER, language);
        }
        let res = req.send().await.map_err(request_error)?;
        into_response(res).await
    }

    async fn fetch_text(&self, path: &str) -> Result<Response, TransportError> {
        let url = self.url_for(path)?;
        let res = self
            .client
            .get(url)
            .header(ACCEPT, "text/plain")
            .send()
            .await
            .map_err(request_error)?;
        into_response(res).await
    }
}

fn request_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new("request timed out");
    }
    if err.is_connect() {
        return TransportError::new("could not connect to server");
    }
    TransportError::new(err.to_string())
}

/// Status and body exactly as the server sent them, for any status.
async fn into_response(res: reqwest::Response) -> Result<Response, TransportError> {
    let status = res.status().as_u16();
    let body = res.text().await.map_err(request_error)?;
    Ok(Response::new(status, body))
}

/// Find `<meta http-equiv="X-Language" content="...">` in an HTML page.
pub fn extract_meta_language(html: &str) -> Option<String> {
    // ASCII lowercasing keeps byte offsets aligned with `html`.
    let lower = html.to_ascii_lowercase();
    let needle = format!("http-equiv=\"{}\"", LANGUAGE_HEADER.to_ascii_lowercase());
    let at = lower.find(&needle)?;
    let tag_start = lower[..at].rfind('<')?;
    let tag_end = at + lower[at..].find('>')?;
    let tag = &lower[tag_start..tag_end];
    let value_start = tag.find("content=\"")? + "content=\"".len();
    let value_len = tag[value_start..].find('"')?;
    let start = tag_start + value_start;
    let value = html[start..start + value_len].trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Append the URL path `path` to `server`'s base path.
///
/// `path` is taken as URL path text: existing `%XX` escapes pass through
/// untouched and only characters a path cannot carry (spaces, `?`, `#`) get
/// escaped.
///
/// # Errors
/// Returns an error when `server` is not an absolute base URL.
pub fn api_url(server: &str, path: &str) -> Result<Url, TransportError> {
    let mut url = Url::parse(server).map_err(|err| {
        TransportError::new(format!("Invalid server URL '{}': {}", server, err))
    })?;
    if url.cannot_be_a_base() {
        return Err(TransportError::new("Server URL cannot be used as a base"));
    }
    let base = url.path().trim_end_matches('/').to_string();
    let suffix = path.trim_start_matches('/');
    url.set_path(&format!("{}/{}", base, suffix));
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

/// Trim trailing slashes and pin plain-http `localhost` to `127.0.0.1`.
pub fn normalize_server(server: String) -> String {
    if let Ok(mut url) = Url::parse(&server) {
        let should_normalize_localhost =
            url.scheme().eq_ignore_ascii_case("http") && url.host_str() == Some("localhost");
        if should_normalize_localhost && url.set_host(Some("127.0.0.1")).is_err() {
            return server;
        }
        let mut normalized = url.to_string();
        while normalized.ends_with('/') {
            normalized.pop();
        }
        return normalized;
    }
    server
}
