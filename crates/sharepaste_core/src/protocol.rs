//! Wire protocol for creating and fetching pastes.
//!
//! Creation is a POST of the raw paste bytes with the language in the
//! `X-Language` header. The server answers `200 "<id> <byte-count>"` or a non-200
//! plain-text message.

use crate::error::{FetchError, SubmitError, TransportError};
use tracing::{debug, info};

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// HTTP-equivalent transport used by the session.
#[allow(async_fn_in_trait)]
pub trait PasteTransport {
    /// POST `content` to the creation endpoint, sending `language` as `X-Language`.
    ///
    /// # Errors
    /// Returns [`TransportError`] when no response was received.
    async fn create(
        &self,
        content: &[u8],
        language: Option<&str>,
    ) -> Result<Response, TransportError>;

    /// GET `path` with `Accept: text/plain`.
    ///
    /// # Errors
    /// Returns [`TransportError`] when no response was received.
    async fn fetch_text(&self, path: &str) -> Result<Response, TransportError>;
}

/// Identifier and stored size of a newly created paste.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Created {
    pub id: String,
    pub bytes: u64,
}

impl Created {
    /// Path of the paste page (`/<id>`).
    pub fn path(&self) -> String {
        format!("/{}", self.id)
    }
}

/// Parse a `<id> <byte-count>` success body.
///
/// # Errors
/// Returns [`SubmitError::MalformedResponse`] when either token is missing or the
/// count is not an unsigned integer.
pub fn parse_created(body: &str) -> Result<Created, SubmitError> {
    let malformed = || SubmitError::MalformedResponse {
        body: body.to_string(),
    };
    let mut tokens = body.split_whitespace();
    let id = tokens.next().ok_or_else(malformed)?;
    let bytes = tokens
        .next()
        .and_then(|count| count.parse::<u64>().ok())
        .ok_or_else(malformed)?;
    Ok(Created {
        id: id.to_string(),
        bytes,
    })
}

/// Create a paste from `content`.
///
/// Mode guards belong to the caller; this always sends exactly one request.
///
/// # Errors
/// - [`SubmitError::Transport`] when the request produced no response.
/// - [`SubmitError::Rejected`] for any status other than 200.
/// - [`SubmitError::MalformedResponse`] for an unparseable 200 body.
pub async fn submit<T: PasteTransport>(
    transport: &T,
    content: &[u8],
    language: Option<&str>,
) -> Result<Created, SubmitError> {
    debug!(bytes = content.len(), language = ?language, "submitting paste");
    let response = transport.create(content, language).await?;
    if response.status != 200 {
        return Err(SubmitError::Rejected {
            status: response.status,
            message: response.body,
        });
    }
    let created = parse_created(&response.body)?;
    info!(id = %created.id, bytes = created.bytes, "paste created");
    Ok(created)
}

/// Fetch the raw text of a stored paste.
///
/// # Errors
/// Returns [`FetchError`] on transport failure or a non-200 status.
pub async fn fetch<T: PasteTransport>(transport: &T, path: &str) -> Result<String, FetchError> {
    let response = transport.fetch_text(path).await?;
    if response.status != 200 {
        return Err(FetchError::Status {
            status: response.status,
            message: response.body,
        });
    }
    Ok(response.body)
}
