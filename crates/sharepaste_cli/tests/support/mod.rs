//! In-process SharePaste mock server on an ephemeral port.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

/// One `POST /create` as the server saw it.
#[derive(Debug, Clone)]
pub struct CreateRequest {
    pub body: String,
    pub language: Option<String>,
}

#[derive(Default)]
struct MockState {
    pastes: HashMap<String, (String, Option<String>)>,
    creates: Vec<CreateRequest>,
    hint_via_header: bool,
}

type Shared = Arc<Mutex<MockState>>;

pub struct MockServer {
    pub origin: String,
    state: Shared,
    handle: JoinHandle<()>,
}

impl MockServer {
    /// Start the server; `hint_via_header` chooses between the `X-Language`
    /// response header and the `<meta>` tag for page hints.
    pub async fn start(hint_via_header: bool) -> Self {
        let state: Shared = Arc::new(Mutex::new(MockState {
            hint_via_header,
            ..MockState::default()
        }));
        let app = Router::new()
            .route("/create", post(create))
            .route("/:id", get(page_or_text))
            .with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock server");
        let addr = listener.local_addr().expect("mock server addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock server");
        });
        Self {
            origin: format!("http://{}", addr),
            state,
            handle,
        }
    }

    /// Store a paste directly, bypassing `POST /create`.
    pub fn seed(&self, id: &str, content: &str, language: Option<&str>) {
        self.state.lock().expect("mock state").pastes.insert(
            id.to_string(),
            (content.to_string(), language.map(str::to_string)),
        );
    }

    pub fn creates(&self) -> Vec<CreateRequest> {
        self.state.lock().expect("mock state").creates.clone()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Bodies starting with `dup` collide with an existing paste named `dup`.
/// `json-error` and `empty-error` bodies are refused with a JSON envelope and
/// an empty body respectively.
async fn create(State(state): State<Shared>, headers: HeaderMap, body: Bytes) -> Response {
    let body = String::from_utf8_lossy(&body).to_string();
    let language = headers
        .get("X-Language")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let mut state = state.lock().expect("mock state");
    state.creates.push(CreateRequest {
        body: body.clone(),
        language: language.clone(),
    });
    if body.starts_with("dup") {
        return (StatusCode::CONFLICT, "File already exists: dup").into_response();
    }
    if body.starts_with("json-error") {
        return (StatusCode::BAD_REQUEST, r#"{"error":"quota"}"#).into_response();
    }
    if body.starts_with("empty-error") {
        return StatusCode::BAD_REQUEST.into_response();
    }
    if body.len() > 64 {
        return (StatusCode::PAYLOAD_TOO_LARGE, "Paste too large").into_response();
    }
    let id = format!("p{}", state.creates.len());
    let bytes = body.len();
    state.pastes.insert(id.clone(), (body, language));
    (StatusCode::OK, format!("{} {}", id, bytes)).into_response()
}

async fn page_or_text(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let wants_html = headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"));
    let state = state.lock().expect("mock state");
    if wants_html {
        let language = id
            .split('.')
            .next()
            .and_then(|resource| state.pastes.get(resource))
            .and_then(|(_, language)| language.clone())
            .unwrap_or_default();
        let page = format!(
            "<html><head><meta http-equiv=\"X-Language\" content=\"{}\"></head></html>",
            if state.hint_via_header { "" } else { language.as_str() }
        );
        if state.hint_via_header {
            return ([("X-Language", language)], page).into_response();
        }
        return page.into_response();
    }
    if id == "gone" {
        return StatusCode::GONE.into_response();
    }
    match state.pastes.get(&id) {
        Some((content, _)) => content.clone().into_response(),
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}
