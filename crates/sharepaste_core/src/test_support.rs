//! Shared test-only fakes for the session seams.

use crate::error::TransportError;
use crate::protocol::{PasteTransport, Response};
use std::cell::RefCell;
use std::collections::VecDeque;

/// One request observed by [`ScriptedTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Exchange {
    Create {
        body: Vec<u8>,
        language: Option<String>,
    },
    Fetch {
        path: String,
    },
}

/// Transport that replays queued responses and records every request.
///
/// An exhausted queue answers with a transport error so unexpected requests fail
/// loudly in assertions.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    creates: RefCell<VecDeque<Result<Response, TransportError>>>,
    fetches: RefCell<VecDeque<Result<Response, TransportError>>>,
    exchanges: RefCell<Vec<Exchange>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_create(self, response: Response) -> Self {
        self.creates.borrow_mut().push_back(Ok(response));
        self
    }

    pub(crate) fn with_create_error(self, err: TransportError) -> Self {
        self.creates.borrow_mut().push_back(Err(err));
        self
    }

    pub(crate) fn with_fetch(self, response: Response) -> Self {
        self.fetches.borrow_mut().push_back(Ok(response));
        self
    }

    pub(crate) fn with_fetch_error(self, err: TransportError) -> Self {
        self.fetches.borrow_mut().push_back(Err(err));
        self
    }

    pub(crate) fn exchanges(&self) -> Vec<Exchange> {
        self.exchanges.borrow().clone()
    }
}

fn next_scripted(
    queue: &RefCell<VecDeque<Result<Response, TransportError>>>,
) -> Result<Response, TransportError> {
    queue
        .borrow_mut()
        .pop_front()
        .unwrap_or_else(|| Err(TransportError::new("no scripted response")))
}

impl PasteTransport for ScriptedTransport {
    async fn create(
        &self,
        content: &[u8],
        language: Option<&str>,
    ) -> Result<Response, TransportError> {
        self.exchanges.borrow_mut().push(Exchange::Create {
            body: content.to_vec(),
            language: language.map(ToString::to_string),
        });
        next_scripted(&self.creates)
    }

    async fn fetch_text(&self, path: &str) -> Result<Response, TransportError> {
        self.exchanges.borrow_mut().push(Exchange::Fetch {
            path: path.to_string(),
        });
        next_scripted(&self.fetches)
    }
}
