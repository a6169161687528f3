use std::cell::RefCell;
use std::collections::VecDeque;

use protocol::ApiError;

use crate::transport::{HttpResponse, LocalBoxFuture, Transport};

/// In-memory transport answering from a queue of canned responses.
///
/// Every requested URL is recorded. Once the queue is empty, requests fail
/// with a transport error.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: RefCell<VecDeque<Result<HttpResponse, ApiError>>>,
    requests: RefCell<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, response: HttpResponse) {
        self.responses.borrow_mut().push_back(Ok(response));
    }

    pub fn push_json(&self, status: u16, body: serde_json::Value) {
        let status_text = if (200..300).contains(&status) { "OK" } else { "" };
        self.push_response(HttpResponse::new(status, status_text, body.to_string()));
    }

    pub fn push_failure(&self, err: ApiError) {
        self.responses.borrow_mut().push_back(Err(err));
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn pending(&self) -> usize {
        self.responses.borrow().len()
    }
}

impl Transport for ScriptedTransport {
    fn get(&self, url: String) -> LocalBoxFuture<'_, Result<HttpResponse, ApiError>> {
        self.requests.borrow_mut().push(url);
        let next = self
            .responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted response".to_string())));
        Box::pin(async move { next })
    }
}
