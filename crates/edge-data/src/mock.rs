//! In-memory transport for tests.

use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;

use crate::{FetchError, Request, Response, Transport};

/// Canned reply for a URL.
#[derive(Debug, Clone)]
enum Reply {
    Respond(Response),
    Fail(FetchError),
}

/// Transport answering from a table of canned replies keyed by URL.
///
/// Unknown URLs get a `404`. Every executed request is recorded.
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: HashMap<String, Reply>,
    requests: RefCell<Vec<Request>>,
}

impl MockTransport {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with `response`.
    pub fn respond(mut self, url: impl Into<String>, response: Response) -> Self {
        self.replies.insert(url.into(), Reply::Respond(response));
        self
    }

    /// Answer `url` with a JSON `200`.
    pub fn respond_json(self, url: impl Into<String>, body: serde_json::Value) -> Self {
        self.respond(url, Response::json_body(&body))
    }

    /// Fail `url` at the transport level.
    pub fn fail(mut self, url: impl Into<String>, error: FetchError) -> Self {
        self.replies.insert(url.into(), Reply::Fail(error));
        self
    }

    /// Requests executed so far.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }

    /// Number of requests executed so far.
    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn execute(&self, request: &Request) -> Result<Response, FetchError> {
        self.requests.borrow_mut().push(request.clone());
        match self.replies.get(request.url()) {
            Some(Reply::Respond(response)) => Ok(response.clone()),
            Some(Reply::Fail(error)) => Err(error.clone()),
            None => Ok(Response::new(404, "Not Found")),
        }
    }
}
