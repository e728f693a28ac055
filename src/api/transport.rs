//! Transport seam
//!
//! Resource clients describe a request with [`Request`] and hand it to a
//! [`Transport`], which owns everything HTTP: URLs, headers, auth and JSON
//! parsing. [`super::http::HttpTransport`] is the production implementation.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;

/// Failure in the HTTP layer
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API request failed: {status}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to encode request body: {0}")]
    Body(String),
}

/// A request relative to the API base URL
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    /// Path relative to the base URL, e.g. `shapes/abc`
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Success bodies are not parsed; the transport returns `Value::Null`
    pub discard_body: bool,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            discard_body: false,
        }
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Attach a JSON body
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, TransportError> {
        let value =
            serde_json::to_value(body).map_err(|e| TransportError::Body(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Ignore whatever the server sends back on success
    pub fn discard_body(mut self) -> Self {
        self.discard_body = true;
        self
    }
}

/// Performs one request/response cycle.
///
/// An empty success body, or any success body of a request marked with
/// [`Request::discard_body`], comes back as `Value::Null`. Dropping the returned
/// future cancels the request.
pub trait Transport: Send + Sync {
    fn send(&self, request: Request) -> impl Future<Output = Result<Value, TransportError>> + Send;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: Request) -> impl Future<Output = Result<Value, TransportError>> + Send {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn send(&self, request: Request) -> impl Future<Output = Result<Value, TransportError>> + Send {
        (**self).send(request)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory transport that records requests and replays canned responses

    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct RecordingTransport {
        pub requests: Mutex<Vec<Request>>,
        responses: Mutex<VecDeque<Result<Value, TransportError>>>,
    }

    impl RecordingTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(self, response: Value) -> Self {
            self.responses.lock().unwrap().push_back(Ok(response));
            self
        }

        pub fn fail(self, error: TransportError) -> Self {
            self.responses.lock().unwrap().push_back(Err(error));
            self
        }

        pub fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        pub fn last_request(&self) -> Request {
            self.requests.lock().unwrap().last().cloned().expect("no request sent")
        }
    }

    impl Transport for RecordingTransport {
        async fn send(&self, request: Request) -> Result<Value, TransportError> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(Value::Null))
        }
    }
}
