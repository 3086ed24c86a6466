//! Transport-neutral description of a single Trello API call.

use crate::error::TrelloResult;
use serde_json::Value;
use std::fmt;

/// HTTP methods used by the Trello endpoints this crate covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
        }
    }
}

/// One outbound call: method, path relative to the API root, query and body.
///
/// The path is held as raw segments. IDs are never spliced into a path
/// string; the transport percent-encodes each segment on its own.
/// Credentials are not part of the request; the transport appends them.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteRequest {
    pub method: Method,
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

fn collect_segments<S: Into<String>>(segments: impl IntoIterator<Item = S>) -> Vec<String> {
    segments.into_iter().map(Into::into).collect()
}

impl RemoteRequest {
    pub fn get<S: Into<String>>(segments: impl IntoIterator<Item = S>) -> Self {
        Self {
            method: Method::Get,
            segments: collect_segments(segments),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post<S: Into<String>>(segments: impl IntoIterator<Item = S>, body: Value) -> Self {
        Self {
            method: Method::Post,
            segments: collect_segments(segments),
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub fn put<S: Into<String>>(segments: impl IntoIterator<Item = S>, body: Value) -> Self {
        Self {
            method: Method::Put,
            segments: collect_segments(segments),
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// Segments joined with `/`, unencoded. For logs and assertions.
    pub fn path(&self) -> String {
        self.segments.join("/")
    }

    /// Add a query parameter.
    pub fn with_query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Whether the caller already supplied a query parameter with this name.
    pub fn has_query(&self, name: &str) -> bool {
        self.query.iter().any(|(k, _)| k == name)
    }
}

/// Something that can execute a [`RemoteRequest`] against the Trello API.
///
/// [`crate::HttpTransport`] is the production implementation; higher layers
/// hold an `Arc<dyn RemoteApi>` so they can be exercised without a network.
#[async_trait::async_trait]
pub trait RemoteApi: Send + Sync {
    /// Whether both halves of the credential pair are available.
    fn credentials_configured(&self) -> bool;

    /// Perform the call and return the parsed JSON body.
    async fn call(&self, request: RemoteRequest) -> TrelloResult<Value>;
}
