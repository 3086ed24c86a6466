// Call-recording RemoteApi stub shared by the unit tests

use serde_json::{json, Value};
use std::sync::Mutex;
use trello_sdk::{RemoteApi, RemoteRequest, TrelloError, TrelloResult};

type Responder = Box<dyn Fn(&RemoteRequest) -> TrelloResult<Value> + Send + Sync>;

pub(crate) struct StubApi {
    configured: bool,
    calls: Mutex<Vec<RemoteRequest>>,
    responder: Responder,
}

impl StubApi {
    /// Echoes each request back as `{"path": ..., "body": ...}`.
    pub fn new() -> Self {
        Self::responding(|req| Ok(json!({ "path": req.path(), "body": req.body })))
    }

    pub fn responding(
        responder: impl Fn(&RemoteRequest) -> TrelloResult<Value> + Send + Sync + 'static,
    ) -> Self {
        Self {
            configured: true,
            calls: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        }
    }

    /// Echo stub that fails any request whose path mentions `marker`.
    pub fn failing_on(marker: &'static str) -> Self {
        Self::responding(move |req| {
            if req.path().contains(marker) {
                Err(TrelloError::Timeout)
            } else {
                Ok(json!({ "path": req.path(), "body": req.body }))
            }
        })
    }

    pub fn without_credentials(mut self) -> Self {
        self.configured = false;
        self
    }

    pub fn calls(&self) -> Vec<RemoteRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl RemoteApi for StubApi {
    fn credentials_configured(&self) -> bool {
        self.configured
    }

    async fn call(&self, request: RemoteRequest) -> TrelloResult<Value> {
        self.calls.lock().unwrap().push(request.clone());
        (self.responder)(&request)
    }
}
