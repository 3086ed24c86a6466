//! Label endpoints.

use crate::client::TrelloClient;
use crate::error::TrelloResult;
use crate::request::RemoteRequest;
use crate::types::LabelColor;
use serde_json::{json, Value};

/// `POST labels` on a board.
pub fn create_request(board_id: &str, name: &str, color: LabelColor) -> RemoteRequest {
    RemoteRequest::post(
        ["labels"],
        json!({
            "name": name,
            "color": color,
            "idBoard": board_id,
        }),
    )
}

/// Labels API.
pub struct LabelsApi<'a> {
    client: &'a TrelloClient,
}

impl<'a> LabelsApi<'a> {
    pub(crate) fn new(client: &'a TrelloClient) -> Self {
        Self { client }
    }

    /// Create a label on a board.
    pub async fn create(
        &self,
        board_id: &str,
        name: &str,
        color: LabelColor,
    ) -> TrelloResult<Value> {
        self.client
            .http
            .execute(create_request(board_id, name, color))
            .await
    }
}
