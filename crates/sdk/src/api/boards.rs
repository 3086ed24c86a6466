//! Board endpoints.

use crate::client::TrelloClient;
use crate::error::TrelloResult;
use crate::request::RemoteRequest;
use serde_json::Value;

/// `GET members/me/boards`: boards visible to the authenticated member.
pub fn my_boards_request() -> RemoteRequest {
    RemoteRequest::get(["members", "me", "boards"])
}

/// `GET boards/{id}/lists`: lists on a board.
pub fn lists_request(board_id: &str) -> RemoteRequest {
    RemoteRequest::get(["boards", board_id, "lists"])
}

/// Boards API.
pub struct BoardsApi<'a> {
    client: &'a TrelloClient,
}

impl<'a> BoardsApi<'a> {
    pub(crate) fn new(client: &'a TrelloClient) -> Self {
        Self { client }
    }

    /// List the boards of the current member.
    pub async fn list_mine(&self) -> TrelloResult<Value> {
        self.client.http.execute(my_boards_request()).await
    }

    /// List the lists on a board.
    pub async fn lists(&self, board_id: &str) -> TrelloResult<Value> {
        self.client.http.execute(lists_request(board_id)).await
    }
}
