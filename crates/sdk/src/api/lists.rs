//! List endpoints.

use crate::client::TrelloClient;
use crate::error::TrelloResult;
use crate::request::RemoteRequest;
use serde_json::Value;

/// `GET lists/{id}/cards`, optionally asking Trello for at most `limit` cards.
///
/// A limit of zero is treated as "no limit".
pub fn cards_request(list_id: &str, limit: Option<u64>) -> RemoteRequest {
    let request = RemoteRequest::get(["lists", list_id, "cards"]);
    match limit {
        Some(limit) if limit > 0 => request.with_query("limit", limit),
        _ => request,
    }
}

/// Lists API.
pub struct ListsApi<'a> {
    client: &'a TrelloClient,
}

impl<'a> ListsApi<'a> {
    pub(crate) fn new(client: &'a TrelloClient) -> Self {
        Self { client }
    }

    /// Cards on a list.
    pub async fn cards(&self, list_id: &str, limit: Option<u64>) -> TrelloResult<Value> {
        self.client.http.execute(cards_request(list_id, limit)).await
    }
}
