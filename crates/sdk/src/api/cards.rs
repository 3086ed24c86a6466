//! Card endpoints.

use crate::client::TrelloClient;
use crate::error::TrelloResult;
use crate::request::RemoteRequest;
use serde_json::{json, Value};

/// `POST cards`.
pub fn create_request(name: &str, desc: &str, list_id: &str, pos: &str) -> RemoteRequest {
    RemoteRequest::post(
        ["cards"],
        json!({
            "name": name,
            "desc": desc,
            "idList": list_id,
            "pos": pos,
        }),
    )
}

/// `PUT cards/{id}` with a new list and position.
pub fn move_request(card_id: &str, list_id: &str, pos: &str) -> RemoteRequest {
    RemoteRequest::put(
        ["cards", card_id],
        json!({
            "idList": list_id,
            "pos": pos,
        }),
    )
}

/// `PUT cards/{id}` closing the card.
pub fn archive_request(card_id: &str) -> RemoteRequest {
    RemoteRequest::put(["cards", card_id], json!({ "closed": true }))
}

/// `POST cards/{id}/actions/comments`.
pub fn comment_request(card_id: &str, text: &str) -> RemoteRequest {
    RemoteRequest::post(
        ["cards", card_id, "actions", "comments"],
        json!({ "text": text }),
    )
}

/// `POST cards/{id}/idLabels` attaching an existing label.
pub fn add_label_request(card_id: &str, label_id: &str) -> RemoteRequest {
    RemoteRequest::post(
        ["cards", card_id, "idLabels"],
        json!({ "value": label_id }),
    )
}

/// Cards API.
pub struct CardsApi<'a> {
    client: &'a TrelloClient,
}

impl<'a> CardsApi<'a> {
    pub(crate) fn new(client: &'a TrelloClient) -> Self {
        Self { client }
    }

    /// Create a card on a list.
    pub async fn create(
        &self,
        name: &str,
        desc: &str,
        list_id: &str,
        pos: &str,
    ) -> TrelloResult<Value> {
        self.client
            .http
            .execute(create_request(name, desc, list_id, pos))
            .await
    }

    /// Move a card to a list.
    pub async fn move_to(&self, card_id: &str, list_id: &str, pos: &str) -> TrelloResult<Value> {
        self.client
            .http
            .execute(move_request(card_id, list_id, pos))
            .await
    }

    /// Archive a card.
    pub async fn archive(&self, card_id: &str) -> TrelloResult<Value> {
        self.client.http.execute(archive_request(card_id)).await
    }

    /// Comment on a card.
    pub async fn comment(&self, card_id: &str, text: &str) -> TrelloResult<Value> {
        self.client
            .http
            .execute(comment_request(card_id, text))
            .await
    }

    /// Attach a label to a card.
    pub async fn add_label(&self, card_id: &str, label_id: &str) -> TrelloResult<Value> {
        self.client
            .http
            .execute(add_label_request(card_id, label_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Method;

    #[test]
    fn test_create_request_body() {
        let req = create_request("Fix bug", "", "l1", "bottom");
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.segments, vec!["cards"]);
        assert_eq!(
            req.body,
            Some(json!({"name": "Fix bug", "desc": "", "idList": "l1", "pos": "bottom"}))
        );
    }

    #[test]
    fn test_move_and_archive_share_card_path() {
        let moved = move_request("c1", "l2", "top");
        let archived = archive_request("c1");
        assert_eq!(moved.segments, archived.segments);
        assert_eq!(moved.method, Method::Put);
        assert_eq!(archived.body, Some(json!({"closed": true})));
    }

    #[test]
    fn test_card_id_stays_one_segment() {
        let req = archive_request("../../members/me");
        assert_eq!(req.segments, vec!["cards", "../../members/me"]);

        let req = comment_request("c1?key=evil", "hi");
        assert_eq!(req.segments, vec!["cards", "c1?key=evil", "actions", "comments"]);
        assert!(req.query.is_empty());
    }

    #[test]
    fn test_label_and_comment_paths() {
        assert_eq!(add_label_request("c1", "lb1").path(), "cards/c1/idLabels");
        assert_eq!(
            comment_request("c1", "hi").path(),
            "cards/c1/actions/comments"
        );
    }
}
