// Read tools: boards, lists of a board, cards of a list

use crate::tools::operation::Operation;
use crate::tools::registry::{json_schema_count, json_schema_object, json_schema_string};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use trello_sdk::api::{boards, lists};
use trello_sdk::RemoteRequest;

#[derive(Debug, Clone, Deserialize)]
pub struct GetBoardsInput {}

/// `get-boards`
pub struct GetBoards;

impl Operation for GetBoards {
    type Input = GetBoardsInput;

    const NAME: &'static str = "get-boards";
    const DESCRIPTION: &'static str = "List the Trello boards of the authenticated member";
    const ACTION: &'static str = "getting boards";

    fn input_schema() -> Value {
        json_schema_object(serde_json::json!({}), vec![])
    }

    fn request(_input: &GetBoardsInput) -> RemoteRequest {
        boards::my_boards_request()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetListsInput {
    pub board_id: String,
}

/// `get-lists`
pub struct GetLists;

impl Operation for GetLists {
    type Input = GetListsInput;

    const NAME: &'static str = "get-lists";
    const DESCRIPTION: &'static str = "List the lists on a Trello board";
    const ACTION: &'static str = "getting lists";

    fn input_schema() -> Value {
        json_schema_object(
            serde_json::json!({
                "boardId": json_schema_string("ID of the Trello board to get lists from")
            }),
            vec!["boardId"],
        )
    }

    fn request(input: &GetListsInput) -> RemoteRequest {
        boards::lists_request(&input.board_id)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTicketsInput {
    pub list_id: String,
    #[serde(default, deserialize_with = "deserialize_limit")]
    pub limit: Option<u64>,
}

/// Any non-negative number; fractions are floored.
fn deserialize_limit<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    match Option::<f64>::deserialize(deserializer)? {
        None => Ok(None),
        Some(n) if n.is_finite() && n >= 0.0 => Ok(Some(n.floor() as u64)),
        Some(n) => Err(serde::de::Error::custom(format!(
            "limit must be a non-negative number, got {}",
            n
        ))),
    }
}

/// Text returned when the cards endpoint does not answer with an array.
pub const TICKETS_NOT_AN_ARRAY: &str = "Failed to get tickets from list";

/// `get-tickets-by-list`
pub struct GetTicketsByList;

impl Operation for GetTicketsByList {
    type Input = GetTicketsInput;

    const NAME: &'static str = "get-tickets-by-list";
    const DESCRIPTION: &'static str = "Get the cards (tickets) on a Trello list";
    const ACTION: &'static str = "getting tickets from list";
    const REQUIRES_CREDENTIALS: bool = true;

    fn input_schema() -> Value {
        json_schema_object(
            serde_json::json!({
                "listId": json_schema_string("ID of the list to get tickets from"),
                "limit": json_schema_count("Maximum number of cards to return (non-negative; fractions are rounded down)")
            }),
            vec!["listId"],
        )
    }

    fn request(input: &GetTicketsInput) -> RemoteRequest {
        lists::cards_request(&input.list_id, input.limit)
    }

    fn shape_response(input: &GetTicketsInput, response: Value) -> Result<Value, String> {
        let Value::Array(mut cards) = response else {
            return Err(TICKETS_NOT_AN_ARRAY.to_string());
        };
        if let Some(limit) = input.limit.filter(|&n| n > 0) {
            cards.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }
        Ok(Value::Array(cards))
    }
}
