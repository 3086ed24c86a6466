// Card tools: create, move, archive and comment

use crate::tools::operation::{BatchOperation, Operation};
use crate::tools::registry::{json_schema_object, json_schema_string};
use serde::Deserialize;
use serde_json::Value;
use trello_sdk::api::cards;
use trello_sdk::{RemoteRequest, DEFAULT_POSITION};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCardInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub list_id: String,
}

/// `create-card` / `create-cards`
pub struct CreateCard;

impl Operation for CreateCard {
    type Input = CreateCardInput;

    const NAME: &'static str = "create-card";
    const DESCRIPTION: &'static str = "Create a card at the bottom of a Trello list";
    const ACTION: &'static str = "creating card";

    fn input_schema() -> Value {
        json_schema_object(
            serde_json::json!({
                "name": json_schema_string("Name of the card"),
                "description": json_schema_string("Description of the card"),
                "listId": json_schema_string("ID of the list to create the card in")
            }),
            vec!["name", "listId"],
        )
    }

    fn request(input: &CreateCardInput) -> RemoteRequest {
        cards::create_request(
            &input.name,
            input.description.as_deref().unwrap_or(""),
            &input.list_id,
            DEFAULT_POSITION,
        )
    }
}

impl BatchOperation for CreateCard {
    type Item = CreateCardInput;

    const BATCH_NAME: &'static str = "create-cards";
    const BATCH_DESCRIPTION: &'static str = "Create several Trello cards at once";
    const BATCH_ACTION: &'static str = "creating cards";
    const BATCH_FIELD: &'static str = "cards";
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCardInput {
    pub card_id: String,
    pub list_id: String,
    #[serde(default)]
    pub position: Option<String>,
}

/// `move-card` / `move-cards`
pub struct MoveCard;

impl Operation for MoveCard {
    type Input = MoveCardInput;

    const NAME: &'static str = "move-card";
    const DESCRIPTION: &'static str = "Move a card to another list";
    const ACTION: &'static str = "moving card";

    fn input_schema() -> Value {
        json_schema_object(
            serde_json::json!({
                "cardId": json_schema_string("ID of the card to move"),
                "listId": json_schema_string("ID of the destination list"),
                "position": json_schema_string("Position in the list (e.g. \"top\", \"bottom\")")
            }),
            vec!["cardId", "listId"],
        )
    }

    fn request(input: &MoveCardInput) -> RemoteRequest {
        cards::move_request(
            &input.card_id,
            &input.list_id,
            input.position.as_deref().unwrap_or(DEFAULT_POSITION),
        )
    }
}

impl BatchOperation for MoveCard {
    type Item = MoveCardInput;

    const BATCH_NAME: &'static str = "move-cards";
    const BATCH_DESCRIPTION: &'static str = "Move several cards between lists at once";
    const BATCH_ACTION: &'static str = "moving cards";
    const BATCH_FIELD: &'static str = "cards";
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveCardInput {
    pub card_id: String,
}

/// `archive-cards` takes bare card ids.
impl From<String> for ArchiveCardInput {
    fn from(card_id: String) -> Self {
        Self { card_id }
    }
}

/// `archive-card` / `archive-cards`
pub struct ArchiveCard;

impl Operation for ArchiveCard {
    type Input = ArchiveCardInput;

    const NAME: &'static str = "archive-card";
    const DESCRIPTION: &'static str = "Archive (close) a Trello card";
    const ACTION: &'static str = "archiving card";
    const REQUIRES_CREDENTIALS: bool = true;

    fn input_schema() -> Value {
        json_schema_object(
            serde_json::json!({
                "cardId": json_schema_string("ID of the card to archive")
            }),
            vec!["cardId"],
        )
    }

    fn request(input: &ArchiveCardInput) -> RemoteRequest {
        cards::archive_request(&input.card_id)
    }
}

impl BatchOperation for ArchiveCard {
    type Item = String;

    const BATCH_NAME: &'static str = "archive-cards";
    const BATCH_DESCRIPTION: &'static str = "Archive several Trello cards at once";
    const BATCH_ACTION: &'static str = "archiving cards";
    const BATCH_FIELD: &'static str = "cardIds";

    fn item_schema() -> Value {
        json_schema_string("ID of a card to archive")
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentInput {
    pub card_id: String,
    pub text: String,
}

/// `add-comment` / `add-comments`
pub struct AddComment;

impl Operation for AddComment {
    type Input = AddCommentInput;

    const NAME: &'static str = "add-comment";
    const DESCRIPTION: &'static str = "Add a comment to a Trello card";
    const ACTION: &'static str = "adding comment";

    fn input_schema() -> Value {
        json_schema_object(
            serde_json::json!({
                "cardId": json_schema_string("ID of the card to comment on"),
                "text": json_schema_string("Comment text")
            }),
            vec!["cardId", "text"],
        )
    }

    fn request(input: &AddCommentInput) -> RemoteRequest {
        cards::comment_request(&input.card_id, &input.text)
    }
}

impl BatchOperation for AddComment {
    type Item = AddCommentInput;

    const BATCH_NAME: &'static str = "add-comments";
    const BATCH_DESCRIPTION: &'static str = "Add comments to several Trello cards at once";
    const BATCH_ACTION: &'static str = "adding comments";
    const BATCH_FIELD: &'static str = "comments";
}
