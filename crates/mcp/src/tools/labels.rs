// Label tools: create board labels and attach them to cards

use crate::tools::operation::{BatchOperation, Operation};
use crate::tools::registry::{json_schema_enum, json_schema_object, json_schema_string};
use serde::Deserialize;
use serde_json::Value;
use trello_sdk::api::{cards, labels};
use trello_sdk::{LabelColor, RemoteRequest};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLabelInput {
    pub board_id: String,
    pub name: String,
    pub color: LabelColor,
}

/// `create-label` / `create-labels`
pub struct CreateLabel;

impl Operation for CreateLabel {
    type Input = CreateLabelInput;

    const NAME: &'static str = "create-label";
    const DESCRIPTION: &'static str = "Create a label on a Trello board";
    const ACTION: &'static str = "creating label";

    fn input_schema() -> Value {
        let colors: Vec<&str> = LabelColor::ALL.iter().map(LabelColor::as_str).collect();
        json_schema_object(
            serde_json::json!({
                "boardId": json_schema_string("ID of the board to create the label in"),
                "name": json_schema_string("Name of the label"),
                "color": json_schema_enum(&colors, "Color of the label")
            }),
            vec!["boardId", "name", "color"],
        )
    }

    fn request(input: &CreateLabelInput) -> RemoteRequest {
        labels::create_request(&input.board_id, &input.name, input.color)
    }
}

impl BatchOperation for CreateLabel {
    type Item = CreateLabelInput;

    const BATCH_NAME: &'static str = "create-labels";
    const BATCH_DESCRIPTION: &'static str = "Create several labels at once";
    const BATCH_ACTION: &'static str = "creating labels";
    const BATCH_FIELD: &'static str = "labels";
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLabelInput {
    pub card_id: String,
    pub label_id: String,
}

/// `add-label` / `add-labels`
pub struct AddLabel;

impl Operation for AddLabel {
    type Input = AddLabelInput;

    const NAME: &'static str = "add-label";
    const DESCRIPTION: &'static str = "Attach an existing label to a card";
    const ACTION: &'static str = "adding label to card";

    fn input_schema() -> Value {
        json_schema_object(
            serde_json::json!({
                "cardId": json_schema_string("ID of the card to add the label to"),
                "labelId": json_schema_string("ID of the label to add")
            }),
            vec!["cardId", "labelId"],
        )
    }

    fn request(input: &AddLabelInput) -> RemoteRequest {
        cards::add_label_request(&input.card_id, &input.label_id)
    }
}

impl BatchOperation for AddLabel {
    type Item = AddLabelInput;

    const BATCH_NAME: &'static str = "add-labels";
    const BATCH_DESCRIPTION: &'static str = "Attach labels to several cards at once";
    const BATCH_ACTION: &'static str = "adding labels to cards";
    const BATCH_FIELD: &'static str = "items";
}
