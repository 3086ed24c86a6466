// Single-item operations and their point-wise batch lift

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::batch::{fan_out, reduce_batch, BatchPolicy, ItemOutcome};
use crate::tools::registry::{json_schema_array, json_schema_object, Tool};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, warn};
use trello_sdk::{RemoteApi, RemoteRequest};

/// Text returned when a tool needs credentials and they are missing.
pub const CREDENTIALS_MISSING: &str = "Trello API credentials are not configured";

/// Arguments that failed to match a tool's input schema.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Invalid arguments for {tool}: {detail}")]
pub struct ValidationError {
    pub tool: &'static str,
    pub detail: String,
}

/// One Trello action taking a flat, typed input and issuing one request.
///
/// Implementors are zero-sized markers; [`SingleTool`] and [`BatchTool`]
/// turn them into MCP tools.
pub trait Operation: Send + Sync + 'static {
    type Input: DeserializeOwned + Send + Sync;

    const NAME: &'static str;
    const DESCRIPTION: &'static str;
    /// Gerund phrase used in failure messages, e.g. "creating card".
    const ACTION: &'static str;
    /// Refuse to run, without calling out, when credentials are absent.
    const REQUIRES_CREDENTIALS: bool = false;

    /// JSON Schema of `Input`.
    fn input_schema() -> Value;

    /// The request this input maps to.
    fn request(input: &Self::Input) -> RemoteRequest;

    /// Post-process a response. `Err` is reported verbatim as an error envelope.
    fn shape_response(_input: &Self::Input, response: Value) -> Result<Value, String> {
        Ok(response)
    }
}

/// An operation that also has a batch form taking an array of items.
pub trait BatchOperation: Operation {
    /// One array element. Usually the single-item input itself.
    type Item: DeserializeOwned + Send + Into<<Self as Operation>::Input>;

    const BATCH_NAME: &'static str;
    const BATCH_DESCRIPTION: &'static str;
    const BATCH_ACTION: &'static str;
    /// Name of the array field holding the items.
    const BATCH_FIELD: &'static str;

    fn item_schema() -> Value {
        Self::input_schema()
    }
}

/// Parse single-item arguments. A missing argument object counts as `{}`.
///
/// Only objects are accepted; serde would otherwise bind an array to the
/// input's fields by position.
pub fn parse_input<O: Operation>(arguments: Value) -> Result<O::Input, ValidationError> {
    let invalid = |detail: String| ValidationError {
        tool: O::NAME,
        detail,
    };

    let fields = match arguments {
        Value::Object(fields) => fields,
        Value::Null => Map::new(),
        other => return Err(invalid(format!("expected an object, got {}", other))),
    };
    serde_json::from_value(Value::Object(fields)).map_err(|e| invalid(e.to_string()))
}

/// Parse batch arguments. Any malformed item rejects the whole batch.
pub fn parse_batch<O: BatchOperation>(arguments: Value) -> Result<Vec<O::Input>, ValidationError> {
    let invalid = |detail: String| ValidationError {
        tool: O::BATCH_NAME,
        detail,
    };

    let mut fields = match arguments {
        Value::Object(fields) => fields,
        Value::Null => Map::new(),
        other => return Err(invalid(format!("expected an object, got {}", other))),
    };
    let items = fields
        .remove(O::BATCH_FIELD)
        .ok_or_else(|| invalid(format!("missing field `{}`", O::BATCH_FIELD)))?;

    let items: Vec<O::Item> = serde_json::from_value(items)
        .map_err(|e| invalid(format!("field `{}`: {}", O::BATCH_FIELD, e)))?;
    Ok(items.into_iter().map(Into::into).collect())
}

async fn run_one<O: Operation>(api: &dyn RemoteApi, input: &O::Input) -> ItemOutcome {
    let response = api
        .call(O::request(input))
        .await
        .map_err(|e| e.to_string())?;
    O::shape_response(input, response)
}

fn encode(value: &impl serde::Serialize, action: &str) -> CallToolResult {
    match serde_json::to_string(value) {
        Ok(text) => CallToolResult::text(text),
        Err(e) => CallToolResult::error(format!("Error {}: {}", action, e)),
    }
}

/// MCP tool running an [`Operation`] once.
pub struct SingleTool<O> {
    api: Arc<dyn RemoteApi>,
    _op: PhantomData<O>,
}

impl<O: Operation> SingleTool<O> {
    pub fn new(api: Arc<dyn RemoteApi>) -> Self {
        Self {
            api,
            _op: PhantomData,
        }
    }
}

#[async_trait::async_trait]
impl<O: Operation> Tool for SingleTool<O> {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: O::NAME.to_string(),
            description: O::DESCRIPTION.to_string(),
            input_schema: O::input_schema(),
        }
    }

    async fn execute(&self, arguments: Value) -> CallToolResult {
        let input = match parse_input::<O>(arguments) {
            Ok(input) => input,
            Err(e) => {
                warn!(tool = O::NAME, error = %e, "Rejected tool arguments");
                return CallToolResult::error(e.to_string());
            }
        };

        if O::REQUIRES_CREDENTIALS && !self.api.credentials_configured() {
            warn!(tool = O::NAME, "Trello credentials missing");
            return CallToolResult::error(CREDENTIALS_MISSING);
        }

        let response = match self.api.call(O::request(&input)).await {
            Ok(response) => response,
            Err(e) => {
                warn!(tool = O::NAME, error = %e, "Trello call failed");
                return CallToolResult::error(format!("Error {}: {}", O::ACTION, e));
            }
        };

        match O::shape_response(&input, response) {
            Ok(value) => encode(&value, O::ACTION),
            Err(message) => CallToolResult::error(message),
        }
    }
}

/// MCP tool running a [`BatchOperation`] over every item concurrently.
pub struct BatchTool<O> {
    api: Arc<dyn RemoteApi>,
    policy: BatchPolicy,
    _op: PhantomData<O>,
}

impl<O: BatchOperation> BatchTool<O> {
    pub fn new(api: Arc<dyn RemoteApi>, policy: BatchPolicy) -> Self {
        Self {
            api,
            policy,
            _op: PhantomData,
        }
    }
}

#[async_trait::async_trait]
impl<O: BatchOperation> Tool for BatchTool<O> {
    fn schema(&self) -> ToolSchema {
        let mut properties = Map::new();
        properties.insert(
            O::BATCH_FIELD.to_string(),
            json_schema_array(O::item_schema(), O::BATCH_DESCRIPTION),
        );

        ToolSchema {
            name: O::BATCH_NAME.to_string(),
            description: O::BATCH_DESCRIPTION.to_string(),
            input_schema: json_schema_object(Value::Object(properties), vec![O::BATCH_FIELD]),
        }
    }

    async fn execute(&self, arguments: Value) -> CallToolResult {
        let inputs = match parse_batch::<O>(arguments) {
            Ok(inputs) => inputs,
            Err(e) => {
                warn!(tool = O::BATCH_NAME, error = %e, "Rejected tool arguments");
                return CallToolResult::error(e.to_string());
            }
        };

        if O::REQUIRES_CREDENTIALS && !self.api.credentials_configured() {
            warn!(tool = O::BATCH_NAME, "Trello credentials missing");
            return CallToolResult::error(CREDENTIALS_MISSING);
        }

        debug!(tool = O::BATCH_NAME, items = inputs.len(), "Fanning out batch");

        let api = self.api.as_ref();
        let outcomes = fan_out(inputs, |input| async move { run_one::<O>(api, &input).await }).await;

        match reduce_batch(self.policy, outcomes) {
            Ok(results) => encode(&results, O::BATCH_ACTION),
            Err(e) => {
                warn!(tool = O::BATCH_NAME, error = %e, "Batch failed");
                CallToolResult::error(format!("Error {}: {}", O::BATCH_ACTION, e))
            }
        }
    }
}
