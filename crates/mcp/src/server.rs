// MCP server: JSON-RPC dispatch over newline-delimited stdio

use crate::protocol::*;
use crate::resources::{ResourceError, ResourceProvider};
use crate::tools::ToolRegistry;
use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};
use tracing::{debug, info, warn};

pub const SERVER_NAME: &str = "Trello MCP Server";
pub const SERVER_VERSION: &str = "1.0.0";

pub struct McpServer {
    tools: ToolRegistry,
    resources: ResourceProvider,
}

impl McpServer {
    pub fn new(tools: ToolRegistry, resources: ResourceProvider) -> Self {
        Self { tools, resources }
    }

    /// Serve on the process's stdin/stdout until stdin closes.
    pub async fn start(&self) -> Result<()> {
        info!(
            tools = self.tools.len(),
            "{} {} listening on stdio", SERVER_NAME, SERVER_VERSION
        );
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Read one JSON-RPC message per line and answer each in turn.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = FramedRead::new(reader, LinesCodec::new());
        let mut out = FramedWrite::new(writer, LinesCodec::new());

        while let Some(line) = lines.next().await {
            let line = line.context("Failed to read from transport")?;
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_message(&line).await {
                let encoded =
                    serde_json::to_string(&response).context("Failed to encode response")?;
                out.send(encoded)
                    .await
                    .context("Failed to write to transport")?;
            }
        }

        info!("Transport closed, shutting down");
        Ok(())
    }

    /// Handle one raw message. Notifications produce no response.
    pub async fn handle_message(&self, line: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Unparsable message");
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    JsonRpcError::parse_error(),
                ));
            }
        };

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                request.id.unwrap_or(Value::Null),
                JsonRpcError::invalid_request(),
            ));
        }

        let Some(id) = request.id.clone() else {
            debug!(method = %request.method, "Notification");
            return None;
        };

        Some(match self.dispatch(&request).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::error(id, error),
        })
    }

    async fn dispatch(&self, request: &JsonRpcRequest) -> Result<Value, JsonRpcError> {
        debug!(method = %request.method, "Request");

        match request.method.as_str() {
            "initialize" => {
                let params: InitializeParams = optional_params(request)?;
                if let Some(client) = &params.client_info {
                    info!(client = %client.name, version = %client.version, "Client connected");
                }
                let result = InitializeResult::negotiate(
                    params.protocol_version.as_deref(),
                    ServerInfo {
                        name: SERVER_NAME.to_string(),
                        version: SERVER_VERSION.to_string(),
                    },
                );
                to_value(result)
            }
            "ping" => Ok(serde_json::json!({})),
            "tools/list" => to_value(ListToolsResult {
                tools: self.tools.list_schemas(),
            }),
            "tools/call" => {
                let params: CallToolParams = params(request)?;
                let tool = self.tools.get(&params.name).ok_or_else(|| {
                    JsonRpcError::invalid_params(format!("Unknown tool: {}", params.name))
                })?;

                debug!(tool = %params.name, "Calling tool");
                to_value(tool.execute(params.arguments).await)
            }
            "resources/list" => to_value(ListResourcesResult {
                resources: self.resources.list_resources(),
            }),
            "resources/templates/list" => to_value(ListResourceTemplatesResult {
                resource_templates: self.resources.list_templates(),
            }),
            "resources/read" => {
                let params: ReadResourceParams = params(request)?;
                match self.resources.read(&params.uri).await {
                    Ok(result) => to_value(result),
                    Err(e @ ResourceError::UnknownUri(_)) => {
                        Err(JsonRpcError::invalid_params(e.to_string()))
                    }
                    Err(e) => {
                        warn!(uri = %params.uri, error = %e, "Resource read failed");
                        Err(JsonRpcError::internal_error(e.to_string()))
                    }
                }
            }
            other => Err(JsonRpcError::method_not_found(other)),
        }
    }
}

fn params<T: DeserializeOwned>(request: &JsonRpcRequest) -> Result<T, JsonRpcError> {
    let raw = request.params.clone().unwrap_or(Value::Null);
    serde_json::from_value(raw).map_err(|e| {
        JsonRpcError::invalid_params(format!("Invalid params for {}: {}", request.method, e))
    })
}

fn optional_params<T: DeserializeOwned + Default>(request: &JsonRpcRequest) -> Result<T, JsonRpcError> {
    match request.params {
        None | Some(Value::Null) => Ok(T::default()),
        Some(_) => params(request),
    }
}

fn to_value(result: impl serde::Serialize) -> Result<Value, JsonRpcError> {
    serde_json::to_value(result).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubApi;
    use crate::tools::{trello_registry, BatchPolicy};
    use serde_json::json;
    use std::sync::Arc;

    fn server_with(stub: Arc<StubApi>) -> McpServer {
        let tools = trello_registry(stub.clone(), BatchPolicy::AllOrNothing).unwrap();
        McpServer::new(tools, ResourceProvider::new(stub))
    }

    async fn roundtrip(server: &McpServer, message: Value) -> JsonRpcResponse {
        server
            .handle_message(&message.to_string())
            .await
            .expect("expected a response")
    }

    #[tokio::test]
    async fn test_initialize() {
        let server = server_with(Arc::new(StubApi::new()));

        let response = roundtrip(
            &server,
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "initialize",
                "params": {
                    "protocolVersion": "2024-11-05",
                    "capabilities": {},
                    "clientInfo": {"name": "test-client", "version": "0.1"}
                }
            }),
        )
        .await;

        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], SERVER_NAME);
        assert!(result["capabilities"]["tools"].is_object());
        assert!(result["capabilities"]["resources"].is_object());
    }

    #[tokio::test]
    async fn test_notifications_get_no_response() {
        let server = server_with(Arc::new(StubApi::new()));

        let response = server
            .handle_message(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_parse_error() {
        let server = server_with(Arc::new(StubApi::new()));

        let response = server.handle_message("{not json").await.unwrap();
        assert_eq!(response.id, Value::Null);
        assert_eq!(response.error.unwrap().code, -32700);
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let server = server_with(Arc::new(StubApi::new()));

        let response = roundtrip(
            &server,
            json!({"jsonrpc": "2.0", "id": 2, "method": "prompts/list"}),
        )
        .await;
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[tokio::test]
    async fn test_tools_list() {
        let server = server_with(Arc::new(StubApi::new()));

        let response = roundtrip(
            &server,
            json!({"jsonrpc": "2.0", "id": 3, "method": "tools/list"}),
        )
        .await;

        let tools = response.result.unwrap()["tools"].as_array().unwrap().clone();
        assert_eq!(tools.len(), 15);
        assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));
    }

    #[tokio::test]
    async fn test_tools_call_success_envelope() {
        let stub = Arc::new(StubApi::responding(|_| Ok(json!({"id": "c1"}))));
        let server = server_with(stub.clone());

        let response = roundtrip(
            &server,
            json!({
                "jsonrpc": "2.0",
                "id": "call-1",
                "method": "tools/call",
                "params": {"name": "create-card", "arguments": {"name": "x", "listId": "l1"}}
            }),
        )
        .await;

        assert_eq!(response.id, json!("call-1"));
        assert_eq!(
            response.result.unwrap(),
            json!({"content": [{"type": "text", "text": r#"{"id":"c1"}"#}]})
        );
        assert_eq!(stub.call_count(), 1);
    }

    #[tokio::test]
    async fn test_tools_call_error_envelope_is_not_protocol_error() {
        let stub = Arc::new(StubApi::new());
        let server = server_with(stub.clone());

        let response = roundtrip(
            &server,
            json!({
                "jsonrpc": "2.0",
                "id": 4,
                "method": "tools/call",
                "params": {"name": "move-card", "arguments": {"cardId": "c1"}}
            }),
        )
        .await;

        assert!(response.error.is_none());
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let server = server_with(Arc::new(StubApi::new()));

        let response = roundtrip(
            &server,
            json!({
                "jsonrpc": "2.0",
                "id": 5,
                "method": "tools/call",
                "params": {"name": "delete-board", "arguments": {}}
            }),
        )
        .await;
        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[tokio::test]
    async fn test_resources_read() {
        let stub = Arc::new(StubApi::responding(|_| Ok(json!([]))));
        let server = server_with(stub);

        let response = roundtrip(
            &server,
            json!({
                "jsonrpc": "2.0",
                "id": 6,
                "method": "resources/read",
                "params": {"uri": "trello://lists/l1/cards"}
            }),
        )
        .await;

        assert_eq!(
            response.result.unwrap(),
            json!({"contents": [{"uri": "trello://lists/l1/cards", "text": "[]"}]})
        );
    }

    #[tokio::test]
    async fn test_resource_failure_is_protocol_error() {
        let server = server_with(Arc::new(StubApi::failing_on("boards")));

        let response = roundtrip(
            &server,
            json!({
                "jsonrpc": "2.0",
                "id": 7,
                "method": "resources/read",
                "params": {"uri": "trello://boards"}
            }),
        )
        .await;

        let error = response.error.unwrap();
        assert_eq!(error.code, -32603);
        assert_eq!(error.message, "Request timed out");
    }

    #[tokio::test]
    async fn test_resource_templates_list() {
        let server = server_with(Arc::new(StubApi::new()));

        let response = roundtrip(
            &server,
            json!({"jsonrpc": "2.0", "id": 8, "method": "resources/templates/list"}),
        )
        .await;

        let templates = response.result.unwrap()["resourceTemplates"]
            .as_array()
            .unwrap()
            .len();
        assert_eq!(templates, 2);
    }

    #[tokio::test]
    async fn test_serve_answers_each_line_in_order() {
        let server = server_with(Arc::new(StubApi::new()));

        let input = [
            json!({"jsonrpc": "2.0", "id": 1, "method": "ping"}).to_string(),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string(),
            String::new(),
            json!({"jsonrpc": "2.0", "id": 2, "method": "resources/list"}).to_string(),
        ]
        .join("\n");

        let mut output = Vec::new();
        server.serve(input.as_bytes(), &mut output).await.unwrap();

        let responses: Vec<JsonRpcResponse> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].id, json!(1));
        assert_eq!(responses[1].id, json!(2));
        assert_eq!(
            responses[1].result.as_ref().unwrap()["resources"][0]["uri"],
            "trello://boards"
        );
    }
}
