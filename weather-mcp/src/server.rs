use std::sync::Arc;

use rmcp::model::{
    ClientJsonRpcMessage, ClientRequest, EmptyResult, Implementation, InitializeResult,
    JsonRpcError, JsonRpcMessage, JsonRpcResponse, JsonRpcVersion2_0, ListToolsResult,
    ProtocolVersion, RequestId, ServerCapabilities, ServerJsonRpcMessage, ServerResult,
};
use serde_json::Value;
use tracing::{debug, info, warn};
use weather_core::WeatherProvider;

use crate::{
    error::{Error, Result},
    tools::{self, GET_WEATHER, GetWeatherParams},
};

pub const SERVER_NAME: &str = "weather-mcp";

/// Methods answered by this server. A malformed request for one of these is
/// an invalid-params error rather than method-not-found.
const KNOWN_METHODS: &[&str] = &["initialize", "ping", "tools/list", "tools/call"];

/// What the HTTP layer should send back for one inbound message.
#[derive(Debug)]
pub enum Reply {
    /// JSON-RPC response to a request.
    Response(ServerJsonRpcMessage),
    /// Notification or client response: nothing to answer.
    Accepted,
    /// Not an answerable JSON-RPC message; there is no id to reply to.
    Invalid(String),
}

/// Stateless MCP message handler.
///
/// Built once at startup and shared by every HTTP request. It holds no
/// per-session or per-request state.
#[derive(Debug, Clone)]
pub struct McpServer {
    provider: Arc<dyn WeatherProvider>,
    info: Implementation,
}

impl McpServer {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self {
            provider,
            info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
        }
    }

    /// Handle one decoded JSON body.
    ///
    /// Protocol errors on requests become JSON-RPC error responses. Faults
    /// are returned as `Err` for the caller's error boundary.
    pub async fn handle_value(&self, raw: Value) -> Result<Reply> {
        let has_id = raw.get("id").is_some();
        let method = raw.get("method").and_then(Value::as_str).map(str::to_owned);

        match serde_json::from_value::<ClientJsonRpcMessage>(raw.clone()) {
            Ok(JsonRpcMessage::Request(request)) => {
                let method = method.unwrap_or_default();
                self.handle_request(request.id, request.request, &method)
                    .await
                    .map(Reply::Response)
            }
            Ok(JsonRpcMessage::Notification(_)) if has_id => Ok(Reply::Invalid(
                "notification must not carry an id".to_string(),
            )),
            Ok(JsonRpcMessage::Notification(_)) => {
                debug!(method = ?method, "Notification received");
                Ok(Reply::Accepted)
            }
            Ok(_) => {
                debug!("Ignoring client response; this server sends no requests");
                Ok(Reply::Accepted)
            }
            Err(e) => Ok(reject(&raw, method, e)),
        }
    }

    async fn handle_request(
        &self,
        id: RequestId,
        request: ClientRequest,
        method: &str,
    ) -> Result<ServerJsonRpcMessage> {
        match self.dispatch(request, method).await {
            Ok(result) => Ok(ServerJsonRpcMessage::Response(JsonRpcResponse {
                jsonrpc: JsonRpcVersion2_0,
                id,
                result,
            })),
            Err(err) if err.is_fault() => Err(err),
            Err(err) => {
                warn!(?id, method, error = %err, "Request rejected");
                Ok(error_message(id, &err))
            }
        }
    }

    async fn dispatch(&self, request: ClientRequest, method: &str) -> Result<ServerResult> {
        match request {
            ClientRequest::InitializeRequest(req) => {
                let protocol_version = negotiate_protocol_version(&req.params.protocol_version);
                info!(
                    client = %req.params.client_info.name,
                    protocol_version = ?protocol_version,
                    "Initializing"
                );
                Ok(ServerResult::InitializeResult(InitializeResult {
                    protocol_version,
                    capabilities: ServerCapabilities::builder()
                        .enable_tools()
                        .enable_tool_list_changed()
                        .build(),
                    server_info: self.info.clone(),
                    ..Default::default()
                }))
            }
            ClientRequest::PingRequest(_) => Ok(ServerResult::EmptyResult(EmptyResult {})),
            ClientRequest::ListToolsRequest(_) => Ok(ServerResult::ListToolsResult(
                ListToolsResult::with_all_items(tools::all_tools()),
            )),
            ClientRequest::CallToolRequest(req) => {
                let params = req.params;
                if params.name != GET_WEATHER {
                    return Err(Error::ToolNotFound(params.name.to_string()));
                }
                let args = GetWeatherParams::from_arguments(params.arguments)?;
                let result = tools::get_weather(self.provider.as_ref(), args).await?;
                Ok(ServerResult::CallToolResult(result))
            }
            _ => Err(Error::MethodNotFound(method.to_string())),
        }
    }
}

/// Answer the client's version if we speak it, otherwise our latest.
fn negotiate_protocol_version(requested: &ProtocolVersion) -> ProtocolVersion {
    let supported = [
        ProtocolVersion::LATEST,
        ProtocolVersion::V_2025_03_26,
        ProtocolVersion::V_2024_11_05,
    ];
    if supported.contains(requested) {
        requested.clone()
    } else {
        ProtocolVersion::LATEST
    }
}

fn error_message(id: RequestId, err: &Error) -> ServerJsonRpcMessage {
    ServerJsonRpcMessage::Error(JsonRpcError {
        jsonrpc: JsonRpcVersion2_0,
        id,
        error: err.to_error_data(),
    })
}

/// Classify a body that did not decode as a client message.
///
/// A request with a usable id gets a JSON-RPC error. Notifications and client
/// responses are never answered, whatever is wrong with them. Anything else
/// carrying an unusable id is invalid, so no request is silently dropped.
fn reject(raw: &Value, method: Option<String>, cause: serde_json::Error) -> Reply {
    let id = raw
        .get("id")
        .cloned()
        .and_then(|id| serde_json::from_value::<RequestId>(id).ok());
    let version_ok = raw.get("jsonrpc").and_then(Value::as_str) == Some("2.0");

    match (id, method) {
        (Some(id), Some(method)) => {
            let err = if !version_ok {
                Error::InvalidRequest("jsonrpc must be \"2.0\"".to_string())
            } else if KNOWN_METHODS.contains(&method.as_str()) {
                Error::InvalidParams(cause.to_string())
            } else {
                Error::MethodNotFound(method)
            };
            warn!(?id, error = %err, "Request rejected");
            Reply::Response(error_message(id, &err))
        }
        (_, Some(method)) if raw.get("id").is_none() => {
            debug!(%method, "Ignoring unrecognized notification");
            Reply::Accepted
        }
        (_, None) if raw.get("result").is_some() || raw.get("error").is_some() => {
            debug!("Ignoring malformed client response");
            Reply::Accepted
        }
        _ => Reply::Invalid(cause.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use weather_core::Location;

    #[derive(Debug)]
    struct Unreachable;

    #[async_trait]
    impl WeatherProvider for Unreachable {
        async fn search_locations(&self, _city: &str) -> weather_core::Result<Vec<Location>> {
            panic!("no outbound call expected")
        }

        async fn fetch_forecast(&self, _lat: f64, _lon: f64) -> weather_core::Result<Value> {
            panic!("no outbound call expected")
        }
    }

    async fn reply(body: Value) -> Reply {
        McpServer::new(Arc::new(Unreachable))
            .handle_value(body)
            .await
            .unwrap()
    }

    async fn response(body: Value) -> Value {
        match reply(body).await {
            Reply::Response(message) => serde_json::to_value(message).unwrap(),
            other => panic!("expected a response, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn initialize_reports_tools_capability() {
        let resp = response(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": {
                "protocolVersion": "2025-03-26",
                "capabilities": {},
                "clientInfo": {"name": "test", "version": "0.0.1"}
            }
        }))
        .await;

        assert_eq!(resp["id"], 1);
        assert_eq!(resp["result"]["protocolVersion"], "2025-03-26");
        assert_eq!(resp["result"]["capabilities"]["tools"]["listChanged"], true);
        assert_eq!(resp["result"]["serverInfo"]["name"], SERVER_NAME);
    }

    #[tokio::test]
    async fn ping_returns_empty_result() {
        let resp = response(json!({"jsonrpc": "2.0", "id": "p", "method": "ping"})).await;
        assert_eq!(resp["id"], "p");
        assert_eq!(resp["result"], json!({}));
    }

    #[tokio::test]
    async fn unknown_method_is_method_not_found() {
        let resp = response(json!({"jsonrpc": "2.0", "id": 2, "method": "bogus/method"})).await;
        assert_eq!(resp["id"], 2);
        assert_eq!(resp["error"]["code"], -32601);
    }

    #[tokio::test]
    async fn unknown_tool_is_invalid_params() {
        let resp = response(json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "tools/call",
            "params": {"name": "get-forecast", "arguments": {}}
        }))
        .await;
        assert_eq!(resp["error"]["code"], -32602);
    }

    #[tokio::test]
    async fn missing_city_never_reaches_provider() {
        let resp = response(json!({
            "jsonrpc": "2.0",
            "id": 4,
            "method": "tools/call",
            "params": {"name": "get-weather", "arguments": {}}
        }))
        .await;
        assert_eq!(resp["id"], 4);
        assert_eq!(resp["error"]["code"], -32602);
    }

    #[tokio::test]
    async fn notifications_get_no_response() {
        let body = json!({"jsonrpc": "2.0", "method": "notifications/initialized"});
        assert!(matches!(reply(body).await, Reply::Accepted));
    }

    #[tokio::test]
    async fn unusable_request_ids_are_rejected_not_dropped() {
        for id in [json!(1.5), Value::Null, json!(u64::MAX)] {
            let body = json!({"jsonrpc": "2.0", "id": id, "method": "ping"});
            assert!(
                matches!(reply(body).await, Reply::Invalid(_)),
                "id {id} was not rejected"
            );
        }
    }

    #[tokio::test]
    async fn wrong_jsonrpc_version_is_invalid_request() {
        let resp = response(json!({"jsonrpc": "1.0", "id": 5, "method": "ping"})).await;
        assert_eq!(resp["id"], 5);
        assert_eq!(resp["error"]["code"], -32600);
    }

    #[tokio::test]
    async fn wrong_version_notification_gets_no_response() {
        let body = json!({"jsonrpc": "1.0", "method": "notifications/initialized"});
        assert!(matches!(reply(body).await, Reply::Accepted));
    }

    #[tokio::test]
    async fn wrong_version_client_response_gets_no_response() {
        let body = json!({"jsonrpc": "1.0", "id": 7, "result": {}});
        assert!(matches!(reply(body).await, Reply::Accepted));
    }
}
