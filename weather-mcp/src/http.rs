//! Stateless streamable-HTTP endpoint.
//!
//! Only `POST` carries traffic. With no sessions there is nothing to stream
//! (`GET`) or terminate (`DELETE`), so both are answered with a fixed 405.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use rmcp::model::ErrorCode;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use crate::{
    error::Result,
    server::{McpServer, Reply},
};

/// Implementation-defined JSON-RPC server error, used for the 405 body.
const SERVER_ERROR: ErrorCode = ErrorCode(-32000);

pub const MCP_PATH: &str = "/mcp";

/// Message returned for `GET` and `DELETE` on the endpoint.
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed.";

pub fn router(server: Arc<McpServer>) -> Router {
    Router::new()
        .route(
            MCP_PATH,
            post(handle_post)
                .get(handle_method_not_allowed)
                .delete(handle_method_not_allowed),
        )
        .with_state(server)
        .layer(TraceLayer::new_for_http())
}

/// Top-level error boundary: any fault escaping the MCP server becomes the
/// generic internal-error envelope.
async fn handle_post(State(server): State<Arc<McpServer>>, body: Bytes) -> Response {
    match process_post(&server, &body).await {
        Ok(response) => response,
        Err(err) => {
            error!(error = %err, "Error handling MCP request");
            internal_error()
        }
    }
}

async fn process_post(server: &McpServer, body: &[u8]) -> Result<Response> {
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            debug!(error = %e, "Rejecting unparseable body");
            return Ok(envelope(
                StatusCode::BAD_REQUEST,
                ErrorCode::PARSE_ERROR,
                "Parse error",
            ));
        }
    };

    info!(body = %value, "Received MCP request");

    match server.handle_value(value).await? {
        Reply::Response(message) => Ok(Json(message).into_response()),
        Reply::Accepted => Ok(StatusCode::ACCEPTED.into_response()),
        Reply::Invalid(reason) => {
            debug!(%reason, "Rejecting malformed JSON-RPC message");
            Ok(envelope(
                StatusCode::BAD_REQUEST,
                ErrorCode::INVALID_REQUEST,
                "Invalid Request",
            ))
        }
    }
}

async fn handle_method_not_allowed() -> Response {
    info!("Rejecting non-POST MCP request");
    let mut response = envelope(
        StatusCode::METHOD_NOT_ALLOWED,
        SERVER_ERROR,
        METHOD_NOT_ALLOWED_MESSAGE,
    );
    response
        .headers_mut()
        .insert(header::ALLOW, header::HeaderValue::from_static("POST"));
    response
}

fn internal_error() -> Response {
    envelope(
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorCode::INTERNAL_ERROR,
        "Internal server error",
    )
}

/// A JSON-RPC error with a null id, under the given HTTP status.
fn envelope(status: StatusCode, code: ErrorCode, message: &str) -> Response {
    let body = json!({
        "jsonrpc": "2.0",
        "error": {"code": code.0, "message": message},
        "id": null,
    });
    (status, Json(body)).into_response()
}
