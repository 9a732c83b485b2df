use rmcp::model::{ErrorCode, ErrorData};

/// Errors raised while handling an MCP message.
///
/// Protocol errors are answered with a JSON-RPC error response. Faults
/// (`Lookup`, `Serialize`) are not handled here and surface as an HTTP 500.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Tool {0} not found")]
    ToolNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error(transparent)]
    Lookup(#[from] weather_core::Error),

    #[error("Failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// True for errors that should escape to the top-level HTTP handler.
    pub fn is_fault(&self) -> bool {
        matches!(self, Error::Lookup(_) | Error::Serialize(_))
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Error::InvalidRequest(_) => ErrorCode::INVALID_REQUEST,
            Error::MethodNotFound(_) => ErrorCode::METHOD_NOT_FOUND,
            Error::ToolNotFound(_) | Error::InvalidParams(_) => ErrorCode::INVALID_PARAMS,
            Error::Lookup(_) | Error::Serialize(_) => ErrorCode::INTERNAL_ERROR,
        }
    }

    pub fn to_error_data(&self) -> ErrorData {
        ErrorData::new(self.code(), self.to_string(), None)
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use weather_core::Stage;

    #[test]
    fn protocol_errors_map_to_jsonrpc_codes() {
        assert_eq!(
            Error::MethodNotFound("resources/list".into()).code(),
            ErrorCode::METHOD_NOT_FOUND
        );
        assert_eq!(
            Error::ToolNotFound("get-forecast".into())
                .to_error_data()
                .message,
            "Tool get-forecast not found"
        );
        assert!(!Error::InvalidParams("missing field `city`".into()).is_fault());
    }

    #[test]
    fn lookup_failures_are_faults() {
        let err = Error::from(weather_core::Error::Status {
            stage: Stage::Geocoding,
            status: 502,
            body: String::new(),
        });
        assert!(err.is_fault());
        assert_eq!(err.code(), ErrorCode::INTERNAL_ERROR);
    }
}
