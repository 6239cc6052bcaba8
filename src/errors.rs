use thiserror::Error;

pub const PARSE_ERROR_CODE: i64 = -32700;
pub const HANDLER_ERROR_CODE: i64 = -1;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Parse error")]
    Parse,
    #[error("Unknown method: {0}")]
    UnknownMethod(String),
    #[error("Unknown prompt: {0}")]
    UnknownPrompt(String),
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Unknown resource: {0}")]
    UnknownResource(String),
    #[error("Invalid params: {0}")]
    InvalidParams(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// JSON-RPC error code carried in the response envelope.
    pub fn code(&self) -> i64 {
        match self {
            Self::Parse => PARSE_ERROR_CODE,
            _ => HANDLER_ERROR_CODE,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::internal(format!("result serialization failed: {err}"))
    }
}

/// Errors from the stdio transport.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("read error: {0}")]
    Read(#[source] std::io::Error),
    #[error("write error: {0}")]
    Write(#[source] std::io::Error),
    #[error("failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_uses_reserved_code() {
        assert_eq!(AppError::Parse.code(), -32700);
        assert_eq!(AppError::Parse.to_string(), "Parse error");
    }

    #[test]
    fn handler_failures_share_generic_code() {
        let errors = [
            AppError::UnknownMethod("x".to_string()),
            AppError::UnknownPrompt("x".to_string()),
            AppError::UnknownTool("x".to_string()),
            AppError::UnknownResource("x".to_string()),
            AppError::invalid_params("x"),
            AppError::internal("x"),
        ];

        for error in errors {
            assert_eq!(error.code(), -1, "{error}");
        }
    }

    #[test]
    fn unknown_method_message_names_method() {
        let error = AppError::UnknownMethod("tools/destroy".to_string());
        assert_eq!(error.to_string(), "Unknown method: tools/destroy");
    }
}
