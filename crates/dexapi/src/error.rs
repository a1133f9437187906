//! Client-side error type for Dex API calls.

use dexproto::ToolError;
use thiserror::Error;

/// Errors from the Dex API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure before a response arrived.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the service.
    #[error("API Error: {status} - {reason}")]
    Status { status: u16, reason: String },

    /// The service answered 2xx but the body carried a GraphQL error list.
    #[error("GraphQL Error: {0}")]
    Graphql(String),

    /// Response body did not match the expected shape.
    #[error("Failed to decode {what}: {message}")]
    Decode { what: &'static str, message: String },
}

impl ApiError {
    pub(crate) fn decode(what: &'static str, err: serde_json::Error) -> Self {
        Self::Decode {
            what,
            message: err.to_string(),
        }
    }
}

impl From<ApiError> for ToolError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::Status { status, .. } => {
                let message = e.to_string();
                ToolError::upstream_status(status, message)
            }
            ApiError::Graphql(_) | ApiError::Http(_) => ToolError::upstream(e.to_string()),
            ApiError::Decode { .. } => ToolError::internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn status_message_matches_wire_format() {
        let err = ApiError::Status {
            status: 502,
            reason: "Bad Gateway".to_string(),
        };
        assert_eq!(err.to_string(), "API Error: 502 - Bad Gateway");
    }

    #[test]
    fn status_converts_to_upstream_with_code() {
        let err = ApiError::Status {
            status: 404,
            reason: "Not Found".to_string(),
        };
        let tool_err: ToolError = err.into();
        assert_eq!(tool_err.code(), "upstream_error");
        assert_eq!(tool_err.message(), "API Error: 404 - Not Found");
    }

    #[test]
    fn graphql_converts_to_upstream_without_status() {
        let err = ApiError::Graphql("[{\"message\":\"field not found\"}]".to_string());
        let tool_err: ToolError = err.into();
        match tool_err {
            ToolError::Upstream(u) => {
                assert_eq!(u.status, None);
                assert!(u.message.starts_with("GraphQL Error:"));
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[test]
    fn decode_converts_to_internal() {
        let parse_err = serde_json::from_str::<u32>("\"zzz\"").unwrap_err();
        let tool_err: ToolError = ApiError::decode("contacts", parse_err).into();
        assert_eq!(tool_err.code(), "internal_error");
    }
}
