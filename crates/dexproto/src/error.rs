//! Typed errors for tool handlers.
//!
//! Errors are typed by category so the dispatcher and the one-shot CLI can
//! tell local rejections from remote failures. An empty search result is not
//! an error and has no variant here; it renders as a normal response.

use serde::{Deserialize, Serialize};

/// Typed errors by category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum ToolError {
    /// Malformed identifier or missing/undeserializable argument.
    /// Detected locally - the remote service is never contacted.
    Validation(ValidationError),

    /// The remote service reported an error list or the transport
    /// returned a non-2xx status.
    Upstream(UpstreamError),

    /// A recognized upstream constraint rejection, rephrased into an
    /// actionable message (currently only the meeting-type field).
    Constraint(ConstraintError),

    /// Internal error (should not happen)
    Internal(InternalError),
}

impl ToolError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(ValidationError {
            message: message.into(),
            field: None,
            recovery_tool: None,
        })
    }

    /// Create a validation error with field
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation(ValidationError {
            message: message.into(),
            field: Some(field.into()),
            recovery_tool: None,
        })
    }

    /// Create a validation error carrying the name of a recovery tool
    pub fn validation_recoverable(
        message: impl Into<String>,
        field: impl Into<String>,
        recovery_tool: impl Into<String>,
    ) -> Self {
        Self::Validation(ValidationError {
            message: message.into(),
            field: Some(field.into()),
            recovery_tool: Some(recovery_tool.into()),
        })
    }

    /// Create an upstream error without a transport status
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(UpstreamError {
            status: None,
            message: message.into(),
        })
    }

    /// Create an upstream error from a transport status
    pub fn upstream_status(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream(UpstreamError {
            status: Some(status),
            message: message.into(),
        })
    }

    /// Create a constraint error
    pub fn constraint(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Constraint(ConstraintError {
            field: field.into(),
            message: message.into(),
        })
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(InternalError {
            message: message.into(),
        })
    }

    /// Get a human-readable message
    pub fn message(&self) -> String {
        match self {
            Self::Validation(e) => e.message.clone(),
            Self::Upstream(e) => e.message.clone(),
            Self::Constraint(e) => e.message.clone(),
            Self::Internal(e) => e.message.clone(),
        }
    }

    /// Get a code for programmatic handling
    pub fn code(&self) -> &str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::Upstream(_) => "upstream_error",
            Self::Constraint(_) => "constraint_violation",
            Self::Internal(_) => "internal_error",
        }
    }

    /// True when the failure was detected locally, before any outbound call.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Validation error details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub message: String,
    pub field: Option<String>,
    /// Tool the caller can use to recover the correct identifier, if one exists.
    pub recovery_tool: Option<String>,
}

/// Upstream error details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamError {
    /// Transport status, absent when the failure was protocol-level
    /// (an error list inside a 2xx body).
    pub status: Option<u16>,
    pub message: String,
}

/// Constraint error details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintError {
    pub field: String,
    pub message: String,
}

/// Internal error details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternalError {
    pub message: String,
}

// Conversion from anyhow::Error for convenience
impl From<anyhow::Error> for ToolError {
    fn from(e: anyhow::Error) -> Self {
        Self::internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn error_serialization() {
        let err = ToolError::validation_recoverable(
            "Invalid UUID format for contact ID: \"abc\"",
            "id",
            "find_contacts_by_partial_id",
        );
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("validation"));
        assert!(json.contains("find_contacts_by_partial_id"));

        let err2: ToolError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, err2);
    }

    #[test]
    fn upstream_carries_status() {
        let err = ToolError::upstream_status(502, "API Error: 502 - Bad Gateway");
        assert_eq!(err.code(), "upstream_error");
        assert_eq!(err.message(), "API Error: 502 - Bad Gateway");
        assert!(!err.is_local());

        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["category"], "upstream");
        assert_eq!(json["status"], 502);
    }

    #[test]
    fn validation_is_local() {
        assert!(ToolError::validation("missing field").is_local());
        assert!(!ToolError::upstream("boom").is_local());
        assert!(!ToolError::internal("bug").is_local());
    }

    #[test]
    fn anyhow_converts_to_internal() {
        let err: ToolError = anyhow::anyhow!("unexpected defect").into();
        assert_eq!(err.code(), "internal_error");
        assert_eq!(err.message(), "unexpected defect");
    }
}
