//! dexproto - Tool envelope types for the rolodex MCP server
//!
//! This crate defines the shapes that cross the tool boundary: the descriptor
//! returned by discovery, the content/response envelope every dispatch outcome
//! is wrapped in, and the typed error taxonomy handlers fail with.
//!
//! The envelope follows the MCP tool-call result shape: an ordered list of
//! content blocks plus an `isError` flag that is omitted on the wire when
//! false. Handlers themselves never build envelopes directly - they return
//! `ToolResult` and the dispatcher does the wrapping, so no failure path can
//! escape the envelope.

pub mod error;

pub use error::ToolError;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of a tool handler: rendered text on success, typed error otherwise.
pub type ToolResult = Result<String, ToolError>;

// ============================================================================
// Content blocks
// ============================================================================

/// Content block in a tool response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Content {
    /// Text content.
    Text { text: String },
}

impl Content {
    /// Create text content.
    pub fn text(text: impl Into<String>) -> Self {
        Content::Text { text: text.into() }
    }
}

// ============================================================================
// Response envelope
// ============================================================================

/// The uniform outward shape of every dispatch outcome, success or failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResponse {
    /// Content blocks representing the result.
    pub content: Vec<Content>,

    /// Whether the tool call resulted in an error.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolResponse {
    /// Create a successful response with content.
    pub fn success(content: Vec<Content>) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    /// Create a successful response with a single text block.
    pub fn text(text: impl Into<String>) -> Self {
        Self::success(vec![Content::text(text)])
    }

    /// Create an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![Content::text(message)],
            is_error: true,
        }
    }
}

impl From<ToolResult> for ToolResponse {
    fn from(result: ToolResult) -> Self {
        match result {
            Ok(text) => Self::text(text),
            Err(e) => Self::error(format!("Error: {}", e.message())),
        }
    }
}

// ============================================================================
// Tool descriptors
// ============================================================================

/// A tool definition as returned by discovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    /// Programmatic name of the tool.
    pub name: String,

    /// Description for the calling agent.
    pub description: String,

    /// JSON Schema for the argument object.
    pub input_schema: Value,
}
