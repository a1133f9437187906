//! rolodex - MCP server for the Dex personal CRM
//!
//! This library provides:
//! - `schema`: request types for every tool, with JSON Schema derivation
//! - `dispatch`: tool registry and invocation (validate, normalize, delegate)
//! - `mcp`: JSON-RPC 2.0 server over stdio
//! - `commands`: one-shot CLI command implementations

pub mod commands;
pub mod dispatch;
pub mod mcp;
pub mod schema;
