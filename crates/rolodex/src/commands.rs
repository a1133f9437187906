//! CLI command implementations

use anyhow::{bail, Context, Result};

use dexapi::DexClient;
use dexproto::Content;

use crate::dispatch;

/// Run one tool invocation and print the response text.
///
/// Exits through an error when the tool reports a failure, so shell callers
/// can branch on the status code.
pub async fn call(client: &DexClient, tool: &str, args: Option<&str>) -> Result<()> {
    let arguments = match args {
        Some(raw) => serde_json::from_str(raw).context("Failed to parse arguments as JSON")?,
        None => serde_json::Value::Object(Default::default()),
    };

    let response = dispatch::dispatch(client, tool, arguments).await;
    for content in &response.content {
        match content {
            Content::Text { text } => println!("{}", text),
        }
    }

    if response.is_error {
        bail!("Tool {} returned an error", tool);
    }
    Ok(())
}
