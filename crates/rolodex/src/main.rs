//! rolodex - MCP server for the Dex personal CRM
//!
//! Subcommands:
//! - `rolodex serve` - Run the MCP server on stdio
//! - `rolodex call <tool> [args]` - Run one tool invocation and print the result

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use dexapi::{DexClient, DexConfig};
use rolodex::{commands, mcp};

#[derive(Parser)]
#[command(name = "rolodex")]
#[command(about = "MCP server exposing Dex contacts, notes, and reminders as tools")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the MCP server on stdio
    Serve,

    /// Run one tool and print the response text
    Call {
        /// Tool name (e.g., get_contacts)
        tool: String,

        /// Tool arguments as a JSON object
        args: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries the protocol in serve mode; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = DexConfig::from_env().context("rolodex needs a Dex API key to start")?;
    let client = DexClient::new(config);

    match cli.command {
        Commands::Serve => {
            mcp::serve(client).await?;
        }
        Commands::Call { tool, args } => {
            commands::call(&client, &tool, args.as_deref()).await?;
        }
    }

    Ok(())
}
