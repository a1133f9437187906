//! Typed client for the Dex personal-CRM service.
//!
//! Dex exposes a Hasura GraphQL endpoint for most operations and a small
//! REST surface for note creation. This crate wraps both behind
//! [`DexClient`], decodes responses into the record types in [`records`],
//! and carries the domain rules that do not need a network round trip:
//! identifier validation, meeting-type canonicalization, and the
//! partial-id matching used by the recovery tools.

pub mod client;
pub mod config;
pub mod error;
pub mod id;
pub mod meeting;
pub mod partial;
pub mod records;

pub use client::{DexClient, ReminderCreation};
pub use config::{ConfigError, DexConfig};
pub use error::ApiError;
pub use id::{is_valid_dex_id, ID_FORMAT_HINT};
pub use meeting::MeetingType;
