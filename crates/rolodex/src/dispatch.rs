//! Tool registry and dispatch.
//!
//! Every invocation runs three phases: argument deserialization and
//! identifier checks, then normalization (meeting-type canonicalization,
//! pagination defaults), then the remote call. A failure in the first two
//! phases never touches the network. Failures anywhere become an error
//! ToolResponse; nothing here panics on caller input.

use serde::Serialize;
use serde_json::Value;

use dexapi::records::{ContactInput, ContactUpdate, ReminderUpdate};
use dexapi::{is_valid_dex_id, ApiError, DexClient, MeetingType, ID_FORMAT_HINT};
use dexproto::{ToolDescriptor, ToolError, ToolResponse, ToolResult};

use crate::schema::*;

const DEFAULT_LIMIT: u32 = 50;
const DEFAULT_OFFSET: u32 = 0;

/// JSON Schema for a request type, draft-07 with subschemas inlined so
/// clients get self-contained tool descriptors.
fn schema_for<T: schemars::JsonSchema>() -> Value {
    let settings = schemars::generate::SchemaSettings::draft07().with(|s| {
        s.inline_subschemas = true;
    });
    let generator = settings.into_generator();
    let schema = generator.into_root_schema_for::<T>();
    serde_json::to_value(schema).unwrap_or_else(|_| serde_json::json!({ "type": "object" }))
}

fn tool<T: schemars::JsonSchema>(name: &str, description: &str) -> ToolDescriptor {
    ToolDescriptor {
        name: name.to_string(),
        description: description.to_string(),
        input_schema: schema_for::<T>(),
    }
}

/// The full tool catalog, in the order clients see it.
pub fn list_tools() -> Vec<ToolDescriptor> {
    vec![
        // Contact tools
        tool::<GetContactsRequest>("get_contacts", "Get a list of contacts from Dex"),
        tool::<GetContactByIdRequest>(
            "get_contact_by_id",
            "Get a specific contact by ID with notes and reminders",
        ),
        tool::<SearchContactsRequest>(
            "search_contacts",
            "Search contacts by name, email, or company",
        ),
        tool::<FindContactsRequest>(
            "find_contacts_by_partial_id",
            "Find contacts by partial ID, name, or company. Use this when you have an invalid UUID and need to find the correct contact UUID.",
        ),
        tool::<CreateContactRequest>("create_contact", "Create a new contact"),
        tool::<UpdateContactRequest>("update_contact", "Update an existing contact"),
        tool::<DeleteContactRequest>("delete_contact", "Delete a contact"),
        // Note tools
        tool::<GetNotesByContactRequest>(
            "get_notes_by_contact",
            "Get all notes for a specific contact",
        ),
        tool::<GetAllNotesRequest>("get_all_notes", "Get all notes with pagination"),
        tool::<SearchNotesRequest>("search_notes", "Search notes by content"),
        tool::<CreateNoteRequest>(
            "create_note",
            "Create a new note for a contact. Optionally specify the note/meeting type (e.g., note, call, email, text_messaging, etc.)",
        ),
        tool::<UpdateNoteRequest>("update_note", "Update an existing note"),
        tool::<DeleteNoteRequest>("delete_note", "Delete a note"),
        // Reminder tools
        tool::<GetRemindersByContactRequest>(
            "get_reminders_by_contact",
            "Get all reminders for a specific contact",
        ),
        tool::<GetAllRemindersRequest>("get_all_reminders", "Get all reminders with pagination"),
        tool::<SearchRemindersRequest>("search_reminders", "Search reminders by text"),
        tool::<FindRemindersRequest>(
            "find_reminders_by_partial_id",
            "Find reminders by partial ID or text content. Use this when you have an invalid UUID and need to find the correct reminder UUID.",
        ),
        tool::<CreateReminderRequest>("create_reminder", "Create a new reminder for a contact"),
        tool::<UpdateReminderRequest>("update_reminder", "Update an existing reminder"),
        tool::<CompleteReminderRequest>("complete_reminder", "Mark a reminder as complete"),
        tool::<DeleteReminderRequest>("delete_reminder", "Delete a reminder"),
    ]
}

/// Run one tool invocation and wrap the outcome in the response envelope.
#[tracing::instrument(skip(client, args), fields(tool = %name))]
pub async fn dispatch(client: &DexClient, name: &str, args: Value) -> ToolResponse {
    let result = dispatch_inner(client, name, args).await;
    if let Err(e) = &result {
        tracing::debug!(code = e.code(), "tool invocation failed");
    }
    result.into()
}

async fn dispatch_inner(client: &DexClient, name: &str, args: Value) -> ToolResult {
    match name {
        // ====================================================================
        // Contacts
        // ====================================================================
        "get_contacts" => {
            let request: GetContactsRequest = parse_args(args)?;
            let contacts = client
                .get_contacts(
                    request.limit.unwrap_or(DEFAULT_LIMIT),
                    request.offset.unwrap_or(DEFAULT_OFFSET),
                )
                .await?;
            render(&contacts)
        }

        "get_contact_by_id" => {
            let request: GetContactByIdRequest = parse_args(args)?;
            check_contact_id("id", &request.id)?;
            let contact = client.get_contact_by_id(&request.id).await?;
            render(&contact)
        }

        "search_contacts" => {
            let request: SearchContactsRequest = parse_args(args)?;
            let contacts = client.search_contacts(&request.search_term).await?;
            render(&contacts)
        }

        "find_contacts_by_partial_id" => {
            let request: FindContactsRequest = parse_args(args)?;
            let found = client.find_contacts_by_partial_id(&request.partial_id).await?;
            if found.is_empty() {
                return Ok(format!(
                    "No contacts found matching \"{}\". Please check your search term or try a different approach.",
                    request.partial_id
                ));
            }
            Ok(format!(
                "Found {} contact(s) matching \"{}\":\n{}",
                found.len(),
                request.partial_id,
                render(&found)?
            ))
        }

        "create_contact" => {
            let request: CreateContactRequest = parse_args(args)?;
            let contact = client
                .create_contact(ContactInput {
                    first_name: request.first_name,
                    last_name: request.last_name,
                    company: request.company,
                    job_title: request.job_title,
                    description: request.description,
                })
                .await?;
            Ok(format!("Contact created successfully: {}", render(&contact)?))
        }

        "update_contact" => {
            let request: UpdateContactRequest = parse_args(args)?;
            check_contact_id("id", &request.id)?;
            let updated = client
                .update_contact(
                    &request.id,
                    ContactUpdate {
                        first_name: request.first_name,
                        last_name: request.last_name,
                        company: request.company,
                        job_title: request.job_title,
                        description: request.description,
                    },
                )
                .await?;
            Ok(format!("Contact updated successfully: {}", render(&updated)?))
        }

        "delete_contact" => {
            let request: DeleteContactRequest = parse_args(args)?;
            check_contact_id("id", &request.id)?;
            let deleted = client.delete_contact(&request.id).await?;
            Ok(format!("Contact deleted successfully: {}", render(&deleted)?))
        }

        // ====================================================================
        // Notes
        // ====================================================================
        "get_notes_by_contact" => {
            let request: GetNotesByContactRequest = parse_args(args)?;
            check_contact_id("contactId", &request.contact_id)?;
            let notes = client.get_notes_by_contact(&request.contact_id).await?;
            render(&notes)
        }

        "get_all_notes" => {
            let request: GetAllNotesRequest = parse_args(args)?;
            let notes = client
                .get_all_notes(
                    request.limit.unwrap_or(DEFAULT_LIMIT),
                    request.offset.unwrap_or(DEFAULT_OFFSET),
                )
                .await?;
            render(&notes)
        }

        "search_notes" => {
            let request: SearchNotesRequest = parse_args(args)?;
            let notes = client.search_notes(&request.search_term).await?;
            render(&notes)
        }

        "create_note" => {
            let request: CreateNoteRequest = parse_args(args)?;
            check_contact_id("contactId", &request.contact_id)?;
            let meeting_type = MeetingType::canonicalize(request.meeting_type.as_deref());
            let created = client
                .create_note(
                    &request.contact_id,
                    &request.content,
                    request.event_time.as_deref(),
                    meeting_type,
                )
                .await
                .map_err(rephrase_meeting_constraint)?;
            Ok(format!("Note created successfully: {}", render(&created)?))
        }

        "update_note" => {
            let request: UpdateNoteRequest = parse_args(args)?;
            check_note_id(&request.id)?;
            let updated = client.update_note(&request.id, &request.content).await?;
            Ok(format!("Note updated successfully: {}", render(&updated)?))
        }

        "delete_note" => {
            let request: DeleteNoteRequest = parse_args(args)?;
            check_note_id(&request.id)?;
            let deleted = client.delete_note(&request.id).await?;
            Ok(format!("Note deleted successfully: {}", render(&deleted)?))
        }

        // ====================================================================
        // Reminders
        // ====================================================================
        "get_reminders_by_contact" => {
            let request: GetRemindersByContactRequest = parse_args(args)?;
            check_contact_id("contactId", &request.contact_id)?;
            let reminders = client.get_reminders_by_contact(&request.contact_id).await?;
            render(&reminders)
        }

        "get_all_reminders" => {
            let request: GetAllRemindersRequest = parse_args(args)?;
            let reminders = client
                .get_all_reminders(
                    request.limit.unwrap_or(DEFAULT_LIMIT),
                    request.offset.unwrap_or(DEFAULT_OFFSET),
                )
                .await?;
            render(&reminders)
        }

        "search_reminders" => {
            let request: SearchRemindersRequest = parse_args(args)?;
            let reminders = client.search_reminders(&request.search_term).await?;
            render(&reminders)
        }

        "find_reminders_by_partial_id" => {
            let request: FindRemindersRequest = parse_args(args)?;
            let found = client.find_reminders_by_partial_id(&request.partial_id).await?;
            if found.is_empty() {
                return Ok(format!(
                    "No reminders found matching \"{}\". Please check your search term or try a different approach.",
                    request.partial_id
                ));
            }
            Ok(format!(
                "Found {} reminder(s) matching \"{}\":\n{}",
                found.len(),
                request.partial_id,
                render(&found)?
            ))
        }

        "create_reminder" => {
            let request: CreateReminderRequest = parse_args(args)?;
            check_contact_id("contactId", &request.contact_id)?;
            let creation = client
                .create_reminder(
                    &request.contact_id,
                    &request.text,
                    &request.due_date,
                    request.recurrence.as_deref(),
                )
                .await?;
            if let Some(link_error) = creation.link_error {
                return Err(ToolError::upstream(format!(
                    "Reminder {} was created but could not be linked to contact {}: {}",
                    creation.reminder.id, request.contact_id, link_error
                )));
            }
            Ok(format!(
                "Reminder created successfully: {}",
                render(&creation.reminder)?
            ))
        }

        "update_reminder" => {
            let request: UpdateReminderRequest = parse_args(args)?;
            check_reminder_id(&request.id)?;
            let updated = client
                .update_reminder(
                    &request.id,
                    ReminderUpdate {
                        text: request.text,
                        due_at_date: request.due_date,
                        is_complete: request.is_complete,
                        recurrence: request.recurrence,
                    },
                )
                .await?;
            Ok(format!("Reminder updated successfully: {}", render(&updated)?))
        }

        "complete_reminder" => {
            let request: CompleteReminderRequest = parse_args(args)?;
            check_reminder_id(&request.id)?;
            let completed = client.complete_reminder(&request.id).await?;
            Ok(format!("Reminder marked as complete: {}", render(&completed)?))
        }

        "delete_reminder" => {
            let request: DeleteReminderRequest = parse_args(args)?;
            check_reminder_id(&request.id)?;
            let deleted = client.delete_reminder(&request.id).await?;
            Ok(format!("Reminder deleted successfully: {}", render(&deleted)?))
        }

        _ => Err(ToolError::validation(format!("Unknown tool: {}", name))),
    }
}

fn parse_args<T: serde::de::DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args)
        .map_err(|e| ToolError::validation(format!("Invalid arguments: {}", e)))
}

fn render<T: Serialize>(value: &T) -> Result<String, ToolError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ToolError::internal(format!("Failed to render response: {}", e)))
}

fn invalid_id(label: &str, field: &str, value: &str, recovery_tool: Option<&str>) -> ToolError {
    let base = format!(
        "Invalid UUID format for {}: \"{}\". Expected format: {}",
        label, value, ID_FORMAT_HINT
    );
    match recovery_tool {
        Some(tool) => ToolError::validation_recoverable(
            format!("{}. Use {} to locate the correct ID.", base, tool),
            field,
            tool,
        ),
        None => ToolError::validation_field(base, field),
    }
}

fn check_contact_id(field: &str, value: &str) -> Result<(), ToolError> {
    if is_valid_dex_id(value) {
        return Ok(());
    }
    Err(invalid_id(
        "contact ID",
        field,
        value,
        Some("find_contacts_by_partial_id"),
    ))
}

fn check_note_id(value: &str) -> Result<(), ToolError> {
    if is_valid_dex_id(value) {
        return Ok(());
    }
    Err(invalid_id("note ID", "id", value, None))
}

fn check_reminder_id(value: &str) -> Result<(), ToolError> {
    if is_valid_dex_id(value) {
        return Ok(());
    }
    Err(invalid_id(
        "reminder ID",
        "id",
        value,
        Some("find_reminders_by_partial_id"),
    ))
}

/// Recognize an upstream rejection of the meeting-type field and rephrase
/// it with the accepted keys. Everything else passes through unchanged.
fn rephrase_meeting_constraint(err: ApiError) -> ToolError {
    let text = err.to_string();
    if text.contains("meeting_type") {
        return ToolError::constraint(
            "meetingType",
            format!(
                "Dex rejected the meeting type. Valid values: {}",
                MeetingType::valid_keys()
            ),
        );
    }
    err.into()
}
