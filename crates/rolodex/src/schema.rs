//! Request types for every tool the server exposes.
//!
//! Field names follow the wire contract, which is not uniform: contact CRUD
//! uses snake_case arguments while the note and reminder tools use camelCase.
//! The serde attributes carry that, so keep them when adding fields.

use serde::{Deserialize, Serialize};

/// Request to list contacts with pagination.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetContactsRequest {
    #[schemars(description = "Number of contacts to retrieve (default: 50)")]
    pub limit: Option<u32>,

    #[schemars(description = "Offset for pagination (default: 0)")]
    pub offset: Option<u32>,
}

/// Request to fetch one contact with its notes and reminders.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetContactByIdRequest {
    #[schemars(description = "Contact ID")]
    pub id: String,
}

/// Request to search contacts by display fields.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchContactsRequest {
    #[schemars(description = "Search term")]
    pub search_term: String,
}

/// Request to resolve a partial or invalid contact identifier.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct FindContactsRequest {
    #[schemars(
        description = "Partial ID, name, company, or any identifying information for the contact"
    )]
    #[serde(alias = "partialId")]
    pub partial_id: String,
}

/// Request to create a contact.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CreateContactRequest {
    #[schemars(description = "First name")]
    pub first_name: String,

    #[schemars(description = "Last name")]
    pub last_name: Option<String>,

    #[schemars(description = "Company name")]
    pub company: Option<String>,

    #[schemars(description = "Job title")]
    pub job_title: Option<String>,

    #[schemars(description = "Description/notes about the contact")]
    pub description: Option<String>,
}

/// Request to update a contact. Only the listed fields can change.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct UpdateContactRequest {
    #[schemars(description = "Contact ID")]
    pub id: String,

    #[schemars(description = "First name")]
    pub first_name: Option<String>,

    #[schemars(description = "Last name")]
    pub last_name: Option<String>,

    #[schemars(description = "Company name")]
    pub company: Option<String>,

    #[schemars(description = "Job title")]
    pub job_title: Option<String>,

    #[schemars(description = "Description/notes about the contact")]
    pub description: Option<String>,
}

/// Request to delete a contact.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct DeleteContactRequest {
    #[schemars(description = "Contact ID")]
    pub id: String,
}

/// Request to list the notes linked to one contact.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetNotesByContactRequest {
    #[schemars(description = "Contact ID")]
    pub contact_id: String,
}

/// Request to list notes with pagination.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetAllNotesRequest {
    #[schemars(description = "Number of notes to retrieve (default: 50)")]
    pub limit: Option<u32>,

    #[schemars(description = "Offset for pagination (default: 0)")]
    pub offset: Option<u32>,
}

/// Request to search notes by content.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchNotesRequest {
    #[schemars(description = "Search term to find in note content")]
    pub search_term: String,
}

/// Request to create a note for a contact.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteRequest {
    #[schemars(description = "Contact ID")]
    pub contact_id: String,

    #[schemars(description = "Note content")]
    pub content: String,

    #[schemars(description = "Event time (ISO format, optional)")]
    pub event_time: Option<String>,

    /// Free-form on the wire; canonicalized before the remote call, with
    /// unrecognized labels degrading to "note".
    #[schemars(
        description = "Type of note/meeting (note, call, email, text_messaging, linkedin, skype_teams, slack, coffee, networking, party_social, other, meal, meeting, custom)"
    )]
    pub meeting_type: Option<String>,
}

/// Request to update a note's content.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct UpdateNoteRequest {
    #[schemars(description = "Note ID")]
    pub id: String,

    #[schemars(description = "Updated note content")]
    pub content: String,
}

/// Request to delete a note.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct DeleteNoteRequest {
    #[schemars(description = "Note ID")]
    pub id: String,
}

/// Request to list the reminders linked to one contact.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetRemindersByContactRequest {
    #[schemars(description = "Contact ID")]
    pub contact_id: String,
}

/// Request to list reminders with pagination.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetAllRemindersRequest {
    #[schemars(description = "Number of reminders to retrieve (default: 50)")]
    pub limit: Option<u32>,

    #[schemars(description = "Offset for pagination (default: 0)")]
    pub offset: Option<u32>,
}

/// Request to search reminders by text.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchRemindersRequest {
    #[schemars(description = "Search term to find in reminder text")]
    pub search_term: String,
}

/// Request to resolve a partial or invalid reminder identifier.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct FindRemindersRequest {
    #[schemars(
        description = "Partial ID, text content, or any identifying information for the reminder"
    )]
    #[serde(alias = "partialId")]
    pub partial_id: String,
}

/// Request to create a reminder linked to a contact.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReminderRequest {
    #[schemars(description = "Contact ID")]
    pub contact_id: String,

    #[schemars(description = "Reminder text")]
    pub text: String,

    #[schemars(description = "Due date (YYYY-MM-DD format)")]
    pub due_date: String,

    #[schemars(description = "Recurrence pattern (optional)")]
    pub recurrence: Option<String>,
}

/// Request to update a reminder. Only the listed fields can change.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReminderRequest {
    #[schemars(description = "Reminder ID")]
    pub id: String,

    #[schemars(description = "Reminder text")]
    pub text: Option<String>,

    #[schemars(description = "Due date (YYYY-MM-DD format)")]
    pub due_date: Option<String>,

    #[schemars(description = "Whether the reminder is completed")]
    pub is_complete: Option<bool>,

    #[schemars(description = "Recurrence pattern")]
    pub recurrence: Option<String>,
}

/// Request to mark a reminder complete.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CompleteReminderRequest {
    #[schemars(description = "Reminder ID")]
    pub id: String,
}

/// Request to delete a reminder.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct DeleteReminderRequest {
    #[schemars(description = "Reminder ID")]
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn camel_case_arguments_deserialize() {
        let req: CreateNoteRequest = serde_json::from_value(serde_json::json!({
            "contactId": "4e87699a-71f4-4dad-9c11-9623c21eb017",
            "content": "Good morning!!",
            "eventTime": "2025-06-03T09:00:00Z",
            "meetingType": "text_messaging"
        }))
        .unwrap();
        assert_eq!(req.contact_id, "4e87699a-71f4-4dad-9c11-9623c21eb017");
        assert_eq!(req.event_time.as_deref(), Some("2025-06-03T09:00:00Z"));
        assert_eq!(req.meeting_type.as_deref(), Some("text_messaging"));
    }

    #[test]
    fn partial_id_accepts_both_spellings() {
        let snake: FindContactsRequest =
            serde_json::from_value(serde_json::json!({ "partial_id": "abc123" })).unwrap();
        let camel: FindContactsRequest =
            serde_json::from_value(serde_json::json!({ "partialId": "abc123" })).unwrap();
        assert_eq!(snake.partial_id, camel.partial_id);
    }

    #[test]
    fn contact_crud_arguments_stay_snake_case() {
        let req: CreateContactRequest = serde_json::from_value(serde_json::json!({
            "first_name": "Ada",
            "job_title": "Analyst"
        }))
        .unwrap();
        assert_eq!(req.first_name, "Ada");
        assert_eq!(req.job_title.as_deref(), Some("Analyst"));
        assert_eq!(req.last_name, None);
    }

    #[test]
    fn missing_required_argument_is_an_error() {
        let result: Result<UpdateNoteRequest, _> =
            serde_json::from_value(serde_json::json!({ "id": "only-an-id" }));
        assert!(result.is_err());
    }

    #[test]
    fn schema_property_names_follow_the_wire_contract() {
        let settings = schemars::generate::SchemaSettings::draft07();
        let schema = settings.into_generator().into_root_schema_for::<CreateReminderRequest>();
        let json = serde_json::to_value(&schema).unwrap();
        let properties = json["properties"].as_object().unwrap();
        assert!(properties.contains_key("contactId"));
        assert!(properties.contains_key("dueDate"));
        assert!(!properties.contains_key("due_date"));
    }
}
