//! Async client for the Dex service.
//!
//! All reads and most writes go through the GraphQL endpoint; note creation
//! uses the documented REST path. The client assumes identifiers were
//! validated by the caller - it never re-checks them.

use chrono::{SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::DexConfig;
use crate::error::ApiError;
use crate::meeting::MeetingType;
use crate::partial::{filter_contacts, filter_reminders};
use crate::records::{
    Contact, ContactInput, ContactUpdate, Note, Reminder, ReminderLink, ReminderUpdate,
};

/// Window size for the partial-id fallback queries.
const RECENT_WINDOW: u32 = 50;

/// Outcome of the two-step reminder creation.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReminderCreation {
    pub reminder: Reminder,
    /// Set when the link mutation failed after the create succeeded.
    /// The reminder exists either way, just not attached to the contact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_error: Option<String>,
}

/// Insert object for reminder creation.
#[derive(Debug, Serialize)]
struct ReminderInsert<'a> {
    text: &'a str,
    due_at_date: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    recurrence: Option<&'a str>,
    is_complete: bool,
}

pub struct DexClient {
    http: reqwest::Client,
    config: DexConfig,
}

impl DexClient {
    pub fn new(config: DexConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    // ========================================================================
    // Transport
    // ========================================================================

    /// Execute a GraphQL document and return the `data` object.
    ///
    /// An `errors` list in the body is a failure even when the transport
    /// says 2xx.
    async fn graphql(&self, query: &str, variables: Value) -> Result<Value, ApiError> {
        let response = self
            .http
            .post(&self.config.graphql_url)
            .header("x-hasura-dex-api-key", &self.config.api_key)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, "dex graphql request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body: Value = response.json().await?;
        if let Some(errors) = body.get("errors") {
            if !errors.is_null() {
                return Err(ApiError::Graphql(errors.to_string()));
            }
        }

        Ok(body.get("data").cloned().unwrap_or(Value::Null))
    }

    /// Pull one root field out of a `data` object and decode it.
    fn decode<T: DeserializeOwned>(data: Value, key: &'static str) -> Result<T, ApiError> {
        let value = match data {
            Value::Object(mut map) => map.remove(key).unwrap_or(Value::Null),
            _ => Value::Null,
        };
        serde_json::from_value(value).map_err(|e| ApiError::decode(key, e))
    }

    // ========================================================================
    // Contacts
    // ========================================================================

    pub async fn get_contacts(&self, limit: u32, offset: u32) -> Result<Vec<Contact>, ApiError> {
        const QUERY: &str = r#"
            query GetContacts($limit: Int!, $offset: Int!) {
              contacts(limit: $limit, offset: $offset, order_by: {updated_at: desc}) {
                id
                full_name
                first_name
                last_name
                company
                job_title
                created_at
                updated_at
                contact_emails { email label }
                contact_phone_numbers { phone_number label }
              }
            }
        "#;
        let data = self
            .graphql(QUERY, json!({ "limit": limit, "offset": offset }))
            .await?;
        Self::decode(data, "contacts")
    }

    pub async fn get_contact_by_id(&self, id: &str) -> Result<Option<Contact>, ApiError> {
        const QUERY: &str = r#"
            query GetContact($id: uuid!) {
              contacts_by_pk(id: $id) {
                id
                full_name
                first_name
                last_name
                company
                job_title
                description
                created_at
                updated_at
                contact_emails { email label }
                contact_phone_numbers { phone_number label }
                reminders_contacts {
                  reminder { id text due_at_date is_complete created_at }
                }
              }
            }
        "#;
        let data = self.graphql(QUERY, json!({ "id": id })).await?;
        Self::decode(data, "contacts_by_pk")
    }

    pub async fn search_contacts(&self, term: &str) -> Result<Vec<Contact>, ApiError> {
        const QUERY: &str = r#"
            query SearchContacts($searchTerm: String!) {
              contacts(where: {
                _or: [
                  {full_name: {_ilike: $searchTerm}},
                  {first_name: {_ilike: $searchTerm}},
                  {last_name: {_ilike: $searchTerm}},
                  {company: {_ilike: $searchTerm}}
                ]
              }, limit: 20) {
                id
                full_name
                first_name
                last_name
                company
                job_title
                contact_emails { email label }
                contact_phone_numbers { phone_number label }
              }
            }
        "#;
        let data = self
            .graphql(QUERY, json!({ "searchTerm": ilike_pattern(term) }))
            .await?;
        Self::decode(data, "contacts")
    }

    pub async fn create_contact(&self, contact: ContactInput) -> Result<Contact, ApiError> {
        const QUERY: &str = r#"
            mutation CreateContact($contact: contacts_insert_input!) {
              insert_contacts_one(object: $contact) {
                id
                full_name
                first_name
                last_name
                company
                job_title
                created_at
              }
            }
        "#;
        let data = self.graphql(QUERY, json!({ "contact": contact })).await?;
        Self::decode(data, "insert_contacts_one")
    }

    pub async fn update_contact(
        &self,
        id: &str,
        updates: ContactUpdate,
    ) -> Result<Option<Contact>, ApiError> {
        const QUERY: &str = r#"
            mutation UpdateContact($id: uuid!, $updates: contacts_set_input!) {
              update_contacts_by_pk(pk_columns: {id: $id}, _set: $updates) {
                id
                full_name
                first_name
                last_name
                company
                job_title
                updated_at
              }
            }
        "#;
        let data = self
            .graphql(QUERY, json!({ "id": id, "updates": updates }))
            .await?;
        Self::decode(data, "update_contacts_by_pk")
    }

    pub async fn delete_contact(&self, id: &str) -> Result<Option<Contact>, ApiError> {
        const QUERY: &str = r#"
            mutation DeleteContact($id: uuid!) {
              delete_contacts_by_pk(id: $id) {
                id
                full_name
              }
            }
        "#;
        let data = self.graphql(QUERY, json!({ "id": id })).await?;
        Self::decode(data, "delete_contacts_by_pk")
    }

    /// Fetch the 50 most recently updated contacts and filter them locally.
    #[tracing::instrument(skip(self))]
    pub async fn find_contacts_by_partial_id(
        &self,
        partial: &str,
    ) -> Result<Vec<Contact>, ApiError> {
        const QUERY: &str = r#"
            query FindContactsByPartialId($limit: Int!) {
              contacts(order_by: {updated_at: desc}, limit: $limit) {
                id
                full_name
                first_name
                last_name
                company
                job_title
                contact_emails { email label }
                contact_phone_numbers { phone_number label }
              }
            }
        "#;
        let data = self.graphql(QUERY, json!({ "limit": RECENT_WINDOW })).await?;
        let recent: Vec<Contact> = Self::decode(data, "contacts")?;
        Ok(filter_contacts(recent, partial))
    }

    // ========================================================================
    // Notes (timeline items)
    // ========================================================================

    pub async fn get_notes_by_contact(&self, contact_id: &str) -> Result<Vec<Note>, ApiError> {
        const QUERY: &str = r#"
            query GetNotesByContact($contactId: uuid!) {
              timeline_items(
                where: {
                  timeline_items_contacts: {contact_id: {_eq: $contactId}},
                  note: {_is_null: false}
                },
                order_by: {created_at: desc}
              ) {
                id
                note
                event_time
                created_at
                timeline_items_contacts { contact { full_name } }
              }
            }
        "#;
        let data = self.graphql(QUERY, json!({ "contactId": contact_id })).await?;
        Self::decode(data, "timeline_items")
    }

    pub async fn get_all_notes(&self, limit: u32, offset: u32) -> Result<Vec<Note>, ApiError> {
        const QUERY: &str = r#"
            query GetAllNotes($limit: Int!, $offset: Int!) {
              timeline_items(
                where: {note: {_is_null: false}},
                order_by: {created_at: desc},
                limit: $limit,
                offset: $offset
              ) {
                id
                note
                event_time
                created_at
                timeline_items_contacts { contact { full_name id } }
              }
            }
        "#;
        let data = self
            .graphql(QUERY, json!({ "limit": limit, "offset": offset }))
            .await?;
        Self::decode(data, "timeline_items")
    }

    pub async fn search_notes(&self, term: &str) -> Result<Vec<Note>, ApiError> {
        const QUERY: &str = r#"
            query SearchNotes($searchTerm: String!) {
              timeline_items(
                where: {
                  _and: [
                    {note: {_is_null: false}},
                    {note: {_ilike: $searchTerm}}
                  ]
                },
                order_by: {created_at: desc},
                limit: 20
              ) {
                id
                note
                event_time
                created_at
                timeline_items_contacts { contact { full_name id } }
              }
            }
        "#;
        let data = self
            .graphql(QUERY, json!({ "searchTerm": ilike_pattern(term) }))
            .await?;
        Self::decode(data, "timeline_items")
    }

    /// Create a note through the REST path, linked to one contact.
    ///
    /// `event_time` defaults to now; `meeting_type` is already canonical by
    /// the time it gets here.
    #[tracing::instrument(skip(self, note))]
    pub async fn create_note(
        &self,
        contact_id: &str,
        note: &str,
        event_time: Option<&str>,
        meeting_type: MeetingType,
    ) -> Result<Value, ApiError> {
        let event_time = match event_time {
            Some(t) => t.to_string(),
            None => Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        let payload = json!({
            "timeline_event": {
                "note": note,
                "event_time": event_time,
                "meeting_type": meeting_type,
                "timeline_items_contacts": {
                    "data": [{ "contact_id": contact_id }]
                }
            }
        });

        let response = self
            .http
            .post(&self.config.rest_url)
            .header("x-hasura-dex-api-key", &self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, "dex rest request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        Ok(response.json().await?)
    }

    pub async fn update_note(&self, id: &str, content: &str) -> Result<Option<Note>, ApiError> {
        const QUERY: &str = r#"
            mutation UpdateNote($id: uuid!, $note: String!) {
              update_timeline_items_by_pk(pk_columns: {id: $id}, _set: {note: $note}) {
                id
                note
                created_at
              }
            }
        "#;
        let data = self
            .graphql(QUERY, json!({ "id": id, "note": content }))
            .await?;
        Self::decode(data, "update_timeline_items_by_pk")
    }

    pub async fn delete_note(&self, id: &str) -> Result<Option<Note>, ApiError> {
        const QUERY: &str = r#"
            mutation DeleteNote($id: uuid!) {
              delete_timeline_items_by_pk(id: $id) {
                id
              }
            }
        "#;
        let data = self.graphql(QUERY, json!({ "id": id })).await?;
        Self::decode(data, "delete_timeline_items_by_pk")
    }

    // ========================================================================
    // Reminders
    // ========================================================================

    pub async fn get_reminders_by_contact(
        &self,
        contact_id: &str,
    ) -> Result<Vec<ReminderLink>, ApiError> {
        const QUERY: &str = r#"
            query GetRemindersByContact($contactId: uuid!) {
              reminders_contacts(
                where: {contact_id: {_eq: $contactId}},
                order_by: {reminder: {due_at_date: asc}}
              ) {
                reminder { id text due_at_date is_complete created_at recurrence }
              }
            }
        "#;
        let data = self.graphql(QUERY, json!({ "contactId": contact_id })).await?;
        Self::decode(data, "reminders_contacts")
    }

    pub async fn get_all_reminders(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Reminder>, ApiError> {
        const QUERY: &str = r#"
            query GetAllReminders($limit: Int!, $offset: Int!) {
              reminders(order_by: {due_at_date: asc}, limit: $limit, offset: $offset) {
                id
                text
                due_at_date
                is_complete
                created_at
                recurrence
                reminders_contacts { contact { full_name id } }
              }
            }
        "#;
        let data = self
            .graphql(QUERY, json!({ "limit": limit, "offset": offset }))
            .await?;
        Self::decode(data, "reminders")
    }

    pub async fn search_reminders(&self, term: &str) -> Result<Vec<Reminder>, ApiError> {
        const QUERY: &str = r#"
            query SearchReminders($searchTerm: String!) {
              reminders(
                where: {text: {_ilike: $searchTerm}},
                order_by: {due_at_date: asc},
                limit: 20
              ) {
                id
                text
                due_at_date
                is_complete
                created_at
                recurrence
                reminders_contacts { contact { full_name id } }
              }
            }
        "#;
        let data = self
            .graphql(QUERY, json!({ "searchTerm": ilike_pattern(term) }))
            .await?;
        Self::decode(data, "reminders")
    }

    /// Fetch the 50 most recently created reminders and filter them locally.
    #[tracing::instrument(skip(self))]
    pub async fn find_reminders_by_partial_id(
        &self,
        partial: &str,
    ) -> Result<Vec<Reminder>, ApiError> {
        const QUERY: &str = r#"
            query FindRemindersByPartialId($limit: Int!) {
              reminders(order_by: {created_at: desc}, limit: $limit) {
                id
                text
                due_at_date
                is_complete
                created_at
                recurrence
                reminders_contacts { contact { full_name id } }
              }
            }
        "#;
        let data = self.graphql(QUERY, json!({ "limit": RECENT_WINDOW })).await?;
        let recent: Vec<Reminder> = Self::decode(data, "reminders")?;
        Ok(filter_reminders(recent, partial))
    }

    /// Create a reminder, then link it to the contact.
    ///
    /// The link is a second mutation with no compensation path: if it fails,
    /// the created reminder stays and the failure is reported through
    /// `link_error` so the caller can surface the partial state.
    #[tracing::instrument(skip(self, text))]
    pub async fn create_reminder(
        &self,
        contact_id: &str,
        text: &str,
        due_date: &str,
        recurrence: Option<&str>,
    ) -> Result<ReminderCreation, ApiError> {
        const CREATE: &str = r#"
            mutation CreateReminder($reminder: reminders_insert_input!) {
              insert_reminders_one(object: $reminder) {
                id
                text
                due_at_date
                is_complete
                created_at
                recurrence
              }
            }
        "#;
        const LINK: &str = r#"
            mutation LinkReminderToContact($reminderContact: reminders_contacts_insert_input!) {
              insert_reminders_contacts_one(object: $reminderContact) {
                reminder_id
                contact_id
              }
            }
        "#;

        let insert = ReminderInsert {
            text,
            due_at_date: due_date,
            recurrence,
            is_complete: false,
        };
        let data = self
            .graphql(CREATE, json!({ "reminder": insert }))
            .await?;
        let reminder: Reminder = Self::decode(data, "insert_reminders_one")?;

        let link_vars = json!({
            "reminderContact": {
                "reminder_id": reminder.id,
                "contact_id": contact_id,
            }
        });
        let link_error = match self.graphql(LINK, link_vars).await {
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(reminder_id = %reminder.id, error = %e, "reminder created but link failed");
                Some(e.to_string())
            }
        };

        Ok(ReminderCreation {
            reminder,
            link_error,
        })
    }

    pub async fn update_reminder(
        &self,
        id: &str,
        updates: ReminderUpdate,
    ) -> Result<Option<Reminder>, ApiError> {
        const QUERY: &str = r#"
            mutation UpdateReminder($id: uuid!, $updates: reminders_set_input!) {
              update_reminders_by_pk(pk_columns: {id: $id}, _set: $updates) {
                id
                text
                due_at_date
                is_complete
                recurrence
                created_at
              }
            }
        "#;
        let data = self
            .graphql(QUERY, json!({ "id": id, "updates": updates }))
            .await?;
        Self::decode(data, "update_reminders_by_pk")
    }

    pub async fn complete_reminder(&self, id: &str) -> Result<Option<Reminder>, ApiError> {
        let updates = ReminderUpdate {
            is_complete: Some(true),
            ..Default::default()
        };
        self.update_reminder(id, updates).await
    }

    pub async fn delete_reminder(&self, id: &str) -> Result<Option<Reminder>, ApiError> {
        const QUERY: &str = r#"
            mutation DeleteReminder($id: uuid!) {
              delete_reminders_by_pk(id: $id) {
                id
              }
            }
        "#;
        let data = self.graphql(QUERY, json!({ "id": id })).await?;
        Self::decode(data, "delete_reminders_by_pk")
    }
}

/// Wrap a search term for the service's `_ilike` operator.
fn ilike_pattern(term: &str) -> String {
    format!("%{}%", term)
}
