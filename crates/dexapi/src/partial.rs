//! Local substring filters for the partial-id recovery tools.
//!
//! These run over a bounded window of recent records fetched by the client.
//! Identifier matching is case-sensitive; display-field matching is not.
//! No match is an empty Vec, never an error.

use crate::records::{Contact, Reminder};

/// True when the contact's id contains `partial`, or any of its display
/// fields (full/first/last name, company) contains it case-insensitively.
pub fn contact_matches_partial(contact: &Contact, partial: &str) -> bool {
    if contact.id.contains(partial) {
        return true;
    }
    let needle = partial.to_lowercase();
    let field_contains =
        |field: &Option<String>| field.as_deref().is_some_and(|v| v.to_lowercase().contains(&needle));

    field_contains(&contact.full_name)
        || field_contains(&contact.first_name)
        || field_contains(&contact.last_name)
        || field_contains(&contact.company)
}

/// True when the reminder's id contains `partial`, or its text contains it
/// case-insensitively.
pub fn reminder_matches_partial(reminder: &Reminder, partial: &str) -> bool {
    if reminder.id.contains(partial) {
        return true;
    }
    let needle = partial.to_lowercase();
    reminder
        .text
        .as_deref()
        .is_some_and(|t| t.to_lowercase().contains(&needle))
}

pub fn filter_contacts(contacts: Vec<Contact>, partial: &str) -> Vec<Contact> {
    contacts
        .into_iter()
        .filter(|c| contact_matches_partial(c, partial))
        .collect()
}

pub fn filter_reminders(reminders: Vec<Reminder>, partial: &str) -> Vec<Reminder> {
    reminders
        .into_iter()
        .filter(|r| reminder_matches_partial(r, partial))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(id: &str, full_name: Option<&str>, company: Option<&str>) -> Contact {
        Contact {
            id: id.to_string(),
            full_name: full_name.map(String::from),
            first_name: None,
            last_name: None,
            company: company.map(String::from),
            job_title: None,
            description: None,
            created_at: None,
            updated_at: None,
            contact_emails: vec![],
            contact_phone_numbers: vec![],
            reminders_contacts: vec![],
        }
    }

    fn reminder(id: &str, text: Option<&str>) -> Reminder {
        Reminder {
            id: id.to_string(),
            text: text.map(String::from),
            due_at_date: None,
            is_complete: None,
            created_at: None,
            recurrence: None,
            reminders_contacts: vec![],
        }
    }

    #[test]
    fn id_match_is_case_sensitive() {
        let c = contact("4e87699a-71f4-4dad-9c11-9623c21eb017", None, None);
        assert!(contact_matches_partial(&c, "9623c21"));
        assert!(!contact_matches_partial(&c, "9623C21"));
    }

    #[test]
    fn name_match_is_case_insensitive() {
        let c = contact("4e87699a-71f4-4dad-9c11-9623c21eb017", Some("Ada Lovelace"), None);
        assert!(contact_matches_partial(&c, "lovelace"));
        assert!(contact_matches_partial(&c, "ADA"));
    }

    #[test]
    fn company_counts_as_display_field() {
        let c = contact(
            "4e87699a-71f4-4dad-9c11-9623c21eb017",
            None,
            Some("Analytical Engines Ltd"),
        );
        assert!(contact_matches_partial(&c, "analytical"));
    }

    #[test]
    fn null_fields_do_not_match() {
        let c = contact("4e87699a-71f4-4dad-9c11-9623c21eb017", None, None);
        assert!(!contact_matches_partial(&c, "lovelace"));
    }

    #[test]
    fn filter_keeps_id_and_text_matches() {
        let reminders = vec![
            reminder("abc12345-71f4-4dad-9c11-9623c21eb017", Some("Call Ada")),
            reminder("91a9219a-55a9-4f50-b51a-90cbcdbea0f6", Some("send ABC123 report")),
            reminder("5bfc9f3e-0d9c-4c39-9b49-0a4d2fca34b8", Some("water the plants")),
        ];

        let matched = filter_reminders(reminders, "abc123");
        // First by id substring, second by case-insensitive text.
        assert_eq!(matched.len(), 2);
        assert!(matched[0].id.starts_with("abc12345"));
        assert_eq!(matched[1].text.as_deref(), Some("send ABC123 report"));
    }

    #[test]
    fn no_match_yields_empty_vec() {
        let contacts = vec![contact(
            "4e87699a-71f4-4dad-9c11-9623c21eb017",
            Some("Ada Lovelace"),
            None,
        )];
        assert!(filter_contacts(contacts, "zzz-no-match").is_empty());
    }
}
