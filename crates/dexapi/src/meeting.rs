//! Meeting/interaction type canonicalization.
//!
//! Dex accepts exactly 14 meeting-type keys on timeline items. Callers spell
//! them loosely ("Skype/Teams", "text messaging", "CALL"), so the raw label
//! goes through a two-pass lookup: first the fully normalized form (trimmed,
//! lowercased, whitespace runs and slashes collapsed to underscores), then
//! the plain lowercased original, which is how the slash and space aliases
//! get their chance. Anything unrecognized falls back to `Note`.

use serde::{Deserialize, Serialize};

/// The closed set of meeting types the service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingType {
    Note,
    Call,
    Email,
    TextMessaging,
    Linkedin,
    SkypeTeams,
    Slack,
    Coffee,
    Networking,
    PartySocial,
    Other,
    Meal,
    Meeting,
    Custom,
}

impl MeetingType {
    /// Every canonical key, in the order the service documents them.
    pub const ALL: [MeetingType; 14] = [
        MeetingType::Note,
        MeetingType::Call,
        MeetingType::Email,
        MeetingType::TextMessaging,
        MeetingType::Linkedin,
        MeetingType::SkypeTeams,
        MeetingType::Slack,
        MeetingType::Coffee,
        MeetingType::Networking,
        MeetingType::PartySocial,
        MeetingType::Other,
        MeetingType::Meal,
        MeetingType::Meeting,
        MeetingType::Custom,
    ];

    /// The canonical key sent to the service.
    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingType::Note => "note",
            MeetingType::Call => "call",
            MeetingType::Email => "email",
            MeetingType::TextMessaging => "text_messaging",
            MeetingType::Linkedin => "linkedin",
            MeetingType::SkypeTeams => "skype_teams",
            MeetingType::Slack => "slack",
            MeetingType::Coffee => "coffee",
            MeetingType::Networking => "networking",
            MeetingType::PartySocial => "party_social",
            MeetingType::Other => "other",
            MeetingType::Meal => "meal",
            MeetingType::Meeting => "meeting",
            MeetingType::Custom => "custom",
        }
    }

    /// Comma-separated list of all canonical keys, for error messages.
    pub fn valid_keys() -> String {
        Self::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Resolve a raw caller-supplied label to a canonical type.
    ///
    /// Total: absent, empty, and unrecognized labels all resolve to `Note`.
    pub fn canonicalize(raw: Option<&str>) -> MeetingType {
        let Some(raw) = raw else {
            return MeetingType::Note;
        };
        if raw.trim().is_empty() {
            return MeetingType::Note;
        }

        let normalized = squash(raw.trim().to_lowercase().as_str());
        Self::from_label(&normalized)
            .or_else(|| Self::from_label(&raw.to_lowercase()))
            .unwrap_or(MeetingType::Note)
    }

    /// Alias table: canonical keys plus the literal slash/space spellings.
    fn from_label(label: &str) -> Option<MeetingType> {
        Some(match label {
            "note" => MeetingType::Note,
            "call" => MeetingType::Call,
            "email" => MeetingType::Email,
            "text_messaging" | "text/messaging" | "text messaging" => MeetingType::TextMessaging,
            "linkedin" => MeetingType::Linkedin,
            "skype_teams" | "skype/teams" | "skype teams" => MeetingType::SkypeTeams,
            "slack" => MeetingType::Slack,
            "coffee" => MeetingType::Coffee,
            "networking" => MeetingType::Networking,
            "party_social" | "party/social" | "party social" => MeetingType::PartySocial,
            "other" => MeetingType::Other,
            "meal" => MeetingType::Meal,
            "meeting" => MeetingType::Meeting,
            "custom" => MeetingType::Custom,
            _ => return None,
        })
    }
}

impl Default for MeetingType {
    fn default() -> Self {
        MeetingType::Note
    }
}

impl std::fmt::Display for MeetingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collapse whitespace runs to single underscores and slashes to underscores.
fn squash(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut in_whitespace = false;
    for ch in label.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push('_');
            }
            in_whitespace = true;
        } else {
            out.push(if ch == '/' { '_' } else { ch });
            in_whitespace = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn canonical_keys_are_fixed_points() {
        for t in MeetingType::ALL {
            assert_eq!(MeetingType::canonicalize(Some(t.as_str())), t);
        }
    }

    #[test]
    fn label_variants_resolve() {
        let cases: &[(Option<&str>, MeetingType)] = &[
            (Some("note"), MeetingType::Note),
            (Some("Note"), MeetingType::Note),
            (Some("NOTE"), MeetingType::Note),
            (Some("call"), MeetingType::Call),
            (Some("Call"), MeetingType::Call),
            (Some("  call  "), MeetingType::Call),
            (Some("email"), MeetingType::Email),
            (Some("text_messaging"), MeetingType::TextMessaging),
            (Some("Text/Messaging"), MeetingType::TextMessaging),
            (Some("text messaging"), MeetingType::TextMessaging),
            (Some("TEXT MESSAGING"), MeetingType::TextMessaging),
            (Some("text  messaging"), MeetingType::TextMessaging),
            (Some("linkedin"), MeetingType::Linkedin),
            (Some("LinkedIn"), MeetingType::Linkedin),
            (Some("skype_teams"), MeetingType::SkypeTeams),
            (Some("Skype/Teams"), MeetingType::SkypeTeams),
            (Some("skype teams"), MeetingType::SkypeTeams),
            (Some("SKYPE_TEAMS"), MeetingType::SkypeTeams),
            (Some("slack"), MeetingType::Slack),
            (Some("Slack"), MeetingType::Slack),
            (Some("coffee"), MeetingType::Coffee),
            (Some("networking"), MeetingType::Networking),
            (Some("party_social"), MeetingType::PartySocial),
            (Some("Party/Social"), MeetingType::PartySocial),
            (Some("party social"), MeetingType::PartySocial),
            (Some("other"), MeetingType::Other),
            (Some("meal"), MeetingType::Meal),
            (Some("meeting"), MeetingType::Meeting),
            (Some("Meeting"), MeetingType::Meeting),
            (Some("custom"), MeetingType::Custom),
            (Some("not_a_real_type"), MeetingType::Note),
            (Some("zoom"), MeetingType::Note),
            (Some(""), MeetingType::Note),
            (Some("   "), MeetingType::Note),
            (None, MeetingType::Note),
        ];

        for (raw, expected) in cases {
            assert_eq!(
                MeetingType::canonicalize(*raw),
                *expected,
                "label {:?} should resolve to {:?}",
                raw,
                expected
            );
        }
    }

    #[test]
    fn serializes_as_canonical_key() {
        let json = serde_json::to_value(MeetingType::TextMessaging).unwrap();
        assert_eq!(json, serde_json::json!("text_messaging"));

        let back: MeetingType = serde_json::from_value(json).unwrap();
        assert_eq!(back, MeetingType::TextMessaging);
    }

    #[test]
    fn valid_keys_lists_all_fourteen() {
        let keys = MeetingType::valid_keys();
        assert_eq!(keys.split(", ").count(), 14);
        assert!(keys.starts_with("note, call, email"));
        assert!(keys.ends_with("meeting, custom"));
    }
}
