//! Structured-identifier validation.
//!
//! Dex primary keys are 36-character hyphenated UUIDs with a version nibble
//! of 1-5 and an RFC 4122 variant nibble. The service rejects anything else,
//! so handlers check here before building a request.

use uuid::{Uuid, Variant};

/// True when `s` is a canonically hyphenated UUID the service will accept.
///
/// The structural check runs first because `Uuid::parse_str` also accepts
/// un-hyphenated, braced, and urn-prefixed forms that the service does not.
pub fn is_valid_dex_id(s: &str) -> bool {
    if s.len() != 36 {
        return false;
    }
    for (i, b) in s.bytes().enumerate() {
        match i {
            8 | 13 | 18 | 23 => {
                if b != b'-' {
                    return false;
                }
            }
            _ => {
                if !b.is_ascii_hexdigit() {
                    return false;
                }
            }
        }
    }

    let Ok(uuid) = Uuid::parse_str(s) else {
        return false;
    };
    matches!(uuid.get_version_num(), 1..=5) && uuid.get_variant() == Variant::RFC4122
}

/// The format string shown to callers when validation fails.
pub const ID_FORMAT_HINT: &str = "xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx";
