//! Records mirrored from backend rows.
//!
//! Every type here is a plain serde struct. The backend owns the data; the
//! client only holds transient copies that are re-fetched after each write.

pub mod favorite;
pub mod file;
pub mod notification;
pub mod partner;
pub mod product;
pub mod stats;
pub mod user;

pub use favorite::{Favorite, NewFavorite};
pub use file::{FileCollection, FileRecord, FileSource};
pub use notification::{Notification, unread_count};
pub use partner::{Partner, PartnerInput};
pub use product::{NewReservation, Reservation, ReservationStatus, StructuredProduct};
pub use stats::SimulatorUsage;
pub use user::{PasswordChange, ProfileUpdate, Role, Tab, UserProfile};

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Backend row identifier.
///
/// Rows come from different tables, some keyed by integers and some by
/// UUIDs, so both JSON numbers and strings are accepted and kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Str(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => Self(n.to_string()),
            Raw::Str(s) => Self(s),
        })
    }
}

/// A list response, either a bare array or wrapped in `{"data": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListEnvelope<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListEnvelope<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Wrapped { data: items } => items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_accepts_numbers_and_strings() {
        let n: Id = serde_json::from_str("42").unwrap();
        let s: Id = serde_json::from_str("\"7f1c-aa\"").unwrap();
        assert_eq!(n.as_str(), "42");
        assert_eq!(s.to_string(), "7f1c-aa");
    }

    #[test]
    fn test_id_serializes_as_string() {
        assert_eq!(serde_json::to_string(&Id::new("12")).unwrap(), "\"12\"");
    }

    #[test]
    fn test_list_envelope_shapes() {
        let bare: ListEnvelope<Id> = serde_json::from_str("[1, 2]").unwrap();
        let wrapped: ListEnvelope<Id> = serde_json::from_str(r#"{"data": [3]}"#).unwrap();
        assert_eq!(bare.into_vec().len(), 2);
        assert_eq!(wrapped.into_vec(), vec![Id::new("3")]);
    }
}
