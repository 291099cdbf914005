use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Id;

/// An in-app notification for the signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Id,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Number of notifications not yet read.
pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.is_read).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_and_count() {
        let json = r#"[
            {"id": 1, "type": "reservation", "title": "Réservation approuvée", "message": "ok",
             "is_read": false, "created_at": "2024-03-01T09:30:00Z"},
            {"id": 2, "title": "Nouveau document", "is_read": true}
        ]"#;
        let list: Vec<Notification> = serde_json::from_str(json).unwrap();
        assert_eq!(list[0].kind.as_deref(), Some("reservation"));
        assert!(list[1].kind.is_none());
        assert_eq!(unread_count(&list), 1);
    }
}
