//! User-pinned references to documents, products and archives.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Id;

/// A favorite as returned by `GET /favoris`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: Id,
    /// Kind of the pinned item, e.g. `document`, `product`, `archive`.
    pub item_type: String,
    pub item_id: Id,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub metadata: serde_json::Value,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST /favoris`.
#[derive(Debug, Clone, Serialize)]
pub struct NewFavorite {
    pub item_type: String,
    pub item_id: Id,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub metadata: serde_json::Value,
}

/// Display label for an item type.
pub fn item_type_label(item_type: &str) -> &str {
    match item_type {
        "document" | "financial_document" => "Documents",
        "archive" => "Archives",
        "product" | "structured_product" => "Products",
        "partner" => "Partners",
        "simulator" => "Simulators",
        other => other,
    }
}
