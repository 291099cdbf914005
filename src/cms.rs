//! CMS page content and its wire format.
//!
//! Content is written as a versioned envelope:
//!
//! ```json
//! {"schema_version": 1, "content": {"title": "...", "headerImage": "..."}}
//! ```
//!
//! Older records were stored either as the bare content object or as that
//! object serialized into a JSON string (double encoded). [`decode_page_content`]
//! accepts all three shapes and reports which one it saw through
//! [`PayloadOrigin`]; anything else is a [`CmsError`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::CMS_SCHEMA_VERSION;

const VERSION_KEY: &str = "schema_version";

/// Editable text and header image of a marketing page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "header_image")]
    pub header_image: Option<String>,
}

impl PageContent {
    /// Built-in content shown when a page has nothing usable stored.
    pub fn defaults_for(page: &str) -> Self {
        let (title, subtitle, description) = match page {
            "home" | "accueil" => (
                "Votre patrimoine, notre expertise",
                "Conseil en gestion de patrimoine indépendant",
                "Nous accompagnons particuliers et entreprises dans la construction et la protection de leur patrimoine.",
            ),
            "about" | "a-propos" => (
                "Qui sommes-nous",
                "Une équipe de conseillers certifiés",
                "Un cabinet indépendant au service de vos projets financiers depuis plus de quinze ans.",
            ),
            "services" => (
                "Nos services",
                "Un accompagnement sur mesure",
                "Placements, retraite, fiscalité, transmission et produits structurés.",
            ),
            "contact" => (
                "Contact",
                "Parlons de vos projets",
                "Prenez rendez-vous avec l'un de nos conseillers.",
            ),
            _ => ("", "", ""),
        };

        Self {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            description: description.to_string(),
            header_image: None,
        }
    }
}

/// The versioned wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmsEnvelope {
    pub schema_version: u32,
    pub content: PageContent,
}

impl CmsEnvelope {
    pub fn new(content: PageContent) -> Self {
        Self {
            schema_version: CMS_SCHEMA_VERSION,
            content,
        }
    }
}

/// Which stored shape a payload was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadOrigin {
    /// Current versioned envelope.
    Versioned,
    /// Bare content object written before the envelope existed.
    LegacyObject,
    /// Content object serialized into a JSON string.
    LegacyDoubleEncoded,
}

impl PayloadOrigin {
    pub fn is_legacy(self) -> bool {
        self != Self::Versioned
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub content: PageContent,
    pub origin: PayloadOrigin,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CmsError {
    /// Nothing stored for the page.
    #[error("no content stored")]
    Empty,

    #[error("unsupported CMS schema version {found} (expected {expected})")]
    UnsupportedVersion { found: u64, expected: u32 },

    #[error("malformed CMS payload: {0}")]
    Malformed(String),
}

/// Encode content for `PUT /cms/:page`.
pub fn encode_page_content(content: &PageContent) -> CmsEnvelope {
    CmsEnvelope::new(content.clone())
}

/// Decode a `GET /cms/:page` response.
///
/// The response may be the payload itself or wrap it as
/// `{"page": ..., "content": <payload>}`. Only one level of string
/// encoding is undone.
pub fn decode_page_content(response: &Value) -> Result<Decoded, CmsError> {
    let payload = match response {
        Value::Object(map) if !map.contains_key(VERSION_KEY) && map.contains_key("content") => {
            &map["content"]
        },
        other => other,
    };

    match payload {
        Value::Null => Err(CmsError::Empty),
        Value::String(s) if s.trim().is_empty() => Err(CmsError::Empty),
        Value::String(s) => {
            let inner: Value = serde_json::from_str(s)
                .map_err(|e| CmsError::Malformed(format!("content string is not JSON: {e}")))?;
            if !inner.is_object() {
                return Err(CmsError::Malformed(format!(
                    "double-encoded content is {}, expected an object",
                    kind(&inner)
                )));
            }
            let decoded = decode_object(&inner)?;
            Ok(Decoded {
                content: decoded.content,
                origin: PayloadOrigin::LegacyDoubleEncoded,
            })
        },
        Value::Object(_) => decode_object(payload),
        other => Err(CmsError::Malformed(format!(
            "content is {}, expected an object",
            kind(other)
        ))),
    }
}

fn decode_object(value: &Value) -> Result<Decoded, CmsError> {
    match value.get(VERSION_KEY) {
        Some(version) => {
            let found = version
                .as_u64()
                .ok_or_else(|| CmsError::Malformed("schema_version is not an integer".into()))?;
            if found != u64::from(CMS_SCHEMA_VERSION) {
                return Err(CmsError::UnsupportedVersion {
                    found,
                    expected: CMS_SCHEMA_VERSION,
                });
            }
            let envelope: CmsEnvelope = serde_json::from_value(value.clone())
                .map_err(|e| CmsError::Malformed(e.to_string()))?;
            Ok(Decoded {
                content: envelope.content,
                origin: PayloadOrigin::Versioned,
            })
        },
        None => {
            let content: PageContent = serde_json::from_value(value.clone())
                .map_err(|e| CmsError::Malformed(e.to_string()))?;
            Ok(Decoded {
                content,
                origin: PayloadOrigin::LegacyObject,
            })
        },
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
