//! Archive files and financial documents.
//!
//! Both collections share one row shape and differ only by endpoint, so a
//! single [`FileRecord`] serves both and [`FileCollection`] picks the route.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::Id;

/// Which file collection a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCollection {
    Archives,
    FinancialDocuments,
}

impl FileCollection {
    /// Collection endpoint.
    pub fn path(self) -> &'static str {
        match self {
            Self::Archives => "/archives",
            Self::FinancialDocuments => "/financial-documents",
        }
    }

    /// Endpoint of one record.
    pub fn item_path(self, id: &Id) -> String {
        format!("{}/{id}", self.path())
    }

    /// Binary download endpoint of one record.
    pub fn download_path(self, id: &Id) -> String {
        format!("{}/{id}/download", self.path())
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Archives => "archives",
            Self::FinancialDocuments => "financial documents",
        }
    }
}

/// A stored file as returned by the list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "fileUrl", alias = "file_url")]
    pub file_path: Option<String>,
    #[serde(default, alias = "fileSize")]
    pub file_size: Option<u64>,
    #[serde(default, alias = "fileType")]
    pub file_type: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<i32>,
    #[serde(
        default,
        alias = "uploaderName",
        alias = "uploaded_by_name",
        alias = "uploader"
    )]
    pub uploader_name: Option<String>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Where the bytes of a record are fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// Authenticated blob download through the backend.
    Endpoint(String),
    /// Legacy record pointing straight at a public URL.
    External(String),
}

impl FileRecord {
    /// Resolve how to download this record.
    pub fn source(&self, collection: FileCollection) -> FileSource {
        match &self.file_path {
            Some(path) if path.starts_with("http://") || path.starts_with("https://") => {
                FileSource::External(path.clone())
            },
            _ => FileSource::Endpoint(collection.download_path(&self.id)),
        }
    }

    /// File name to save a download under.
    ///
    /// Uses the stored path's last segment when it has an extension,
    /// otherwise the title plus an extension guessed from the file type.
    pub fn download_name(&self) -> String {
        let from_path = self
            .file_path
            .as_deref()
            .and_then(|p| p.rsplit(['/', '\\']).next())
            .map(|name| name.split(['?', '#']).next().unwrap_or(name))
            .filter(|name| name.contains('.'));

        let raw = match from_path {
            Some(name) => name.to_string(),
            None => {
                let ext = self
                    .file_type
                    .as_deref()
                    .and_then(|t| mime_guess::get_mime_extensions_str(t))
                    .and_then(|exts| exts.first())
                    .copied()
                    .or_else(|| {
                        self.file_type
                            .as_deref()
                            .filter(|t| !t.contains('/') && !t.is_empty())
                    });
                match ext {
                    Some(ext) => format!("{}.{ext}", self.title),
                    None => self.title.clone(),
                }
            },
        };

        sanitize_file_name(&raw)
    }
}

/// Replace characters that are unsafe in a local file name.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim().trim_matches('.').to_string();
    if cleaned.is_empty() {
        "download".to_string()
    } else {
        cleaned
    }
}

fn lenient_year<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i32),
        Str(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Int(y)) => Some(y),
        Some(Raw::Str(s)) => s.trim().parse().ok(),
        None => None,
    })
}
