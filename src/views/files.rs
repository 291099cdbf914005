//! Archives and financial documents pages.
//!
//! Both pages list [`FileRecord`]s filtered by category, year and a search
//! string, upload new files as multipart forms, download them as blobs and
//! delete them. Only the collection endpoint differs.

use async_trait::async_trait;
use reqwest::multipart::Form;
use std::path::{Path, PathBuf};
use tracing::info;

use super::ListSource;
use super::filter::{matches_exact, matches_search, param};
use crate::api::{ApiClient, ApiError, Result, file_part};
use crate::models::{FileCollection, FileRecord, FileSource, Id};
use crate::utils::format_bytes;
use crate::validation::{require_field, require_file};

#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    pub category: Option<String>,
    pub year: Option<i32>,
    pub search: Option<String>,
}

impl FileFilter {
    fn matches(&self, rec: &FileRecord) -> bool {
        matches_exact(self.category.as_deref(), rec.category.as_deref())
            && self.year.is_none_or(|y| rec.year == Some(y))
            && matches_search(
                self.search.as_deref().unwrap_or_default(),
                &[
                    Some(rec.title.as_str()),
                    rec.description.as_deref(),
                    rec.category.as_deref(),
                ],
            )
    }
}

pub struct FilesSource {
    collection: FileCollection,
}

impl FilesSource {
    pub fn new(collection: FileCollection) -> Self {
        Self { collection }
    }

    pub fn collection(&self) -> FileCollection {
        self.collection
    }
}

#[async_trait]
impl ListSource for FilesSource {
    type Item = FileRecord;
    type Filter = FileFilter;

    fn name(&self) -> &'static str {
        self.collection.label()
    }

    async fn fetch(&self, client: &ApiClient, filter: &FileFilter) -> Result<Vec<FileRecord>> {
        let query = [
            ("category", param(filter.category.as_ref())),
            ("year", param(filter.year.as_ref())),
            ("search", param(filter.search.as_ref())),
        ];
        let mut items: Vec<FileRecord> = client.get_list(self.collection.path(), &query).await?;
        // Not every backend version honours the query parameters.
        items.retain(|rec| filter.matches(rec));
        Ok(items)
    }

    fn render_item(&self, rec: &FileRecord) -> String {
        let mut details = Vec::new();
        if let Some(category) = &rec.category {
            details.push(category.clone());
        }
        if let Some(year) = rec.year {
            details.push(year.to_string());
        }
        if let Some(size) = rec.file_size {
            details.push(format_bytes(size));
        }
        if let Some(uploader) = &rec.uploader_name {
            details.push(format!("by {uploader}"));
        }

        if details.is_empty() {
            format!("[{}] {}", rec.id, rec.title)
        } else {
            format!("[{}] {} ({})", rec.id, rec.title, details.join(", "))
        }
    }

    fn empty_message(&self) -> &'static str {
        match self.collection {
            FileCollection::Archives => "No archives found.",
            FileCollection::FinancialDocuments => "No financial documents found.",
        }
    }
}

/// Fields of the upload form.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub file: Option<PathBuf>,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub year: Option<i32>,
}

/// Upload a file to a collection.
///
/// The form is checked before anything is sent: a missing file or empty
/// title never reaches the network.
pub async fn upload(
    client: &ApiClient,
    collection: FileCollection,
    form: &UploadForm,
) -> Result<()> {
    let path = require_file(form.file.as_deref())?;
    let title = require_field("title", &form.title)?;
    client.require_admin()?;

    let mut multipart = Form::new().text("title", title.to_string());
    if let Some(description) = &form.description {
        multipart = multipart.text("description", description.clone());
    }
    if let Some(category) = &form.category {
        multipart = multipart.text("category", category.clone());
    }
    if let Some(year) = form.year {
        multipart = multipart.text("year", year.to_string());
    }
    multipart = multipart.part("file", file_part(path).await?);

    let _: serde_json::Value = client.upload(collection.path(), multipart).await?;
    info!(collection = collection.label(), title = %title, "Uploaded file");
    Ok(())
}

/// Delete a record.
pub async fn delete(client: &ApiClient, collection: FileCollection, id: &Id) -> Result<()> {
    client.require_admin()?;
    let _: serde_json::Value = client.delete(&collection.item_path(id)).await?;
    info!(collection = collection.label(), id = %id, "Deleted file");
    Ok(())
}

/// Download a record into `dir` and return the written path.
///
/// Existing files are never overwritten; a numeric suffix is added instead.
pub async fn download(
    client: &ApiClient,
    collection: FileCollection,
    record: &FileRecord,
    dir: &Path,
) -> Result<PathBuf> {
    let bytes = match record.source(collection) {
        FileSource::Endpoint(path) => client.download(&path).await?,
        FileSource::External(url) => client.download_external(&url).await?,
    };

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| ApiError::io(format!("creating {}", dir.display()), e))?;
    let target = unique_path(dir, &record.download_name());
    tokio::fs::write(&target, &bytes)
        .await
        .map_err(|e| ApiError::io(format!("writing {}", target.display()), e))?;

    info!(path = %target.display(), bytes = bytes.len(), "Downloaded file");
    Ok(target)
}

/// `dir/name`, or `dir/stem (n).ext` for the first free `n`.
fn unique_path(dir: &Path, name: &str) -> PathBuf {
    let candidate = dir.join(name);
    if !candidate.exists() {
        return candidate;
    }

    let as_path = Path::new(name);
    let stem = as_path
        .file_stem()
        .map_or_else(|| name.to_string(), |s| s.to_string_lossy().into_owned());
    let ext = as_path.extension().map(|e| e.to_string_lossy().into_owned());

    (1..)
        .map(|n| match &ext {
            Some(ext) => dir.join(format!("{stem} ({n}).{ext}")),
            None => dir.join(format!("{stem} ({n})")),
        })
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}
