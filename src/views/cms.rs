//! Editor state for one CMS page.
//!
//! Reads go through [`decode_page_content`]. When the stored payload is
//! missing or unreadable the view shows the page's built-in defaults and
//! records why in [`CmsView::fallback`]; the reason is always logged.

use reqwest::multipart::Form;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::{info, warn};

use super::LoadState;
use crate::api::{ApiClient, ApiError, Result, file_part};
use crate::cms::{CmsError, PageContent, PayloadOrigin, decode_page_content, encode_page_content};
use crate::validation::require_file;

/// Pages editable from the back office.
pub const PAGES: [&str; 4] = ["home", "about", "services", "contact"];

pub struct CmsView {
    page: String,
    content: PageContent,
    origin: Option<PayloadOrigin>,
    fallback: Option<String>,
    state: LoadState,
}

impl CmsView {
    pub fn new(page: impl Into<String>) -> Self {
        let page = page.into();
        Self {
            content: PageContent::defaults_for(&page),
            page,
            origin: None,
            fallback: None,
            state: LoadState::Idle,
        }
    }

    pub fn page(&self) -> &str {
        &self.page
    }

    pub fn content(&self) -> &PageContent {
        &self.content
    }

    /// Shape the stored payload was decoded from, `None` when defaults are shown.
    pub fn origin(&self) -> Option<PayloadOrigin> {
        self.origin
    }

    /// Why defaults are shown instead of stored content.
    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    fn path(&self) -> String {
        format!("/cms/{}", self.page)
    }

    /// `GET /cms/:page`.
    ///
    /// A 404 or an undecodable payload falls back to defaults and is not an
    /// error. Other request failures keep the current content.
    pub async fn load(&mut self, client: &ApiClient) -> Result<&PageContent> {
        self.state = LoadState::Loading;
        let response: Value = match client.get(&self.path()).await {
            Ok(v) => v,
            Err(ApiError::Status { status: 404, .. }) => Value::Null,
            Err(e) => {
                warn!(page = %self.page, error = %e, "CMS load failed");
                self.state = LoadState::Failed(e.to_string());
                return Err(e);
            },
        };

        match decode_page_content(&response) {
            Ok(decoded) => {
                if decoded.origin.is_legacy() {
                    warn!(
                        page = %self.page,
                        origin = ?decoded.origin,
                        "Decoded legacy CMS payload, saving will rewrite it as versioned"
                    );
                }
                self.content = decoded.content;
                self.origin = Some(decoded.origin);
                self.fallback = None;
            },
            Err(e) => {
                match &e {
                    CmsError::Empty => {
                        info!(page = %self.page, "No stored content, using defaults");
                    },
                    _ => {
                        warn!(
                            page = %self.page,
                            error = %e,
                            "Unreadable CMS payload, using defaults"
                        );
                    },
                }
                self.content = PageContent::defaults_for(&self.page);
                self.origin = None;
                self.fallback = Some(e.to_string());
            },
        }

        self.state = LoadState::Loaded;
        Ok(&self.content)
    }

    /// `PUT /cms/:page` with the versioned envelope, then read it back.
    pub async fn save(&mut self, client: &ApiClient, content: PageContent) -> Result<&PageContent> {
        client.require_admin()?;
        let envelope = encode_page_content(&content);
        let _: Value = client.put(&self.path(), &envelope).await?;
        info!(page = %self.page, "Saved CMS content");
        self.load(client).await
    }

    pub fn render(&self) -> String {
        if self.state == LoadState::Loading {
            return super::LOADING_MESSAGE.to_string();
        }
        let c = &self.content;
        let mut lines = vec![
            format!("Page:        {}", self.page),
            format!("Title:       {}", c.title),
            format!("Subtitle:    {}", c.subtitle),
            format!("Description: {}", c.description),
        ];
        if let Some(image) = &c.header_image {
            lines.push(format!("Image:       {image}"));
        }
        if let Some(reason) = &self.fallback {
            lines.push(format!("(defaults shown: {reason})"));
        }
        lines.join("\n")
    }
}

#[derive(Deserialize)]
struct UploadedImage {
    #[serde(alias = "imageUrl", alias = "path")]
    url: String,
}

/// `POST /cms/upload-image`. Returns the stored image URL.
pub async fn upload_image(client: &ApiClient, file: Option<&Path>) -> Result<String> {
    let path = require_file(file)?;
    client.require_admin()?;
    let form = Form::new().part("image", file_part(path).await?);
    let uploaded: UploadedImage = client.upload("/cms/upload-image", form).await?;
    info!(url = %uploaded.url, "Uploaded CMS image");
    Ok(uploaded.url)
}
