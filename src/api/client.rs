//! HTTP client for the backend REST API.
//!
//! [`ApiClient`] joins endpoint paths onto a fixed base URL, attaches the
//! session credential when one is present, encodes bodies as JSON (or
//! multipart for uploads) and turns non-success statuses into
//! [`ApiError::Status`] carrying the server's message.
//!
//! There is no retry, backoff or cancellation: a failed request fails once
//! and the caller decides what to show.

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, warn};
use url::Url;

use super::error::{ApiError, Result};
use crate::config::ApiConfig;
use crate::constants::AUTH_HEADER;
use crate::models::{ListEnvelope, Role};
use crate::session::Session;

/// Fields checked, in order, for a server-provided error message.
const MESSAGE_FIELDS: [&str; 3] = ["message", "error", "msg"];

/// Client bound to one backend and, optionally, one session.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Option<Session>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create an anonymous client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the HTTP client
    /// cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base = Url::parse(config.base_url.trim())?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("cabinet/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base.as_str().trim_end_matches('/').to_string(),
            session: None,
        })
    }

    /// Attach a session; its token is sent with every request.
    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The current session, or [`ApiError::Unauthenticated`].
    pub fn require_session(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(ApiError::Unauthenticated)
    }

    /// Fail with [`ApiError::Forbidden`] unless the session is an admin's.
    pub fn require_admin(&self) -> Result<&Session> {
        let session = self.require_session()?;
        if session.role() == Role::Admin {
            Ok(session)
        } else {
            Err(ApiError::Forbidden)
        }
    }

    /// Full URL of an endpoint path, keeping the base URL's own path.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(Url::parse(&format!(
            "{}/{}",
            self.base_url,
            path.trim_start_matches('/')
        ))?)
    }

    /// Endpoint URL with query parameters. Empty values are skipped.
    pub fn endpoint_with_query(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        let mut url = self.endpoint(path)?;
        let pairs: Vec<_> = query.iter().filter(|(_, v)| !v.is_empty()).collect();
        if !pairs.is_empty() {
            let mut qp = url.query_pairs_mut();
            for (key, value) in pairs {
                qp.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(method = %method, url = %url, "Sending request");
        let builder = self.http.request(method, url);
        match &self.session {
            Some(session) => builder.header(AUTH_HEADER, &session.token),
            None => builder,
        }
    }

    /// Send and reject non-success statuses.
    async fn send(&self, builder: RequestBuilder, path: &str) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let message = error_message(status, &body);
        warn!(
            status = status.as_u16(),
            path = %path,
            message = %message,
            "Request failed"
        );
        Err(ApiError::status(status.as_u16(), message))
    }

    async fn decode<T: DeserializeOwned>(response: Response, path: &str) -> Result<T> {
        let body = response.bytes().await?;
        let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &body
        };
        serde_json::from_slice(body).map_err(|source| ApiError::Decode {
            path: path.to_string(),
            source,
        })
    }

    /// `GET path` decoded as `T`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_query(path, &[]).await
    }

    /// `GET path?query` decoded as `T`.
    pub async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.endpoint_with_query(path, query)?;
        let response = self.send(self.request(Method::GET, url), path).await?;
        Self::decode(response, path).await
    }

    /// `GET path?query` for list endpoints, bare or `{"data": [...]}`.
    pub async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let envelope: ListEnvelope<T> = self.get_query(path, query).await?;
        Ok(envelope.into_vec())
    }

    /// `POST path` with a JSON body.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::POST, path, body).await
    }

    /// `PUT path` with a JSON body.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::PUT, path, body).await
    }

    /// `PUT path` without a body, for state transitions.
    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        let response = self.send(self.request(Method::PUT, url), path).await?;
        Self::decode(response, path).await
    }

    /// `DELETE path`.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        let response = self.send(self.request(Method::DELETE, url), path).await?;
        Self::decode(response, path).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let response = self
            .send(self.request(method, url).json(body), path)
            .await?;
        Self::decode(response, path).await
    }

    /// `POST path` with a multipart form.
    pub async fn upload<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T> {
        let url = self.endpoint(path)?;
        let response = self
            .send(self.request(Method::POST, url).multipart(form), path)
            .await?;
        Self::decode(response, path).await
    }

    /// `GET path` as raw bytes.
    pub async fn download(&self, path: &str) -> Result<Bytes> {
        let url = self.endpoint(path)?;
        let response = self.send(self.request(Method::GET, url), path).await?;
        Ok(response.bytes().await?)
    }

    /// Fetch an absolute URL from a legacy record.
    ///
    /// The credential header is not attached: these URLs point outside the
    /// backend.
    pub async fn download_external(&self, url: &str) -> Result<Bytes> {
        let parsed = Url::parse(url)?;
        debug!(url = %parsed, "Fetching external file");
        let response = self.send(self.http.get(parsed), url).await?;
        Ok(response.bytes().await?)
    }
}

/// Build a multipart file part from a local file.
///
/// The part carries the file's name and a content type guessed from its
/// extension.
pub async fn file_part(path: &Path) -> Result<Part> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ApiError::io(format!("reading {}", path.display()), e))?;
    let file_name = path
        .file_name()
        .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    Ok(Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime.essence_str())?)
}

/// Extract the server's error message or fall back to a generic one.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    let from_body = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            MESSAGE_FIELDS
                .iter()
                .find_map(|key| json.get(key).and_then(|v| v.as_str()).map(str::to_string))
                .or_else(|| {
                    json.get("errors")
                        .and_then(|errs| errs.get(0))
                        .and_then(|e| e.get("msg").or_else(|| e.get("message")))
                        .and_then(|v| v.as_str())
                        .map(str::to_string)
                })
        })
        .filter(|m| !m.trim().is_empty());

    from_body.unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()))
}
