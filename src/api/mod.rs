//! REST backend access.
//!
//! - [`ApiClient`] - base URL, credential header, JSON/multipart encoding
//! - [`ApiError`] - transport, status, decode and validation failures
//! - `auth` - login and current-user endpoints

mod auth;
pub mod client;
pub mod error;

pub use client::{ApiClient, file_part};
pub use error::{ApiError, Result};
