//! `/auth` endpoints.

use serde::{Deserialize, Serialize};

use super::client::ApiClient;
use super::error::Result;
use crate::models::UserProfile;
use crate::session::Session;
use crate::validation::require_field;

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
    #[serde(default)]
    user: Option<UserProfile>,
}

impl ApiClient {
    /// `POST /auth/login`, returning a session for the credentials.
    ///
    /// When the login response does not include the profile, it is fetched
    /// from `/auth/me` with the new token.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let email = require_field("email", email)?;
        require_field("password", password)?;

        let response: LoginResponse = self
            .post("/auth/login", &LoginRequest { email, password })
            .await?;

        let user = match response.user {
            Some(user) => user,
            None => {
                self.clone()
                    .with_session(Session::new(response.token.clone(), None))
                    .me()
                    .await?
            },
        };

        tracing::info!(email = %user.email, role = %user.role, "Signed in");
        Ok(Session::new(response.token, Some(user)))
    }

    /// `GET /auth/me`, the profile behind the current token.
    pub async fn me(&self) -> Result<UserProfile> {
        self.require_session()?;
        self.get("/auth/me").await
    }
}
