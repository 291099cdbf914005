//! User administration plus the signed-in user's own profile and password.

use async_trait::async_trait;
use tracing::info;

use super::ListSource;
use super::filter::matches_search;
use crate::api::{ApiClient, Result};
use crate::models::{Id, PasswordChange, ProfileUpdate, Role, UserProfile};
use crate::validation::{ValidationError, check_new_password, require_field};

#[derive(Debug, Clone, Default)]
pub struct UsersFilter {
    pub role: Option<Role>,
    pub search: Option<String>,
}

impl UsersFilter {
    fn matches(&self, u: &UserProfile) -> bool {
        self.role.is_none_or(|role| u.role == role)
            && matches_search(
                self.search.as_deref().unwrap_or_default(),
                &[Some(u.email.as_str()), u.nom.as_deref(), u.prenom.as_deref()],
            )
    }
}

pub struct UsersSource;

#[async_trait]
impl ListSource for UsersSource {
    type Item = UserProfile;
    type Filter = UsersFilter;

    fn name(&self) -> &'static str {
        "users"
    }

    async fn fetch(&self, client: &ApiClient, filter: &UsersFilter) -> Result<Vec<UserProfile>> {
        client.require_admin()?;
        let mut users: Vec<UserProfile> = client.get_list("/users", &[]).await?;
        users.retain(|u| filter.matches(u));
        Ok(users)
    }

    fn render_item(&self, u: &UserProfile) -> String {
        let name = u.display_name();
        if name == u.email {
            format!("[{}] {} ({})", u.id, u.email, u.role)
        } else {
            format!("[{}] {} <{}> ({})", u.id, name, u.email, u.role)
        }
    }

    fn empty_message(&self) -> &'static str {
        "No users match the current filters."
    }
}

/// `PUT /users/:id/profile`.
///
/// Users may only edit their own profile; admins may edit anyone's.
pub async fn update_profile(
    client: &ApiClient,
    user_id: &Id,
    update: &ProfileUpdate,
) -> Result<()> {
    if update.is_empty() {
        return Err(ValidationError::NothingToUpdate.into());
    }
    if let Some(email) = &update.email {
        require_field("email", email)?;
    }
    require_self_or_admin(client, user_id)?;

    let _: serde_json::Value = client
        .put(&format!("/users/{user_id}/profile"), update)
        .await?;
    info!(user = %user_id, "Profile updated");
    Ok(())
}

/// `PUT /users/:id/change-password`.
///
/// The new password must match its confirmation and meet the minimum
/// length; neither check needs the network.
pub async fn change_password(
    client: &ApiClient,
    user_id: &Id,
    current: &str,
    new: &str,
    confirm: &str,
) -> Result<()> {
    check_new_password(new, confirm)?;
    let current = require_field("current password", current)?;
    require_self_or_admin(client, user_id)?;

    let body = PasswordChange {
        current_password: current.to_string(),
        new_password: new.to_string(),
    };
    let _: serde_json::Value = client
        .put(&format!("/users/{user_id}/change-password"), &body)
        .await?;
    info!(user = %user_id, "Password changed");
    Ok(())
}

fn require_self_or_admin(client: &ApiClient, user_id: &Id) -> Result<()> {
    let session = client.require_session()?;
    let is_self = session.user.as_ref().is_some_and(|u| &u.id == user_id);
    if !is_self {
        client.require_admin()?;
    }
    Ok(())
}
