//! User profiles, roles and the back-office tabs each role may see.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn is_admin(self) -> bool {
        self == Self::Admin
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Admin => "admin",
            Self::User => "user",
        })
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            other => Err(format!("unknown role '{other}' (expected admin or user)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Id,
    pub email: String,
    #[serde(default)]
    pub nom: Option<String>,
    #[serde(default)]
    pub prenom: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl UserProfile {
    /// "Prenom Nom", falling back to the email when both are missing.
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.prenom.as_deref(), self.nom.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            self.email.clone()
        } else {
            parts.join(" ")
        }
    }
}

/// Body of `PUT /users/:id/profile`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prenom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.nom.is_none() && self.prenom.is_none() && self.email.is_none()
    }
}

/// Body of `PUT /users/:id/change-password`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

/// Back-office sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Favorites,
    Notifications,
    Profile,
    Products,
    Archives,
    Documents,
    Partners,
    Cms,
    Users,
    Reservations,
    Statistics,
}

impl Tab {
    const USER_TABS: &'static [Tab] = &[
        Tab::Favorites,
        Tab::Notifications,
        Tab::Profile,
        Tab::Products,
        Tab::Archives,
        Tab::Documents,
        Tab::Partners,
    ];

    const ADMIN_TABS: &'static [Tab] = &[
        Tab::Favorites,
        Tab::Notifications,
        Tab::Profile,
        Tab::Products,
        Tab::Archives,
        Tab::Documents,
        Tab::Partners,
        Tab::Cms,
        Tab::Users,
        Tab::Reservations,
        Tab::Statistics,
    ];

    /// Tabs shown to a given role, in display order.
    pub fn visible_for(role: Role) -> &'static [Tab] {
        match role {
            Role::Admin => Self::ADMIN_TABS,
            Role::User => Self::USER_TABS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Favorites => "Favorites",
            Self::Notifications => "Notifications",
            Self::Profile => "Profile",
            Self::Products => "Structured products",
            Self::Archives => "Archives",
            Self::Documents => "Financial documents",
            Self::Partners => "Partners",
            Self::Cms => "Site content",
            Self::Users => "Users",
            Self::Reservations => "Reservations",
            Self::Statistics => "Simulator statistics",
        }
    }
}
