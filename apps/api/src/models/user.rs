use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Binary role split. Gates navigation and route access; there is no hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Landing screen for a signed-in user of this role.
    pub fn home_path(self) -> &'static str {
        match self {
            Role::User => "/dashboard",
            Role::Admin => "/admin/dashboard",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

/// Account record. This is also the exact shape persisted under the session storage key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Profile row kept by the hosted auth backend. Carries the role for hosted sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub email: String,
    pub role: Role,
}
