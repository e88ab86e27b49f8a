//! Auth provider: the capability every login strategy implements.
//!
//! Two strategies exist and differ in failure semantics:
//! - `MockAuthProvider`: seed user list, length-only password check.
//! - `HostedAuthProvider`: external auth/database REST service; the role lives
//!   in a separate profile row.
//!
//! Selected once at startup from `AUTH_PROVIDER`; `AppState` holds `Arc<dyn AuthProvider>`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::session::Session;
use crate::models::{Role, User};

pub const MIN_LOGIN_PASSWORD_LEN: usize = 3;
pub const MIN_SIGNUP_PASSWORD_LEN: usize = 6;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("Password must be at least 3 characters")]
    PasswordTooShort,

    #[error("{0}")]
    Validation(String),

    #[error("An account with this email already exists")]
    EmailTaken,

    /// The hosted service answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("No profile found for user {0}")]
    ProfileMissing(String),

    #[error("Auth service unreachable: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default = "default_role")]
    pub role: Role,
    #[serde(default)]
    pub agree_to_terms: bool,
}

fn default_role() -> Role {
    Role::User
}

impl SignupRequest {
    /// Form checks run before any provider call, in the order the form reports them.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() {
            return Err(AuthError::Validation(
                "Please fill in all required fields.".to_string(),
            ));
        }
        if !self.agree_to_terms {
            return Err(AuthError::Validation(
                "Please agree to the Terms of Service and Privacy Policy.".to_string(),
            ));
        }
        if self.password != self.confirm_password {
            return Err(AuthError::Validation(
                "Please make sure your passwords match.".to_string(),
            ));
        }
        if self.password.chars().count() < MIN_SIGNUP_PASSWORD_LEN {
            return Err(AuthError::Validation(
                "Password must be at least 6 characters long.".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupOutcome {
    pub user: User,
    /// Hosted accounts must confirm their email before the first login.
    pub requires_email_confirmation: bool,
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    async fn signup(&self, request: &SignupRequest) -> Result<SignupOutcome, AuthError>;

    async fn logout(&self, session: &Session) -> Result<(), AuthError>;

    fn name(&self) -> &'static str;
}
