use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::provider::{
    AuthError, AuthProvider, SignupOutcome, SignupRequest, MIN_LOGIN_PASSWORD_LEN,
};
use crate::auth::session::Session;
use crate::models::User;

/// Login against an in-memory user registry seeded from the catalog.
///
/// Only the password's length is checked, never its content. Signups live in
/// process memory and are gone on restart.
pub struct MockAuthProvider {
    users: RwLock<Vec<User>>,
    latency: Duration,
}

impl MockAuthProvider {
    pub fn new(users: Vec<User>, latency: Duration) -> Self {
        Self {
            users: RwLock::new(users),
            latency,
        }
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl AuthProvider for MockAuthProvider {
    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.simulate_latency().await;

        let user = self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(AuthError::UserNotFound)?;

        if password.chars().count() < MIN_LOGIN_PASSWORD_LEN {
            return Err(AuthError::PasswordTooShort);
        }

        debug!("Mock login accepted for {}", user.email);
        Ok(Session::local(user))
    }

    async fn signup(&self, request: &SignupRequest) -> Result<SignupOutcome, AuthError> {
        self.simulate_latency().await;

        let email = request.email.trim();
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == email) {
            return Err(AuthError::EmailTaken);
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: request.name.trim().to_string(),
            email: email.to_string(),
            role: request.role,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        info!("Registered mock user {} ({})", user.email, user.role.as_str());

        Ok(SignupOutcome {
            user,
            requires_email_confirmation: false,
        })
    }

    async fn logout(&self, _session: &Session) -> Result<(), AuthError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::models::Role;

    fn provider() -> MockAuthProvider {
        MockAuthProvider::new(Catalog::seeded().users, Duration::ZERO)
    }

    #[tokio::test]
    async fn test_login_with_seeded_email() {
        let session = provider()
            .login("alex.chen@email.com", "demo123")
            .await
            .unwrap();
        assert_eq!(session.user.id, "user-1");
        assert!(session.access_token.is_none());
    }

    #[tokio::test]
    async fn test_password_content_is_not_checked() {
        let session = provider()
            .login("sarah.johnson@skillmatch.com", "xyz")
            .await
            .unwrap();
        assert_eq!(session.user.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_unknown_email() {
        let err = provider()
            .login("nobody@example.com", "demo123")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }

    #[tokio::test]
    async fn test_unknown_email_reported_before_short_password() {
        let err = provider().login("nobody@example.com", "x").await.unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }

    #[tokio::test]
    async fn test_short_password() {
        let err = provider()
            .login("alex.chen@email.com", "ab")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::PasswordTooShort));
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let provider = provider();
        let request = SignupRequest {
            name: "Jamie Doe".to_string(),
            email: "jamie@example.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
            role: Role::Admin,
            agree_to_terms: true,
        };
        let outcome = provider.signup(&request).await.unwrap();
        assert!(!outcome.requires_email_confirmation);

        let session = provider.login("jamie@example.com", "secret1").await.unwrap();
        assert_eq!(session.user.id, outcome.user.id);
        assert_eq!(session.user.role, Role::Admin);

        let err = provider.signup(&request).await.unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_waits_simulated_latency() {
        let provider = MockAuthProvider::new(Catalog::seeded().users, Duration::from_secs(1));
        let started = tokio::time::Instant::now();
        provider.login("alex.chen@email.com", "demo123").await.unwrap();
        assert!(started.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_signup_ignores_surrounding_whitespace_for_duplicates() {
        let provider = provider();
        let request = SignupRequest {
            name: "Alex Again".to_string(),
            email: " alex.chen@email.com ".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
            role: Role::User,
            agree_to_terms: true,
        };
        let err = provider.signup(&request).await.unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
        assert_eq!(provider.users.read().await.len(), Catalog::seeded().users.len());
    }
}
