//! Hosted auth: login, signup and profile lookup against an external
//! auth/database REST service (GoTrue-style `/auth/v1` plus a `profiles` table).
//!
//! The service is treated as an opaque provider of `{user, profile, session}`.
//! The role always comes from the profile row, never from the auth user.
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::auth::provider::{AuthError, AuthProvider, SignupOutcome, SignupRequest};
use crate::auth::session::Session;
use crate::models::{Profile, User};

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: String,
    email: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
    user: AuthUser,
}

/// Signup answers with the bare user when confirmation is pending, or with a
/// full token payload when the project auto-confirms.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignupResponse {
    WithSession { user: AuthUser, access_token: String },
    UserOnly(AuthUser),
}

#[derive(Debug, Serialize)]
struct NewProfile<'a> {
    id: &'a str,
    name: &'a str,
    email: &'a str,
    role: &'a str,
}

#[derive(Debug, Deserialize)]
struct ServiceError {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
}

#[derive(Clone)]
pub struct HostedAuthProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HostedAuthProvider {
    pub fn new(base_url: &str, api_key: String) -> Result<Self, AuthError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_keys(&self, request: RequestBuilder, bearer: Option<&str>) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(bearer.unwrap_or(&self.api_key))
    }

    async fn fetch_profile(&self, user_id: &str, token: &str) -> Result<Profile, AuthError> {
        let response = self
            .with_keys(self.client.get(self.url("/rest/v1/profiles")), Some(token))
            .query(&[("id", format!("eq.{user_id}")), ("select", "*".to_string())])
            .send()
            .await?;

        let profiles: Vec<Profile> = ensure_success(response).await?.json().await?;
        profiles
            .into_iter()
            .next()
            .ok_or_else(|| AuthError::ProfileMissing(user_id.to_string()))
    }

    async fn insert_profile(&self, profile: NewProfile<'_>, token: &str) -> Result<(), AuthError> {
        let response = self
            .with_keys(self.client.post(self.url("/rest/v1/profiles")), Some(token))
            .header("Prefer", "return=minimal")
            .json(&profile)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl AuthProvider for HostedAuthProvider {
    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let response = self
            .with_keys(self.client.post(self.url("/auth/v1/token")), None)
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let token: TokenResponse = ensure_success(response).await?.json().await?;
        let profile = self.fetch_profile(&token.user.id, &token.access_token).await?;

        let user = User {
            id: token.user.id.clone(),
            name: profile.name.clone(),
            email: token.user.email.unwrap_or_else(|| profile.email.clone()),
            role: profile.role,
            created_at: token.user.created_at.unwrap_or_else(Utc::now),
        };
        debug!("Hosted login accepted for {}", user.email);

        Ok(Session {
            user,
            profile: Some(profile),
            access_token: Some(token.access_token),
            expires_at: Some(Utc::now() + chrono::Duration::seconds(token.expires_in)),
        })
    }

    async fn signup(&self, request: &SignupRequest) -> Result<SignupOutcome, AuthError> {
        let response = self
            .with_keys(self.client.post(self.url("/auth/v1/signup")), None)
            .json(&json!({
                "email": request.email,
                "password": request.password,
                "data": { "name": request.name, "role": request.role.as_str() },
            }))
            .send()
            .await?;

        let response = ensure_success(response).await.map_err(signup_rejection)?;
        let (auth_user, token) = match response.json().await? {
            SignupResponse::WithSession { user, access_token } => (user, Some(access_token)),
            SignupResponse::UserOnly(user) => (user, None),
        };

        let email = auth_user.email.unwrap_or_else(|| request.email.clone());
        let profile = NewProfile {
            id: &auth_user.id,
            name: &request.name,
            email: &email,
            role: request.role.as_str(),
        };
        // Without a session the profile row is left to the backend's signup trigger.
        match token.as_deref() {
            Some(token) => self.insert_profile(profile, token).await?,
            None => debug!("Signup pending confirmation for {email}; profile insert deferred"),
        }

        info!("Registered hosted user {email}");
        Ok(SignupOutcome {
            user: User {
                id: auth_user.id,
                name: request.name.clone(),
                email,
                role: request.role,
                created_at: auth_user.created_at.unwrap_or_else(Utc::now),
            },
            requires_email_confirmation: token.is_none(),
        })
    }

    async fn logout(&self, session: &Session) -> Result<(), AuthError> {
        let Some(token) = session.access_token.as_deref() else {
            return Ok(());
        };
        let response = self
            .with_keys(self.client.post(self.url("/auth/v1/logout")), Some(token))
            .send()
            .await?;
        if let Err(e) = ensure_success(response).await {
            warn!("Hosted logout rejected: {e}");
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "hosted"
    }
}

async fn ensure_success(response: Response) -> Result<Response, AuthError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(AuthError::Rejected {
        status: status.as_u16(),
        message: service_message(&body),
    })
}

/// A 4xx on signup is a problem with the submitted form, not a failed login.
fn signup_rejection(error: AuthError) -> AuthError {
    match error {
        AuthError::Rejected { status, message } if status < 500 => AuthError::Validation(message),
        other => other,
    }
}

/// Pulls the human-readable message out of a service error body.
fn service_message(body: &str) -> String {
    serde_json::from_str::<ServiceError>(body)
        .ok()
        .and_then(|e| e.error_description.or(e.msg).or(e.message))
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use axum::{
        extract::{Query, State},
        http::{HeaderMap, StatusCode},
        routing::{get, post},
        Json, Router,
    };
    use serde_json::Value;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    type Inserted = Arc<Mutex<Vec<Value>>>;

    struct Backend {
        url: String,
        inserted: Inserted,
    }

    #[test]
    fn test_service_message_variants() {
        assert_eq!(
            service_message(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#),
            "Invalid login credentials"
        );
        assert_eq!(service_message(r#"{"msg":"User already registered"}"#), "User already registered");
        assert_eq!(service_message("gateway timeout"), "gateway timeout");
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let provider = HostedAuthProvider::new("http://auth.local/", "key".to_string()).unwrap();
        assert_eq!(provider.url("/auth/v1/token"), "http://auth.local/auth/v1/token");
    }

    async fn token(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        if body["password"] != "correct-horse" {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({"error_description": "Invalid login credentials"})),
            );
        }
        (
            StatusCode::OK,
            Json(serde_json::json!({
                "access_token": "tok-1",
                "expires_in": 3600,
                "user": {"id": "u-42", "email": body["email"], "created_at": "2025-01-01T00:00:00Z"}
            })),
        )
    }

    async fn profiles(
        headers: HeaderMap,
        Query(params): Query<HashMap<String, String>>,
    ) -> (StatusCode, Json<Value>) {
        if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("Bearer tok-1") {
            return (StatusCode::UNAUTHORIZED, Json(serde_json::json!({"message": "JWT required"})));
        }
        let rows = if params.get("id").map(String::as_str) == Some("eq.u-42") {
            serde_json::json!([{"id": "u-42", "name": "Riley Park", "email": "riley@corp.io", "role": "admin"}])
        } else {
            serde_json::json!([])
        };
        (StatusCode::OK, Json(rows))
    }

    /// Confirmation-pending addresses get the bare user back; `taken@` is already registered.
    async fn signup(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        let email = body["email"].as_str().unwrap_or_default().to_string();
        if email.starts_with("taken@") {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({"code": 422, "msg": "User already registered"})),
            );
        }
        let user = serde_json::json!({"id": "u-77", "email": email, "created_at": "2025-02-01T00:00:00Z"});
        if email.starts_with("pending@") {
            return (StatusCode::OK, Json(user));
        }
        (
            StatusCode::OK,
            Json(serde_json::json!({"access_token": "tok-1", "expires_in": 3600, "user": user})),
        )
    }

    async fn insert_profile(
        State(inserted): State<Inserted>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> StatusCode {
        if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("Bearer tok-1") {
            return StatusCode::UNAUTHORIZED;
        }
        inserted.lock().unwrap().push(body);
        StatusCode::CREATED
    }

    async fn spawn_backend() -> Backend {
        let inserted = Inserted::default();
        let app = Router::new()
            .route("/auth/v1/token", post(token))
            .route("/auth/v1/signup", post(signup))
            .route("/rest/v1/profiles", get(profiles).post(insert_profile))
            .route("/auth/v1/logout", post(|| async { StatusCode::NO_CONTENT }))
            .with_state(inserted.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Backend {
            url: format!("http://{addr}"),
            inserted,
        }
    }

    fn signup_request(email: &str) -> SignupRequest {
        SignupRequest {
            name: "Morgan Lee".to_string(),
            email: email.to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
            role: Role::Admin,
            agree_to_terms: true,
        }
    }

    #[tokio::test]
    async fn test_login_takes_role_from_profile() {
        let backend = spawn_backend().await;
        let provider = HostedAuthProvider::new(&backend.url, "anon".to_string()).unwrap();

        let session = provider.login("riley@corp.io", "correct-horse").await.unwrap();

        assert_eq!(session.user.id, "u-42");
        assert_eq!(session.user.role, Role::Admin);
        assert_eq!(session.user.name, "Riley Park");
        assert_eq!(session.access_token.as_deref(), Some("tok-1"));
        assert!(session.expires_at.unwrap() > Utc::now());
        assert_eq!(session.profile.unwrap().role, Role::Admin);
    }

    #[tokio::test]
    async fn test_login_surfaces_service_message() {
        let backend = spawn_backend().await;
        let provider = HostedAuthProvider::new(&backend.url, "anon".to_string()).unwrap();

        let err = provider.login("riley@corp.io", "wrong").await.unwrap_err();
        match err {
            AuthError::Rejected { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid login credentials");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_logout_without_token_skips_call() {
        let provider =
            HostedAuthProvider::new("http://127.0.0.1:9", "anon".to_string()).unwrap();
        let user = crate::catalog::Catalog::seeded().users[0].clone();
        assert!(provider.logout(&Session::local(user)).await.is_ok());
    }

    #[tokio::test]
    async fn test_signup_with_session_inserts_profile() {
        let backend = spawn_backend().await;
        let provider = HostedAuthProvider::new(&backend.url, "anon".to_string()).unwrap();

        let outcome = provider.signup(&signup_request("morgan@corp.io")).await.unwrap();

        assert!(!outcome.requires_email_confirmation);
        assert_eq!(outcome.user.id, "u-77");
        assert_eq!(outcome.user.role, Role::Admin);
        let inserted = backend.inserted.lock().unwrap().clone();
        assert_eq!(
            inserted,
            vec![serde_json::json!({
                "id": "u-77", "name": "Morgan Lee", "email": "morgan@corp.io", "role": "admin"
            })]
        );
    }

    #[tokio::test]
    async fn test_signup_pending_confirmation_defers_profile() {
        let backend = spawn_backend().await;
        let provider = HostedAuthProvider::new(&backend.url, "anon".to_string()).unwrap();

        let outcome = provider.signup(&signup_request("pending@corp.io")).await.unwrap();

        assert!(outcome.requires_email_confirmation);
        assert_eq!(outcome.user.email, "pending@corp.io");
        assert!(backend.inserted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_signup_rejection_is_a_form_error() {
        let backend = spawn_backend().await;
        let provider = HostedAuthProvider::new(&backend.url, "anon".to_string()).unwrap();

        let err = provider.signup(&signup_request("taken@corp.io")).await.unwrap_err();
        match err {
            AuthError::Validation(message) => assert_eq!(message, "User already registered"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_signup_rejection_keeps_outages() {
        let err = signup_rejection(AuthError::Rejected {
            status: 503,
            message: "down".to_string(),
        });
        assert!(matches!(err, AuthError::Rejected { status: 503, .. }));
    }
}
