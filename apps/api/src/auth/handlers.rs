//! Axum route handlers for login, logout, signup, session and navigation.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::guard::{evaluate, navigation_for, screen_for, GuardDecision, Screen};
use crate::auth::provider::SignupRequest;
use crate::errors::AppError;
use crate::models::{Profile, User};
use crate::state::AppState;

/// Where a successful login lands when the caller was not redirected from anywhere.
const DEFAULT_LANDING: &str = "/dashboard";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub from: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub user: User,
    pub redirect_to: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub success: bool,
    pub user: User,
    pub message: String,
    pub redirect_to: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: Option<User>,
    pub profile: Option<Profile>,
    pub is_loading: bool,
    pub provider: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct NavigateQuery {
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct NavigateResponse {
    pub screen: &'static Screen,
    pub decision: GuardDecision,
    pub menu: Vec<&'static Screen>,
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let attempt = state.session.begin_login().await;

    let session = match state.auth.login(&request.email, &request.password).await {
        Ok(session) => session,
        Err(e) => {
            attempt.abort().await;
            warn!("Login failed for {}: {e}", request.email);
            return Err(e.into());
        }
    };

    let user = session.user.clone();
    state.session.establish(session).await?;
    attempt.complete();
    info!("Signed in {} as {}", user.email, user.role.as_str());

    let redirect_to = request
        .from
        .filter(|from| !from.is_empty())
        .unwrap_or_else(|| DEFAULT_LANDING.to_string());

    Ok(Json(LoginResponse {
        success: true,
        user,
        redirect_to,
    }))
}

/// POST /api/v1/auth/logout
///
/// Always clears the local session; a failing remote logout is only logged.
pub async fn handle_logout(State(state): State<AppState>) -> StatusCode {
    if let Some(previous) = state.session.clear().await {
        info!("Signed out {}", previous.user.email);
        if let Err(e) = state.auth.logout(&previous).await {
            warn!("Provider logout failed: {e}");
        }
    }
    StatusCode::NO_CONTENT
}

/// POST /api/v1/auth/signup
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    request.validate()?;
    let outcome = state.auth.signup(&request).await?;

    let message = if outcome.requires_email_confirmation {
        "Please check your email to verify your account before signing in."
    } else {
        "Account created successfully!"
    };

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            success: true,
            user: outcome.user,
            message: message.to_string(),
            redirect_to: "/login",
        }),
    ))
}

/// GET /api/v1/auth/session
pub async fn handle_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let snapshot = state.session.snapshot().await;
    let (user, profile) = match snapshot.session {
        Some(session) => (Some(session.user), session.profile),
        None => (None, None),
    };
    Json(SessionResponse {
        user,
        profile,
        is_loading: snapshot.is_loading,
        provider: state.auth.name(),
    })
}

/// GET /api/v1/navigate?path=/jobs
///
/// Runs the route guard for a screen path and returns the decision together
/// with the caller's navigation menu.
pub async fn handle_navigate(
    State(state): State<AppState>,
    Query(query): Query<NavigateQuery>,
) -> Result<Json<NavigateResponse>, AppError> {
    let screen = screen_for(&query.path)
        .ok_or_else(|| AppError::NotFound(format!("Page {} not found", query.path)))?;

    let snapshot = state.session.snapshot().await;
    let decision = evaluate(&snapshot, screen.required_role, &query.path);
    let menu = navigation_for(snapshot.user().map(|u| u.role));

    Ok(Json(NavigateResponse {
        screen,
        decision,
        menu,
    }))
}
