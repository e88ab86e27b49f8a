//! Route guard: role-gated access to screens and API groups.
//!
//! Decisions, in order: session still loading ⇒ wait; signed out ⇒ login
//! (remembering where the caller was headed); wrong role ⇒ that role's home.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use crate::auth::session::SessionSnapshot;
use crate::models::Role;
use crate::state::AppState;

pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Screen {
    pub path: &'static str,
    pub label: &'static str,
    #[serde(rename = "requiredRole")]
    pub required_role: Option<Role>,
}

const fn screen(path: &'static str, label: &'static str, required_role: Option<Role>) -> Screen {
    Screen {
        path,
        label,
        required_role,
    }
}

pub const SCREENS: &[Screen] = &[
    screen("/", "Home", None),
    screen("/login", "Log in", None),
    screen("/signup", "Sign up", None),
    screen("/dashboard", "Dashboard", Some(Role::User)),
    screen("/jobs", "Jobs", Some(Role::User)),
    screen("/resume", "Resume", Some(Role::User)),
    screen("/applications", "Applications", Some(Role::User)),
    screen("/gap-analyzer", "Gap Analyzer", Some(Role::User)),
    screen("/resources", "Resources", Some(Role::User)),
    screen("/admin/dashboard", "Dashboard", Some(Role::Admin)),
    screen("/admin/jobs", "Post Jobs", Some(Role::Admin)),
    screen("/admin/responses", "Responses", Some(Role::Admin)),
];

pub fn screen_for(path: &str) -> Option<&'static Screen> {
    SCREENS.iter().find(|s| s.path == path)
}

/// Menu entries for the navigation bar. Signed-out visitors get login/signup.
pub fn navigation_for(role: Option<Role>) -> Vec<&'static Screen> {
    match role {
        Some(role) => SCREENS
            .iter()
            .filter(|s| s.required_role == Some(role))
            .collect(),
        None => SCREENS
            .iter()
            .filter(|s| s.path == "/login" || s.path == "/signup")
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum GuardDecision {
    Pending,
    Allow,
    RedirectToLogin { from: String },
    RedirectToHome { to: &'static str },
}

pub fn evaluate(
    session: &SessionSnapshot,
    required_role: Option<Role>,
    requested_path: &str,
) -> GuardDecision {
    if session.is_loading {
        return GuardDecision::Pending;
    }
    let Some(required_role) = required_role else {
        return GuardDecision::Allow;
    };
    match session.user() {
        None => GuardDecision::RedirectToLogin {
            from: requested_path.to_string(),
        },
        Some(user) if user.role != required_role => GuardDecision::RedirectToHome {
            to: user.role.home_path(),
        },
        Some(_) => GuardDecision::Allow,
    }
}

impl IntoResponse for GuardDecision {
    fn into_response(self) -> Response {
        match self {
            GuardDecision::Allow => StatusCode::NO_CONTENT.into_response(),
            GuardDecision::Pending => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "error": {
                        "code": "SESSION_LOADING",
                        "message": "Session is still loading"
                    }
                })),
            )
                .into_response(),
            GuardDecision::RedirectToLogin { from } => (
                StatusCode::SEE_OTHER,
                [(header::LOCATION, LOGIN_PATH)],
                Json(json!({ "redirectTo": LOGIN_PATH, "from": from })),
            )
                .into_response(),
            GuardDecision::RedirectToHome { to } => (
                StatusCode::SEE_OTHER,
                [(header::LOCATION, to)],
                Json(json!({ "redirectTo": to })),
            )
                .into_response(),
        }
    }
}

async fn enforce(state: &AppState, role: Role, request: Request, next: Next) -> Response {
    let snapshot = state.session.snapshot().await;
    match evaluate(&snapshot, Some(role), request.uri().path()) {
        GuardDecision::Allow => next.run(request).await,
        decision => {
            tracing::debug!("Guard blocked {} {:?}", request.uri().path(), decision);
            decision.into_response()
        }
    }
}

/// Middleware for the job-seeker API group.
pub async fn require_user(State(state): State<AppState>, request: Request, next: Next) -> Response {
    enforce(&state, Role::User, request, next).await
}

/// Middleware for the employer API group.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    enforce(&state, Role::Admin, request, next).await
}
