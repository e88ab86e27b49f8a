pub mod health;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::admin::handlers as admin;
use crate::applications::handlers as applications;
use crate::auth::guard::{require_admin, require_user};
use crate::auth::handlers as auth;
use crate::gap::handlers as gap;
use crate::jobs::handlers as jobs;
use crate::resources::handlers as resources;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Job-seeker API: signed-in users with the `user` role.
    let user_api: Router<AppState> = Router::new()
        .route("/api/v1/dashboard", get(applications::handle_dashboard))
        .route("/api/v1/jobs", get(jobs::handle_list_jobs))
        .route("/api/v1/jobs/:id", get(jobs::handle_get_job))
        .route(
            "/api/v1/applications",
            get(applications::handle_list_applications),
        )
        .route("/api/v1/gap-analysis", post(gap::handle_gap_analysis))
        .route(
            "/api/v1/resume",
            get(resume::handle_get_resume).patch(resume::handle_patch_resume),
        )
        .route("/api/v1/resume/export", get(resume::handle_export_resume))
        .route("/api/v1/resources", get(resources::handle_list_resources))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user));

    // Employer API: signed-in users with the `admin` role.
    let admin_api: Router<AppState> = Router::new()
        .route("/api/v1/admin/overview", get(admin::handle_overview))
        .route("/api/v1/admin/responses", get(admin::handle_responses))
        .route("/api/v1/admin/jobs", post(admin::handle_save_job))
        .route("/api/v1/admin/jobs/:id/stats", get(admin::handle_job_stats))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/auth/login", post(auth::handle_login))
        .route("/api/v1/auth/logout", post(auth::handle_logout))
        .route("/api/v1/auth/signup", post(auth::handle_signup))
        .route("/api/v1/auth/session", get(auth::handle_session))
        .route("/api/v1/navigate", get(auth::handle_navigate))
        .merge(user_api)
        .merge(admin_api)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use std::time::Duration;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::config::Config;

    const USER_EMAIL: &str = "alex.chen@email.com";
    const ADMIN_EMAIL: &str = "sarah.johnson@skillmatch.com";

    async fn test_app() -> (Router, TempDir) {
        test_app_with_latency(Duration::ZERO).await
    }

    async fn test_app_with_latency(latency: Duration) -> (Router, TempDir) {
        let dir = TempDir::new().unwrap();
        let mut config = Config::for_tests(dir.path().join("storage.json"));
        config.simulated_latency = latency;
        let state = AppState::from_config(config).await.unwrap();
        (build_router(state), dir)
    }

    async fn job_ids(app: &Router, uri: &str) -> Vec<String> {
        let response = send(app, Method::GET, uri, None).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        json_body(response).await["jobs"]
            .as_array()
            .unwrap()
            .iter()
            .map(|j| j["id"].as_str().unwrap().to_string())
            .collect()
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();
        app.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        }
    }

    async fn login(app: &Router, email: &str) -> Response {
        send(
            app,
            Method::POST,
            "/api/v1/auth/login",
            Some(json!({ "email": email, "password": "secret" })),
        )
        .await
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _dir) = test_app().await;
        let response = send(&app, Method::GET, "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["service"], "skillmatch-api");
    }

    #[tokio::test]
    async fn test_guarded_route_redirects_signed_out_caller() {
        let (app, _dir) = test_app().await;
        let response = send(&app, Method::GET, "/api/v1/jobs", None).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/login");
        let body = json_body(response).await;
        assert_eq!(body["from"], "/api/v1/jobs");
    }

    #[tokio::test]
    async fn test_login_then_dashboard() {
        let (app, _dir) = test_app().await;

        let response = login(&app, USER_EMAIL).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["redirectTo"], "/dashboard");
        assert_eq!(body["user"]["role"], "user");

        let response = send(&app, Method::GET, "/api/v1/dashboard", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["totalApplications"], 5);
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_rejected() {
        let (app, _dir) = test_app().await;
        let response = login(&app, "nobody@example.com").await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "LOGIN_FAILED");
        assert_eq!(body["error"]["message"], "User not found");

        let session = json_body(send(&app, Method::GET, "/api/v1/auth/session", None).await).await;
        assert_eq!(session["user"], Value::Null);
        assert_eq!(session["isLoading"], false);
    }

    #[tokio::test]
    async fn test_admin_is_sent_home_from_user_routes() {
        let (app, _dir) = test_app().await;
        login(&app, ADMIN_EMAIL).await;

        let response = send(&app, Method::GET, "/api/v1/jobs", None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/admin/dashboard");

        let response = send(&app, Method::GET, "/api/v1/admin/overview", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["totalJobs"], 5);
    }

    #[tokio::test]
    async fn test_user_is_sent_home_from_admin_routes() {
        let (app, _dir) = test_app().await;
        login(&app, USER_EMAIL).await;

        let response = send(&app, Method::GET, "/api/v1/admin/responses", None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/dashboard");
    }

    #[tokio::test]
    async fn test_gap_analysis_against_catalog_job() {
        let (app, _dir) = test_app().await;
        login(&app, USER_EMAIL).await;

        let response = send(
            &app,
            Method::POST,
            "/api/v1/gap-analysis",
            Some(json!({ "jobId": "job-1" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["matchPercentage"], 40);
        assert_eq!(body["matchingSkills"], json!(["React", "TypeScript"]));
        assert_eq!(
            body["missingSkills"],
            json!(["Next.js", "Tailwind CSS", "GraphQL"])
        );
        assert_eq!(body["canApply"], false);
    }

    #[tokio::test]
    async fn test_job_search() {
        let (app, _dir) = test_app().await;
        login(&app, USER_EMAIL).await;

        let response = send(&app, Method::GET, "/api/v1/jobs?query=react", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let ids: Vec<&str> = body["jobs"]
            .as_array()
            .unwrap()
            .iter()
            .map(|j| j["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["job-1", "job-4"]);

        let response = send(&app, Method::GET, "/api/v1/jobs/job-404", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_resume_edit_shows_up_in_export() {
        let (app, _dir) = test_app().await;
        login(&app, USER_EMAIL).await;

        let response = send(
            &app,
            Method::PATCH,
            "/api/v1/resume",
            Some(json!({ "edits": [{ "op": "summary", "text": "Ships reliable services." }] })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await["sections"]["summary"],
            "Ships reliable services."
        );

        let body = json_body(send(&app, Method::GET, "/api/v1/resume/export", None).await).await;
        assert_eq!(body["pages"], 1);
        assert!(body["blocks"]
            .as_array()
            .unwrap()
            .iter()
            .any(|b| b["text"] == "Ships reliable services."));
    }

    #[tokio::test]
    async fn test_job_form_validation_and_save() {
        let (app, _dir) = test_app().await;
        login(&app, ADMIN_EMAIL).await;

        let response = send(
            &app,
            Method::POST,
            "/api/v1/admin/jobs",
            Some(json!({ "draft": { "title": "SRE" } })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["error"]["message"],
            "Please fill in all required fields."
        );

        let response = send(
            &app,
            Method::POST,
            "/api/v1/admin/jobs",
            Some(json!({
                "draft": { "title": "SRE", "location": "Remote", "description": "Keep it up." },
                "mode": "draft"
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["title"], "Draft Saved");
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let (app, _dir) = test_app().await;
        login(&app, USER_EMAIL).await;

        let response = send(&app, Method::POST, "/api/v1/auth/logout", None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(&app, Method::GET, "/api/v1/dashboard", None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn test_navigate_reports_guard_decision() {
        let (app, _dir) = test_app().await;
        let body = json_body(send(&app, Method::GET, "/api/v1/navigate?path=/resume", None).await).await;
        assert_eq!(body["decision"]["action"], "redirectToLogin");
        assert_eq!(body["decision"]["from"], "/resume");

        let response = send(&app, Method::GET, "/api/v1/navigate?path=/nowhere", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_job_search_treats_blank_pickers_as_unset() {
        let (app, _dir) = test_app().await;
        login(&app, USER_EMAIL).await;

        for uri in [
            "/api/v1/jobs?type=",
            "/api/v1/jobs?type=all",
            "/api/v1/jobs?remote=",
            "/api/v1/jobs?experience=",
            "/api/v1/jobs?query=&location=&type=&experience=",
        ] {
            assert_eq!(job_ids(&app, uri).await.len(), 5, "{uri}");
        }

        assert_eq!(
            job_ids(&app, "/api/v1/jobs?type=Full-time&remote=false&experience=Mid").await,
            vec!["job-2"]
        );
        assert!(job_ids(&app, "/api/v1/jobs?type=Contract").await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_login_does_not_leave_service_loading() {
        let (app, _dir) = test_app_with_latency(Duration::from_millis(500)).await;
        assert_eq!(login(&app, USER_EMAIL).await.status(), StatusCode::OK);

        let cancelled =
            tokio::time::timeout(Duration::from_millis(50), login(&app, USER_EMAIL)).await;
        assert!(cancelled.is_err());

        let session = json_body(send(&app, Method::GET, "/api/v1/auth/session", None).await).await;
        assert_eq!(session["isLoading"], false);
        let response = send(&app, Method::GET, "/api/v1/dashboard", None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_signup_with_padded_seed_email_conflicts() {
        let (app, _dir) = test_app().await;
        let response = send(
            &app,
            Method::POST,
            "/api/v1/auth/signup",
            Some(json!({
                "name": "Alex Again",
                "email": " alex.chen@email.com",
                "password": "secret1",
                "confirmPassword": "secret1",
                "agreeToTerms": true
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(json_body(response).await["error"]["code"], "EMAIL_TAKEN");
    }
}
