use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;

use crate::applications::tracker::{
    dashboard_summary, status_stats, track_applications, DashboardSummary, StatusStats,
    TrackedApplication, TrackerQuery,
};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ApplicationListResponse<'a> {
    pub stats: StatusStats,
    pub applications: Vec<TrackedApplication<'a>>,
}

/// GET /api/v1/applications?search=&status=&sort=
pub async fn handle_list_applications(
    State(state): State<AppState>,
    Query(query): Query<TrackerQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let user_id = state.require_user_id().await?;
    let catalog = state.catalog.as_ref();

    let response = ApplicationListResponse {
        stats: status_stats(&catalog.applications_by_user(&user_id)),
        applications: track_applications(catalog, &user_id, &query),
    };
    Ok(Json(serde_json::to_value(response).map_err(anyhow::Error::from)?))
}

/// GET /api/v1/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardSummary>, AppError> {
    let user_id = state.require_user_id().await?;
    Ok(Json(dashboard_summary(&state.catalog, &user_id, Utc::now())))
}
