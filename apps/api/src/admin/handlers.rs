use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::admin::job_form::{save_job, JobDraft, RowEdit, SaveMode, SaveOutcome};
use crate::admin::stats::{
    admin_overview, job_stats, responses_report, AdminOverview, JobStats, ResponsesReport,
};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsesQuery {
    /// `all` or absent means every job.
    pub job_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveJobRequest {
    #[serde(default)]
    pub draft: JobDraft,
    /// Row edits applied to `draft` before it is saved.
    #[serde(default)]
    pub edits: Vec<RowEdit>,
    #[serde(default)]
    pub mode: SaveMode,
}

/// GET /api/v1/admin/overview
pub async fn handle_overview(State(state): State<AppState>) -> Json<AdminOverview> {
    Json(admin_overview(&state.catalog))
}

/// GET /api/v1/admin/responses?jobId=
pub async fn handle_responses(
    State(state): State<AppState>,
    Query(query): Query<ResponsesQuery>,
) -> Json<ResponsesReport> {
    let job_id = query.job_id.as_deref().filter(|id| *id != "all");
    Json(responses_report(&state.catalog, job_id))
}

/// GET /api/v1/admin/jobs/:id/stats
pub async fn handle_job_stats(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<JobStats>, AppError> {
    if state.catalog.job_by_id(&job_id).is_none() {
        return Err(AppError::NotFound(format!("Job {job_id} not found")));
    }
    Ok(Json(job_stats(&state.catalog, &job_id)))
}

/// POST /api/v1/admin/jobs
pub async fn handle_save_job(
    State(state): State<AppState>,
    Json(request): Json<SaveJobRequest>,
) -> Result<(StatusCode, Json<SaveOutcome>), AppError> {
    let SaveJobRequest {
        mut draft,
        edits,
        mode,
    } = request;
    for edit in edits {
        draft.apply(edit);
    }

    let outcome = save_job(draft, mode, state.config.simulated_latency)
        .await
        .map_err(|msg| AppError::Validation(msg.to_string()))?;

    tracing::info!(mode = ?outcome.mode, "Job form saved");
    let status = match mode {
        SaveMode::Draft => StatusCode::OK,
        SaveMode::Publish => StatusCode::CREATED,
    };
    Ok((status, Json(outcome)))
}
