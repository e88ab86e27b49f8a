use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::Resume;
use crate::resume::editor::ResumeEdit;
use crate::resume::export::{export_blocks, page_count, PageLayout, TextBlock};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ResumePatchRequest {
    pub edits: Vec<ResumeEdit>,
}

#[derive(Debug, Serialize)]
pub struct ResumeExport {
    pub layout: PageLayout,
    pub pages: u32,
    pub blocks: Vec<TextBlock>,
}

/// GET /api/v1/resume
pub async fn handle_get_resume(State(state): State<AppState>) -> Result<Json<Resume>, AppError> {
    let user_id = state.require_user_id().await?;
    Ok(Json(
        state.resumes.get(&user_id, &state.catalog.demo_resume).await,
    ))
}

/// PATCH /api/v1/resume
pub async fn handle_patch_resume(
    State(state): State<AppState>,
    Json(request): Json<ResumePatchRequest>,
) -> Result<Json<Resume>, AppError> {
    let user_id = state.require_user_id().await?;
    let edit_count = request.edits.len();
    let resume = state
        .resumes
        .edit(&user_id, &state.catalog.demo_resume, request.edits)
        .await;
    tracing::debug!(user_id = %user_id, edit_count, "Resume draft updated");
    Ok(Json(resume))
}

/// GET /api/v1/resume/export
pub async fn handle_export_resume(
    State(state): State<AppState>,
) -> Result<Json<ResumeExport>, AppError> {
    let user_id = state.require_user_id().await?;
    let resume = state.resumes.get(&user_id, &state.catalog.demo_resume).await;
    let layout = PageLayout::default();
    let blocks = export_blocks(&resume, &layout);
    Ok(Json(ResumeExport {
        pages: page_count(&blocks),
        layout,
        blocks,
    }))
}
