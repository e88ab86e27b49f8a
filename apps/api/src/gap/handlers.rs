//! Axum route handlers for the Gap Analyzer API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::gap::analyzer::GapAnalysisResult;
use crate::gap::skills::{can_apply, custom_job_from_description, match_label};
use crate::models::Job;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapAnalysisRequest {
    pub job_id: Option<String>,
    pub job_description: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GapAnalysisResponse {
    #[serde(flatten)]
    pub result: GapAnalysisResult,
    pub match_label: Option<&'static str>,
    pub can_apply: bool,
    pub analyzer: &'static str,
    pub job: Job,
    pub resume_skills: Vec<String>,
}

/// POST /api/v1/gap-analysis
///
/// Compares the caller's resume draft against a catalog job (`jobId`) or a
/// pasted description (`jobDescription`). A job id wins when both are sent.
pub async fn handle_gap_analysis(
    State(state): State<AppState>,
    Json(request): Json<GapAnalysisRequest>,
) -> Result<Json<GapAnalysisResponse>, AppError> {
    let user_id = state.require_user_id().await?;

    let job_id = request.job_id.filter(|id| !id.trim().is_empty());
    let description = request.job_description.filter(|d| !d.trim().is_empty());

    let job = match (job_id, description) {
        (Some(id), _) => state
            .catalog
            .job_by_id(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?,
        (None, Some(description)) => custom_job_from_description(&description),
        (None, None) => {
            return Err(AppError::Validation(
                "Select a job or paste a job description".to_string(),
            ))
        }
    };

    let resume = state.resumes.get(&user_id, &state.catalog.demo_resume).await;
    let result = state.gap_analyzer.analyze(&resume, &job);
    debug!(
        "Gap analysis for {user_id} vs {}: {:?}%",
        job.id, result.match_percentage
    );

    Ok(Json(GapAnalysisResponse {
        match_label: result.match_percentage.map(match_label),
        can_apply: result.match_percentage.is_some_and(can_apply),
        analyzer: state.gap_analyzer.backend(),
        job,
        resume_skills: resume.sections.skills,
        result,
    }))
}
