use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;

use crate::errors::AppError;
use crate::jobs::filter::{filter_jobs, JobFilter};
use crate::models::job::time_ago;
use crate::models::Job;
use crate::state::AppState;

/// A job plus the display strings shown on its card.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCard {
    #[serde(flatten)]
    pub job: Job,
    pub salary_display: Option<String>,
    pub posted: String,
}

impl JobCard {
    fn from_job(job: &Job) -> Self {
        JobCard {
            salary_display: job.salary.map(|s| s.display()),
            posted: time_ago(job.posted_at, Utc::now()),
            job: job.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub total: usize,
    pub jobs: Vec<JobCard>,
}

/// GET /api/v1/jobs?query=&location=&type=&remote=&experience=
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(filter): Query<JobFilter>,
) -> Json<JobListResponse> {
    let jobs: Vec<JobCard> = filter_jobs(&state.catalog.jobs, &filter)
        .into_iter()
        .map(JobCard::from_job)
        .collect();
    Json(JobListResponse {
        total: jobs.len(),
        jobs,
    })
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<JobCard>, AppError> {
    state
        .catalog
        .job_by_id(&job_id)
        .map(|job| Json(JobCard::from_job(job)))
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
}
