use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::models::{Application, ApplicationStatus, Job};
use crate::query::Pick;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Newest first.
    #[default]
    Date,
    Company,
    Title,
}

/// `all`, or one exact status name.
pub type StatusFilter = Pick<ApplicationStatus>;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackerQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub status: StatusFilter,
    #[serde(default)]
    pub sort: SortBy,
}

/// An application with its job resolved.
#[derive(Debug, Clone, Serialize)]
pub struct TrackedApplication<'a> {
    #[serde(flatten)]
    pub application: &'a Application,
    pub job: &'a Job,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusStats {
    pub total: usize,
    pub applied: usize,
    pub interview: usize,
    pub offer: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_applications: usize,
    pub interviews: usize,
    pub offers: usize,
    /// Jobs posted in the last seven days.
    pub new_jobs: usize,
}

/// The user's applications joined with their jobs, filtered and sorted.
/// Applications whose job no longer resolves are dropped without comment.
pub fn track_applications<'a>(
    catalog: &'a Catalog,
    user_id: &str,
    query: &TrackerQuery,
) -> Vec<TrackedApplication<'a>> {
    let search = query
        .search
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut rows: Vec<TrackedApplication<'a>> = catalog
        .applications_by_user(user_id)
        .into_iter()
        .filter_map(|application| {
            let job = catalog.job_by_id(&application.job_id)?;
            Some(TrackedApplication { application, job })
        })
        .filter(|row| match &search {
            Some(term) => {
                row.job.title.to_lowercase().contains(term)
                    || row.job.company.to_lowercase().contains(term)
            }
            None => true,
        })
        .filter(|row| query.status.admits(&row.application.status))
        .collect();

    match query.sort {
        SortBy::Date => rows.sort_by(|a, b| b.application.applied_at.cmp(&a.application.applied_at)),
        SortBy::Company => rows.sort_by(|a, b| a.job.company.cmp(&b.job.company)),
        SortBy::Title => rows.sort_by(|a, b| a.job.title.cmp(&b.job.title)),
    }
    rows
}

/// Counts over all of the user's applications, ignoring any table filter.
pub fn status_stats(applications: &[&Application]) -> StatusStats {
    let count = |status: ApplicationStatus| applications.iter().filter(|a| a.status == status).count();
    StatusStats {
        total: applications.len(),
        applied: count(ApplicationStatus::Applied),
        interview: count(ApplicationStatus::Interview),
        offer: count(ApplicationStatus::Offer),
        rejected: count(ApplicationStatus::Rejected),
    }
}

pub fn dashboard_summary(catalog: &Catalog, user_id: &str, now: DateTime<Utc>) -> DashboardSummary {
    let stats = status_stats(&catalog.applications_by_user(user_id));
    let week_ago = now - Duration::days(7);
    DashboardSummary {
        total_applications: stats.total,
        interviews: stats.interview,
        offers: stats.offer,
        new_jobs: catalog.jobs.iter().filter(|j| j.posted_at > week_ago).count(),
    }
}
