//! Job filter: conjunctive narrowing of the catalog job list.
//!
//! Textual checks are case-insensitive substring tests; enum checks are exact.
//! Results keep catalog order: no ranking, no pagination.

use serde::Deserialize;

use crate::models::{ExperienceLevel, Job, JobType};
use crate::query::{optional_flag, Pick};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobFilter {
    /// Matches title, company, or any listed skill.
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, rename = "type")]
    pub job_type: Pick<JobType>,
    #[serde(default, deserialize_with = "optional_flag")]
    pub remote: Option<bool>,
    #[serde(default)]
    pub experience: Pick<ExperienceLevel>,
}

impl JobFilter {
    pub fn matches(&self, job: &Job) -> bool {
        if let Some(query) = non_empty_lower(&self.query) {
            let hit = job.title.to_lowercase().contains(&query)
                || job.company.to_lowercase().contains(&query)
                || job.skills.iter().any(|s| s.to_lowercase().contains(&query));
            if !hit {
                return false;
            }
        }
        if let Some(location) = non_empty_lower(&self.location) {
            if !job.location.to_lowercase().contains(&location) {
                return false;
            }
        }
        if !self.job_type.admits(&job.job_type) {
            return false;
        }
        if self.remote.is_some_and(|r| r != job.remote) {
            return false;
        }
        if !self.experience.admits(&job.experience) {
            return false;
        }
        true
    }
}

/// Blank strings count as "no filter".
fn non_empty_lower(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

pub fn filter_jobs<'a>(jobs: &'a [Job], filter: &JobFilter) -> Vec<&'a Job> {
    jobs.iter().filter(|job| filter.matches(job)).collect()
}
