//! Static catalog: the seed users, jobs, applications, resources and demo resume
//! that every screen reads from. Loaded once at startup and never mutated.

pub mod seed;

use crate::models::{Application, Job, Resource, Resume, User};

#[derive(Debug, Clone)]
pub struct Catalog {
    pub users: Vec<User>,
    pub jobs: Vec<Job>,
    pub applications: Vec<Application>,
    pub resources: Vec<Resource>,
    /// Template every user's resume draft starts from.
    pub demo_resume: Resume,
}

impl Catalog {
    pub fn seeded() -> Self {
        Catalog {
            users: seed::users(),
            jobs: seed::jobs(),
            applications: seed::applications(),
            resources: seed::resources(),
            demo_resume: seed::demo_resume(),
        }
    }

    pub fn job_by_id(&self, id: &str) -> Option<&Job> {
        self.jobs.iter().find(|job| job.id == id)
    }

    pub fn applications_by_user(&self, user_id: &str) -> Vec<&Application> {
        self.applications
            .iter()
            .filter(|app| app.user_id == user_id)
            .collect()
    }

    pub fn applications_for_job(&self, job_id: &str) -> Vec<&Application> {
        self.applications
            .iter()
            .filter(|app| app.job_id == job_id)
            .collect()
    }
}
