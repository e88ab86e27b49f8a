// Resume drafts: per-user documents, typed edits, and PDF export layout.

pub mod editor;
pub mod export;
pub mod handlers;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::Resume;
use editor::{apply_edits, ResumeEdit};

/// In-memory resume drafts keyed by user id. Lost on restart.
#[derive(Clone, Default)]
pub struct ResumeDrafts {
    drafts: Arc<RwLock<HashMap<String, Resume>>>,
}

impl ResumeDrafts {
    pub fn new() -> Self {
        Self::default()
    }

    fn seed(user_id: &str, template: &Resume) -> Resume {
        let mut resume = template.clone();
        resume.id = format!("resume-{user_id}");
        resume.user_id = user_id.to_string();
        resume
    }

    /// The user's draft, or a copy of `template` if they have not edited one yet.
    pub async fn get(&self, user_id: &str, template: &Resume) -> Resume {
        if let Some(resume) = self.drafts.read().await.get(user_id) {
            return resume.clone();
        }
        Self::seed(user_id, template)
    }

    /// Applies `edits` to the user's draft and returns the result.
    pub async fn edit(&self, user_id: &str, template: &Resume, edits: Vec<ResumeEdit>) -> Resume {
        let mut drafts = self.drafts.write().await;
        let resume = drafts
            .entry(user_id.to_string())
            .or_insert_with(|| Self::seed(user_id, template));
        apply_edits(resume, edits, Utc::now());
        resume.clone()
    }
}
