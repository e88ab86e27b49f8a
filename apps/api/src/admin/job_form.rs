//! Job posting form. Nothing here touches the catalog: saving only validates,
//! waits out the simulated round trip, and reports which kind of save happened.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::{ExperienceLevel, JobType};

pub const DEFAULT_COMPANY: &str = "SkillMatch+ Company";
pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields.";

/// Salary bounds as typed into the form; either side may be left blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryInput {
    #[serde(default)]
    pub min: Option<u32>,
    #[serde(default)]
    pub max: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobDraft {
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub remote: bool,
    pub department: String,
    pub experience: ExperienceLevel,
    pub salary: SalaryInput,
    pub description: String,
    pub requirements: Vec<String>,
    pub skills: Vec<String>,
    pub benefits: Vec<String>,
}

impl Default for JobDraft {
    fn default() -> Self {
        JobDraft {
            title: String::new(),
            company: DEFAULT_COMPANY.to_string(),
            location: String::new(),
            job_type: JobType::FullTime,
            remote: false,
            department: String::new(),
            experience: ExperienceLevel::Mid,
            salary: SalaryInput::default(),
            description: String::new(),
            requirements: vec![String::new()],
            skills: vec![String::new()],
            benefits: vec![String::new()],
        }
    }
}

/// The repeatable rows on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListField {
    Requirements,
    Skills,
    Benefits,
}

/// One row edit. Out-of-range indices are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RowEdit {
    Add { field: ListField },
    Update { field: ListField, index: usize, value: String },
    Remove { field: ListField, index: usize },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveMode {
    Draft,
    #[default]
    Publish,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveOutcome {
    pub title: &'static str,
    pub description: &'static str,
    pub mode: SaveMode,
    /// The form as it should look afterwards. Publishing resets it.
    pub form: JobDraft,
}

impl JobDraft {
    fn rows_mut(&mut self, field: ListField) -> &mut Vec<String> {
        match field {
            ListField::Requirements => &mut self.requirements,
            ListField::Skills => &mut self.skills,
            ListField::Benefits => &mut self.benefits,
        }
    }

    pub fn add_row(&mut self, field: ListField) {
        self.rows_mut(field).push(String::new());
    }

    pub fn update_row(&mut self, field: ListField, index: usize, value: impl Into<String>) {
        if let Some(row) = self.rows_mut(field).get_mut(index) {
            *row = value.into();
        }
    }

    pub fn remove_row(&mut self, field: ListField, index: usize) {
        let rows = self.rows_mut(field);
        if index < rows.len() {
            rows.remove(index);
        }
    }

    pub fn apply(&mut self, edit: RowEdit) {
        match edit {
            RowEdit::Add { field } => self.add_row(field),
            RowEdit::Update {
                field,
                index,
                value,
            } => self.update_row(field, index, value),
            RowEdit::Remove { field, index } => self.remove_row(field, index),
        }
    }

    /// Title, location and description must be non-empty.
    pub fn validate(&self) -> Result<(), &'static str> {
        let missing = [&self.title, &self.location, &self.description]
            .iter()
            .any(|field| field.is_empty());
        if missing {
            Err(REQUIRED_FIELDS_MESSAGE)
        } else {
            Ok(())
        }
    }
}

/// Validate, wait `delay`, then report the save. Validation failures return
/// immediately without waiting.
pub async fn save_job(
    draft: JobDraft,
    mode: SaveMode,
    delay: Duration,
) -> Result<SaveOutcome, &'static str> {
    draft.validate()?;

    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let outcome = match mode {
        SaveMode::Draft => SaveOutcome {
            title: "Draft Saved",
            description: "Your job draft has been saved.",
            mode,
            form: draft,
        },
        SaveMode::Publish => SaveOutcome {
            title: "Job Published",
            description: "Your job posting is now live!",
            mode,
            form: JobDraft::default(),
        },
    };
    Ok(outcome)
}
