//! Typed edits to a resume document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::resume::{
    CertificationEntry, EducationEntry, ExperienceEntry, ProjectEntry, ResumeHeader,
};
use crate::models::Resume;

/// Header fields to overwrite; absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
}

impl HeaderPatch {
    fn apply_to(self, header: &mut ResumeHeader) {
        if let Some(name) = self.name {
            header.name = name;
        }
        if let Some(email) = self.email {
            header.email = email;
        }
        if let Some(phone) = self.phone {
            header.phone = phone;
        }
        if let Some(location) = self.location {
            header.location = location;
        }
        if let Some(linkedin) = self.linkedin {
            header.linkedin = Some(linkedin).filter(|v| !v.is_empty());
        }
        if let Some(portfolio) = self.portfolio {
            header.portfolio = Some(portfolio).filter(|v| !v.is_empty());
        }
    }
}

/// One edit. `add_*` ignores any id in the payload and assigns a fresh one;
/// `update_*` replaces the entry whose id matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ResumeEdit {
    Header(HeaderPatch),
    Summary { text: String },
    AddExperience { entry: ExperienceEntry },
    UpdateExperience { entry: ExperienceEntry },
    RemoveExperience { id: String },
    AddEducation { entry: EducationEntry },
    UpdateEducation { entry: EducationEntry },
    RemoveEducation { id: String },
    AddProject { entry: ProjectEntry },
    UpdateProject { entry: ProjectEntry },
    RemoveProject { id: String },
    AddCertification { entry: CertificationEntry },
    UpdateCertification { entry: CertificationEntry },
    RemoveCertification { id: String },
    AddSkill { skill: String },
    RemoveSkill { index: usize },
}

/// Entries in a resume list section, addressed by id.
trait SectionItem {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

macro_rules! section_item {
    ($($ty:ty),*) => {
        $(impl SectionItem for $ty {
            fn id(&self) -> &str {
                &self.id
            }
            fn set_id(&mut self, id: String) {
                self.id = id;
            }
        })*
    };
}

section_item!(ExperienceEntry, EducationEntry, ProjectEntry, CertificationEntry);

fn add_item<T: SectionItem>(items: &mut Vec<T>, mut item: T) {
    item.set_id(Uuid::new_v4().to_string());
    items.push(item);
}

fn update_item<T: SectionItem>(items: &mut [T], item: T) {
    if let Some(slot) = items.iter_mut().find(|existing| existing.id() == item.id()) {
        *slot = item;
    }
}

fn remove_item<T: SectionItem>(items: &mut Vec<T>, id: &str) {
    items.retain(|item| item.id() != id);
}

pub fn apply_edit(resume: &mut Resume, edit: ResumeEdit) {
    let sections = &mut resume.sections;
    match edit {
        ResumeEdit::Header(patch) => patch.apply_to(&mut sections.header),
        ResumeEdit::Summary { text } => sections.summary = text,
        ResumeEdit::AddExperience { entry } => add_item(&mut sections.experience, entry),
        ResumeEdit::UpdateExperience { entry } => update_item(&mut sections.experience, entry),
        ResumeEdit::RemoveExperience { id } => remove_item(&mut sections.experience, &id),
        ResumeEdit::AddEducation { entry } => add_item(&mut sections.education, entry),
        ResumeEdit::UpdateEducation { entry } => update_item(&mut sections.education, entry),
        ResumeEdit::RemoveEducation { id } => remove_item(&mut sections.education, &id),
        ResumeEdit::AddProject { entry } => add_item(&mut sections.projects, entry),
        ResumeEdit::UpdateProject { entry } => update_item(&mut sections.projects, entry),
        ResumeEdit::RemoveProject { id } => remove_item(&mut sections.projects, &id),
        ResumeEdit::AddCertification { entry } => add_item(&mut sections.certifications, entry),
        ResumeEdit::UpdateCertification { entry } => {
            update_item(&mut sections.certifications, entry)
        }
        ResumeEdit::RemoveCertification { id } => remove_item(&mut sections.certifications, &id),
        ResumeEdit::AddSkill { skill } => {
            let skill = skill.trim();
            if !skill.is_empty() {
                sections.skills.push(skill.to_string());
            }
        }
        ResumeEdit::RemoveSkill { index } => {
            if index < sections.skills.len() {
                sections.skills.remove(index);
            }
        }
    }
}

/// Applies `edits` in order and stamps `updated_at` when there was at least one.
pub fn apply_edits(resume: &mut Resume, edits: Vec<ResumeEdit>, now: DateTime<Utc>) {
    if edits.is_empty() {
        return;
    }
    for edit in edits {
        apply_edit(resume, edit);
    }
    resume.updated_at = now;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed::demo_resume;

    #[test]
    fn test_header_patch_touches_only_given_fields() {
        let mut resume = demo_resume();
        apply_edit(
            &mut resume,
            ResumeEdit::Header(HeaderPatch {
                phone: Some("(555) 000-0000".to_string()),
                portfolio: Some(String::new()),
                ..HeaderPatch::default()
            }),
        );
        let header = &resume.sections.header;
        assert_eq!(header.phone, "(555) 000-0000");
        assert_eq!(header.name, "Alex Chen");
        assert_eq!(header.portfolio, None);
    }

    #[test]
    fn test_add_experience_assigns_fresh_id() {
        let mut resume = demo_resume();
        let edit: ResumeEdit = serde_json::from_str(
            r#"{"op":"add_experience","entry":{"id":"1","title":"Intern","company":"Acme"}}"#,
        )
        .unwrap();
        apply_edit(&mut resume, edit);

        let added = resume.sections.experience.last().unwrap();
        assert_eq!(added.title, "Intern");
        assert_ne!(added.id, "1");
        assert_eq!(resume.sections.experience.len(), 3);
    }

    #[test]
    fn test_update_replaces_matching_entry() {
        let mut resume = demo_resume();
        let mut entry = resume.sections.education[0].clone();
        entry.gpa = Some("3.9".to_string());
        apply_edit(&mut resume, ResumeEdit::UpdateEducation { entry });
        assert_eq!(resume.sections.education[0].gpa.as_deref(), Some("3.9"));
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let mut resume = demo_resume();
        let before = resume.clone();
        apply_edit(
            &mut resume,
            ResumeEdit::RemoveProject {
                id: "nope".to_string(),
            },
        );
        apply_edit(
            &mut resume,
            ResumeEdit::UpdateCertification {
                entry: CertificationEntry {
                    id: "nope".to_string(),
                    ..CertificationEntry::default()
                },
            },
        );
        assert_eq!(resume, before);
    }

    #[test]
    fn test_remove_experience_by_id() {
        let mut resume = demo_resume();
        apply_edit(
            &mut resume,
            ResumeEdit::RemoveExperience {
                id: "1".to_string(),
            },
        );
        assert_eq!(resume.sections.experience.len(), 1);
        assert_eq!(resume.sections.experience[0].company, "StartupXYZ");
    }

    #[test]
    fn test_skills_are_trimmed_and_blanks_skipped() {
        let mut resume = demo_resume();
        apply_edit(
            &mut resume,
            ResumeEdit::AddSkill {
                skill: "  Kubernetes ".to_string(),
            },
        );
        apply_edit(
            &mut resume,
            ResumeEdit::AddSkill {
                skill: "   ".to_string(),
            },
        );
        apply_edit(&mut resume, ResumeEdit::RemoveSkill { index: 0 });
        apply_edit(&mut resume, ResumeEdit::RemoveSkill { index: 99 });

        let skills = &resume.sections.skills;
        assert_eq!(skills.len(), 8);
        assert_eq!(skills.first().map(String::as_str), Some("TypeScript"));
        assert_eq!(skills.last().map(String::as_str), Some("Kubernetes"));
    }

    #[test]
    fn test_apply_edits_bumps_updated_at() {
        let mut resume = demo_resume();
        let original = resume.updated_at;
        let now = Utc::now();

        apply_edits(&mut resume, Vec::new(), now);
        assert_eq!(resume.updated_at, original);

        apply_edits(
            &mut resume,
            vec![ResumeEdit::Summary {
                text: "Rust engineer.".to_string(),
            }],
            now,
        );
        assert_eq!(resume.updated_at, now);
        assert_eq!(resume.sections.summary, "Rust engineer.");
    }
}
