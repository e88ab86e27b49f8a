//! Skill vocabulary used when the caller pastes a free-text job description
//! instead of picking a catalog job.

use chrono::Utc;

use crate::models::{ExperienceLevel, Job, JobType};

const KNOWN_SKILLS: &[&str] = &[
    "React",
    "Vue",
    "Angular",
    "JavaScript",
    "TypeScript",
    "HTML",
    "CSS",
    "Node.js",
    "Python",
    "Java",
    "C++",
    "SQL",
    "MongoDB",
    "PostgreSQL",
    "AWS",
    "Azure",
    "GCP",
    "Docker",
    "Kubernetes",
    "Git",
    "Jenkins",
];

/// Known skills mentioned anywhere in `description`, in vocabulary order.
pub fn extract_skills_from_description(description: &str) -> Vec<String> {
    let haystack = description.to_lowercase();
    KNOWN_SKILLS
        .iter()
        .filter(|skill| haystack.contains(&skill.to_lowercase()))
        .map(|skill| skill.to_string())
        .collect()
}

/// Stand-in job built from a pasted description.
pub fn custom_job_from_description(description: &str) -> Job {
    Job {
        id: "custom".to_string(),
        title: "Custom Position".to_string(),
        company: "Target Company".to_string(),
        location: "Remote".to_string(),
        job_type: JobType::FullTime,
        remote: true,
        salary: None,
        skills: extract_skills_from_description(description),
        posted_at: Utc::now(),
        description: description.to_string(),
        requirements: vec![],
        experience: ExperienceLevel::Mid,
        department: "Engineering".to_string(),
    }
}

pub fn match_label(percentage: u8) -> &'static str {
    match percentage {
        p if p >= 80 => "Excellent Match",
        p if p >= 60 => "Good Match",
        p if p >= 40 => "Fair Match",
        _ => "Needs Improvement",
    }
}

/// The "apply" action is only offered at 60% and above.
pub fn can_apply(percentage: u8) -> bool {
    percentage >= 60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_in_vocabulary_order() {
        let skills = extract_skills_from_description(
            "We use docker and KUBERNETES, plus react on the frontend.",
        );
        assert_eq!(skills, vec!["React", "Docker", "Kubernetes"]);
    }

    #[test]
    fn test_extract_inherits_substring_looseness() {
        // "JavaScript" also contains "java".
        let skills = extract_skills_from_description("Strong JavaScript needed");
        assert_eq!(skills, vec!["JavaScript", "Java"]);
    }

    #[test]
    fn test_extract_from_empty_text() {
        assert!(extract_skills_from_description("").is_empty());
    }

    #[test]
    fn test_custom_job_shape() {
        let job = custom_job_from_description("Python and SQL");
        assert_eq!(job.id, "custom");
        assert_eq!(job.title, "Custom Position");
        assert!(job.remote);
        assert_eq!(job.skills, vec!["Python", "SQL"]);
    }

    #[test]
    fn test_match_label_bands() {
        assert_eq!(match_label(100), "Excellent Match");
        assert_eq!(match_label(80), "Excellent Match");
        assert_eq!(match_label(79), "Good Match");
        assert_eq!(match_label(60), "Good Match");
        assert_eq!(match_label(40), "Fair Match");
        assert_eq!(match_label(39), "Needs Improvement");
    }

    #[test]
    fn test_can_apply_threshold() {
        assert!(can_apply(60));
        assert!(!can_apply(59));
    }
}
