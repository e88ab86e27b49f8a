//! Gap Analyzer: pluggable, trait-based matcher that classifies each job skill
//! as covered or missing by a resume.
//!
//! Default: `SubstringGapAnalyzer`. A job skill counts as covered when any resume
//! skill, lowercased, is a substring of it or contains it. The rule is loose on
//! purpose: "Java" covers "JavaScript" and "C" covers "C++".
//!
//! `AppState` holds an `Arc<dyn GapAnalyzer>`.

use serde::{Deserialize, Serialize};

use crate::models::{Job, Resume};

/// Recommendations of this length or shorter are dropped.
const MIN_RECOMMENDATION_LEN: usize = 20;

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapAnalysisResult {
    /// 0 – 100. `None` when the job lists no skills.
    pub match_percentage: Option<u8>,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub recommendations: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

pub trait GapAnalyzer: Send + Sync {
    fn analyze(&self, resume: &Resume, job: &Job) -> GapAnalysisResult;

    /// Label reported alongside results, for transparency.
    fn backend(&self) -> &'static str;
}

pub struct SubstringGapAnalyzer;

impl GapAnalyzer for SubstringGapAnalyzer {
    fn analyze(&self, resume: &Resume, job: &Job) -> GapAnalysisResult {
        analyze_gap(&resume.sections.skills, &job.skills)
    }

    fn backend(&self) -> &'static str {
        "substring"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core matching
// ────────────────────────────────────────────────────────────────────────────

/// Classifies every job skill into exactly one of matching / missing, keeping
/// the job's spelling and order.
pub fn analyze_gap(resume_skills: &[String], job_skills: &[String]) -> GapAnalysisResult {
    let resume_lower: Vec<String> = resume_skills.iter().map(|s| s.to_lowercase()).collect();

    let (matching_skills, missing_skills): (Vec<String>, Vec<String>) = job_skills
        .iter()
        .cloned()
        .partition(|skill| is_covered(&skill.to_lowercase(), &resume_lower));

    let match_percentage = if job_skills.is_empty() {
        None
    } else {
        let pct = (matching_skills.len() as f64 / job_skills.len() as f64) * 100.0;
        Some(pct.round() as u8)
    };

    let recommendations = build_recommendations(&matching_skills, &missing_skills);

    GapAnalysisResult {
        match_percentage,
        matching_skills,
        missing_skills,
        recommendations,
    }
}

fn is_covered(job_skill: &str, resume_lower: &[String]) -> bool {
    resume_lower
        .iter()
        .any(|r| r.contains(job_skill) || job_skill.contains(r.as_str()))
}

/// Fixed order: missing skills, courses, strongest match, quantification tip.
fn build_recommendations(matching: &[String], missing: &[String]) -> Vec<String> {
    let mut candidates = vec![
        format!("Add {} to your skills section", head(missing, 3).join(", ")),
        format!("Consider taking courses in {}", head(missing, 2).join(" and ")),
    ];
    if let Some(top) = matching.first() {
        candidates.push(format!(
            "Update your experience descriptions to highlight {top} projects"
        ));
    }
    candidates.push("Quantify your achievements with specific metrics and results".to_string());

    candidates
        .into_iter()
        .filter(|rec| rec.chars().count() > MIN_RECOMMENDATION_LEN)
        .collect()
}

fn head(items: &[String], n: usize) -> Vec<&str> {
    items.iter().take(n).map(String::as_str).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
