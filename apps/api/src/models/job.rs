use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Internship,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
    Lead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: u32,
    pub max: u32,
}

impl SalaryRange {
    /// Display form used on job cards, e.g. `$120K - $160K`.
    pub fn display(&self) -> String {
        format!(
            "${}K - ${}K",
            (self.min as f64 / 1000.0).round(),
            (self.max as f64 / 1000.0).round()
        )
    }
}

/// A job posting. Seed data only; never created or edited at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub remote: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<SalaryRange>,
    pub skills: Vec<String>,
    pub posted_at: DateTime<Utc>,
    pub description: String,
    pub requirements: Vec<String>,
    pub experience: ExperienceLevel,
    pub department: String,
}

/// Relative age label: `{h}h ago` under a day, `{d}d ago` otherwise.
pub fn time_ago(posted_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let hours = (now - posted_at).num_hours();
    if hours < 24 {
        format!("{hours}h ago")
    } else {
        format!("{}d ago", hours / 24)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_salary_display() {
        let salary = SalaryRange {
            min: 120_000,
            max: 160_000,
        };
        assert_eq!(salary.display(), "$120K - $160K");
    }

    #[test]
    fn test_time_ago_hours_and_days() {
        let now = Utc.with_ymd_and_hms(2025, 8, 22, 12, 0, 0).unwrap();
        assert_eq!(time_ago(now - Duration::hours(5), now), "5h ago");
        assert_eq!(time_ago(now - Duration::hours(49), now), "2d ago");
    }

    #[test]
    fn test_job_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&JobType::FullTime).unwrap(),
            r#""Full-time""#
        );
        let parsed: JobType = serde_json::from_str(r#""Part-time""#).unwrap();
        assert_eq!(parsed, JobType::PartTime);
    }
}
