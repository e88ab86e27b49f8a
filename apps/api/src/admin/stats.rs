//! Hiring statistics over the whole catalog. Percentages are rounded integers
//! and fall back to 0 when the denominator is empty.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::models::{Application, ApplicationStatus, Job};

const RECENT_JOBS: usize = 3;
const RECENT_APPLICATIONS: usize = 10;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobWithCount {
    #[serde(flatten)]
    pub job: Job,
    pub applications_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineCounts {
    pub applied: usize,
    pub interview: usize,
    pub offer: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverview {
    pub total_jobs: usize,
    pub total_applications: usize,
    pub interview_rate: u8,
    pub offer_rate: u8,
    pub recent_jobs: Vec<JobWithCount>,
    pub pipeline: PipelineCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResponseStats {
    pub total: usize,
    pub applied: usize,
    pub interview: usize,
    pub rejected: usize,
    pub offers: usize,
    pub withdrawn: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRates {
    pub application_to_interview: u8,
    pub interview_to_offer: u8,
    pub overall_conversion: u8,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPerformance {
    #[serde(flatten)]
    pub job: Job,
    pub applications: usize,
    pub interviews: usize,
    pub offers: usize,
    pub conversion_rate: u8,
    pub offer_rate: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentApplication {
    #[serde(flatten)]
    pub application: Application,
    pub job: Option<Job>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsesReport {
    pub stats: ResponseStats,
    pub conversion: ConversionRates,
    pub job_performance: Vec<JobPerformance>,
    pub recent_applications: Vec<RecentApplication>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobStats {
    pub total: usize,
    pub new: usize,
    pub interview: usize,
    pub offers: usize,
}

pub fn percent(numerator: usize, denominator: usize) -> u8 {
    if denominator == 0 {
        return 0;
    }
    ((numerator as f64 / denominator as f64) * 100.0).round() as u8
}

fn count(applications: &[&Application], status: ApplicationStatus) -> usize {
    applications.iter().filter(|a| a.status == status).count()
}

pub fn admin_overview(catalog: &Catalog) -> AdminOverview {
    let all: Vec<&Application> = catalog.applications.iter().collect();
    let total = all.len();

    let recent_jobs = catalog
        .jobs
        .iter()
        .take(RECENT_JOBS)
        .map(|job| JobWithCount {
            applications_count: catalog.applications_for_job(&job.id).len(),
            job: job.clone(),
        })
        .collect();

    AdminOverview {
        total_jobs: catalog.jobs.len(),
        total_applications: total,
        interview_rate: percent(count(&all, ApplicationStatus::Interview), total),
        offer_rate: percent(count(&all, ApplicationStatus::Offer), total),
        recent_jobs,
        pipeline: PipelineCounts {
            applied: count(&all, ApplicationStatus::Applied),
            interview: count(&all, ApplicationStatus::Interview),
            offer: count(&all, ApplicationStatus::Offer),
        },
    }
}

/// Funnel for one job (`Some(job_id)`) or for every job (`None`).
pub fn responses_report(catalog: &Catalog, job_id: Option<&str>) -> ResponsesReport {
    let selected: Vec<&Application> = match job_id {
        Some(id) => catalog.applications_for_job(id),
        None => catalog.applications.iter().collect(),
    };

    let stats = ResponseStats {
        total: selected.len(),
        applied: count(&selected, ApplicationStatus::Applied),
        interview: count(&selected, ApplicationStatus::Interview),
        rejected: count(&selected, ApplicationStatus::Rejected),
        offers: count(&selected, ApplicationStatus::Offer),
        withdrawn: count(&selected, ApplicationStatus::Withdrawn),
    };

    let conversion = ConversionRates {
        application_to_interview: percent(stats.interview, stats.total),
        interview_to_offer: percent(stats.offers, stats.interview),
        overall_conversion: percent(stats.offers, stats.total),
    };

    let mut job_performance: Vec<JobPerformance> = catalog
        .jobs
        .iter()
        .map(|job| {
            let apps = catalog.applications_for_job(&job.id);
            let interviews = count(&apps, ApplicationStatus::Interview);
            let offers = count(&apps, ApplicationStatus::Offer);
            JobPerformance {
                job: job.clone(),
                applications: apps.len(),
                interviews,
                offers,
                conversion_rate: percent(interviews, apps.len()),
                offer_rate: percent(offers, interviews),
            }
        })
        .collect();
    job_performance.sort_by(|a, b| b.applications.cmp(&a.applications));

    let mut recent = selected;
    recent.sort_by(|a, b| b.applied_at.cmp(&a.applied_at));
    let recent_applications = recent
        .into_iter()
        .take(RECENT_APPLICATIONS)
        .map(|app| RecentApplication {
            application: app.clone(),
            job: catalog.job_by_id(&app.job_id).cloned(),
        })
        .collect();

    ResponsesReport {
        stats,
        conversion,
        job_performance,
        recent_applications,
    }
}

pub fn job_stats(catalog: &Catalog, job_id: &str) -> JobStats {
    let apps = catalog.applications_for_job(job_id);
    JobStats {
        total: apps.len(),
        new: count(&apps, ApplicationStatus::Applied),
        interview: count(&apps, ApplicationStatus::Interview),
        offers: count(&apps, ApplicationStatus::Offer),
    }
}
