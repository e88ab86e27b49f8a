// Employer views: hiring overview, response funnel, job posting form.

pub mod handlers;
pub mod job_form;
pub mod stats;
