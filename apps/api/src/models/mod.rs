pub mod application;
pub mod job;
pub mod resource;
pub mod resume;
pub mod user;

pub use application::{Application, ApplicationStatus};
pub use job::{ExperienceLevel, Job, JobType, SalaryRange};
pub use resource::{Resource, ResourceCategory, ResourceLevel};
pub use resume::Resume;
pub use user::{Profile, Role, User};
