//! Seed records for the demo portal.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::resume::{
    CertificationEntry, EducationEntry, ExperienceEntry, ProjectEntry, ResumeHeader,
    ResumeSections,
};
use crate::models::{
    Application, ApplicationStatus, ExperienceLevel, Job, JobType, Resource, ResourceCategory,
    ResourceLevel, Resume, Role, SalaryRange, User,
};

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .map(|n| n.and_utc())
        .unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn users() -> Vec<User> {
    vec![
        User {
            id: "user-1".to_string(),
            name: "Alex Chen".to_string(),
            email: "alex.chen@email.com".to_string(),
            role: Role::User,
            created_at: at(2024, 1, 15, 10, 0),
        },
        User {
            id: "admin-1".to_string(),
            name: "Sarah Johnson".to_string(),
            email: "sarah.johnson@skillmatch.com".to_string(),
            role: Role::Admin,
            created_at: at(2024, 1, 1, 9, 0),
        },
    ]
}

pub fn jobs() -> Vec<Job> {
    vec![
        Job {
            id: "job-1".to_string(),
            title: "Frontend Engineer".to_string(),
            company: "Nova Labs".to_string(),
            location: "San Francisco, CA".to_string(),
            job_type: JobType::FullTime,
            remote: true,
            salary: Some(SalaryRange { min: 120_000, max: 160_000 }),
            skills: strings(&["React", "TypeScript", "Next.js", "Tailwind CSS", "GraphQL"]),
            posted_at: at(2025, 8, 15, 10, 0),
            description: "Join our team to build cutting-edge user interfaces for our AI-powered platform. You will work with modern web technologies and contribute to products used by millions of users.".to_string(),
            requirements: strings(&[
                "3+ years of React development experience",
                "Strong TypeScript skills",
                "Experience with modern CSS frameworks",
                "Knowledge of state management (Redux, Zustand, etc.)",
                "Familiarity with testing frameworks (Jest, Cypress)",
            ]),
            experience: ExperienceLevel::Mid,
            department: "Engineering".to_string(),
        },
        Job {
            id: "job-2".to_string(),
            title: "Backend Engineer".to_string(),
            company: "Orbit Inc.".to_string(),
            location: "Austin, TX".to_string(),
            job_type: JobType::FullTime,
            remote: false,
            salary: Some(SalaryRange { min: 130_000, max: 180_000 }),
            skills: strings(&["Node.js", "Python", "PostgreSQL", "AWS", "Docker"]),
            posted_at: at(2025, 8, 10, 14, 30),
            description: "Build scalable backend systems and APIs that power our distributed platform. Work with microservices, cloud infrastructure, and help shape our technical architecture.".to_string(),
            requirements: strings(&[
                "4+ years of backend development experience",
                "Proficiency in Node.js or Python",
                "Experience with relational databases",
                "Knowledge of cloud platforms (AWS, GCP, or Azure)",
                "Understanding of microservices architecture",
            ]),
            experience: ExperienceLevel::Mid,
            department: "Engineering".to_string(),
        },
        Job {
            id: "job-3".to_string(),
            title: "Data Analyst".to_string(),
            company: "InsightIO".to_string(),
            location: "Remote".to_string(),
            job_type: JobType::FullTime,
            remote: true,
            salary: Some(SalaryRange { min: 85_000, max: 115_000 }),
            skills: strings(&["SQL", "Python", "Tableau", "Excel", "Statistics"]),
            posted_at: at(2025, 8, 5, 9, 15),
            description: "Analyze complex datasets to drive business insights and support strategic decision-making. Work with cross-functional teams to identify trends and opportunities.".to_string(),
            requirements: strings(&[
                "2+ years of data analysis experience",
                "Advanced SQL skills",
                "Proficiency in Python or R",
                "Experience with data visualization tools",
                "Strong statistical analysis background",
            ]),
            experience: ExperienceLevel::Entry,
            department: "Analytics".to_string(),
        },
        Job {
            id: "job-4".to_string(),
            title: "Fullstack Developer".to_string(),
            company: "Crafted".to_string(),
            location: "New York, NY".to_string(),
            job_type: JobType::FullTime,
            remote: true,
            salary: Some(SalaryRange { min: 110_000, max: 150_000 }),
            skills: strings(&["React", "Node.js", "MongoDB", "JavaScript", "REST APIs"]),
            posted_at: at(2025, 7, 28, 11, 45),
            description: "Join our agile team to build end-to-end web applications. You will work on both frontend and backend development, contributing to our creative project management platform.".to_string(),
            requirements: strings(&[
                "3+ years of fullstack development experience",
                "Proficiency in modern JavaScript frameworks",
                "Experience with both SQL and NoSQL databases",
                "Knowledge of RESTful API design",
                "Familiarity with version control (Git)",
            ]),
            experience: ExperienceLevel::Mid,
            department: "Product".to_string(),
        },
        Job {
            id: "job-5".to_string(),
            title: "DevOps Engineer".to_string(),
            company: "CloudNest".to_string(),
            location: "Seattle, WA".to_string(),
            job_type: JobType::FullTime,
            remote: true,
            salary: Some(SalaryRange { min: 140_000, max: 175_000 }),
            skills: strings(&["AWS", "Docker", "Kubernetes", "Terraform", "CI/CD"]),
            posted_at: at(2025, 8, 20, 8, 0),
            description: "Design, implement, and manage our cloud infrastructure and CI/CD pipelines. Ensure high availability, scalability, and security of our services.".to_string(),
            requirements: strings(&[
                "5+ years of DevOps experience",
                "Strong expertise in AWS",
                "Hands-on experience with Docker and Kubernetes",
                "Proficiency in infrastructure as code (Terraform, CloudFormation)",
                "Experience with CI/CD tools (Jenkins, GitLab CI, GitHub Actions)",
            ]),
            experience: ExperienceLevel::Senior,
            department: "Infrastructure".to_string(),
        },
    ]
}

fn application(
    id: &str,
    job_id: &str,
    applied_at: DateTime<Utc>,
    status: ApplicationStatus,
    notes: &str,
) -> Application {
    Application {
        id: id.to_string(),
        job_id: job_id.to_string(),
        user_id: "user-1".to_string(),
        applied_at,
        status,
        notes: Some(notes.to_string()),
        resume_version_id: None,
    }
}

pub fn applications() -> Vec<Application> {
    vec![
        application(
            "app-1",
            "job-1",
            at(2025, 8, 10, 10, 0),
            ApplicationStatus::Interview,
            "Technical interview scheduled for next week",
        ),
        application(
            "app-2",
            "job-2",
            at(2025, 8, 2, 15, 30),
            ApplicationStatus::Applied,
            "Waiting for initial response",
        ),
        application(
            "app-3",
            "job-3",
            at(2025, 7, 28, 9, 15),
            ApplicationStatus::Rejected,
            "Not enough experience with statistical modeling",
        ),
        application(
            "app-4",
            "job-4",
            at(2025, 7, 20, 14, 20),
            ApplicationStatus::Offer,
            "Received offer - considering terms",
        ),
        application(
            "app-5",
            "job-5",
            at(2025, 8, 22, 11, 0),
            ApplicationStatus::Applied,
            "Followed up with recruiter after application.",
        ),
    ]
}

fn resource(
    id: &str,
    title: &str,
    description: &str,
    category: ResourceCategory,
    level: ResourceLevel,
    estimated_time: &str,
    tags: &[&str],
) -> Resource {
    Resource {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category,
        level,
        estimated_time: estimated_time.to_string(),
        tags: strings(tags),
        url: None,
        content: None,
    }
}

pub fn resources() -> Vec<Resource> {
    vec![
        resource(
            "res-1",
            "ATS-Friendly Resume Guide",
            "Learn how to optimize your resume for Applicant Tracking Systems with proven formatting tips and keyword strategies.",
            ResourceCategory::Resume,
            ResourceLevel::Beginner,
            "30 minutes",
            &["ATS", "Resume Format", "Keywords"],
        ),
        resource(
            "res-2",
            "Technical Interview Preparation",
            "Comprehensive guide covering coding challenges, system design, and behavioral questions for tech interviews.",
            ResourceCategory::Interview,
            ResourceLevel::Intermediate,
            "2 hours",
            &["Coding", "System Design", "Behavioral"],
        ),
        resource(
            "res-3",
            "Building a Portfolio Website",
            "Step-by-step tutorial for creating a professional portfolio that showcases your projects and skills effectively.",
            ResourceCategory::Portfolio,
            ResourceLevel::Intermediate,
            "4 hours",
            &["Portfolio", "Web Development", "Projects"],
        ),
        resource(
            "res-4",
            "React Advanced Patterns",
            "Master advanced React concepts including custom hooks, context patterns, and performance optimization techniques.",
            ResourceCategory::Frontend,
            ResourceLevel::Advanced,
            "3 hours",
            &["React", "Hooks", "Performance"],
        ),
        resource(
            "res-5",
            "Data Science Career Roadmap",
            "Complete guide to building a career in data science, from learning paths to landing your first job.",
            ResourceCategory::Career,
            ResourceLevel::Beginner,
            "45 minutes",
            &["Data Science", "Career Path", "Skills"],
        ),
    ]
}

pub fn demo_resume() -> Resume {
    Resume {
        id: "resume-1".to_string(),
        user_id: "user-1".to_string(),
        name: "Alex Chen Resume".to_string(),
        sections: ResumeSections {
            header: ResumeHeader {
                name: "Alex Chen".to_string(),
                email: "alex.chen@email.com".to_string(),
                phone: "(555) 123-4567".to_string(),
                location: "San Francisco, CA".to_string(),
                linkedin: Some("linkedin.com/in/alexchen".to_string()),
                portfolio: Some("alexchen.dev".to_string()),
            },
            summary: "Experienced frontend developer with 4+ years building scalable web applications using React, TypeScript, and modern web technologies. Passionate about creating exceptional user experiences and writing clean, maintainable code.".to_string(),
            experience: vec![
                ExperienceEntry {
                    id: "1".to_string(),
                    title: "Senior Frontend Developer".to_string(),
                    company: "TechCorp Inc.".to_string(),
                    location: "San Francisco, CA".to_string(),
                    start_date: "2022-03".to_string(),
                    end_date: None,
                    current: true,
                    description: "• Led development of user-facing features for 50K+ daily active users\n• Improved application performance by 40% through code optimization and lazy loading\n• Mentored 3 junior developers and established frontend best practices".to_string(),
                },
                ExperienceEntry {
                    id: "2".to_string(),
                    title: "Frontend Developer".to_string(),
                    company: "StartupXYZ".to_string(),
                    location: "Remote".to_string(),
                    start_date: "2020-06".to_string(),
                    end_date: Some("2022-02".to_string()),
                    current: false,
                    description: "• Built responsive web applications using React, Redux, and TypeScript\n• Collaborated with design team to implement pixel-perfect UI components\n• Reduced bundle size by 30% through webpack optimization".to_string(),
                },
            ],
            education: vec![EducationEntry {
                id: "1".to_string(),
                degree: "Bachelor of Science in Computer Science".to_string(),
                school: "Stanford University".to_string(),
                location: "Stanford, CA".to_string(),
                graduation_date: "2020-05".to_string(),
                gpa: Some("3.8".to_string()),
            }],
            skills: strings(&[
                "React",
                "TypeScript",
                "JavaScript",
                "Node.js",
                "Python",
                "AWS",
                "Docker",
                "Git",
            ]),
            projects: vec![ProjectEntry {
                id: "1".to_string(),
                name: "E-commerce Platform".to_string(),
                description: "Full-stack e-commerce solution with React frontend and Node.js backend".to_string(),
                technologies: strings(&["React", "Node.js", "MongoDB", "Stripe"]),
                url: Some("github.com/alexchen/ecommerce".to_string()),
            }],
            certifications: vec![CertificationEntry {
                id: "1".to_string(),
                name: "AWS Certified Developer Associate".to_string(),
                issuer: "Amazon Web Services".to_string(),
                date: "2023-08".to_string(),
                url: Some("aws.amazon.com/certification".to_string()),
            }],
        },
        created_at: at(2024, 1, 1, 0, 0),
        updated_at: at(2024, 1, 1, 0, 0),
    }
}
