use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Which login strategy backs the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthBackend {
    /// Seed user list, length-only password check.
    Mock,
    /// External auth/database service.
    Hosted { url: String, api_key: String },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub auth_backend: AuthBackend,
    /// JSON file standing in for browser local storage.
    pub storage_path: PathBuf,
    /// Artificial delay applied to mock logins and job saves.
    pub simulated_latency: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let auth_backend = match optional_env("AUTH_PROVIDER").as_deref() {
            None | Some("mock") => AuthBackend::Mock,
            Some("hosted") => AuthBackend::Hosted {
                url: require_env("HOSTED_AUTH_URL")?,
                api_key: require_env("HOSTED_AUTH_KEY")?,
            },
            Some(other) => bail!("AUTH_PROVIDER must be 'mock' or 'hosted', got '{other}'"),
        };

        let latency_ms = optional_env("SIMULATED_LATENCY_MS")
            .unwrap_or_else(|| "1000".to_string())
            .parse::<u64>()
            .context("SIMULATED_LATENCY_MS must be a whole number of milliseconds")?;

        Ok(Config {
            port: optional_env("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            auth_backend,
            storage_path: optional_env("STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".skillmatch/storage.json")),
            simulated_latency: Duration::from_millis(latency_ms),
        })
    }

    /// Configuration for tests: mock auth, no artificial delay.
    #[cfg(test)]
    pub fn for_tests(storage_path: PathBuf) -> Self {
        Config {
            port: 0,
            rust_log: "debug".to_string(),
            auth_backend: AuthBackend::Mock,
            storage_path,
            simulated_latency: Duration::ZERO,
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn require_env(key: &str) -> Result<String> {
    optional_env(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
