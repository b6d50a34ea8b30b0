use std::env;

use applitrack_core::{AppError, ValidationErrors};

/// Side-mode the binary was started in, from the first CLI argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Serve the HTTP API (default).
    Serve,
    /// Apply database migrations and exit.
    Migrate,
    /// Apply migrations, ensure the seed admin account, and exit.
    Seed,
}

/// Runtime configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub run_mode: RunMode,
    pub database_url: String,
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
}

impl ApiConfig {
    /// Loads configuration from CLI arguments and environment variables.
    pub fn load() -> Result<Self, AppError> {
        let run_mode = match env::args().nth(1).as_deref() {
            Some("migrate") => RunMode::Migrate,
            Some("seed") => RunMode::Seed,
            _ => RunMode::Serve,
        };

        let database_url = required_env("DATABASE_URL")?;
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        Ok(Self {
            run_mode,
            database_url,
            frontend_url,
            api_host,
            api_port,
        })
    }
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            AppError::Validation(ValidationErrors::single(name, format!("{name} is required")))
        })
}
