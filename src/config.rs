//! Configuration management for Shelf server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served for paths no API route matches (front-end assets)
    pub static_dir: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub books_path: String,
    pub students_path: String,
}

/// Lending policy
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LendingConfig {
    /// Days added to the borrow time to compute the due date
    pub loan_period_days: i64,
    /// Maximum simultaneous active borrows per student (0 = unlimited)
    pub max_active_borrows: usize,
    /// Create an empty student record on first borrow instead of rejecting
    pub auto_register_students: bool,
    /// Answer `GET /student/:id` for an unknown id with `[]` instead of 404
    pub lenient_student_lookup: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub lending: LendingConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Base configuration file, optional since every key has a default
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (e.g. SHELF__SERVER__PORT)
            .add_source(
                Environment::with_prefix("SHELF")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option(
                "server.port",
                env::var("PORT").ok().and_then(|p| p.parse::<i64>().ok()),
            )?
            .set_override_option("storage.books_path", env::var("BOOKS_PATH").ok())?
            .set_override_option("storage.students_path", env::var("STUDENTS_PATH").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            static_dir: None,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            books_path: "data/books.json".to_string(),
            students_path: "data/students.json".to_string(),
        }
    }
}

impl Default for LendingConfig {
    fn default() -> Self {
        Self {
            loan_period_days: 14,
            max_active_borrows: 5,
            auto_register_students: false,
            lenient_student_lookup: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
