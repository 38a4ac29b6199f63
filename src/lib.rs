//! Shelf Library Lending Server
//!
//! A small REST JSON API for a library catalog, a student roster
//! and the borrow/return workflow between them, persisted to JSON files.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Load library state from `storage` and wire up the services
    pub async fn build(
        config: AppConfig,
        storage: Arc<dyn repository::storage::Storage>,
    ) -> AppResult<Self> {
        let repository = repository::Repository::open(storage).await?;
        let services = services::Services::new(repository, &config.lending);

        Ok(Self {
            config: Arc::new(config),
            services: Arc::new(services),
        })
    }
}
