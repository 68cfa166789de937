//! IELTS Practice Server Library
//!
//! Exports the core types and the API router for testing and reuse.

pub mod auth;
pub mod client;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod llm;
pub mod models;
pub mod routes;

pub use config::Config;
pub use db::{create_pool, run_migrations};
pub use error::{AppError, Result};
pub use llm::LlmClient;

use sqlx::SqlitePool;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    pub llm: LlmClient,
}

impl AppState {
    /// Create a new AppState with the given pool and configuration
    pub fn new(pool: SqlitePool, config: Config) -> anyhow::Result<Self> {
        let llm = LlmClient::new(&config)?;
        Ok(Self { pool, config, llm })
    }
}
