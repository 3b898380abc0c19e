//! Shelfnotes Personal Book Tracking
//!
//! A Rust implementation of the Shelfnotes book tracking server,
//! providing session-authenticated per-user book lists with best-effort
//! Open Library identifier enrichment.

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
