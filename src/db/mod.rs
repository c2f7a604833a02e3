//! Database module for goal-tracking data storage.
//!
//! This module provides abstractions for storage operations via the
//! Repository pattern, allowing different backends to be swapped easily.
//!
//! # Architecture
//!
//! The database module follows a layered architecture:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, CLI tooling, etc.)        │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs) - Business Logic           │
//! │  - Session bootstrap and history seeding                 │
//! │  - Write-boundary validation                             │
//! │  - Consistent error labelling                            │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - Abstract Interface   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴────────────────┐
//!     │                                │
//! ┌───▼──────────────┐     ┌──────────▼──────────────┐
//! │ File Repository  │     │ Local Repository        │
//! │ (JSON snapshot)  │     │ (in-memory)             │
//! └──────────────────┘     └─────────────────────────┘
//! ```
//!
//! # Repository Pattern
//! The module includes:
//! - `services`: High-level business logic functions (use these in your application!)
//! - `repository`: Trait definitions for storage operations
//! - `repositories::file`: JSON snapshot implementation for deployments
//! - `repositories::local`: In-memory implementation for unit testing and local development
//! - `factory`: Factory for creating repository instances
//!
//! # Recommended Usage
//!
//! **For new code, use the service layer:**
//! ```ignore
//! use metas_rust::db::{services, factory, RepositoryType};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = factory::RepositoryFactory::from_env().await?;
//!
//!     // Use service layer functions
//!     let date = chrono::NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
//!     let session = services::get_or_create_session(repo.as_ref(), date).await?;
//!     Ok(())
//! }
//! ```

// Feature flag priority: file > local
// When multiple features are enabled (e.g., --all-features), file takes precedence.
#[cfg(not(any(feature = "file-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod models;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;

// File config is colocated with the repository implementation.
#[cfg(feature = "file-repo")]
pub use repositories::file::FileConfig;
#[cfg(not(feature = "file-repo"))]
#[derive(Debug, Clone)]
pub struct FileConfig {
    _private: (),
}

// ==================== Service Layer (Recommended for new code) ====================
// Use these high-level functions that work with any repository implementation

pub use services::{
    apply_template, create_advisor, create_template, delete_advisor, delete_template,
    get_advisor_availability, get_advisor_context, get_advisors, get_hourly_weights,
    get_or_create_session, get_session_availability, get_store_metrics, health_check,
    list_templates, load_session_snapshot, save_session_as_template, save_store_metrics,
    update_advisor_sales, update_advisor_sales_by_token, update_availability,
    update_session_goal, update_session_hours, upsert_hourly_weights,
};

// ==================== Repository Pattern Exports ====================

pub use repo_config::RepositoryConfig;

// Repository traits and implementations
pub use factory::{RepositoryBuilder, RepositoryFactory, RepositoryType};
#[cfg(feature = "file-repo")]
pub use repositories::FileRepository;
pub use repositories::LocalRepository;
pub use repository::{
    AdvisorRepository, ErrorContext, FullRepository, MetricsRepository, RepositoryError,
    RepositoryResult, SessionRepository, TemplateRepository,
};

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

/// Global repository instance initialized once per process.
static REPOSITORY: OnceLock<Arc<dyn FullRepository>> = OnceLock::new();

// Priority: file > local (when --all-features is used)
#[cfg(feature = "file-repo")]
fn create_selected_repository() -> RepositoryResult<Arc<dyn FullRepository>> {
    let config = FileConfig::from_env()?;
    let repo = RepositoryFactory::create_file(&config)?;
    Ok(repo as Arc<dyn FullRepository>)
}

#[cfg(all(feature = "local-repo", not(feature = "file-repo")))]
fn create_selected_repository() -> RepositoryResult<Arc<dyn FullRepository>> {
    Ok(RepositoryFactory::create_local())
}

/// Initialize the global repository singleton for the selected backend.
pub fn init_repository() -> Result<()> {
    if REPOSITORY.get().is_some() {
        return Ok(());
    }

    let repo = create_selected_repository().map_err(|e| anyhow::Error::msg(e.to_string()))?;
    let _ = REPOSITORY.set(repo);
    Ok(())
}

/// Get a reference to the global repository instance.
pub fn get_repository() -> Result<&'static Arc<dyn FullRepository>> {
    if REPOSITORY.get().is_none() {
        let _ = init_repository();
    }

    REPOSITORY
        .get()
        .context("Database not initialized. Call init_repository() first.")
}
