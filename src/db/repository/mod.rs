//! Repository trait definitions for storage operations.
//!
//! This module provides a collection of focused repository traits that
//! abstract storage operations. By splitting responsibilities across
//! multiple traits, implementations can be more focused and testable.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`session`]: Sessions and hourly weight distributions
//! - [`advisor`]: Advisor roster and per-hour availability
//! - [`metrics`]: Store-level hourly figures
//! - [`template`]: Reusable session templates
//!
//! # Trait Composition
//!
//! A complete repository implementation typically implements all traits:
//!
//! ```ignore
//! impl SessionRepository for MyRepo { ... }
//! impl AdvisorRepository for MyRepo { ... }
//! impl MetricsRepository for MyRepo { ... }
//! impl TemplateRepository for MyRepo { ... }
//! ```
//!
//! # Convenience Trait Bound
//!
//! For functions that need all repository capabilities, use the
//! [`FullRepository`] trait bound:
//!
//! ```ignore
//! async fn my_service<R: FullRepository>(repo: &R) -> Result<()> {
//!     let session = repo.get_session(session_id).await?;
//!     let advisors = repo.list_advisors(session.id).await?;
//!     Ok(())
//! }
//! ```

pub mod advisor;
pub mod error;
pub mod metrics;
pub mod session;
pub mod template;

// Re-export error types
pub use error::{ErrorContext, RepositoryError, RepositoryResult};

// Re-export all traits
pub use advisor::AdvisorRepository;
pub use metrics::MetricsRepository;
pub use session::SessionRepository;
pub use template::TemplateRepository;

/// Composite trait bound for a complete repository implementation.
///
/// This trait is automatically implemented for any type that implements
/// all four repository traits. Use this as a convenient bound when you
/// need access to all repository operations.
///
/// # Example
///
/// ```ignore
/// async fn load_day<R: FullRepository>(
///     repo: &R,
///     session_id: SessionId,
/// ) -> RepositoryResult<()> {
///     let session = repo.get_session(session_id).await?;
///     let weights = repo.fetch_hourly_weights(session.id).await?;
///     Ok(())
/// }
/// ```
pub trait FullRepository:
    SessionRepository + AdvisorRepository + MetricsRepository + TemplateRepository
{
}

// Blanket implementation: any type implementing all four traits automatically implements FullRepository
impl<T> FullRepository for T where
    T: SessionRepository + AdvisorRepository + MetricsRepository + TemplateRepository
{
}
