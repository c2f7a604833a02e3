//! Core session repository trait for CRUD operations.
//!
//! This trait defines the fundamental storage operations for daily
//! sessions and their hourly weight distributions.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::error::RepositoryResult;
use crate::api::SessionId;
use crate::db::models::{DailySession, HourlyWeight, WeightEntry};

/// Repository trait for session and weight storage operations.
///
/// Sessions are keyed by calendar date (at most one per date) and own
/// their weight rows. Specialized roster, metrics and template
/// operations live in separate traits.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    // ==================== Health & Connection ====================

    /// Check if the storage backend is healthy.
    ///
    /// # Returns
    /// - `Ok(true)` if the backend is healthy
    /// - `Ok(false)` if the backend is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if an error occurred during the check
    async fn health_check(&self) -> RepositoryResult<bool>;

    // ==================== Session Operations ====================

    /// Look up the session for a calendar date.
    ///
    /// # Returns
    /// * `Ok(Some(DailySession))` - The session configured for `date`
    /// * `Ok(None)` - If no session exists for that date
    async fn find_session_by_date(&self, date: NaiveDate)
        -> RepositoryResult<Option<DailySession>>;

    /// Retrieve a session by ID.
    ///
    /// # Returns
    /// * `Ok(DailySession)` - The session
    /// * `Err(RepositoryError::NotFound)` - If the session doesn't exist
    async fn get_session(&self, session_id: SessionId) -> RepositoryResult<DailySession>;

    /// Create a session for a date with the given goal and no hour range.
    ///
    /// # Returns
    /// * `Ok(DailySession)` - The stored session with its assigned ID
    /// * `Err(RepositoryError::ValidationError)` - If a session already
    ///   exists for that date
    async fn create_session(
        &self,
        date: NaiveDate,
        total_daily_goal: f64,
    ) -> RepositoryResult<DailySession>;

    /// Overwrite the total daily goal of a session.
    async fn update_session_goal(
        &self,
        session_id: SessionId,
        total_daily_goal: f64,
    ) -> RepositoryResult<()>;

    /// Overwrite the operating-hour range of a session.
    async fn update_session_hours(
        &self,
        session_id: SessionId,
        start_hour: i32,
        end_hour: i32,
    ) -> RepositoryResult<()>;

    /// List up to `limit` sessions dated strictly before `before`,
    /// most recent first.
    async fn list_sessions_before(
        &self,
        before: NaiveDate,
        limit: usize,
    ) -> RepositoryResult<Vec<DailySession>>;

    // ==================== Weight Operations ====================

    /// Fetch all weight rows of a session, ordered by hour.
    async fn fetch_hourly_weights(
        &self,
        session_id: SessionId,
    ) -> RepositoryResult<Vec<HourlyWeight>>;

    /// Insert or overwrite weight rows keyed by `(session_id, hour_start)`.
    ///
    /// Rows for hours not present in `entries` are left untouched.
    async fn upsert_hourly_weights(
        &self,
        session_id: SessionId,
        entries: &[WeightEntry],
    ) -> RepositoryResult<()>;

    /// Drop all weight rows of a session and store `entries` instead.
    ///
    /// Used when applying a template, where stale rows from a wider
    /// previous hour range must not survive.
    async fn replace_hourly_weights(
        &self,
        session_id: SessionId,
        entries: &[WeightEntry],
    ) -> RepositoryResult<()>;
}
