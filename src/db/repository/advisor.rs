//! Advisor roster and availability repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{AccessToken, AdvisorId, SessionId};
use crate::db::models::{Advisor, AdvisorAvailability};

/// Repository trait for advisor roster and per-hour availability.
///
/// Availability rows are sparse overrides keyed by
/// `(advisor_id, hour_start)`; hours without a row count as active.
#[async_trait]
pub trait AdvisorRepository: Send + Sync {
    // ==================== Roster Operations ====================

    /// List all advisors of a session in creation order.
    async fn list_advisors(&self, session_id: SessionId) -> RepositoryResult<Vec<Advisor>>;

    /// Retrieve an advisor by ID.
    ///
    /// # Returns
    /// * `Ok(Advisor)` - The advisor
    /// * `Err(RepositoryError::NotFound)` - If the advisor doesn't exist
    async fn get_advisor(&self, advisor_id: AdvisorId) -> RepositoryResult<Advisor>;

    /// Add an advisor to a session's roster with zeroed sales counters.
    ///
    /// Name uniqueness within the session is enforced by the service
    /// layer, not here.
    async fn create_advisor(
        &self,
        session_id: SessionId,
        name: &str,
        access_token: AccessToken,
    ) -> RepositoryResult<Advisor>;

    /// Remove an advisor and all of their availability rows.
    async fn delete_advisor(&self, advisor_id: AdvisorId) -> RepositoryResult<()>;

    /// Resolve an access token to its advisor.
    ///
    /// # Returns
    /// * `Ok(Some(Advisor))` - The advisor holding the token
    /// * `Ok(None)` - If no advisor matches; callers must not reveal
    ///   whether the token ever existed
    async fn find_advisor_by_token(&self, token: &str) -> RepositoryResult<Option<Advisor>>;

    /// Overwrite an advisor's reported sales figures.
    async fn update_advisor_sales(
        &self,
        advisor_id: AdvisorId,
        total_sales: f64,
        tickets_count: i64,
    ) -> RepositoryResult<()>;

    // ==================== Availability Operations ====================

    /// Fetch the availability rows of one advisor.
    async fn fetch_advisor_availability(
        &self,
        advisor_id: AdvisorId,
    ) -> RepositoryResult<Vec<AdvisorAvailability>>;

    /// Fetch the availability rows of every advisor in a session.
    async fn fetch_session_availability(
        &self,
        session_id: SessionId,
    ) -> RepositoryResult<Vec<AdvisorAvailability>>;

    /// Insert or overwrite one availability row.
    async fn upsert_availability(
        &self,
        advisor_id: AdvisorId,
        hour_start: i32,
        is_active: bool,
    ) -> RepositoryResult<()>;
}
