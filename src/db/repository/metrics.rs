//! Store-level hourly metrics repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::SessionId;
use crate::db::models::StoreHourlyMetric;

/// Repository trait for store-level hourly figures.
///
/// Rows are keyed by `(session_id, hour)`; re-saving an hour
/// overwrites the previous row in full (last write wins).
#[async_trait]
pub trait MetricsRepository: Send + Sync {
    /// Fetch all metric rows of a session, ordered by hour.
    async fn fetch_store_metrics(
        &self,
        session_id: SessionId,
    ) -> RepositoryResult<Vec<StoreHourlyMetric>>;

    /// Insert or overwrite metric rows keyed by `(session_id, hour)`.
    async fn upsert_store_metrics(&self, rows: &[StoreHourlyMetric]) -> RepositoryResult<()>;
}
