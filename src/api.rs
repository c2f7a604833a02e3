//! Public API surface for the goal-tracking backend.
//!
//! This file consolidates the identifier newtypes and re-exports the
//! DTO types for the HTTP API. All types derive Serialize/Deserialize
//! for JSON serialization.

pub use crate::routes::advisor_view::AdvisorContext;
pub use crate::routes::advisor_view::AdvisorProgress;
pub use crate::routes::advisor_view::AdvisorSummary;
pub use crate::routes::advisor_view::AdvisorViewData;
pub use crate::routes::advisor_view::HourlyShare;
pub use crate::routes::dashboard::AdvisorGoalRow;
pub use crate::routes::dashboard::DashboardData;
pub use crate::routes::metrics::HourlyMetricRow;
pub use crate::routes::metrics::MetricsTableData;
pub use crate::routes::metrics::StoreTotals;
pub use crate::routes::reports::AdminReport;
pub use crate::routes::reports::AdminReportRow;
pub use crate::routes::reports::AdvisorReport;
pub use crate::routes::reports::ReportTotals;

use serde::{Deserialize, Serialize};

/// Cadence at which clients are expected to re-fetch shared state.
///
/// Concurrent edits follow last-write-wins; polling at this interval
/// bounds how stale a reader can get.
pub const POLL_INTERVAL_SECS: u64 = 30;

/// Session identifier (database primary key).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SessionId(pub i64);

/// Advisor identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AdvisorId(pub i64);

/// Session template identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TemplateId(pub i64);

impl SessionId {
    pub fn new(value: i64) -> Self {
        SessionId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl AdvisorId {
    pub fn new(value: i64) -> Self {
        AdvisorId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl TemplateId {
    pub fn new(value: i64) -> Self {
        TemplateId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for AdvisorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<SessionId> for i64 {
    fn from(id: SessionId) -> Self {
        id.0
    }
}
impl From<AdvisorId> for i64 {
    fn from(id: AdvisorId) -> Self {
        id.0
    }
}

pub use crate::models::{BusinessWindow, WeightEntry};

/// Opaque credential identifying one advisor.
///
/// Tokens are minted server-side when an advisor is created and are
/// embedded in the personal link handed to the advisor. They carry no
/// structure a caller may rely on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessToken(pub String);

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        AccessToken(value.into())
    }

    /// Mints a fresh random token.
    pub fn generate() -> Self {
        AccessToken(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccessToken {
    fn from(value: &str) -> Self {
        AccessToken(value.to_string())
    }
}

impl From<String> for AccessToken {
    fn from(value: String) -> Self {
        AccessToken(value)
    }
}
