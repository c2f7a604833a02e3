//! Shared data models re-exported for database layer consumers.
//!
//! The canonical definitions live in [`crate::models`]; this module
//! exists so repository code can keep its imports inside `crate::db`.

pub use crate::api::{AccessToken, AdvisorId, SessionId, TemplateId};
pub use crate::models::{
    Advisor, AdvisorAvailability, BusinessWindow, DailySession, HourlyWeight, SessionTemplate,
    StoreHourlyMetric, WeightEntry,
};
