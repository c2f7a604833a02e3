//! Pure computation layer.
//!
//! Everything in this module is arithmetic over plain data: no storage
//! access, no I/O. The repository layer loads a snapshot of a session
//! and these services turn it into goals, metrics, reports and
//! warnings. Every consumer of the goal split (dashboard, self-service
//! view, reports, HTTP) goes through [`allocation`]; the split loop is
//! implemented exactly once.

pub mod allocation;
pub mod matrix;
pub mod metrics;
pub mod overlay;
pub mod reports;
pub mod validation;

pub use allocation::SessionSnapshot;
pub use validation::{is_duplicate_name, weight_warnings, ConfigWarning, WEIGHT_SUM_TOLERANCE};

#[cfg(test)]
#[path = "allocation_tests.rs"]
mod allocation_tests;
