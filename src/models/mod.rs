//! Core domain records shared across the crate.

pub mod advisor;
pub mod metrics;
pub mod session;
pub mod time;

pub use advisor::*;
pub use metrics::*;
pub use session::*;
pub use time::*;
