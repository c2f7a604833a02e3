//! Repository implementations module.
//!
//! This module contains different implementations of the repository traits:
//! - `file`: JSON snapshot implementation for single-process deployments
//! - `local`: In-memory implementation for unit testing and local development

#[cfg(feature = "file-repo")]
pub mod file;
pub mod local;

#[cfg(feature = "file-repo")]
pub use file::{FileConfig, FileRepository};
pub use local::LocalRepository;
