//! # Metas Rust Backend
//!
//! Daily sales-goal tracking engine for retail stores.
//!
//! An admin configures a revenue goal per calendar date, distributes it
//! across the store's operating hours as percentage weights, and manages
//! a roster of advisors with per-hour availability. The engine allocates
//! each advisor's personal goal from the hourly split, advisors
//! self-report sales through an opaque personal link, and the backend
//! exposes aggregated progress, store-level hourly metrics and
//! end-of-day reports over a REST API via Axum.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Identifier newtypes, access tokens and DTO re-exports
//! - [`models`]: Domain records (sessions, weights, advisors, metrics)
//! - [`db`]: Repository pattern, storage backends and the operation layer
//! - [`services`]: Pure computation - goal allocation, derived metrics,
//!   reports, edit overlays and the standalone matrix tracker
//! - [`routes`]: Route-specific data types
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Allocation in one place
//!
//! Every consumer of the goal split (admin dashboard, advisor
//! self-service view, reports) goes through
//! [`services::allocation::SessionSnapshot`]; the split loop exists
//! exactly once so the three surfaces can never disagree.

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod db;
pub mod models;

pub mod routes;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
