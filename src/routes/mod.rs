pub mod advisor_view;
pub mod dashboard;
pub mod metrics;
pub mod reports;
