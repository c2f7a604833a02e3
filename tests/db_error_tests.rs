//! Tests for db::repository::error module.

use metas_rust::db::repository::{ErrorContext, RepositoryError};

#[test]
fn test_error_context_new() {
    let ctx = ErrorContext::new("fetching");
    assert_eq!(ctx.operation, Some("fetching".to_string()));
    assert!(ctx.entity.is_none());
    assert!(ctx.entity_id.is_none());
    assert!(ctx.details.is_none());
    assert!(!ctx.retryable);
}

#[test]
fn test_error_context_chaining() {
    let ctx = ErrorContext::new("updating")
        .with_entity("session")
        .with_entity_id(42)
        .with_details("snapshot write timed out")
        .retryable();

    assert_eq!(ctx.operation, Some("updating".to_string()));
    assert_eq!(ctx.entity, Some("session".to_string()));
    assert_eq!(ctx.entity_id, Some("42".to_string()));
    assert_eq!(ctx.details, Some("snapshot write timed out".to_string()));
    assert!(ctx.retryable);
}

#[test]
fn test_error_context_display() {
    let ctx = ErrorContext::new("fetching")
        .with_entity("advisor")
        .with_entity_id(7);

    let display = format!("{}", ctx);
    assert!(display.contains("operation=fetching"));
    assert!(display.contains("entity=advisor"));
    assert!(display.contains("id=7"));
}

#[test]
fn test_labeled_rewrites_message_and_keeps_variant() {
    let err = RepositoryError::not_found("no session with id 9").labeled("fetching", "session");

    assert!(matches!(err, RepositoryError::NotFound { .. }));
    assert_eq!(err.message(), "Error fetching session: no session with id 9");
    assert_eq!(err.context().operation, Some("fetching".to_string()));
    assert_eq!(err.context().entity, Some("session".to_string()));
}

#[test]
fn test_labeled_validation_error() {
    let err = RepositoryError::validation("Start hour must be before end hour")
        .labeled("updating", "hours");

    assert!(matches!(err, RepositoryError::ValidationError { .. }));
    assert!(err
        .to_string()
        .contains("Error updating hours: Start hour must be before end hour"));
}

#[test]
fn test_connection_errors_are_retryable() {
    assert!(RepositoryError::connection("backend unreachable").is_retryable());
    assert!(!RepositoryError::not_found("gone").is_retryable());
    assert!(!RepositoryError::validation("bad input").is_retryable());
    assert!(!RepositoryError::internal("boom").is_retryable());
}

#[test]
fn test_retryability_survives_labeling() {
    let err = RepositoryError::connection("backend unreachable").labeled("fetching", "weights");
    assert!(err.is_retryable());
}

#[test]
fn test_from_string_is_internal() {
    let err: RepositoryError = "something odd".into();
    assert!(matches!(err, RepositoryError::InternalError { .. }));

    let err: RepositoryError = String::from("something odd").into();
    assert!(matches!(err, RepositoryError::InternalError { .. }));
}

#[test]
fn test_with_operation_updates_context() {
    let err = RepositoryError::query("lookup failed").with_operation("fetching");
    assert_eq!(err.context().operation, Some("fetching".to_string()));
    assert_eq!(err.message(), "lookup failed");
}
