//! End-to-end service layer tests over the in-memory repository.

mod support;

use chrono::NaiveDate;

use metas_rust::db::{services, LocalRepository, RepositoryError};
use metas_rust::models::WeightEntry;
use metas_rust::services::reports;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A full admin day: configure, staff, report sales, read the dashboard.
#[tokio::test]
async fn test_admin_day_end_to_end() {
    let repo = LocalRepository::new();

    let session = services::get_or_create_session(&repo, date(2024, 6, 3))
        .await
        .unwrap();
    services::update_session_goal(&repo, session.id, 100_000.0)
        .await
        .unwrap();
    services::update_session_hours(&repo, session.id, 9, 10)
        .await
        .unwrap();
    services::upsert_hourly_weights(
        &repo,
        session.id,
        &[WeightEntry::new(9, 60.0), WeightEntry::new(10, 40.0)],
    )
    .await
    .unwrap();

    let ana = services::create_advisor(&repo, session.id, "Ana").await.unwrap();
    let bruno = services::create_advisor(&repo, session.id, "Bruno")
        .await
        .unwrap();
    services::update_availability(&repo, bruno.id, 10, false)
        .await
        .unwrap();

    // Advisors report through their tokens.
    services::update_advisor_sales_by_token(&repo, ana.access_token.value(), 35_000.0, 14)
        .await
        .unwrap()
        .expect("ana's token resolves");
    services::update_advisor_sales_by_token(&repo, bruno.access_token.value(), 45_000.0, 9)
        .await
        .unwrap()
        .expect("bruno's token resolves");

    let snapshot = services::load_session_snapshot(&repo, session.id)
        .await
        .unwrap();
    let dashboard = reports::dashboard(&snapshot);

    assert_eq!(dashboard.rows.len(), 2);
    assert_eq!(dashboard.rows[0].personal_goal, 70_000.0);
    assert_eq!(dashboard.rows[0].compliance_pct, 50.0);
    assert_eq!(dashboard.rows[1].personal_goal, 30_000.0);
    assert_eq!(dashboard.rows[1].compliance_pct, 150.0);
    assert_eq!(dashboard.advisor_sales_total, 80_000.0);
    assert_eq!(dashboard.sales_difference, 20_000.0);
    assert!(dashboard.warnings.is_empty());

    let report = reports::admin_report(&snapshot);
    assert_eq!(report.totals.goal, 100_000.0);
    assert_eq!(report.totals.compliance_pct, 80.0);
}

#[tokio::test]
async fn test_next_week_bootstraps_from_this_week() {
    let repo = LocalRepository::new();

    let monday = services::get_or_create_session(&repo, date(2024, 6, 3))
        .await
        .unwrap();
    services::update_session_hours(&repo, monday.id, 10, 20)
        .await
        .unwrap();
    services::upsert_hourly_weights(&repo, monday.id, &[WeightEntry::new(10, 100.0)])
        .await
        .unwrap();

    let next_monday = services::get_or_create_session(&repo, date(2024, 6, 10))
        .await
        .unwrap();
    assert_eq!(next_monday.start_hour, Some(10));
    assert_eq!(next_monday.end_hour, Some(20));

    let weights = services::get_hourly_weights(&repo, next_monday.id)
        .await
        .unwrap();
    assert_eq!(weights.len(), 1);
    assert_eq!(weights[0].hour_start, 10);
    assert_eq!(weights[0].percentage, 100.0);
}

#[tokio::test]
async fn test_template_lifecycle() {
    let repo = LocalRepository::new();

    let source = services::get_or_create_session(&repo, date(2024, 6, 3))
        .await
        .unwrap();
    services::update_session_hours(&repo, source.id, 9, 21)
        .await
        .unwrap();
    services::upsert_hourly_weights(
        &repo,
        source.id,
        &[WeightEntry::new(9, 50.0), WeightEntry::new(10, 50.0)],
    )
    .await
    .unwrap();

    let template = services::save_session_as_template(&repo, source.id, "Weekday")
        .await
        .unwrap();

    // A differently configured target takes the template's shape.
    let target = services::get_or_create_session(&repo, date(2024, 7, 15))
        .await
        .unwrap();
    services::update_session_hours(&repo, target.id, 12, 18)
        .await
        .unwrap();
    services::upsert_hourly_weights(&repo, target.id, &[WeightEntry::new(15, 100.0)])
        .await
        .unwrap();

    let applied = services::apply_template(&repo, target.id, template.id)
        .await
        .unwrap();
    assert_eq!(applied.start_hour, Some(9));
    assert_eq!(applied.end_hour, Some(21));

    let weights = services::get_hourly_weights(&repo, target.id).await.unwrap();
    let hours: Vec<i32> = weights.iter().map(|w| w.hour_start).collect();
    assert_eq!(hours, vec![9, 10]);
}

#[tokio::test]
async fn test_token_is_the_only_way_in_for_advisors() {
    let repo = LocalRepository::new();
    let session = services::get_or_create_session(&repo, date(2024, 6, 3))
        .await
        .unwrap();
    let ana = services::create_advisor(&repo, session.id, "Ana").await.unwrap();

    let context = services::get_advisor_context(&repo, ana.access_token.value())
        .await
        .unwrap();
    assert!(context.is_some());

    // A guessed token resolves to nothing, indistinguishable from a
    // deleted advisor's stale link.
    assert!(services::get_advisor_context(&repo, "guessed")
        .await
        .unwrap()
        .is_none());

    services::delete_advisor(&repo, ana.id).await.unwrap();
    assert!(services::get_advisor_context(&repo, ana.access_token.value())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_duplicate_roster_name_is_rejected_with_labeled_error() {
    let repo = LocalRepository::new();
    let session = services::get_or_create_session(&repo, date(2024, 6, 3))
        .await
        .unwrap();
    services::create_advisor(&repo, session.id, "Ana").await.unwrap();

    let err = services::create_advisor(&repo, session.id, "ana")
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));
    assert!(err.to_string().contains("Error creating advisor"));

    // The same name is fine in a different session.
    let other = services::get_or_create_session(&repo, date(2024, 6, 4))
        .await
        .unwrap();
    services::create_advisor(&repo, other.id, "Ana").await.unwrap();
}
