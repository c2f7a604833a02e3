//! Route-level integration tests: DTO wiring, router creation and
//! environment-driven repository selection.

mod support;

use chrono::NaiveDate;

use metas_rust::api::{AdvisorId, SessionId};
use metas_rust::db::{services, LocalRepository, RepositoryType};
use metas_rust::models::WeightEntry;
use metas_rust::routes;
use metas_rust::services::metrics::metrics_table;
use support::with_scoped_env;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_routes_module_exists() {
    // Ensure routes module compiles and exports expected constants
    assert_eq!(routes::dashboard::GET_DASHBOARD, "get_dashboard");
    assert_eq!(routes::advisor_view::GET_ADVISOR_CONTEXT, "get_advisor_context");
    assert_eq!(routes::metrics::GET_METRICS_TABLE, "get_metrics_table");
    assert_eq!(routes::reports::GET_ADMIN_REPORT, "get_admin_report");
    assert_eq!(routes::reports::GET_ADVISOR_REPORT, "get_advisor_report");
}

#[test]
fn test_router_builds_with_local_repository() {
    use metas_rust::http::{create_router, AppState};
    use std::sync::Arc;

    let repo = Arc::new(LocalRepository::new())
        as Arc<dyn metas_rust::db::repository::FullRepository>;
    let _router = create_router(AppState::new(repo));
}

#[test]
fn test_repository_type_selection_from_env() {
    with_scoped_env(
        &[("REPOSITORY_TYPE", Some("local")), ("METAS_DATA_FILE", None)],
        || assert_eq!(RepositoryType::from_env(), RepositoryType::Local),
    );

    with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("METAS_DATA_FILE", Some("/tmp/data.json")),
        ],
        || assert_eq!(RepositoryType::from_env(), RepositoryType::File),
    );

    with_scoped_env(
        &[("REPOSITORY_TYPE", None), ("METAS_DATA_FILE", None)],
        || assert_eq!(RepositoryType::from_env(), RepositoryType::Local),
    );
}

#[tokio::test]
async fn test_metrics_table_route_payload() {
    use metas_rust::models::StoreHourlyMetric;

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

    let mut row = StoreHourlyMetric::empty(session.id, 9);
    row.traffic = 200;
    row.tickets = 40;
    row.last_year_sales = 50_000.0;
    row.current_sales = 55_000.0;
    services::save_store_metrics(&repo, session.id, &[row])
        .await
        .unwrap();

    let snapshot = services::load_session_snapshot(&repo, session.id)
        .await
        .unwrap();
    let metric_rows = services::get_store_metrics(&repo, session.id).await.unwrap();
    let table = metrics_table(&snapshot, &metric_rows);

    // One row per window hour, even hours without stored metrics.
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0].hour, 9);
    assert_eq!(table.rows[0].store_goal, 60_000.0);
    assert_eq!(table.rows[0].cumulative_goal, 60_000.0);
    assert_eq!(table.rows[0].conversion_pct, 20.0);
    assert!((table.rows[0].growth_pct - 10.0).abs() < 1e-9);
    assert_eq!(table.rows[1].hour, 10);
    assert_eq!(table.rows[1].cumulative_goal, 100_000.0);
    assert_eq!(table.rows[1].conversion_pct, 0.0);

    assert_eq!(table.totals.store_sales, 55_000.0);
    assert_eq!(table.totals.last_year_sales, 50_000.0);
}

#[tokio::test]
async fn test_advisor_report_payload() {
    use metas_rust::services::reports;

    let repo = LocalRepository::new();
    let session = services::get_or_create_session(&repo, date(2024, 6, 3))
        .await
        .unwrap();
    services::update_session_goal(&repo, session.id, 10_000.0)
        .await
        .unwrap();
    services::update_session_hours(&repo, session.id, 9, 10)
        .await
        .unwrap();
    services::upsert_hourly_weights(&repo, session.id, &[WeightEntry::new(9, 100.0)])
        .await
        .unwrap();
    let ana = services::create_advisor(&repo, session.id, "Ana").await.unwrap();
    services::update_advisor_sales(&repo, ana.id, 4_000.0, 8)
        .await
        .unwrap();

    let snapshot = services::load_session_snapshot(&repo, session.id)
        .await
        .unwrap();
    let report = reports::advisor_report(&snapshot, ana.id).unwrap();
    assert_eq!(report.goal, 10_000.0);
    assert_eq!(report.compliance_pct, 40.0);
    assert_eq!(report.remaining, 6_000.0);

    assert!(reports::advisor_report(&snapshot, AdvisorId::new(404)).is_none());
}

#[test]
fn test_session_id_round_trips_through_json() {
    let id = SessionId::new(7);
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "7");
    let back: SessionId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}
