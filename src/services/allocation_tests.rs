//! Tests for the goal allocation engine.

use chrono::NaiveDate;

use super::allocation::SessionSnapshot;
use crate::api::{AccessToken, AdvisorId, SessionId};
use crate::models::{Advisor, AdvisorAvailability, DailySession, HourlyWeight};

fn session(goal: f64, start: Option<i32>, end: Option<i32>) -> DailySession {
    DailySession {
        id: SessionId::new(1),
        date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
        total_daily_goal: goal,
        start_hour: start,
        end_hour: end,
    }
}

fn weight(hour: i32, pct: f64) -> HourlyWeight {
    HourlyWeight {
        session_id: SessionId::new(1),
        hour_start: hour,
        percentage: pct,
    }
}

fn advisor(id: i64, name: &str) -> Advisor {
    Advisor {
        id: AdvisorId::new(id),
        session_id: SessionId::new(1),
        name: name.to_string(),
        access_token: AccessToken::new(format!("tok-{}", id)),
        total_sales: 0.0,
        tickets_count: 0,
    }
}

fn off(advisor_id: i64, hour: i32) -> AdvisorAvailability {
    AdvisorAvailability {
        advisor_id: AdvisorId::new(advisor_id),
        hour_start: hour,
        is_active: false,
    }
}

#[test]
fn test_weight_for_missing_hour_is_zero() {
    let snapshot = SessionSnapshot::new(
        session(1000.0, Some(9), Some(10)),
        vec![weight(9, 60.0)],
        vec![],
        vec![],
    );
    assert_eq!(snapshot.weight_for(9), 60.0);
    assert_eq!(snapshot.weight_for(10), 0.0);
}

#[test]
fn test_hourly_store_goal() {
    let snapshot = SessionSnapshot::new(
        session(1000.0, Some(9), Some(10)),
        vec![weight(9, 40.0)],
        vec![],
        vec![],
    );
    assert_eq!(snapshot.hourly_store_goal(9), 400.0);
    assert_eq!(snapshot.hourly_store_goal(10), 0.0);
}

#[test]
fn test_default_active_without_rows() {
    let snapshot = SessionSnapshot::new(
        session(1000.0, Some(9), Some(21)),
        vec![],
        vec![advisor(1, "Ana")],
        vec![],
    );
    for hour in 0..24 {
        assert!(snapshot.is_active(AdvisorId::new(1), hour));
        assert_eq!(snapshot.availability_override(AdvisorId::new(1), hour), None);
    }
}

#[test]
fn test_override_row_wins_over_default() {
    let snapshot = SessionSnapshot::new(
        session(1000.0, Some(9), Some(10)),
        vec![],
        vec![advisor(1, "Ana")],
        vec![off(1, 9)],
    );
    assert!(!snapshot.is_active(AdvisorId::new(1), 9));
    assert!(snapshot.is_active(AdvisorId::new(1), 10));
}

#[test]
fn test_equal_split_among_active_advisors() {
    // 40% of 1000 at one hour, 2 of 3 advisors active: 200 each.
    let snapshot = SessionSnapshot::new(
        session(1000.0, Some(9), Some(9)),
        vec![weight(9, 40.0)],
        vec![advisor(1, "Ana"), advisor(2, "Bruno"), advisor(3, "Carla")],
        vec![off(3, 9)],
    );
    assert_eq!(snapshot.active_count(9), 2);
    assert_eq!(snapshot.personal_goal(AdvisorId::new(1)), 200.0);
    assert_eq!(snapshot.personal_goal(AdvisorId::new(2)), 200.0);
    assert_eq!(snapshot.personal_goal(AdvisorId::new(3)), 0.0);
}

#[test]
fn test_zero_active_hour_contributes_nothing() {
    let snapshot = SessionSnapshot::new(
        session(1000.0, Some(9), Some(9)),
        vec![weight(9, 100.0)],
        vec![advisor(1, "Ana")],
        vec![off(1, 9)],
    );
    assert_eq!(snapshot.active_count(9), 0);
    let goal = snapshot.personal_goal(AdvisorId::new(1));
    assert_eq!(goal, 0.0);
    assert!(goal.is_finite());
    // The hour keeps its store goal; it is simply assigned to nobody.
    assert_eq!(snapshot.hourly_store_goal(9), 1000.0);
}

#[test]
fn test_out_of_window_weights_are_inert() {
    // A stale row at hour 8 survives a shrunken window but must not
    // leak into any figure.
    let snapshot = SessionSnapshot::new(
        session(1000.0, Some(9), Some(10)),
        vec![weight(8, 50.0), weight(9, 60.0), weight(10, 40.0)],
        vec![advisor(1, "Ana")],
        vec![],
    );
    assert_eq!(snapshot.personal_goal(AdvisorId::new(1)), 1000.0);
    assert_eq!(snapshot.store_goal_total(), 1000.0);
    assert_eq!(snapshot.cumulative_store_goal(10), 1000.0);
}

#[test]
fn test_cumulative_goal_is_monotonic() {
    let snapshot = SessionSnapshot::new(
        session(1000.0, Some(9), Some(12)),
        vec![weight(9, 10.0), weight(10, 0.0), weight(11, 50.0), weight(12, 40.0)],
        vec![],
        vec![],
    );
    let mut previous = 0.0;
    for hour in 9..=12 {
        let cumulative = snapshot.cumulative_store_goal(hour);
        assert!(cumulative >= previous);
        previous = cumulative;
    }
    assert_eq!(snapshot.cumulative_store_goal(12), 1000.0);
}

#[test]
fn test_cumulative_goal_ignores_availability() {
    let snapshot = SessionSnapshot::new(
        session(1000.0, Some(9), Some(10)),
        vec![weight(9, 60.0), weight(10, 40.0)],
        vec![advisor(1, "Ana")],
        vec![off(1, 9), off(1, 10)],
    );
    assert_eq!(snapshot.cumulative_store_goal(10), 1000.0);
}

#[test]
fn test_zero_goal_session_yields_all_zeros() {
    let snapshot = SessionSnapshot::new(
        session(0.0, Some(9), Some(10)),
        vec![weight(9, 60.0), weight(10, 40.0)],
        vec![advisor(1, "Ana")],
        vec![],
    );
    assert_eq!(snapshot.personal_goal(AdvisorId::new(1)), 0.0);
    assert_eq!(snapshot.store_goal_total(), 0.0);
}

#[test]
fn test_unconfigured_session_uses_default_window() {
    let snapshot = SessionSnapshot::new(
        session(1000.0, None, None),
        vec![weight(9, 50.0), weight(21, 50.0), weight(22, 10.0)],
        vec![advisor(1, "Ana")],
        vec![],
    );
    // 9 and 21 fall inside the 9-21 default window; 22 does not.
    assert_eq!(snapshot.personal_goal(AdvisorId::new(1)), 1000.0);
}

#[test]
fn test_degenerate_window_yields_empty_results() {
    let snapshot = SessionSnapshot::new(
        session(1000.0, Some(18), Some(9)),
        vec![weight(12, 100.0)],
        vec![advisor(1, "Ana")],
        vec![],
    );
    assert_eq!(snapshot.personal_goal(AdvisorId::new(1)), 0.0);
    assert_eq!(snapshot.store_goal_total(), 0.0);
    assert!(snapshot.hourly_breakdown(AdvisorId::new(1)).is_empty());
}

#[test]
fn test_hourly_breakdown_rows() {
    let snapshot = SessionSnapshot::new(
        session(100_000.0, Some(9), Some(10)),
        vec![weight(9, 60.0), weight(10, 40.0)],
        vec![advisor(1, "Ana"), advisor(2, "Bruno")],
        vec![off(2, 10)],
    );

    let rows = snapshot.hourly_breakdown(AdvisorId::new(1));
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0].hour, 9);
    assert_eq!(rows[0].store_goal, 60_000.0);
    assert_eq!(rows[0].active_count, 2);
    assert!(rows[0].is_active);
    assert_eq!(rows[0].share, 30_000.0);

    assert_eq!(rows[1].hour, 10);
    assert_eq!(rows[1].active_count, 1);
    assert_eq!(rows[1].share, 40_000.0);

    let rows_b = snapshot.hourly_breakdown(AdvisorId::new(2));
    assert!(!rows_b[1].is_active);
    assert_eq!(rows_b[1].share, 0.0);
}

#[test]
fn test_reference_day_split() {
    // Goal 100 000, hours 9-10, weights 60/40. Ana works both hours,
    // Bruno only hour 9.
    let snapshot = SessionSnapshot::new(
        session(100_000.0, Some(9), Some(10)),
        vec![weight(9, 60.0), weight(10, 40.0)],
        vec![advisor(1, "Ana"), advisor(2, "Bruno")],
        vec![off(2, 10)],
    );

    assert_eq!(snapshot.personal_goal(AdvisorId::new(1)), 70_000.0);
    assert_eq!(snapshot.personal_goal(AdvisorId::new(2)), 30_000.0);
    assert_eq!(snapshot.cumulative_store_goal(10), 100_000.0);
}
