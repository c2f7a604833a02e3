//! Invariant tests for the goal allocation engine and derived metrics.

use chrono::NaiveDate;

use metas_rust::api::{AccessToken, AdvisorId, SessionId};
use metas_rust::models::{Advisor, AdvisorAvailability, DailySession, HourlyWeight};
use metas_rust::services::allocation::SessionSnapshot;
use metas_rust::services::metrics::{average_ticket, compliance, conversion_rate, growth};

fn session(goal: f64, start: i32, end: i32) -> DailySession {
    DailySession {
        id: SessionId::new(1),
        date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
        total_daily_goal: goal,
        start_hour: Some(start),
        end_hour: Some(end),
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
fn personal_goals_sum_to_store_goal_when_every_hour_is_staffed() {
    let snapshot = SessionSnapshot::new(
        session(100_000.0, 9, 12),
        vec![
            weight(9, 25.0),
            weight(10, 25.0),
            weight(11, 30.0),
            weight(12, 20.0),
        ],
        vec![advisor(1, "Ana"), advisor(2, "Bruno"), advisor(3, "Carla")],
        vec![off(2, 11)],
    );

    let allocated: f64 = snapshot
        .advisors
        .iter()
        .map(|a| snapshot.personal_goal(a.id))
        .sum();
    assert!((allocated - snapshot.store_goal_total()).abs() < 1e-6);
}

#[test]
fn unstaffed_hour_loses_its_share_instead_of_redistributing() {
    let snapshot = SessionSnapshot::new(
        session(100_000.0, 9, 10),
        vec![weight(9, 60.0), weight(10, 40.0)],
        vec![advisor(1, "Ana")],
        vec![off(1, 10)],
    );

    // Hour 10 has nobody; its 40 000 is simply not allocated.
    let allocated: f64 = snapshot
        .advisors
        .iter()
        .map(|a| snapshot.personal_goal(a.id))
        .sum();
    assert_eq!(allocated, 60_000.0);
    assert_eq!(snapshot.store_goal_total(), 100_000.0);
    assert!(allocated.is_finite());
}

#[test]
fn split_is_equal_among_the_active_only() {
    let snapshot = SessionSnapshot::new(
        session(1_000.0, 9, 9),
        vec![weight(9, 40.0)],
        vec![advisor(1, "Ana"), advisor(2, "Bruno"), advisor(3, "Carla")],
        vec![off(3, 9)],
    );

    // 40% of 1 000 split between the two active advisors.
    assert_eq!(snapshot.personal_goal(AdvisorId::new(1)), 200.0);
    assert_eq!(snapshot.personal_goal(AdvisorId::new(2)), 200.0);
    assert_eq!(snapshot.personal_goal(AdvisorId::new(3)), 0.0);
}

#[test]
fn weights_outside_the_operating_window_never_contribute() {
    let in_window = SessionSnapshot::new(
        session(10_000.0, 9, 10),
        vec![weight(9, 50.0), weight(10, 50.0)],
        vec![advisor(1, "Ana")],
        vec![],
    );
    let with_stale_rows = SessionSnapshot::new(
        session(10_000.0, 9, 10),
        vec![
            weight(8, 99.0),
            weight(9, 50.0),
            weight(10, 50.0),
            weight(15, 99.0),
        ],
        vec![advisor(1, "Ana")],
        vec![],
    );

    assert_eq!(
        in_window.personal_goal(AdvisorId::new(1)),
        with_stale_rows.personal_goal(AdvisorId::new(1))
    );
    assert_eq!(
        in_window.store_goal_total(),
        with_stale_rows.store_goal_total()
    );
}

#[test]
fn cumulative_store_goal_never_decreases() {
    let snapshot = SessionSnapshot::new(
        session(50_000.0, 9, 14),
        vec![weight(9, 10.0), weight(11, 60.0), weight(13, 30.0)],
        vec![advisor(1, "Ana")],
        vec![],
    );

    let mut previous = 0.0;
    for hour in snapshot.window().hours() {
        let cumulative = snapshot.cumulative_store_goal(hour);
        assert!(cumulative >= previous, "cumulative dipped at hour {}", hour);
        previous = cumulative;
    }
    assert_eq!(previous, snapshot.store_goal_total());
}

#[test]
fn reference_day_end_to_end() {
    // 100 000 over 9-10 at 60/40. Ana works both hours, Bruno sits out
    // hour 10: Ana gets 30 000 + 40 000, Bruno gets 30 000.
    let snapshot = SessionSnapshot::new(
        session(100_000.0, 9, 10),
        vec![weight(9, 60.0), weight(10, 40.0)],
        vec![advisor(1, "Ana"), advisor(2, "Bruno")],
        vec![off(2, 10)],
    );

    assert_eq!(snapshot.personal_goal(AdvisorId::new(1)), 70_000.0);
    assert_eq!(snapshot.personal_goal(AdvisorId::new(2)), 30_000.0);
    assert_eq!(snapshot.cumulative_store_goal(9), 60_000.0);
    assert_eq!(snapshot.cumulative_store_goal(10), 100_000.0);

    let breakdown = snapshot.hourly_breakdown(AdvisorId::new(2));
    assert_eq!(breakdown.len(), 2);
    assert!(breakdown[0].is_active);
    assert_eq!(breakdown[0].share, 30_000.0);
    assert!(!breakdown[1].is_active);
    assert_eq!(breakdown[1].share, 0.0);
}

#[test]
fn derived_metrics_guard_every_zero_denominator() {
    assert_eq!(compliance(500.0, 0.0), 0.0);
    assert_eq!(conversion_rate(5, 0), 0.0);
    assert_eq!(growth(1_000.0, 0.0), 0.0);
    assert_eq!(average_ticket(1_000.0, 0), 0.0);
}

#[test]
fn unconfigured_session_still_allocates_over_default_hours() {
    let snapshot = SessionSnapshot::new(
        DailySession {
            id: SessionId::new(1),
            date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            total_daily_goal: 12_000.0,
            start_hour: None,
            end_hour: None,
        },
        vec![weight(9, 100.0)],
        vec![advisor(1, "Ana")],
        vec![],
    );

    // Defaults are 9-21, so the hour-9 weight is inside the window.
    assert_eq!(snapshot.window().start_hour(), 9);
    assert_eq!(snapshot.window().end_hour(), 21);
    assert_eq!(snapshot.personal_goal(AdvisorId::new(1)), 12_000.0);
}
