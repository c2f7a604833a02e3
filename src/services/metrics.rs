//! Derived performance metrics.
//!
//! Plain arithmetic over the allocation engine's output and the raw
//! reported figures. Every ratio guards its zero-denominator case the
//! same way: the result is 0, never an error, never NaN or infinity.

use crate::models::StoreHourlyMetric;
use crate::routes::metrics::{HourlyMetricRow, MetricsTableData, StoreTotals};
use crate::services::allocation::SessionSnapshot;

/// Actual sales as a percentage of a goal. 0 when the goal is 0.
pub fn compliance(actual: f64, goal: f64) -> f64 {
    if goal > 0.0 {
        actual / goal * 100.0
    } else {
        0.0
    }
}

/// Amount still missing to reach a goal, floored at 0.
pub fn remaining(actual: f64, goal: f64) -> f64 {
    (goal - actual).max(0.0)
}

/// Amount sold beyond a goal, floored at 0.
pub fn surplus(actual: f64, goal: f64) -> f64 {
    (actual - goal).max(0.0)
}

/// Tickets per visitor as a percentage. 0 when there was no traffic.
pub fn conversion_rate(tickets: i64, traffic: i64) -> f64 {
    if traffic > 0 {
        tickets as f64 / traffic as f64 * 100.0
    } else {
        0.0
    }
}

/// Year-over-year growth percentage. 0 when last year recorded nothing.
pub fn growth(current: f64, last_year: f64) -> f64 {
    if last_year > 0.0 {
        (current / last_year - 1.0) * 100.0
    } else {
        0.0
    }
}

/// Average sale amount per ticket. 0 when there are no tickets.
pub fn average_ticket(sales: f64, tickets: i64) -> f64 {
    if tickets > 0 {
        sales / tickets as f64
    } else {
        0.0
    }
}

/// Builds the hourly store metrics table for a session.
///
/// One row per window hour; stored rows outside the window are
/// excluded, the same defensive filter applied to weights. Hours with
/// no stored row render as zeros.
pub fn metrics_table(snapshot: &SessionSnapshot, metrics: &[StoreHourlyMetric]) -> MetricsTableData {
    let window = snapshot.window();

    let mut cumulative_goal = 0.0;
    let rows: Vec<HourlyMetricRow> = window
        .hours()
        .map(|hour| {
            let stored = metrics
                .iter()
                .find(|m| m.hour == hour)
                .copied()
                .unwrap_or_else(|| StoreHourlyMetric::empty(snapshot.session.id, hour));

            let store_goal = snapshot.hourly_store_goal(hour);
            cumulative_goal += store_goal;

            HourlyMetricRow {
                hour,
                percentage: snapshot.weight_for(hour),
                store_goal,
                cumulative_goal,
                traffic: stored.traffic,
                tickets: stored.tickets,
                conversion_pct: conversion_rate(stored.tickets, stored.traffic),
                last_year_sales: stored.last_year_sales,
                current_sales: stored.current_sales,
                growth_pct: growth(stored.current_sales, stored.last_year_sales),
                average_ticket: average_ticket(stored.current_sales, stored.tickets),
            }
        })
        .collect();

    let store_sales: f64 = rows.iter().map(|r| r.current_sales).sum();
    let last_year_sales: f64 = rows.iter().map(|r| r.last_year_sales).sum();
    let advisor_sales: f64 = snapshot.advisors.iter().map(|a| a.total_sales).sum();

    MetricsTableData {
        rows,
        totals: StoreTotals {
            store_sales,
            advisor_sales,
            sales_difference: store_sales - advisor_sales,
            last_year_sales,
            growth_pct: growth(store_sales, last_year_sales),
        },
    }
}
