//! Dashboard and report builders.
//!
//! Assembles the aggregated datasets the admin dashboard and the
//! export collaborators consume. Everything is plain numeric/tabular
//! data; formatting, currency symbols and locale belong to whoever
//! renders it.

use crate::api::AdvisorId;
use crate::routes::dashboard::{AdvisorGoalRow, DashboardData};
use crate::routes::reports::{AdminReport, AdminReportRow, AdvisorReport, ReportTotals};
use crate::services::allocation::SessionSnapshot;
use crate::services::metrics::{compliance, remaining, surplus};
use crate::services::validation::weight_warnings;

/// Builds the admin dashboard dataset for one session snapshot.
pub fn dashboard(snapshot: &SessionSnapshot) -> DashboardData {
    let rows: Vec<AdvisorGoalRow> = snapshot
        .advisors
        .iter()
        .map(|advisor| {
            let personal_goal = snapshot.personal_goal(advisor.id);
            AdvisorGoalRow {
                advisor_id: advisor.id,
                name: advisor.name.clone(),
                personal_goal,
                total_sales: advisor.total_sales,
                tickets_count: advisor.tickets_count,
                compliance_pct: compliance(advisor.total_sales, personal_goal),
                remaining: remaining(advisor.total_sales, personal_goal),
                surplus: surplus(advisor.total_sales, personal_goal),
            }
        })
        .collect();

    let advisor_sales_total: f64 = snapshot.advisors.iter().map(|a| a.total_sales).sum();

    DashboardData {
        session_id: snapshot.session.id,
        session: snapshot.session.clone(),
        rows,
        store_goal_total: snapshot.store_goal_total(),
        advisor_sales_total,
        sales_difference: snapshot.session.total_daily_goal - advisor_sales_total,
        warnings: weight_warnings(snapshot.window(), &snapshot.weights),
    }
}

/// Builds the end-of-day admin report.
///
/// The totals row recomputes compliance from the summed goal and
/// sales rather than averaging the per-row percentages.
pub fn admin_report(snapshot: &SessionSnapshot) -> AdminReport {
    let rows: Vec<AdminReportRow> = snapshot
        .advisors
        .iter()
        .map(|advisor| {
            let goal = snapshot.personal_goal(advisor.id);
            AdminReportRow {
                advisor_name: advisor.name.clone(),
                goal,
                sales: advisor.total_sales,
                tickets: advisor.tickets_count,
                compliance_pct: compliance(advisor.total_sales, goal),
            }
        })
        .collect();

    let goal: f64 = rows.iter().map(|r| r.goal).sum();
    let sales: f64 = rows.iter().map(|r| r.sales).sum();
    let tickets: i64 = rows.iter().map(|r| r.tickets).sum();

    AdminReport {
        date: snapshot.session.date,
        rows,
        totals: ReportTotals {
            goal,
            sales,
            tickets,
            compliance_pct: compliance(sales, goal),
        },
    }
}

/// Builds the end-of-day report for one advisor, or `None` if the
/// advisor is not in the snapshot's roster.
pub fn advisor_report(snapshot: &SessionSnapshot, advisor_id: AdvisorId) -> Option<AdvisorReport> {
    let advisor = snapshot.advisors.iter().find(|a| a.id == advisor_id)?;
    let goal = snapshot.personal_goal(advisor_id);
    Some(AdvisorReport {
        date: snapshot.session.date,
        advisor_name: advisor.name.clone(),
        goal,
        sales: advisor.total_sales,
        tickets: advisor.tickets_count,
        compliance_pct: compliance(advisor.total_sales, goal),
        remaining: remaining(advisor.total_sales, goal),
    })
}
