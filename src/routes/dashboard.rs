use serde::{Deserialize, Serialize};

use crate::api::{AdvisorId, SessionId};
use crate::models::DailySession;
use crate::services::validation::ConfigWarning;

// =========================================================
// Dashboard types
// =========================================================

/// One advisor's computed goal and progress for the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorGoalRow {
    pub advisor_id: AdvisorId,
    pub name: String,
    /// Sum of the advisor's active-hour shares for the day.
    pub personal_goal: f64,
    pub total_sales: f64,
    pub tickets_count: i64,
    /// Sales as a percentage of the personal goal (0 when the goal is 0).
    pub compliance_pct: f64,
    /// Still to sell before the goal is met (0 once surpassed).
    pub remaining: f64,
    /// Sales beyond the goal (0 until surpassed).
    pub surplus: f64,
}

/// Complete admin dashboard dataset for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardData {
    pub session_id: SessionId,
    pub session: DailySession,
    pub rows: Vec<AdvisorGoalRow>,
    /// Sum of the per-hour store goals over the operating window.
    pub store_goal_total: f64,
    /// Sum of all advisors' reported sales.
    pub advisor_sales_total: f64,
    /// Daily goal minus reported advisor sales.
    pub sales_difference: f64,
    pub warnings: Vec<ConfigWarning>,
}

/// Route function name constant for the dashboard
pub const GET_DASHBOARD: &str = "get_dashboard";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advisor_goal_row_clone() {
        let row = AdvisorGoalRow {
            advisor_id: AdvisorId::new(1),
            name: "Ana".to_string(),
            personal_goal: 70_000.0,
            total_sales: 35_000.0,
            tickets_count: 12,
            compliance_pct: 50.0,
            remaining: 35_000.0,
            surplus: 0.0,
        };
        let cloned = row.clone();
        assert_eq!(cloned.name, "Ana");
        assert_eq!(cloned.personal_goal, 70_000.0);
    }

    #[test]
    fn test_dashboard_data_debug() {
        let data = DashboardData {
            session_id: SessionId::new(1),
            session: DailySession {
                id: SessionId::new(1),
                date: chrono::NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
                total_daily_goal: 100_000.0,
                start_hour: Some(9),
                end_hour: Some(21),
            },
            rows: vec![],
            store_goal_total: 100_000.0,
            advisor_sales_total: 0.0,
            sales_difference: 100_000.0,
            warnings: vec![],
        };
        let debug_str = format!("{:?}", data);
        assert!(debug_str.contains("DashboardData"));
    }

    #[test]
    fn test_const_value() {
        assert_eq!(GET_DASHBOARD, "get_dashboard");
    }
}
