use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =========================================================
// End-of-day report types
// =========================================================

/// One advisor line of the admin end-of-day report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminReportRow {
    pub advisor_name: String,
    pub goal: f64,
    pub sales: f64,
    pub tickets: i64,
    pub compliance_pct: f64,
}

/// Aggregate line closing the admin report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportTotals {
    pub goal: f64,
    pub sales: f64,
    pub tickets: i64,
    /// Total sales as a percentage of the total goal.
    pub compliance_pct: f64,
}

/// Shareable end-of-day summary of every advisor's performance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminReport {
    pub date: NaiveDate,
    pub rows: Vec<AdminReportRow>,
    pub totals: ReportTotals,
}

/// Shareable end-of-day summary of one advisor's performance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorReport {
    pub date: NaiveDate,
    pub advisor_name: String,
    pub goal: f64,
    pub sales: f64,
    pub tickets: i64,
    pub compliance_pct: f64,
    pub remaining: f64,
}

/// Route function name constants for reports
pub const GET_ADMIN_REPORT: &str = "get_admin_report";
pub const GET_ADVISOR_REPORT: &str = "get_advisor_report";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_report_clone() {
        let report = AdminReport {
            date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            rows: vec![AdminReportRow {
                advisor_name: "Ana".to_string(),
                goal: 70_000.0,
                sales: 42_000.0,
                tickets: 18,
                compliance_pct: 60.0,
            }],
            totals: ReportTotals {
                goal: 100_000.0,
                sales: 60_000.0,
                tickets: 30,
                compliance_pct: 60.0,
            },
        };
        let cloned = report.clone();
        assert_eq!(cloned.rows.len(), 1);
        assert_eq!(cloned.totals.tickets, 30);
    }

    #[test]
    fn test_advisor_report_debug() {
        let report = AdvisorReport {
            date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            advisor_name: "Ana".to_string(),
            goal: 70_000.0,
            sales: 42_000.0,
            tickets: 18,
            compliance_pct: 60.0,
            remaining: 28_000.0,
        };
        let debug_str = format!("{:?}", report);
        assert!(debug_str.contains("AdvisorReport"));
    }

    #[test]
    fn test_const_values() {
        assert_eq!(GET_ADMIN_REPORT, "get_admin_report");
        assert_eq!(GET_ADVISOR_REPORT, "get_advisor_report");
    }
}
