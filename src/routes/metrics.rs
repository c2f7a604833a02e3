use serde::{Deserialize, Serialize};

// =========================================================
// Store metrics table types
// =========================================================

/// One hour of the store metrics table, stored figures plus derived
/// ratios.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyMetricRow {
    pub hour: i32,
    /// Weight percentage configured for the hour (0 if none).
    pub percentage: f64,
    /// Store goal for the hour.
    pub store_goal: f64,
    /// Store goal accumulated from the window start through this hour.
    pub cumulative_goal: f64,
    pub traffic: i64,
    pub tickets: i64,
    /// Tickets per visitor, as a percentage (0 when traffic is 0).
    pub conversion_pct: f64,
    pub last_year_sales: f64,
    pub current_sales: f64,
    /// Year-over-year sales growth percentage (0 when last year is 0).
    pub growth_pct: f64,
    /// Sales per ticket (0 when tickets is 0).
    pub average_ticket: f64,
}

/// Day-level aggregates shown under the metrics table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreTotals {
    /// Sum of hourly store sales.
    pub store_sales: f64,
    /// Sum of advisor-reported sales.
    pub advisor_sales: f64,
    /// Store sales minus advisor sales.
    pub sales_difference: f64,
    pub last_year_sales: f64,
    pub growth_pct: f64,
}

/// Complete metrics table for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsTableData {
    pub rows: Vec<HourlyMetricRow>,
    pub totals: StoreTotals,
}

/// Route function name constant for the metrics table
pub const GET_METRICS_TABLE: &str = "get_metrics_table";
