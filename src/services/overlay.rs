//! Edit overlays for client-buffered changes.
//!
//! Admin clients buffer weight and metric edits locally and commit
//! them with an explicit save. Between edit and save the client keeps
//! refreshing server state in the background, so every value is
//! two-layered: the last-fetched server value with an optional pending
//! edit on top. The merge is `pending edit ?? server value`; a refresh
//! replaces only the server layer and a failed save leaves the edit
//! layer intact for retry.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::api::SessionId;
use crate::models::{HourlyWeight, StoreHourlyMetric, WeightEntry};

/// Pending weight edits over the last-fetched weight rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeightOverlay {
    server: BTreeMap<i32, f64>,
    edits: BTreeMap<i32, f64>,
}

impl WeightOverlay {
    pub fn new() -> Self {
        WeightOverlay::default()
    }

    /// Replaces the server layer with freshly fetched rows.
    ///
    /// Pending edits survive the refresh.
    pub fn refresh(&mut self, rows: &[HourlyWeight]) {
        self.server = rows.iter().map(|w| (w.hour_start, w.percentage)).collect();
    }

    /// Records a local edit for one hour.
    pub fn edit(&mut self, hour: i32, percentage: f64) {
        self.edits.insert(hour, percentage);
    }

    pub fn has_pending_edits(&self) -> bool {
        !self.edits.is_empty()
    }

    /// The effective percentage for an hour: pending edit if present,
    /// else the server value, else 0.
    pub fn percentage_for(&self, hour: i32) -> f64 {
        self.edits
            .get(&hour)
            .or_else(|| self.server.get(&hour))
            .copied()
            .unwrap_or(0.0)
    }

    /// Merged rows, edits layered over server values, ordered by hour.
    pub fn merged(&self) -> Vec<WeightEntry> {
        let mut hours: BTreeMap<i32, f64> = self.server.clone();
        for (&hour, &pct) in &self.edits {
            hours.insert(hour, pct);
        }
        hours
            .into_iter()
            .map(|(hour, pct)| WeightEntry::new(hour, pct))
            .collect()
    }

    /// Rows a save should write: only the edited hours.
    pub fn rows_to_save(&self) -> Vec<WeightEntry> {
        self.edits
            .iter()
            .map(|(&hour, &pct)| WeightEntry::new(hour, pct))
            .collect()
    }

    /// Folds the edits into the server layer after a confirmed save.
    ///
    /// Only call this once the write succeeded; on failure the buffer
    /// stays as-is so the user can retry without re-entering anything.
    pub fn mark_saved(&mut self) {
        let edits = std::mem::take(&mut self.edits);
        self.server.extend(edits);
    }

    /// Drops pending edits without saving them.
    pub fn discard_edits(&mut self) {
        self.edits.clear();
    }
}

/// Partial edit of one store metric row. Absent fields fall through to
/// the server value (or 0 when the server has no row).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricEdit {
    pub traffic: Option<i64>,
    pub tickets: Option<i64>,
    pub last_year_sales: Option<f64>,
    pub current_sales: Option<f64>,
}

impl MetricEdit {
    fn apply(&self, mut row: StoreHourlyMetric) -> StoreHourlyMetric {
        if let Some(traffic) = self.traffic {
            row.traffic = traffic;
        }
        if let Some(tickets) = self.tickets {
            row.tickets = tickets;
        }
        if let Some(last_year) = self.last_year_sales {
            row.last_year_sales = last_year;
        }
        if let Some(current) = self.current_sales {
            row.current_sales = current;
        }
        row
    }

    fn merge_over(&mut self, other: MetricEdit) {
        if other.traffic.is_some() {
            self.traffic = other.traffic;
        }
        if other.tickets.is_some() {
            self.tickets = other.tickets;
        }
        if other.last_year_sales.is_some() {
            self.last_year_sales = other.last_year_sales;
        }
        if other.current_sales.is_some() {
            self.current_sales = other.current_sales;
        }
    }
}

/// Pending metric edits over the last-fetched store metric rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsOverlay {
    server: BTreeMap<i32, StoreHourlyMetric>,
    edits: BTreeMap<i32, MetricEdit>,
}

impl MetricsOverlay {
    pub fn new() -> Self {
        MetricsOverlay::default()
    }

    /// Replaces the server layer with freshly fetched rows. Pending
    /// edits survive the refresh.
    pub fn refresh(&mut self, rows: &[StoreHourlyMetric]) {
        self.server = rows.iter().map(|m| (m.hour, *m)).collect();
    }

    /// Layers a partial edit onto one hour, field by field.
    pub fn edit(&mut self, hour: i32, edit: MetricEdit) {
        self.edits.entry(hour).or_default().merge_over(edit);
    }

    pub fn has_pending_edits(&self) -> bool {
        !self.edits.is_empty()
    }

    /// The effective row for one hour.
    pub fn row_for(&self, session_id: SessionId, hour: i32) -> StoreHourlyMetric {
        let base = self
            .server
            .get(&hour)
            .copied()
            .unwrap_or_else(|| StoreHourlyMetric::empty(session_id, hour));
        match self.edits.get(&hour) {
            Some(edit) => edit.apply(base),
            None => base,
        }
    }

    /// All effective rows, ordered by hour.
    pub fn merged(&self, session_id: SessionId) -> Vec<StoreHourlyMetric> {
        let mut hours: Vec<i32> = self.server.keys().copied().collect();
        for &hour in self.edits.keys() {
            if !self.server.contains_key(&hour) {
                hours.push(hour);
            }
        }
        hours.sort_unstable();
        hours
            .into_iter()
            .map(|hour| self.row_for(session_id, hour))
            .collect()
    }

    /// Rows a save should write: the effective row of every edited hour.
    pub fn rows_to_save(&self, session_id: SessionId) -> Vec<StoreHourlyMetric> {
        self.edits
            .keys()
            .map(|&hour| self.row_for(session_id, hour))
            .collect()
    }

    /// Folds the edits into the server layer after a confirmed save.
    pub fn mark_saved(&mut self, session_id: SessionId) {
        let saved = self.rows_to_save(session_id);
        for row in saved {
            self.server.insert(row.hour, row);
        }
        self.edits.clear();
    }

    /// Drops pending edits without saving them.
    pub fn discard_edits(&mut self) {
        self.edits.clear();
    }
}
