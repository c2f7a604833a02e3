//! Standalone matrix goal tracker.
//!
//! A freestanding grid of rows (people) by hour slots, independent of
//! the session/advisor model: each cell holds a goal value and a sales
//! value, cells can be marked as breaks, and a row's sales total can
//! be pinned to a manually entered figure. The whole state is plain
//! serde data so a consumer can persist it wholesale, which is how the
//! original kept it between visits.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default slot range for a fresh matrix (9 AM to 6 PM).
pub const DEFAULT_MATRIX_START_HOUR: i32 = 9;
pub const DEFAULT_MATRIX_END_HOUR: i32 = 18;

/// Number of empty rows a fresh matrix starts with.
const INITIAL_ROW_COUNT: usize = 5;

/// Inclusive hour range of the matrix columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: i32,
    pub end: i32,
}

impl TimeRange {
    pub fn hours(&self) -> std::ops::RangeInclusive<i32> {
        self.start..=self.end
    }

    pub fn contains(&self, hour: i32) -> bool {
        hour >= self.start && hour <= self.end
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        TimeRange {
            start: DEFAULT_MATRIX_START_HOUR,
            end: DEFAULT_MATRIX_END_HOUR,
        }
    }
}

/// One person's row in the matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixRow {
    pub id: String,
    pub name: String,
    /// Goal value per hour slot; absent slots count as 0.
    pub values: Vec<(i32, f64)>,
    /// Sales value per hour slot; absent slots count as 0.
    pub sales: Vec<(i32, f64)>,
    /// Hours marked as breaks; their cells are excluded from totals.
    pub breaks: Vec<i32>,
    /// Pinned sales total. While set it replaces the cell sum in every
    /// downstream figure; clearing it reverts to the live sum.
    pub manual_total_sale: Option<f64>,
}

impl MatrixRow {
    fn new() -> Self {
        MatrixRow {
            id: Uuid::new_v4().to_string(),
            name: String::new(),
            values: Vec::new(),
            sales: Vec::new(),
            breaks: Vec::new(),
            manual_total_sale: None,
        }
    }

    pub fn is_break(&self, hour: i32) -> bool {
        self.breaks.contains(&hour)
    }

    pub fn value_at(&self, hour: i32) -> f64 {
        lookup(&self.values, hour)
    }

    pub fn sale_at(&self, hour: i32) -> f64 {
        lookup(&self.sales, hour)
    }

    /// Goal total over non-break cells in the range.
    pub fn goal_total(&self, range: TimeRange) -> f64 {
        range
            .hours()
            .filter(|&h| !self.is_break(h))
            .map(|h| self.value_at(h))
            .sum()
    }

    /// Live sales sum over non-break cells, ignoring any override.
    pub fn computed_sales_total(&self, range: TimeRange) -> f64 {
        range
            .hours()
            .filter(|&h| !self.is_break(h))
            .map(|h| self.sale_at(h))
            .sum()
    }

    /// Effective sales total: the manual override when set, else the
    /// live cell sum.
    pub fn sales_total(&self, range: TimeRange) -> f64 {
        self.manual_total_sale
            .unwrap_or_else(|| self.computed_sales_total(range))
    }
}

fn lookup(cells: &[(i32, f64)], hour: i32) -> f64 {
    cells
        .iter()
        .find(|(h, _)| *h == hour)
        .map(|(_, v)| *v)
        .unwrap_or(0.0)
}

fn store(cells: &mut Vec<(i32, f64)>, hour: i32, value: f64) {
    match cells.iter_mut().find(|(h, _)| *h == hour) {
        Some(cell) => cell.1 = value,
        None => cells.push((hour, value)),
    }
}

/// Aggregate figures derived from the matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixTotals {
    /// Goal total per row, keyed by row id.
    pub row_goals: Vec<(String, f64)>,
    /// Effective sales total per row (override-aware), keyed by row id.
    pub row_sales: Vec<(String, f64)>,
    /// Goal total per hour column over non-break cells. Column totals
    /// stay cell-derived; the row override only affects row figures.
    pub column_goals: Vec<(i32, f64)>,
    pub grand_goal: f64,
    /// Sum of effective row sales totals.
    pub grand_sales: f64,
    /// Grand goal minus grand sales: positive is a shortfall, negative
    /// a surplus.
    pub difference: f64,
}

/// Full state of the matrix tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixState {
    pub time_range: TimeRange,
    pub rows: Vec<MatrixRow>,
}

impl MatrixState {
    pub fn new() -> Self {
        MatrixState {
            time_range: TimeRange::default(),
            rows: (0..INITIAL_ROW_COUNT).map(|_| MatrixRow::new()).collect(),
        }
    }

    pub fn add_row(&mut self) -> &MatrixRow {
        self.rows.push(MatrixRow::new());
        self.rows.last().expect("row just pushed")
    }

    pub fn delete_row(&mut self, row_id: &str) {
        self.rows.retain(|r| r.id != row_id);
    }

    pub fn update_row_name(&mut self, row_id: &str, name: &str) {
        if let Some(row) = self.row_mut(row_id) {
            row.name = name.to_string();
        }
    }

    pub fn update_value(&mut self, row_id: &str, hour: i32, value: f64) {
        if let Some(row) = self.row_mut(row_id) {
            store(&mut row.values, hour, value);
        }
    }

    pub fn update_sale(&mut self, row_id: &str, hour: i32, value: f64) {
        if let Some(row) = self.row_mut(row_id) {
            store(&mut row.sales, hour, value);
        }
    }

    pub fn update_time_range(&mut self, start: i32, end: i32) {
        self.time_range = TimeRange { start, end };
    }

    /// Pins a row's sales total to a manual figure.
    pub fn set_manual_total_sale(&mut self, row_id: &str, total: f64) {
        if let Some(row) = self.row_mut(row_id) {
            row.manual_total_sale = Some(total);
        }
    }

    /// Clears a row's pin; its total reverts to the live cell sum.
    pub fn clear_manual_total_sale(&mut self, row_id: &str) {
        if let Some(row) = self.row_mut(row_id) {
            row.manual_total_sale = None;
        }
    }

    pub fn toggle_cell_break(&mut self, row_id: &str, hour: i32) {
        if let Some(row) = self.row_mut(row_id) {
            if let Some(pos) = row.breaks.iter().position(|&h| h == hour) {
                row.breaks.remove(pos);
            } else {
                row.breaks.push(hour);
            }
        }
    }

    /// Toggles a whole column's break state: if every row already has
    /// the break it is removed everywhere, otherwise it is added to
    /// the rows missing it.
    pub fn toggle_column_break(&mut self, hour: i32) {
        let all_have_break = !self.rows.is_empty() && self.rows.iter().all(|r| r.is_break(hour));
        for row in &mut self.rows {
            if all_have_break {
                row.breaks.retain(|&h| h != hour);
            } else if !row.is_break(hour) {
                row.breaks.push(hour);
            }
        }
    }

    /// Computes all aggregate figures for the current state.
    pub fn totals(&self) -> MatrixTotals {
        let range = self.time_range;

        let row_goals: Vec<(String, f64)> = self
            .rows
            .iter()
            .map(|r| (r.id.clone(), r.goal_total(range)))
            .collect();
        let row_sales: Vec<(String, f64)> = self
            .rows
            .iter()
            .map(|r| (r.id.clone(), r.sales_total(range)))
            .collect();

        let column_goals: Vec<(i32, f64)> = range
            .hours()
            .map(|hour| {
                let total = self
                    .rows
                    .iter()
                    .filter(|r| !r.is_break(hour))
                    .map(|r| r.value_at(hour))
                    .sum();
                (hour, total)
            })
            .collect();

        let grand_goal: f64 = row_goals.iter().map(|(_, v)| v).sum();
        let grand_sales: f64 = row_sales.iter().map(|(_, v)| v).sum();

        MatrixTotals {
            row_goals,
            row_sales,
            column_goals,
            grand_goal,
            grand_sales,
            difference: grand_goal - grand_sales,
        }
    }

    fn row_mut(&mut self, row_id: &str) -> Option<&mut MatrixRow> {
        self.rows.iter_mut().find(|r| r.id == row_id)
    }
}

impl Default for MatrixState {
    fn default() -> Self {
        MatrixState::new()
    }
}
