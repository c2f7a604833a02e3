//! File-backed repository implementation.
//!
//! Persists the whole store as a single JSON snapshot. Reads are served
//! from an in-memory copy loaded at startup; every mutation rewrites
//! the snapshot while holding the write lock, so writers are
//! serialized and the file always holds the last write.
//!
//! Suitable for single-process deployments. The snapshot is rewritten
//! in full on each change, which is fine at the scale of one store's
//! daily data.

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::api::{AccessToken, AdvisorId, SessionId, TemplateId};
use crate::db::repository::*;
use crate::models::{
    Advisor, AdvisorAvailability, DailySession, HourlyWeight, SessionTemplate, StoreHourlyMetric,
    WeightEntry,
};

/// Configuration for the file repository.
#[derive(Debug, Clone)]
pub struct FileConfig {
    /// Path of the JSON snapshot file.
    pub path: PathBuf,
}

impl FileConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileConfig { path: path.into() }
    }

    /// Build the configuration from the `METAS_DATA_FILE` environment
    /// variable.
    pub fn from_env() -> RepositoryResult<Self> {
        let path = std::env::var("METAS_DATA_FILE").map_err(|_| {
            RepositoryError::configuration("METAS_DATA_FILE environment variable is not set")
        })?;
        Ok(FileConfig::new(path))
    }
}

fn first_id() -> i64 {
    1
}

/// On-disk snapshot layout.
///
/// Collections are stored as flat vectors so the JSON stays plainly
/// inspectable; lookup structure is rebuilt in memory.
#[derive(Debug, Default, Serialize, Deserialize)]
struct FileData {
    #[serde(default)]
    sessions: Vec<DailySession>,
    #[serde(default)]
    weights: Vec<HourlyWeight>,
    #[serde(default)]
    advisors: Vec<Advisor>,
    #[serde(default)]
    availability: Vec<AdvisorAvailability>,
    #[serde(default)]
    metrics: Vec<StoreHourlyMetric>,
    #[serde(default)]
    templates: Vec<SessionTemplate>,
    #[serde(default = "first_id")]
    next_session_id: i64,
    #[serde(default = "first_id")]
    next_advisor_id: i64,
    #[serde(default = "first_id")]
    next_template_id: i64,
}

/// JSON snapshot repository.
///
/// # Example
/// ```no_run
/// use metas_rust::db::repositories::{FileConfig, FileRepository};
///
/// let repo = FileRepository::open(FileConfig::new("metas-data.json")).unwrap();
/// ```
pub struct FileRepository {
    path: PathBuf,
    data: RwLock<FileData>,
}

impl FileRepository {
    /// Load the snapshot at `config.path`, creating an empty one if the
    /// file does not exist yet.
    pub fn open(config: FileConfig) -> RepositoryResult<Self> {
        let data = Self::load(&config.path)?;
        info!(
            "File repository ready at {} ({} sessions)",
            config.path.display(),
            data.sessions.len()
        );
        Ok(FileRepository {
            path: config.path,
            data: RwLock::new(data),
        })
    }

    fn load(path: &Path) -> RepositoryResult<FileData> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let data: FileData = serde_json::from_str(&content).map_err(|e| {
                RepositoryError::configuration_with_context(
                    format!("Could not parse data file {}: {}", path.display(), e),
                    ErrorContext::default().with_details("corrupt_snapshot"),
                )
            })?;
            Ok(data)
        } else {
            let data = FileData::default();
            Self::persist(path, &data)?;
            info!("Created new data file at {}", path.display());
            Ok(data)
        }
    }

    fn persist(path: &Path, data: &FileData) -> RepositoryResult<()> {
        let json = serde_json::to_string_pretty(data)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Write the current state back to the snapshot file.
    ///
    /// Called with the write lock held so concurrent writers cannot
    /// interleave their snapshots.
    fn save(&self, data: &FileData) -> RepositoryResult<()> {
        Self::persist(&self.path, data)
    }

    fn get_session_in(data: &FileData, session_id: SessionId) -> RepositoryResult<DailySession> {
        data.sessions
            .iter()
            .find(|s| s.id == session_id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(format!("Session {} not found", session_id)))
    }

    fn get_advisor_in(data: &FileData, advisor_id: AdvisorId) -> RepositoryResult<Advisor> {
        data.advisors
            .iter()
            .find(|a| a.id == advisor_id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(format!("Advisor {} not found", advisor_id)))
    }
}

// ==================== Session Repository ====================

#[async_trait]
impl SessionRepository for FileRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        // The snapshot lives in memory once opened; the backend is
        // healthy as long as the process is.
        Ok(true)
    }

    async fn find_session_by_date(
        &self,
        date: NaiveDate,
    ) -> RepositoryResult<Option<DailySession>> {
        let data = self.data.read();
        Ok(data.sessions.iter().find(|s| s.date == date).cloned())
    }

    async fn get_session(&self, session_id: SessionId) -> RepositoryResult<DailySession> {
        let data = self.data.read();
        Self::get_session_in(&data, session_id)
    }

    async fn create_session(
        &self,
        date: NaiveDate,
        total_daily_goal: f64,
    ) -> RepositoryResult<DailySession> {
        let mut data = self.data.write();
        if data.sessions.iter().any(|s| s.date == date) {
            return Err(RepositoryError::validation(format!(
                "A session for {} already exists",
                date
            )));
        }

        let session_id = SessionId(data.next_session_id);
        data.next_session_id += 1;

        let session = DailySession {
            id: session_id,
            date,
            total_daily_goal,
            start_hour: None,
            end_hour: None,
        };
        data.sessions.push(session.clone());
        self.save(&data)?;

        Ok(session)
    }

    async fn update_session_goal(
        &self,
        session_id: SessionId,
        total_daily_goal: f64,
    ) -> RepositoryResult<()> {
        let mut data = self.data.write();
        let session = data
            .sessions
            .iter_mut()
            .find(|s| s.id == session_id)
            .ok_or_else(|| {
                RepositoryError::not_found(format!("Session {} not found", session_id))
            })?;
        session.total_daily_goal = total_daily_goal;
        self.save(&data)
    }

    async fn update_session_hours(
        &self,
        session_id: SessionId,
        start_hour: i32,
        end_hour: i32,
    ) -> RepositoryResult<()> {
        let mut data = self.data.write();
        let session = data
            .sessions
            .iter_mut()
            .find(|s| s.id == session_id)
            .ok_or_else(|| {
                RepositoryError::not_found(format!("Session {} not found", session_id))
            })?;
        session.start_hour = Some(start_hour);
        session.end_hour = Some(end_hour);
        self.save(&data)
    }

    async fn list_sessions_before(
        &self,
        before: NaiveDate,
        limit: usize,
    ) -> RepositoryResult<Vec<DailySession>> {
        let data = self.data.read();
        let mut sessions: Vec<DailySession> = data
            .sessions
            .iter()
            .filter(|s| s.date < before)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.date.cmp(&a.date));
        sessions.truncate(limit);
        Ok(sessions)
    }

    async fn fetch_hourly_weights(
        &self,
        session_id: SessionId,
    ) -> RepositoryResult<Vec<HourlyWeight>> {
        let data = self.data.read();
        let mut weights: Vec<HourlyWeight> = data
            .weights
            .iter()
            .filter(|w| w.session_id == session_id)
            .cloned()
            .collect();
        weights.sort_by_key(|w| w.hour_start);
        Ok(weights)
    }

    async fn upsert_hourly_weights(
        &self,
        session_id: SessionId,
        entries: &[WeightEntry],
    ) -> RepositoryResult<()> {
        let mut data = self.data.write();
        Self::get_session_in(&data, session_id)?;

        for entry in entries {
            match data
                .weights
                .iter_mut()
                .find(|w| w.session_id == session_id && w.hour_start == entry.hour_start)
            {
                Some(existing) => existing.percentage = entry.percentage,
                None => data.weights.push(HourlyWeight {
                    session_id,
                    hour_start: entry.hour_start,
                    percentage: entry.percentage,
                }),
            }
        }
        self.save(&data)
    }

    async fn replace_hourly_weights(
        &self,
        session_id: SessionId,
        entries: &[WeightEntry],
    ) -> RepositoryResult<()> {
        let mut data = self.data.write();
        Self::get_session_in(&data, session_id)?;

        data.weights.retain(|w| w.session_id != session_id);
        for entry in entries {
            data.weights.push(HourlyWeight {
                session_id,
                hour_start: entry.hour_start,
                percentage: entry.percentage,
            });
        }
        self.save(&data)
    }
}

// ==================== Advisor Repository ====================

#[async_trait]
impl AdvisorRepository for FileRepository {
    async fn list_advisors(&self, session_id: SessionId) -> RepositoryResult<Vec<Advisor>> {
        let data = self.data.read();
        let mut advisors: Vec<Advisor> = data
            .advisors
            .iter()
            .filter(|a| a.session_id == session_id)
            .cloned()
            .collect();
        advisors.sort_by_key(|a| a.id);
        Ok(advisors)
    }

    async fn get_advisor(&self, advisor_id: AdvisorId) -> RepositoryResult<Advisor> {
        let data = self.data.read();
        Self::get_advisor_in(&data, advisor_id)
    }

    async fn create_advisor(
        &self,
        session_id: SessionId,
        name: &str,
        access_token: AccessToken,
    ) -> RepositoryResult<Advisor> {
        let mut data = self.data.write();
        Self::get_session_in(&data, session_id)?;

        let advisor_id = AdvisorId(data.next_advisor_id);
        data.next_advisor_id += 1;

        let advisor = Advisor {
            id: advisor_id,
            session_id,
            name: name.to_string(),
            access_token,
            total_sales: 0.0,
            tickets_count: 0,
        };
        data.advisors.push(advisor.clone());
        self.save(&data)?;

        Ok(advisor)
    }

    async fn delete_advisor(&self, advisor_id: AdvisorId) -> RepositoryResult<()> {
        let mut data = self.data.write();
        let before = data.advisors.len();
        data.advisors.retain(|a| a.id != advisor_id);
        if data.advisors.len() == before {
            return Err(RepositoryError::not_found(format!(
                "Advisor {} not found",
                advisor_id
            )));
        }
        data.availability.retain(|r| r.advisor_id != advisor_id);
        self.save(&data)
    }

    async fn find_advisor_by_token(&self, token: &str) -> RepositoryResult<Option<Advisor>> {
        let data = self.data.read();
        Ok(data
            .advisors
            .iter()
            .find(|a| a.access_token.value() == token)
            .cloned())
    }

    async fn update_advisor_sales(
        &self,
        advisor_id: AdvisorId,
        total_sales: f64,
        tickets_count: i64,
    ) -> RepositoryResult<()> {
        let mut data = self.data.write();
        let advisor = data
            .advisors
            .iter_mut()
            .find(|a| a.id == advisor_id)
            .ok_or_else(|| {
                RepositoryError::not_found(format!("Advisor {} not found", advisor_id))
            })?;
        advisor.total_sales = total_sales;
        advisor.tickets_count = tickets_count;
        self.save(&data)
    }

    async fn fetch_advisor_availability(
        &self,
        advisor_id: AdvisorId,
    ) -> RepositoryResult<Vec<AdvisorAvailability>> {
        let data = self.data.read();
        let mut rows: Vec<AdvisorAvailability> = data
            .availability
            .iter()
            .filter(|r| r.advisor_id == advisor_id)
            .copied()
            .collect();
        rows.sort_by_key(|r| r.hour_start);
        Ok(rows)
    }

    async fn fetch_session_availability(
        &self,
        session_id: SessionId,
    ) -> RepositoryResult<Vec<AdvisorAvailability>> {
        let data = self.data.read();
        let roster: Vec<AdvisorId> = data
            .advisors
            .iter()
            .filter(|a| a.session_id == session_id)
            .map(|a| a.id)
            .collect();

        let mut rows: Vec<AdvisorAvailability> = data
            .availability
            .iter()
            .filter(|r| roster.contains(&r.advisor_id))
            .copied()
            .collect();
        rows.sort_by_key(|r| (r.advisor_id, r.hour_start));
        Ok(rows)
    }

    async fn upsert_availability(
        &self,
        advisor_id: AdvisorId,
        hour_start: i32,
        is_active: bool,
    ) -> RepositoryResult<()> {
        let mut data = self.data.write();
        Self::get_advisor_in(&data, advisor_id)?;

        match data
            .availability
            .iter_mut()
            .find(|r| r.advisor_id == advisor_id && r.hour_start == hour_start)
        {
            Some(existing) => existing.is_active = is_active,
            None => data.availability.push(AdvisorAvailability {
                advisor_id,
                hour_start,
                is_active,
            }),
        }
        self.save(&data)
    }
}

// ==================== Metrics Repository ====================

#[async_trait]
impl MetricsRepository for FileRepository {
    async fn fetch_store_metrics(
        &self,
        session_id: SessionId,
    ) -> RepositoryResult<Vec<StoreHourlyMetric>> {
        let data = self.data.read();
        let mut rows: Vec<StoreHourlyMetric> = data
            .metrics
            .iter()
            .filter(|m| m.session_id == session_id)
            .copied()
            .collect();
        rows.sort_by_key(|r| r.hour);
        Ok(rows)
    }

    async fn upsert_store_metrics(&self, rows: &[StoreHourlyMetric]) -> RepositoryResult<()> {
        let mut data = self.data.write();
        for row in rows {
            Self::get_session_in(&data, row.session_id)?;
        }

        for row in rows {
            match data
                .metrics
                .iter_mut()
                .find(|m| m.session_id == row.session_id && m.hour == row.hour)
            {
                Some(existing) => *existing = *row,
                None => data.metrics.push(*row),
            }
        }
        self.save(&data)
    }
}

// ==================== Template Repository ====================

#[async_trait]
impl TemplateRepository for FileRepository {
    async fn list_templates(&self) -> RepositoryResult<Vec<SessionTemplate>> {
        let data = self.data.read();
        let mut templates: Vec<SessionTemplate> = data.templates.to_vec();
        templates.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(templates)
    }

    async fn get_template(&self, template_id: TemplateId) -> RepositoryResult<SessionTemplate> {
        let data = self.data.read();
        data.templates
            .iter()
            .find(|t| t.id == template_id)
            .cloned()
            .ok_or_else(|| {
                RepositoryError::not_found(format!("Template {} not found", template_id))
            })
    }

    async fn find_template_by_name(
        &self,
        name: &str,
    ) -> RepositoryResult<Option<SessionTemplate>> {
        let data = self.data.read();
        Ok(data.templates.iter().find(|t| t.name == name).cloned())
    }

    async fn create_template(
        &self,
        name: &str,
        start_hour: i32,
        end_hour: i32,
        weights: &[WeightEntry],
    ) -> RepositoryResult<SessionTemplate> {
        let mut data = self.data.write();
        let template_id = TemplateId(data.next_template_id);
        data.next_template_id += 1;

        let template = SessionTemplate {
            id: template_id,
            name: name.to_string(),
            start_hour,
            end_hour,
            weights: weights.to_vec(),
        };
        data.templates.push(template.clone());
        self.save(&data)?;

        Ok(template)
    }

    async fn delete_template(&self, template_id: TemplateId) -> RepositoryResult<()> {
        let mut data = self.data.write();
        let before = data.templates.len();
        data.templates.retain(|t| t.id != template_id);
        if data.templates.len() == before {
            return Err(RepositoryError::not_found(format!(
                "Template {} not found",
                template_id
            )));
        }
        self.save(&data)
    }
}
