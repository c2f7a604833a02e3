//! In-memory local repository implementation.
//!
//! This module provides a local implementation of all repository traits
//! suitable for unit testing and local development. All data is stored
//! in memory using HashMap structures, providing fast, deterministic,
//! and isolated execution.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::api::{AccessToken, AdvisorId, SessionId, TemplateId};
use crate::db::repository::*;
use crate::models::{
    Advisor, AdvisorAvailability, DailySession, HourlyWeight, SessionTemplate, StoreHourlyMetric,
    WeightEntry,
};

/// In-memory local repository.
///
/// This implementation stores all data in memory using HashMaps,
/// making it ideal for unit tests and local development that need
/// isolation and speed.
///
/// # Example
/// ```no_run
/// use metas_rust::db::repositories::LocalRepository;
/// use metas_rust::db::repository::SessionRepository;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let repo = LocalRepository::new();
///     let date = chrono::NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
///     let session = repo.create_session(date, 50_000.0).await?;
///     assert_eq!(session.total_daily_goal, 50_000.0);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    sessions: HashMap<SessionId, DailySession>,
    // Weight percentage per (session, hour)
    weights: HashMap<(SessionId, i32), f64>,

    // Roster data
    advisors: HashMap<AdvisorId, Advisor>,
    availability: HashMap<(AdvisorId, i32), bool>,

    // Store figures per (session, hour)
    metrics: HashMap<(SessionId, i32), StoreHourlyMetric>,

    templates: HashMap<TemplateId, SessionTemplate>,

    // ID counters
    next_session_id: SessionId,
    next_advisor_id: AdvisorId,
    next_template_id: TemplateId,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            sessions: HashMap::new(),
            weights: HashMap::new(),
            advisors: HashMap::new(),
            availability: HashMap::new(),
            metrics: HashMap::new(),
            templates: HashMap::new(),
            next_session_id: SessionId(1),
            next_advisor_id: AdvisorId(1),
            next_template_id: TemplateId(1),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Add a session to the repository.
    ///
    /// This is a helper method for setting up data. The session will be
    /// assigned an ID automatically.
    ///
    /// # Arguments
    /// * `session` - Session to add (id will be overwritten)
    ///
    /// # Returns
    /// The ID assigned to the session
    pub fn store_session_impl(&self, mut session: DailySession) -> SessionId {
        let mut data = self.data.write().unwrap();
        let session_id = data.next_session_id;
        data.next_session_id = SessionId(session_id.0 + 1);

        session.id = session_id;
        data.sessions.insert(session_id, session);

        session_id
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        let mut data = self.data.write().unwrap();
        data.is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write().unwrap();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    /// Get the number of sessions stored.
    pub fn session_count(&self) -> usize {
        self.data.read().unwrap().sessions.len()
    }

    /// Check if a session exists.
    pub fn has_session(&self, session_id: SessionId) -> bool {
        self.data.read().unwrap().sessions.contains_key(&session_id)
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self) -> RepositoryResult<()> {
        let data = self.data.read().unwrap();
        if !data.is_healthy {
            return Err(RepositoryError::connection("Storage is not healthy"));
        }
        Ok(())
    }

    /// Helper to get a session or return NotFound error.
    fn get_session_impl(&self, session_id: SessionId) -> RepositoryResult<DailySession> {
        let data = self.data.read().unwrap();
        data.sessions
            .get(&session_id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(format!("Session {} not found", session_id)))
    }

    /// Helper to get an advisor or return NotFound error.
    fn get_advisor_impl(&self, advisor_id: AdvisorId) -> RepositoryResult<Advisor> {
        let data = self.data.read().unwrap();
        data.advisors
            .get(&advisor_id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(format!("Advisor {} not found", advisor_id)))
    }

    /// Helper to get a template or return NotFound error.
    fn get_template_impl(&self, template_id: TemplateId) -> RepositoryResult<SessionTemplate> {
        let data = self.data.read().unwrap();
        data.templates.get(&template_id).cloned().ok_or_else(|| {
            RepositoryError::not_found(format!("Template {} not found", template_id))
        })
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

// ==================== Session Repository ====================

#[async_trait]
impl SessionRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        let data = self.data.read().unwrap();
        Ok(data.is_healthy)
    }

    async fn find_session_by_date(
        &self,
        date: NaiveDate,
    ) -> RepositoryResult<Option<DailySession>> {
        self.check_health()?;

        let data = self.data.read().unwrap();
        Ok(data.sessions.values().find(|s| s.date == date).cloned())
    }

    async fn get_session(&self, session_id: SessionId) -> RepositoryResult<DailySession> {
        self.check_health()?;
        self.get_session_impl(session_id)
    }

    async fn create_session(
        &self,
        date: NaiveDate,
        total_daily_goal: f64,
    ) -> RepositoryResult<DailySession> {
        self.check_health()?;

        let mut data = self.data.write().unwrap();
        if data.sessions.values().any(|s| s.date == date) {
            return Err(RepositoryError::validation(format!(
                "A session for {} already exists",
                date
            )));
        }

        let session_id = data.next_session_id;
        data.next_session_id = SessionId(session_id.0 + 1);

        let session = DailySession {
            id: session_id,
            date,
            total_daily_goal,
            start_hour: None,
            end_hour: None,
        };
        data.sessions.insert(session_id, session.clone());

        Ok(session)
    }

    async fn update_session_goal(
        &self,
        session_id: SessionId,
        total_daily_goal: f64,
    ) -> RepositoryResult<()> {
        self.check_health()?;

        let mut data = self.data.write().unwrap();
        let session = data.sessions.get_mut(&session_id).ok_or_else(|| {
            RepositoryError::not_found(format!("Session {} not found", session_id))
        })?;
        session.total_daily_goal = total_daily_goal;
        Ok(())
    }

    async fn update_session_hours(
        &self,
        session_id: SessionId,
        start_hour: i32,
        end_hour: i32,
    ) -> RepositoryResult<()> {
        self.check_health()?;

        let mut data = self.data.write().unwrap();
        let session = data.sessions.get_mut(&session_id).ok_or_else(|| {
            RepositoryError::not_found(format!("Session {} not found", session_id))
        })?;
        session.start_hour = Some(start_hour);
        session.end_hour = Some(end_hour);
        Ok(())
    }

    async fn list_sessions_before(
        &self,
        before: NaiveDate,
        limit: usize,
    ) -> RepositoryResult<Vec<DailySession>> {
        self.check_health()?;

        let data = self.data.read().unwrap();
        let mut sessions: Vec<DailySession> = data
            .sessions
            .values()
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
        self.check_health()?;

        let data = self.data.read().unwrap();
        let mut weights: Vec<HourlyWeight> = data
            .weights
            .iter()
            .filter(|((sid, _), _)| *sid == session_id)
            .map(|((_, hour), percentage)| HourlyWeight {
                session_id,
                hour_start: *hour,
                percentage: *percentage,
            })
            .collect();
        weights.sort_by_key(|w| w.hour_start);
        Ok(weights)
    }

    async fn upsert_hourly_weights(
        &self,
        session_id: SessionId,
        entries: &[WeightEntry],
    ) -> RepositoryResult<()> {
        self.check_health()?;
        self.get_session_impl(session_id)?;

        let mut data = self.data.write().unwrap();
        for entry in entries {
            data.weights
                .insert((session_id, entry.hour_start), entry.percentage);
        }
        Ok(())
    }

    async fn replace_hourly_weights(
        &self,
        session_id: SessionId,
        entries: &[WeightEntry],
    ) -> RepositoryResult<()> {
        self.check_health()?;
        self.get_session_impl(session_id)?;

        let mut data = self.data.write().unwrap();
        data.weights.retain(|(sid, _), _| *sid != session_id);
        for entry in entries {
            data.weights
                .insert((session_id, entry.hour_start), entry.percentage);
        }
        Ok(())
    }
}

// ==================== Advisor Repository ====================

#[async_trait]
impl AdvisorRepository for LocalRepository {
    async fn list_advisors(&self, session_id: SessionId) -> RepositoryResult<Vec<Advisor>> {
        self.check_health()?;

        let data = self.data.read().unwrap();
        let mut advisors: Vec<Advisor> = data
            .advisors
            .values()
            .filter(|a| a.session_id == session_id)
            .cloned()
            .collect();
        advisors.sort_by_key(|a| a.id);
        Ok(advisors)
    }

    async fn get_advisor(&self, advisor_id: AdvisorId) -> RepositoryResult<Advisor> {
        self.check_health()?;
        self.get_advisor_impl(advisor_id)
    }

    async fn create_advisor(
        &self,
        session_id: SessionId,
        name: &str,
        access_token: AccessToken,
    ) -> RepositoryResult<Advisor> {
        self.check_health()?;
        self.get_session_impl(session_id)?;

        let mut data = self.data.write().unwrap();
        let advisor_id = data.next_advisor_id;
        data.next_advisor_id = AdvisorId(advisor_id.0 + 1);

        let advisor = Advisor {
            id: advisor_id,
            session_id,
            name: name.to_string(),
            access_token,
            total_sales: 0.0,
            tickets_count: 0,
        };
        data.advisors.insert(advisor_id, advisor.clone());

        Ok(advisor)
    }

    async fn delete_advisor(&self, advisor_id: AdvisorId) -> RepositoryResult<()> {
        self.check_health()?;

        let mut data = self.data.write().unwrap();
        if data.advisors.remove(&advisor_id).is_none() {
            return Err(RepositoryError::not_found(format!(
                "Advisor {} not found",
                advisor_id
            )));
        }
        data.availability.retain(|(aid, _), _| *aid != advisor_id);
        Ok(())
    }

    async fn find_advisor_by_token(&self, token: &str) -> RepositoryResult<Option<Advisor>> {
        self.check_health()?;

        let data = self.data.read().unwrap();
        Ok(data
            .advisors
            .values()
            .find(|a| a.access_token.value() == token)
            .cloned())
    }

    async fn update_advisor_sales(
        &self,
        advisor_id: AdvisorId,
        total_sales: f64,
        tickets_count: i64,
    ) -> RepositoryResult<()> {
        self.check_health()?;

        let mut data = self.data.write().unwrap();
        let advisor = data.advisors.get_mut(&advisor_id).ok_or_else(|| {
            RepositoryError::not_found(format!("Advisor {} not found", advisor_id))
        })?;
        advisor.total_sales = total_sales;
        advisor.tickets_count = tickets_count;
        Ok(())
    }

    async fn fetch_advisor_availability(
        &self,
        advisor_id: AdvisorId,
    ) -> RepositoryResult<Vec<AdvisorAvailability>> {
        self.check_health()?;

        let data = self.data.read().unwrap();
        let mut rows: Vec<AdvisorAvailability> = data
            .availability
            .iter()
            .filter(|((aid, _), _)| *aid == advisor_id)
            .map(|((_, hour), is_active)| AdvisorAvailability {
                advisor_id,
                hour_start: *hour,
                is_active: *is_active,
            })
            .collect();
        rows.sort_by_key(|r| r.hour_start);
        Ok(rows)
    }

    async fn fetch_session_availability(
        &self,
        session_id: SessionId,
    ) -> RepositoryResult<Vec<AdvisorAvailability>> {
        self.check_health()?;

        let data = self.data.read().unwrap();
        let roster: Vec<AdvisorId> = data
            .advisors
            .values()
            .filter(|a| a.session_id == session_id)
            .map(|a| a.id)
            .collect();

        let mut rows: Vec<AdvisorAvailability> = data
            .availability
            .iter()
            .filter(|((aid, _), _)| roster.contains(aid))
            .map(|((aid, hour), is_active)| AdvisorAvailability {
                advisor_id: *aid,
                hour_start: *hour,
                is_active: *is_active,
            })
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
        self.check_health()?;
        self.get_advisor_impl(advisor_id)?;

        let mut data = self.data.write().unwrap();
        data.availability.insert((advisor_id, hour_start), is_active);
        Ok(())
    }
}

// ==================== Metrics Repository ====================

#[async_trait]
impl MetricsRepository for LocalRepository {
    async fn fetch_store_metrics(
        &self,
        session_id: SessionId,
    ) -> RepositoryResult<Vec<StoreHourlyMetric>> {
        self.check_health()?;

        let data = self.data.read().unwrap();
        let mut rows: Vec<StoreHourlyMetric> = data
            .metrics
            .iter()
            .filter(|((sid, _), _)| *sid == session_id)
            .map(|(_, row)| *row)
            .collect();
        rows.sort_by_key(|r| r.hour);
        Ok(rows)
    }

    async fn upsert_store_metrics(&self, rows: &[StoreHourlyMetric]) -> RepositoryResult<()> {
        self.check_health()?;

        for row in rows {
            self.get_session_impl(row.session_id)?;
        }

        let mut data = self.data.write().unwrap();
        for row in rows {
            data.metrics.insert((row.session_id, row.hour), *row);
        }
        Ok(())
    }
}

// ==================== Template Repository ====================

#[async_trait]
impl TemplateRepository for LocalRepository {
    async fn list_templates(&self) -> RepositoryResult<Vec<SessionTemplate>> {
        self.check_health()?;

        let data = self.data.read().unwrap();
        let mut templates: Vec<SessionTemplate> = data.templates.values().cloned().collect();
        templates.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(templates)
    }

    async fn get_template(&self, template_id: TemplateId) -> RepositoryResult<SessionTemplate> {
        self.check_health()?;
        self.get_template_impl(template_id)
    }

    async fn find_template_by_name(
        &self,
        name: &str,
    ) -> RepositoryResult<Option<SessionTemplate>> {
        self.check_health()?;

        let data = self.data.read().unwrap();
        Ok(data.templates.values().find(|t| t.name == name).cloned())
    }

    async fn create_template(
        &self,
        name: &str,
        start_hour: i32,
        end_hour: i32,
        weights: &[WeightEntry],
    ) -> RepositoryResult<SessionTemplate> {
        self.check_health()?;

        let mut data = self.data.write().unwrap();
        let template_id = data.next_template_id;
        data.next_template_id = TemplateId(template_id.0 + 1);

        let template = SessionTemplate {
            id: template_id,
            name: name.to_string(),
            start_hour,
            end_hour,
            weights: weights.to_vec(),
        };
        data.templates.insert(template_id, template.clone());

        Ok(template)
    }

    async fn delete_template(&self, template_id: TemplateId) -> RepositoryResult<()> {
        self.check_health()?;

        let mut data = self.data.write().unwrap();
        if data.templates.remove(&template_id).is_none() {
            return Err(RepositoryError::not_found(format!(
                "Template {} not found",
                template_id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let repo = LocalRepository::new();
        assert!(repo.health_check().await.unwrap());

        repo.set_healthy(false);
        assert!(!repo.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_unhealthy_repository_rejects_operations() {
        let repo = LocalRepository::new();
        repo.set_healthy(false);

        let result = repo.create_session(date(2024, 6, 3), 1000.0).await;
        assert!(matches!(
            result,
            Err(RepositoryError::ConnectionError { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_and_find_session() {
        let repo = LocalRepository::new();
        let created = repo.create_session(date(2024, 6, 3), 50_000.0).await.unwrap();

        let found = repo
            .find_session_by_date(date(2024, 6, 3))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.total_daily_goal, 50_000.0);
        assert_eq!(found.start_hour, None);

        let missing = repo.find_session_by_date(date(2024, 6, 4)).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_create_session_duplicate_date_rejected() {
        let repo = LocalRepository::new();
        repo.create_session(date(2024, 6, 3), 1000.0).await.unwrap();

        let result = repo.create_session(date(2024, 6, 3), 2000.0).await;
        assert!(matches!(
            result,
            Err(RepositoryError::ValidationError { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_goal_and_hours() {
        let repo = LocalRepository::new();
        let session = repo.create_session(date(2024, 6, 3), 0.0).await.unwrap();

        repo.update_session_goal(session.id, 75_000.0).await.unwrap();
        repo.update_session_hours(session.id, 10, 20).await.unwrap();

        let session = repo.get_session(session.id).await.unwrap();
        assert_eq!(session.total_daily_goal, 75_000.0);
        assert_eq!(session.start_hour, Some(10));
        assert_eq!(session.end_hour, Some(20));
    }

    #[tokio::test]
    async fn test_list_sessions_before_is_recent_first() {
        let repo = LocalRepository::new();
        repo.create_session(date(2024, 6, 1), 1.0).await.unwrap();
        repo.create_session(date(2024, 6, 2), 2.0).await.unwrap();
        repo.create_session(date(2024, 6, 3), 3.0).await.unwrap();

        let sessions = repo
            .list_sessions_before(date(2024, 6, 3), 10)
            .await
            .unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].date, date(2024, 6, 2));
        assert_eq!(sessions[1].date, date(2024, 6, 1));

        let limited = repo
            .list_sessions_before(date(2024, 6, 3), 1)
            .await
            .unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[tokio::test]
    async fn test_upsert_and_replace_weights() {
        let repo = LocalRepository::new();
        let session = repo.create_session(date(2024, 6, 3), 0.0).await.unwrap();

        repo.upsert_hourly_weights(
            session.id,
            &[WeightEntry::new(9, 60.0), WeightEntry::new(10, 40.0)],
        )
        .await
        .unwrap();

        // Upsert overwrites only the hours it names.
        repo.upsert_hourly_weights(session.id, &[WeightEntry::new(9, 50.0)])
            .await
            .unwrap();

        let weights = repo.fetch_hourly_weights(session.id).await.unwrap();
        assert_eq!(weights.len(), 2);
        assert_eq!(weights[0].hour_start, 9);
        assert_eq!(weights[0].percentage, 50.0);
        assert_eq!(weights[1].percentage, 40.0);

        // Replace drops rows for hours not named.
        repo.replace_hourly_weights(session.id, &[WeightEntry::new(12, 100.0)])
            .await
            .unwrap();

        let weights = repo.fetch_hourly_weights(session.id).await.unwrap();
        assert_eq!(weights.len(), 1);
        assert_eq!(weights[0].hour_start, 12);
    }

    #[tokio::test]
    async fn test_advisor_roster_and_token_lookup() {
        let repo = LocalRepository::new();
        let session = repo.create_session(date(2024, 6, 3), 0.0).await.unwrap();

        let ana = repo
            .create_advisor(session.id, "Ana", AccessToken::new("tok-ana"))
            .await
            .unwrap();
        repo.create_advisor(session.id, "Bruno", AccessToken::new("tok-bruno"))
            .await
            .unwrap();

        let advisors = repo.list_advisors(session.id).await.unwrap();
        assert_eq!(advisors.len(), 2);
        assert_eq!(advisors[0].name, "Ana");
        assert_eq!(advisors[0].total_sales, 0.0);

        let found = repo.find_advisor_by_token("tok-ana").await.unwrap().unwrap();
        assert_eq!(found.id, ana.id);

        let missing = repo.find_advisor_by_token("bogus").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_delete_advisor_removes_availability() {
        let repo = LocalRepository::new();
        let session = repo.create_session(date(2024, 6, 3), 0.0).await.unwrap();
        let advisor = repo
            .create_advisor(session.id, "Ana", AccessToken::generate())
            .await
            .unwrap();

        repo.upsert_availability(advisor.id, 9, false).await.unwrap();
        repo.delete_advisor(advisor.id).await.unwrap();

        assert!(repo.list_advisors(session.id).await.unwrap().is_empty());
        assert!(repo
            .fetch_session_availability(session.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_update_advisor_sales() {
        let repo = LocalRepository::new();
        let session = repo.create_session(date(2024, 6, 3), 0.0).await.unwrap();
        let advisor = repo
            .create_advisor(session.id, "Ana", AccessToken::generate())
            .await
            .unwrap();

        repo.update_advisor_sales(advisor.id, 1234.5, 7).await.unwrap();

        let advisor = repo.get_advisor(advisor.id).await.unwrap();
        assert_eq!(advisor.total_sales, 1234.5);
        assert_eq!(advisor.tickets_count, 7);
    }

    #[tokio::test]
    async fn test_availability_upsert_overwrites() {
        let repo = LocalRepository::new();
        let session = repo.create_session(date(2024, 6, 3), 0.0).await.unwrap();
        let advisor = repo
            .create_advisor(session.id, "Ana", AccessToken::generate())
            .await
            .unwrap();

        repo.upsert_availability(advisor.id, 9, false).await.unwrap();
        repo.upsert_availability(advisor.id, 9, true).await.unwrap();

        let rows = repo.fetch_advisor_availability(advisor.id).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_active);
    }

    #[tokio::test]
    async fn test_metrics_upsert_overwrites_row() {
        let repo = LocalRepository::new();
        let session = repo.create_session(date(2024, 6, 3), 0.0).await.unwrap();

        let mut row = StoreHourlyMetric::empty(session.id, 9);
        row.traffic = 10;
        repo.upsert_store_metrics(&[row]).await.unwrap();

        row.traffic = 25;
        row.current_sales = 400.0;
        repo.upsert_store_metrics(&[row]).await.unwrap();

        let rows = repo.fetch_store_metrics(session.id).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].traffic, 25);
        assert_eq!(rows[0].current_sales, 400.0);
    }

    #[tokio::test]
    async fn test_template_crud() {
        let repo = LocalRepository::new();

        let template = repo
            .create_template("Weekday", 9, 21, &[WeightEntry::new(9, 100.0)])
            .await
            .unwrap();

        let listed = repo.list_templates().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Weekday");

        let by_name = repo.find_template_by_name("Weekday").await.unwrap();
        assert!(by_name.is_some());

        repo.delete_template(template.id).await.unwrap();
        assert!(repo.list_templates().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_not_found_errors() {
        let repo = LocalRepository::new();

        let result = repo.get_session(SessionId::new(999)).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));

        let result = repo.get_advisor(AdvisorId::new(999)).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));

        let result = repo.delete_template(TemplateId::new(999)).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_clear_resets_data() {
        let repo = LocalRepository::new();
        repo.create_session(date(2024, 6, 3), 1000.0).await.unwrap();
        assert_eq!(repo.session_count(), 1);

        repo.clear();
        assert_eq!(repo.session_count(), 0);

        // IDs restart after a clear.
        let session = repo.create_session(date(2024, 6, 4), 0.0).await.unwrap();
        assert_eq!(session.id, SessionId::new(1));
    }
}
