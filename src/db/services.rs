//! High-level database service layer.
//!
//! Repository-agnostic operations that work with any implementation of
//! the repository traits. Business rules that must hold regardless of
//! the storage backend live here: session bootstrap and history
//! seeding, write-boundary validation, the duplicate-name guard, token
//! minting and resolution, and the consistent
//! `Error {action} {entity}: {detail}` labelling of failures.
//!
//! Handlers and other callers use these functions rather than the
//! repository traits directly; see the module diagram in [`crate::db`].

use chrono::{Datelike, NaiveDate};
use tracing::{info, warn};

use super::models::{
    AccessToken, Advisor, AdvisorAvailability, AdvisorId, DailySession, HourlyWeight, SessionId,
    SessionTemplate, StoreHourlyMetric, TemplateId, WeightEntry,
};
use super::repository::{FullRepository, RepositoryError, RepositoryResult};
use crate::routes::advisor_view::AdvisorContext;
use crate::services::allocation::SessionSnapshot;
use crate::services::validation::{is_duplicate_name, weight_warnings, ConfigWarning};

/// How many prior sessions the bootstrap looks back through when
/// seeding a new date's configuration.
const BOOTSTRAP_LOOKBACK: usize = 30;

// ==================== Health & Connection ====================

/// Check if the storage backend is healthy.
pub async fn health_check<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Session Operations ====================

/// Fetch the session for a date, creating and seeding it on first access.
///
/// A new session starts with a zero goal and no hour range, then gets
/// its hours and weights copied from a prior session: preferentially
/// one falling on the same weekday within the last
/// [`BOOTSTRAP_LOOKBACK`] sessions, else the most recent prior session,
/// else it stays unconfigured. Seeding is best-effort; a failure while
/// copying leaves an unconfigured session rather than failing the
/// request.
pub async fn get_or_create_session<R: FullRepository + ?Sized>(
    repo: &R,
    date: NaiveDate,
) -> RepositoryResult<DailySession> {
    let existing = repo
        .find_session_by_date(date)
        .await
        .map_err(|e| e.labeled("fetching", "session"))?;
    if let Some(session) = existing {
        return Ok(session);
    }

    info!("Service layer: creating session for {}", date);
    let session = repo
        .create_session(date, 0.0)
        .await
        .map_err(|e| e.labeled("creating", "session"))?;

    match seed_session_from_history(repo, &session).await {
        Ok(true) => repo
            .get_session(session.id)
            .await
            .map_err(|e| e.labeled("fetching", "session")),
        Ok(false) => Ok(session),
        Err(e) => {
            warn!(
                "Service layer: failed to seed session {} from history: {}",
                session.id, e
            );
            Ok(session)
        }
    }
}

/// Copies hour range and weights from the best prior session, if any.
///
/// Returns whether anything was copied.
async fn seed_session_from_history<R: FullRepository + ?Sized>(
    repo: &R,
    session: &DailySession,
) -> RepositoryResult<bool> {
    let history = repo
        .list_sessions_before(session.date, BOOTSTRAP_LOOKBACK)
        .await?;

    // Same weekday wins; history is most-recent-first, so position 0
    // of either filter is the freshest match.
    let source = history
        .iter()
        .find(|s| s.date.weekday() == session.date.weekday())
        .or_else(|| history.first());

    let Some(source) = source else {
        info!(
            "Service layer: no prior session to seed {} from",
            session.date
        );
        return Ok(false);
    };

    info!(
        "Service layer: seeding session {} from {} ({})",
        session.date,
        source.date,
        source.date.weekday()
    );

    let mut copied = false;
    if let (Some(start), Some(end)) = (source.start_hour, source.end_hour) {
        repo.update_session_hours(session.id, start, end).await?;
        copied = true;
    }

    let weights = repo.fetch_hourly_weights(source.id).await?;
    if !weights.is_empty() {
        let entries: Vec<WeightEntry> = weights.iter().map(WeightEntry::from).collect();
        repo.upsert_hourly_weights(session.id, &entries).await?;
        copied = true;
    }

    Ok(copied)
}

/// Overwrite a session's total daily goal.
pub async fn update_session_goal<R: FullRepository + ?Sized>(
    repo: &R,
    session_id: SessionId,
    total_daily_goal: f64,
) -> RepositoryResult<()> {
    if !total_daily_goal.is_finite() || total_daily_goal < 0.0 {
        return Err(
            RepositoryError::validation("Daily goal must be a non-negative amount")
                .labeled("updating", "goal"),
        );
    }

    info!(
        "Service layer: session {} goal set to {}",
        session_id, total_daily_goal
    );
    repo.update_session_goal(session_id, total_daily_goal)
        .await
        .map_err(|e| e.labeled("updating", "goal"))
}

/// Overwrite a session's operating-hour range.
pub async fn update_session_hours<R: FullRepository + ?Sized>(
    repo: &R,
    session_id: SessionId,
    start_hour: i32,
    end_hour: i32,
) -> RepositoryResult<()> {
    if !(0..=23).contains(&start_hour) || !(0..=23).contains(&end_hour) {
        return Err(
            RepositoryError::validation("Hours must be between 0 and 23")
                .labeled("updating", "hours"),
        );
    }
    if start_hour >= end_hour {
        return Err(
            RepositoryError::validation("Start hour must be before end hour")
                .labeled("updating", "hours"),
        );
    }

    info!(
        "Service layer: session {} hours set to {}-{}",
        session_id, start_hour, end_hour
    );
    repo.update_session_hours(session_id, start_hour, end_hour)
        .await
        .map_err(|e| e.labeled("updating", "hours"))
}

// ==================== Weight Operations ====================

/// Fetch a session's weight rows, ordered by hour.
pub async fn get_hourly_weights<R: FullRepository + ?Sized>(
    repo: &R,
    session_id: SessionId,
) -> RepositoryResult<Vec<HourlyWeight>> {
    repo.fetch_hourly_weights(session_id)
        .await
        .map_err(|e| e.labeled("fetching", "weights"))
}

/// Upsert weight rows and report configuration warnings.
///
/// The warnings (weight sum off 100, stale out-of-window rows) are
/// advisory; the write goes through regardless.
pub async fn upsert_hourly_weights<R: FullRepository + ?Sized>(
    repo: &R,
    session_id: SessionId,
    entries: &[WeightEntry],
) -> RepositoryResult<Vec<ConfigWarning>> {
    for entry in entries {
        if !(0.0..=100.0).contains(&entry.percentage) || !entry.percentage.is_finite() {
            return Err(RepositoryError::validation(format!(
                "Percentage for hour {} must be between 0 and 100",
                entry.hour_start
            ))
            .labeled("updating", "weights"));
        }
    }

    info!(
        "Service layer: upserting {} weight rows for session {}",
        entries.len(),
        session_id
    );
    repo.upsert_hourly_weights(session_id, entries)
        .await
        .map_err(|e| e.labeled("updating", "weights"))?;

    let session = repo
        .get_session(session_id)
        .await
        .map_err(|e| e.labeled("fetching", "session"))?;
    let weights = get_hourly_weights(repo, session_id).await?;
    Ok(weight_warnings(session.window(), &weights))
}

// ==================== Advisor Operations ====================

/// List a session's roster.
pub async fn get_advisors<R: FullRepository + ?Sized>(
    repo: &R,
    session_id: SessionId,
) -> RepositoryResult<Vec<Advisor>> {
    repo.list_advisors(session_id)
        .await
        .map_err(|e| e.labeled("fetching", "advisors"))
}

/// Add an advisor to a session's roster, minting their access token.
///
/// Names are unique within a session, compared case-insensitively and
/// ignoring surrounding whitespace. The check happens here, at the
/// write boundary, before the create call is issued.
pub async fn create_advisor<R: FullRepository + ?Sized>(
    repo: &R,
    session_id: SessionId,
    name: &str,
) -> RepositoryResult<Advisor> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RepositoryError::validation("Advisor name must not be empty")
            .labeled("creating", "advisor"));
    }

    let roster = get_advisors(repo, session_id).await?;
    if is_duplicate_name(&roster, name) {
        return Err(RepositoryError::validation(format!(
            "An advisor named '{}' already exists in this session",
            name
        ))
        .labeled("creating", "advisor"));
    }

    let token = AccessToken::generate();
    info!(
        "Service layer: creating advisor '{}' in session {}",
        name, session_id
    );
    repo.create_advisor(session_id, name, token)
        .await
        .map_err(|e| e.labeled("creating", "advisor"))
}

/// Remove an advisor and their availability rows.
pub async fn delete_advisor<R: FullRepository + ?Sized>(
    repo: &R,
    advisor_id: AdvisorId,
) -> RepositoryResult<()> {
    info!("Service layer: deleting advisor {}", advisor_id);
    repo.delete_advisor(advisor_id)
        .await
        .map_err(|e| e.labeled("deleting", "advisor"))
}

/// Overwrite an advisor's reported sales figures.
pub async fn update_advisor_sales<R: FullRepository + ?Sized>(
    repo: &R,
    advisor_id: AdvisorId,
    total_sales: f64,
    tickets_count: i64,
) -> RepositoryResult<()> {
    if !total_sales.is_finite() || total_sales < 0.0 {
        return Err(
            RepositoryError::validation("Total sales must be a non-negative amount")
                .labeled("updating", "sales"),
        );
    }
    if tickets_count < 0 {
        return Err(
            RepositoryError::validation("Tickets count must not be negative")
                .labeled("updating", "sales"),
        );
    }

    info!(
        "Service layer: advisor {} reported sales {} over {} tickets",
        advisor_id, total_sales, tickets_count
    );
    repo.update_advisor_sales(advisor_id, total_sales, tickets_count)
        .await
        .map_err(|e| e.labeled("updating", "sales"))
}

/// Token-addressed self-report: resolves the token and applies the
/// sales update.
///
/// Returns the updated advisor, or `None` for an unknown token. The
/// caller must present unknown and expired tokens identically.
pub async fn update_advisor_sales_by_token<R: FullRepository + ?Sized>(
    repo: &R,
    token: &str,
    total_sales: f64,
    tickets_count: i64,
) -> RepositoryResult<Option<Advisor>> {
    let advisor = repo
        .find_advisor_by_token(token)
        .await
        .map_err(|e| e.labeled("fetching", "advisor"))?;
    let Some(advisor) = advisor else {
        return Ok(None);
    };

    update_advisor_sales(repo, advisor.id, total_sales, tickets_count).await?;
    repo.get_advisor(advisor.id)
        .await
        .map(Some)
        .map_err(|e| e.labeled("fetching", "advisor"))
}

// ==================== Availability Operations ====================

/// Fetch one advisor's availability override rows.
pub async fn get_advisor_availability<R: FullRepository + ?Sized>(
    repo: &R,
    advisor_id: AdvisorId,
) -> RepositoryResult<Vec<AdvisorAvailability>> {
    repo.fetch_advisor_availability(advisor_id)
        .await
        .map_err(|e| e.labeled("fetching", "availability"))
}

/// Fetch the availability override rows of a whole session's roster.
pub async fn get_session_availability<R: FullRepository + ?Sized>(
    repo: &R,
    session_id: SessionId,
) -> RepositoryResult<Vec<AdvisorAvailability>> {
    repo.fetch_session_availability(session_id)
        .await
        .map_err(|e| e.labeled("fetching", "availability"))
}

/// Insert or toggle one availability override row.
pub async fn update_availability<R: FullRepository + ?Sized>(
    repo: &R,
    advisor_id: AdvisorId,
    hour_start: i32,
    is_active: bool,
) -> RepositoryResult<()> {
    if !(0..=23).contains(&hour_start) {
        return Err(RepositoryError::validation("Hour must be between 0 and 23")
            .labeled("updating", "availability"));
    }

    repo.upsert_availability(advisor_id, hour_start, is_active)
        .await
        .map_err(|e| e.labeled("updating", "availability"))
}

// ==================== Store Metric Operations ====================

/// Fetch a session's store metric rows, ordered by hour.
pub async fn get_store_metrics<R: FullRepository + ?Sized>(
    repo: &R,
    session_id: SessionId,
) -> RepositoryResult<Vec<StoreHourlyMetric>> {
    repo.fetch_store_metrics(session_id)
        .await
        .map_err(|e| e.labeled("fetching", "metrics"))
}

/// Save store metric rows for a session.
///
/// Rows are stamped with the session id before the write, so a caller
/// cannot slip a row into another session's table.
pub async fn save_store_metrics<R: FullRepository + ?Sized>(
    repo: &R,
    session_id: SessionId,
    rows: &[StoreHourlyMetric],
) -> RepositoryResult<()> {
    let rows: Vec<StoreHourlyMetric> = rows
        .iter()
        .map(|row| StoreHourlyMetric {
            session_id,
            ..*row
        })
        .collect();

    info!(
        "Service layer: saving {} metric rows for session {}",
        rows.len(),
        session_id
    );
    repo.upsert_store_metrics(&rows)
        .await
        .map_err(|e| e.labeled("updating", "metrics"))
}

// ==================== Template Operations ====================

/// List all templates, ordered by name.
pub async fn list_templates<R: FullRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<Vec<SessionTemplate>> {
    repo.list_templates()
        .await
        .map_err(|e| e.labeled("fetching", "templates"))
}

/// Store a new template after validating its name and hour range.
pub async fn create_template<R: FullRepository + ?Sized>(
    repo: &R,
    name: &str,
    start_hour: i32,
    end_hour: i32,
    weights: &[WeightEntry],
) -> RepositoryResult<SessionTemplate> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RepositoryError::validation("Template name must not be empty")
            .labeled("creating", "template"));
    }
    if start_hour >= end_hour {
        return Err(
            RepositoryError::validation("Start hour must be before end hour")
                .labeled("creating", "template"),
        );
    }

    let existing = repo
        .find_template_by_name(name)
        .await
        .map_err(|e| e.labeled("fetching", "template"))?;
    if existing.is_some() {
        return Err(RepositoryError::validation(format!(
            "A template named '{}' already exists",
            name
        ))
        .labeled("creating", "template"));
    }

    info!("Service layer: creating template '{}'", name);
    repo.create_template(name, start_hour, end_hour, weights)
        .await
        .map_err(|e| e.labeled("creating", "template"))
}

/// Snapshot a session's current hour range and weights as a template.
///
/// Unconfigured hour bounds resolve to the store defaults, so the
/// template is always complete.
pub async fn save_session_as_template<R: FullRepository + ?Sized>(
    repo: &R,
    session_id: SessionId,
    name: &str,
) -> RepositoryResult<SessionTemplate> {
    let session = repo
        .get_session(session_id)
        .await
        .map_err(|e| e.labeled("fetching", "session"))?;
    let weights = get_hourly_weights(repo, session_id).await?;
    let entries: Vec<WeightEntry> = weights.iter().map(WeightEntry::from).collect();

    let window = session.window();
    create_template(repo, name, window.start_hour(), window.end_hour(), &entries).await
}

/// Apply a template to a session.
///
/// Overwrites the session's hour range and replaces its weight rows
/// wholesale; rows from a previously wider range do not survive.
pub async fn apply_template<R: FullRepository + ?Sized>(
    repo: &R,
    session_id: SessionId,
    template_id: TemplateId,
) -> RepositoryResult<DailySession> {
    let template = repo
        .get_template(template_id)
        .await
        .map_err(|e| e.labeled("fetching", "template"))?;

    info!(
        "Service layer: applying template '{}' to session {}",
        template.name, session_id
    );
    repo.update_session_hours(session_id, template.start_hour, template.end_hour)
        .await
        .map_err(|e| e.labeled("applying", "template"))?;
    repo.replace_hourly_weights(session_id, &template.weights)
        .await
        .map_err(|e| e.labeled("applying", "template"))?;

    repo.get_session(session_id)
        .await
        .map_err(|e| e.labeled("fetching", "session"))
}

/// Delete a template. Sessions it was applied to keep their copies.
pub async fn delete_template<R: FullRepository + ?Sized>(
    repo: &R,
    template_id: TemplateId,
) -> RepositoryResult<()> {
    info!("Service layer: deleting template {}", template_id);
    repo.delete_template(template_id)
        .await
        .map_err(|e| e.labeled("deleting", "template"))
}

// ==================== Snapshot & Self-Service ====================

/// Load everything the allocation engine needs for one session.
pub async fn load_session_snapshot<R: FullRepository + ?Sized>(
    repo: &R,
    session_id: SessionId,
) -> RepositoryResult<SessionSnapshot> {
    let session = repo
        .get_session(session_id)
        .await
        .map_err(|e| e.labeled("fetching", "session"))?;
    let weights = get_hourly_weights(repo, session_id).await?;
    let advisors = get_advisors(repo, session_id).await?;
    let availability = get_session_availability(repo, session_id).await?;

    Ok(SessionSnapshot::new(session, weights, advisors, availability))
}

/// Resolve an access token to the full advisor context.
///
/// Returns `None` for an unknown token; callers must render a generic
/// invalid-link state without revealing whether the token ever
/// existed. The context carries the whole roster and its availability
/// because the personal goal depends on how many colleagues share each
/// hour.
pub async fn get_advisor_context<R: FullRepository + ?Sized>(
    repo: &R,
    token: &str,
) -> RepositoryResult<Option<AdvisorContext>> {
    let advisor = repo
        .find_advisor_by_token(token)
        .await
        .map_err(|e| e.labeled("fetching", "advisor"))?;
    let Some(advisor) = advisor else {
        return Ok(None);
    };

    let session = repo
        .get_session(advisor.session_id)
        .await
        .map_err(|e| e.labeled("fetching", "session"))?;
    let weights = get_hourly_weights(repo, session.id).await?;
    let availability = get_advisor_availability(repo, advisor.id).await?;
    let all_advisors = get_advisors(repo, session.id).await?;
    let all_availability = get_session_availability(repo, session.id).await?;

    Ok(Some(AdvisorContext {
        advisor,
        session,
        weights,
        availability,
        all_advisors,
        all_availability,
    }))
}
