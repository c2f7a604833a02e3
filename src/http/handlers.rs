//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic. Handlers only parse, delegate and
//! serialize; every rule lives below them.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;

use super::dto::{
    ApplyTemplateRequest, CreateAdvisorRequest, CreateTemplateRequest, HealthResponse,
    SaveMetricsRequest, UpdateAvailabilityRequest, UpdateGoalRequest, UpdateHoursRequest,
    UpdateSalesRequest, UpsertWeightsRequest, WeightsResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{AdvisorId, SessionId, TemplateId};
use crate::db::repository::SessionRepository;
use crate::db::services as db_services;
use crate::models::{Advisor, AdvisorAvailability, DailySession, HourlyWeight, SessionTemplate, StoreHourlyMetric};
use crate::routes::advisor_view::{AdvisorContext, AdvisorProgress, AdvisorSummary, AdvisorViewData};
use crate::routes::dashboard::DashboardData;
use crate::routes::metrics::MetricsTableData;
use crate::routes::reports::AdminReport;
use crate::services::allocation::SessionSnapshot;
use crate::services::metrics::{average_ticket, compliance, metrics_table, remaining};
use crate::services::reports;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Body shown for any token that does not resolve. Deliberately says
/// nothing about whether the token ever existed.
const GENERIC_NOT_FOUND: &str = "Resource not found";

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the
/// storage backend is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Sessions
// =============================================================================

/// GET /v1/sessions/{date}
///
/// Fetch the session for a calendar date, creating and seeding it on
/// first access.
pub async fn get_session(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> HandlerResult<DailySession> {
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("Invalid date '{}', expected YYYY-MM-DD", date)))?;

    let session = db_services::get_or_create_session(state.repository.as_ref(), date).await?;
    Ok(Json(session))
}

/// PUT /v1/sessions/{session_id}/goal
pub async fn update_goal(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
    Json(request): Json<UpdateGoalRequest>,
) -> HandlerResult<DailySession> {
    let session_id = SessionId::new(session_id);
    db_services::update_session_goal(
        state.repository.as_ref(),
        session_id,
        request.total_daily_goal,
    )
    .await?;

    let session = state.repository.get_session(session_id).await?;
    Ok(Json(session))
}

/// PUT /v1/sessions/{session_id}/hours
pub async fn update_hours(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
    Json(request): Json<UpdateHoursRequest>,
) -> HandlerResult<DailySession> {
    let session_id = SessionId::new(session_id);
    db_services::update_session_hours(
        state.repository.as_ref(),
        session_id,
        request.start_hour,
        request.end_hour,
    )
    .await?;

    let session = state.repository.get_session(session_id).await?;
    Ok(Json(session))
}

// =============================================================================
// Weights
// =============================================================================

/// GET /v1/sessions/{session_id}/weights
pub async fn get_weights(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
) -> HandlerResult<Vec<HourlyWeight>> {
    let weights =
        db_services::get_hourly_weights(state.repository.as_ref(), SessionId::new(session_id))
            .await?;
    Ok(Json(weights))
}

/// PUT /v1/sessions/{session_id}/weights
///
/// Upserts the submitted rows and returns the stored state together
/// with any configuration warnings (sum off 100, stale out-of-window
/// rows). Warnings never block the save.
pub async fn put_weights(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
    Json(request): Json<UpsertWeightsRequest>,
) -> HandlerResult<WeightsResponse> {
    let session_id = SessionId::new(session_id);
    let warnings = db_services::upsert_hourly_weights(
        state.repository.as_ref(),
        session_id,
        &request.weights,
    )
    .await?;
    let weights = db_services::get_hourly_weights(state.repository.as_ref(), session_id).await?;

    Ok(Json(WeightsResponse { weights, warnings }))
}

// =============================================================================
// Advisors
// =============================================================================

/// GET /v1/sessions/{session_id}/advisors
pub async fn list_advisors(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
) -> HandlerResult<Vec<Advisor>> {
    let advisors =
        db_services::get_advisors(state.repository.as_ref(), SessionId::new(session_id)).await?;
    Ok(Json(advisors))
}

/// POST /v1/sessions/{session_id}/advisors
///
/// Adds an advisor to the roster and mints their access token. The
/// response is the only place the token is handed out to the admin.
pub async fn create_advisor(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
    Json(request): Json<CreateAdvisorRequest>,
) -> Result<(StatusCode, Json<Advisor>), AppError> {
    let advisor = db_services::create_advisor(
        state.repository.as_ref(),
        SessionId::new(session_id),
        &request.name,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(advisor)))
}

/// DELETE /v1/advisors/{advisor_id}
pub async fn delete_advisor(
    State(state): State<AppState>,
    Path(advisor_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    db_services::delete_advisor(state.repository.as_ref(), AdvisorId::new(advisor_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Availability
// =============================================================================

/// GET /v1/advisors/{advisor_id}/availability
pub async fn get_advisor_availability(
    State(state): State<AppState>,
    Path(advisor_id): Path<i64>,
) -> HandlerResult<Vec<AdvisorAvailability>> {
    let rows = db_services::get_advisor_availability(
        state.repository.as_ref(),
        AdvisorId::new(advisor_id),
    )
    .await?;
    Ok(Json(rows))
}

/// GET /v1/sessions/{session_id}/availability
pub async fn get_session_availability(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
) -> HandlerResult<Vec<AdvisorAvailability>> {
    let rows = db_services::get_session_availability(
        state.repository.as_ref(),
        SessionId::new(session_id),
    )
    .await?;
    Ok(Json(rows))
}

/// PUT /v1/advisors/{advisor_id}/availability
pub async fn update_availability(
    State(state): State<AppState>,
    Path(advisor_id): Path<i64>,
    Json(request): Json<UpdateAvailabilityRequest>,
) -> HandlerResult<Vec<AdvisorAvailability>> {
    let advisor_id = AdvisorId::new(advisor_id);
    db_services::update_availability(
        state.repository.as_ref(),
        advisor_id,
        request.hour_start,
        request.is_active,
    )
    .await?;

    let rows =
        db_services::get_advisor_availability(state.repository.as_ref(), advisor_id).await?;
    Ok(Json(rows))
}

// =============================================================================
// Store Metrics
// =============================================================================

/// GET /v1/sessions/{session_id}/metrics
pub async fn get_metrics(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
) -> HandlerResult<Vec<StoreHourlyMetric>> {
    let rows =
        db_services::get_store_metrics(state.repository.as_ref(), SessionId::new(session_id))
            .await?;
    Ok(Json(rows))
}

/// PUT /v1/sessions/{session_id}/metrics
pub async fn put_metrics(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
    Json(request): Json<SaveMetricsRequest>,
) -> HandlerResult<Vec<StoreHourlyMetric>> {
    let session_id = SessionId::new(session_id);
    db_services::save_store_metrics(state.repository.as_ref(), session_id, &request.rows).await?;

    let rows = db_services::get_store_metrics(state.repository.as_ref(), session_id).await?;
    Ok(Json(rows))
}

/// GET /v1/sessions/{session_id}/metrics-table
///
/// Per-hour goal, traffic and sales figures with the derived columns
/// (conversion, growth, average ticket) and store totals.
pub async fn get_metrics_table(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
) -> HandlerResult<MetricsTableData> {
    let session_id = SessionId::new(session_id);
    let snapshot =
        db_services::load_session_snapshot(state.repository.as_ref(), session_id).await?;
    let rows = db_services::get_store_metrics(state.repository.as_ref(), session_id).await?;

    Ok(Json(metrics_table(&snapshot, &rows)))
}

// =============================================================================
// Dashboard & Reports
// =============================================================================

/// GET /v1/sessions/{session_id}/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
) -> HandlerResult<DashboardData> {
    let snapshot =
        db_services::load_session_snapshot(state.repository.as_ref(), SessionId::new(session_id))
            .await?;
    Ok(Json(reports::dashboard(&snapshot)))
}

/// GET /v1/sessions/{session_id}/report
pub async fn get_admin_report(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
) -> HandlerResult<AdminReport> {
    let snapshot =
        db_services::load_session_snapshot(state.repository.as_ref(), SessionId::new(session_id))
            .await?;
    Ok(Json(reports::admin_report(&snapshot)))
}

// =============================================================================
// Templates
// =============================================================================

/// GET /v1/templates
pub async fn list_templates(
    State(state): State<AppState>,
) -> HandlerResult<Vec<SessionTemplate>> {
    let templates = db_services::list_templates(state.repository.as_ref()).await?;
    Ok(Json(templates))
}

/// POST /v1/sessions/{session_id}/template
///
/// Snapshot the session's current hours and weights as a template.
pub async fn save_as_template(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
    Json(request): Json<CreateTemplateRequest>,
) -> Result<(StatusCode, Json<SessionTemplate>), AppError> {
    let template = db_services::save_session_as_template(
        state.repository.as_ref(),
        SessionId::new(session_id),
        &request.name,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(template)))
}

/// POST /v1/sessions/{session_id}/apply-template
pub async fn apply_template(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
    Json(request): Json<ApplyTemplateRequest>,
) -> HandlerResult<DailySession> {
    let session = db_services::apply_template(
        state.repository.as_ref(),
        SessionId::new(session_id),
        TemplateId::new(request.template_id),
    )
    .await?;
    Ok(Json(session))
}

/// DELETE /v1/templates/{template_id}
pub async fn delete_template(
    State(state): State<AppState>,
    Path(template_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    db_services::delete_template(state.repository.as_ref(), TemplateId::new(template_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Advisor Self-Service (token-addressed)
// =============================================================================

/// GET /v1/advisor/{token}
///
/// The advisor's personal view: their goal breakdown, progress and the
/// team's (tokenless) roster. An unknown token gets a generic 404.
pub async fn get_advisor_view(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> HandlerResult<AdvisorViewData> {
    let context = db_services::get_advisor_context(state.repository.as_ref(), &token)
        .await?
        .ok_or_else(|| AppError::NotFound(GENERIC_NOT_FOUND.to_string()))?;

    Ok(Json(build_advisor_view(context)))
}

/// PUT /v1/advisor/{token}/sales
///
/// Sales self-report. The token is the sole credential; an unknown one
/// gets the same generic 404 as the view endpoint.
pub async fn update_sales(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(request): Json<UpdateSalesRequest>,
) -> HandlerResult<Advisor> {
    let advisor = db_services::update_advisor_sales_by_token(
        state.repository.as_ref(),
        &token,
        request.total_sales,
        request.tickets_count,
    )
    .await?
    .ok_or_else(|| AppError::NotFound(GENERIC_NOT_FOUND.to_string()))?;

    Ok(Json(advisor))
}

/// Assembles the self-service payload from a resolved context.
fn build_advisor_view(context: AdvisorContext) -> AdvisorViewData {
    let team: Vec<AdvisorSummary> = context.all_advisors.iter().map(Into::into).collect();
    let advisor = context.advisor;

    let snapshot = SessionSnapshot::new(
        context.session,
        context.weights,
        context.all_advisors,
        context.all_availability,
    );

    let personal_goal = snapshot.personal_goal(advisor.id);
    let progress = AdvisorProgress {
        personal_goal,
        total_sales: advisor.total_sales,
        tickets_count: advisor.tickets_count,
        compliance_pct: compliance(advisor.total_sales, personal_goal),
        remaining: remaining(advisor.total_sales, personal_goal),
        average_ticket: average_ticket(advisor.total_sales, advisor.tickets_count),
        hourly: snapshot.hourly_breakdown(advisor.id),
    };

    AdvisorViewData {
        advisor,
        session: snapshot.session,
        progress,
        team,
    }
}
