// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::dashboard::{DashboardSummary, UpdatePreferencesPayload, UserPreferences},
};

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Agregados dos cards do dashboard", body = DashboardSummary)
    ),
    security(("api_jwt" = []))
)]
pub async fn dashboard_summary(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.dashboard_service.summary(user.id).await?;
    Ok((StatusCode::OK, Json(summary)))
}

// GET /api/preferences — cria a linha com padrões no primeiro acesso
#[utoipa::path(
    get,
    path = "/api/preferences",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Preferências do usuário", body = UserPreferences)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_preferences(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let prefs = app_state.dashboard_service.get_preferences(user.id).await?;
    Ok((StatusCode::OK, Json(prefs)))
}

// PUT /api/preferences
#[utoipa::path(
    put,
    path = "/api/preferences",
    tag = "Dashboard",
    request_body = UpdatePreferencesPayload,
    responses(
        (status = 200, description = "Preferências salvas", body = UserPreferences)
    ),
    security(("api_jwt" = []))
)]
pub async fn update_preferences(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<UpdatePreferencesPayload>,
) -> Result<impl IntoResponse, AppError> {
    let prefs = app_state
        .dashboard_service
        .update_preferences(user.id, &payload.settings)
        .await?;
    Ok((StatusCode::OK, Json(prefs)))
}
