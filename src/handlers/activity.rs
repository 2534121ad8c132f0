// src/handlers/activity.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::activity::{ActivityLog, EntityKind},
};

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 200;

#[derive(Debug, Deserialize, IntoParams)]
pub struct RecentQuery {
    pub limit: Option<i64>,
}

// GET /api/activity
#[utoipa::path(
    get,
    path = "/api/activity",
    tag = "Atividade",
    params(RecentQuery),
    responses(
        (status = 200, description = "Atividades recentes do usuário", body = Vec<ActivityLog>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_recent_activity(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<RecentQuery>,
) -> Result<impl IntoResponse, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let entries = app_state.activity.recent(user.id, limit).await?;
    Ok((StatusCode::OK, Json(entries)))
}

// GET /api/activity/{entity}/{id}
#[utoipa::path(
    get,
    path = "/api/activity/{entity}/{id}",
    tag = "Atividade",
    params(
        ("entity" = EntityKind, Path, description = "Tipo da entidade"),
        ("id" = Uuid, Path, description = "ID da entidade")
    ),
    responses(
        (status = 200, description = "Histórico da entidade", body = Vec<ActivityLog>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_entity_activity(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((entity, id)): Path<(EntityKind, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let entries = app_state.activity.for_entity(user.id, entity, id).await?;
    Ok((StatusCode::OK, Json(entries)))
}
