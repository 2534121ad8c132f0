// src/handlers/portal.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::portal::{IssuePortalTokenPayload, IssuedPortalToken, PortalBundle, PortalToken},
};

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct PortalQuery {
    // Token opaco emitido pelo staff
    pub token: String,
}

// POST /api/portal/tokens — staff emite acesso para um cliente seu
#[utoipa::path(
    post,
    path = "/api/portal/tokens",
    tag = "Portal",
    request_body = IssuePortalTokenPayload,
    responses(
        (status = 201, description = "Acesso ao portal emitido", body = IssuedPortalToken),
        (status = 400, description = "Validade inválida"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn issue_portal_token(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<IssuePortalTokenPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let issued = app_state.portal_service.issue_token(user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(issued)))
}

// DELETE /api/portal/tokens/{id} — revogação imediata
#[utoipa::path(
    delete,
    path = "/api/portal/tokens/{id}",
    tag = "Portal",
    params(("id" = Uuid, Path, description = "ID do token")),
    responses(
        (status = 200, description = "Token revogado", body = PortalToken),
        (status = 404, description = "Token não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn revoke_portal_token(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let token = app_state.portal_service.revoke_token(user.id, id).await?;
    Ok((StatusCode::OK, Json(token)))
}

// GET /portal/session — rota pública; o token é a credencial.
// Expirado, revogado e desconhecido recebem o mesmo 401 opaco.
#[utoipa::path(
    get,
    path = "/portal/session",
    tag = "Portal",
    params(PortalQuery),
    responses(
        (status = 200, description = "Dados do portal do cliente", body = PortalBundle),
        (status = 401, description = "Token inválido, expirado ou revogado")
    )
)]
pub async fn portal_session(
    State(app_state): State<AppState>,
    Query(query): Query<PortalQuery>,
) -> Result<impl IntoResponse, AppError> {
    let bundle = app_state.portal_service.load_bundle(&query.token).await?;
    Ok((StatusCode::OK, Json(bundle)))
}
