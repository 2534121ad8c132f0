// src/handlers/finance.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::finance::{
        CreateEstimatePayload, CreateInvoicePayload, Estimate, Invoice, UpdateEstimatePayload,
        UpdateInvoicePayload,
    },
};

// =============================================================================
//  ÁREA 1: ORÇAMENTOS
// =============================================================================

// GET /api/estimates
#[utoipa::path(
    get,
    path = "/api/estimates",
    tag = "Finanças",
    responses(
        (status = 200, description = "Orçamentos do usuário", body = Vec<Estimate>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_estimates(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let estimates = app_state.finance_service.list_estimates(user.id).await?;
    Ok((StatusCode::OK, Json(estimates)))
}

// POST /api/estimates
#[utoipa::path(
    post,
    path = "/api/estimates",
    tag = "Finanças",
    request_body = CreateEstimatePayload,
    responses(
        (status = 201, description = "Orçamento criado", body = Estimate),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_estimate(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateEstimatePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let estimate = app_state.finance_service.create_estimate(user.id, &payload).await?;
    Ok((StatusCode::CREATED, Json(estimate)))
}

// PATCH /api/estimates/{id}
#[utoipa::path(
    patch,
    path = "/api/estimates/{id}",
    tag = "Finanças",
    request_body = UpdateEstimatePayload,
    params(("id" = Uuid, Path, description = "ID do orçamento")),
    responses(
        (status = 200, description = "Orçamento atualizado", body = Estimate),
        (status = 404, description = "Orçamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_estimate(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEstimatePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let estimate = app_state
        .finance_service
        .update_estimate(user.id, id, &payload)
        .await?;
    Ok((StatusCode::OK, Json(estimate)))
}

// DELETE /api/estimates/{id}
#[utoipa::path(
    delete,
    path = "/api/estimates/{id}",
    tag = "Finanças",
    params(("id" = Uuid, Path, description = "ID do orçamento")),
    responses(
        (status = 204, description = "Orçamento removido"),
        (status = 404, description = "Orçamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_estimate(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.finance_service.delete_estimate(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ÁREA 2: FATURAS
// =============================================================================

// GET /api/invoices
#[utoipa::path(
    get,
    path = "/api/invoices",
    tag = "Finanças",
    responses(
        (status = 200, description = "Faturas do usuário", body = Vec<Invoice>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_invoices(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let invoices = app_state.finance_service.list_invoices(user.id).await?;
    Ok((StatusCode::OK, Json(invoices)))
}

// POST /api/invoices
#[utoipa::path(
    post,
    path = "/api/invoices",
    tag = "Finanças",
    request_body = CreateInvoicePayload,
    responses(
        (status = 201, description = "Fatura criada", body = Invoice),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_invoice(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateInvoicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let invoice = app_state.finance_service.create_invoice(user.id, &payload).await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

// PATCH /api/invoices/{id}
#[utoipa::path(
    patch,
    path = "/api/invoices/{id}",
    tag = "Finanças",
    request_body = UpdateInvoicePayload,
    params(("id" = Uuid, Path, description = "ID da fatura")),
    responses(
        (status = 200, description = "Fatura atualizada", body = Invoice),
        (status = 404, description = "Fatura não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_invoice(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateInvoicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let invoice = app_state
        .finance_service
        .update_invoice(user.id, id, &payload)
        .await?;
    Ok((StatusCode::OK, Json(invoice)))
}

// DELETE /api/invoices/{id}
#[utoipa::path(
    delete,
    path = "/api/invoices/{id}",
    tag = "Finanças",
    params(("id" = Uuid, Path, description = "ID da fatura")),
    responses(
        (status = 204, description = "Fatura removida"),
        (status = 404, description = "Fatura não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_invoice(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.finance_service.delete_invoice(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
