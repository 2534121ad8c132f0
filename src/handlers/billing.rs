// src/handlers/billing.rs

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{common::error::AppError, config::AppState, middleware::auth::AuthenticatedUser};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPayload {
    pub invoice_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    // URL da página de pagamento hospedada; o navegador é redirecionado para cá.
    pub url: String,
}

// POST /api/billing/checkout
#[utoipa::path(
    post,
    path = "/api/billing/checkout",
    tag = "Cobrança",
    request_body = CheckoutPayload,
    responses(
        (status = 200, description = "Sessão de checkout criada", body = CheckoutResponse),
        (status = 404, description = "Fatura não encontrada"),
        (status = 409, description = "Fatura já paga"),
        (status = 502, description = "Falha no provedor de pagamento")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_checkout(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CheckoutPayload>,
) -> Result<impl IntoResponse, AppError> {
    let url = app_state
        .billing_service
        .create_checkout(user.id, payload.invoice_id)
        .await?;
    Ok((StatusCode::OK, Json(CheckoutResponse { url })))
}

// POST /webhook — rota pública; a autenticação é a assinatura do cabeçalho.
// Qualquer erro devolve 5xx para que o provedor reenvie o evento.
#[utoipa::path(
    post,
    path = "/webhook",
    tag = "Cobrança",
    request_body(content = String, content_type = "application/json",
        description = "Evento bruto do Stripe; o corpo é verificado byte a byte contra a assinatura"),
    responses(
        (status = 200, description = "Evento recebido"),
        (status = 500, description = "Assinatura inválida ou sessão desconhecida; o evento será reenviado")
    )
)]
pub async fn stripe_webhook(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let signature = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::WebhookSignature("cabeçalho stripe-signature ausente".to_string()))?;

    let outcome = app_state.billing_service.process_webhook(&body, signature).await?;
    tracing::debug!(?outcome, "Webhook processado");

    Ok((StatusCode::OK, Json(json!({ "received": true }))))
}
