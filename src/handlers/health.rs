// src/handlers/health.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::AppState;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseHealth {
    pub connected: bool,
    pub error: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PitrHealth {
    pub enabled: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_secs: u64,
    // RSS do processo em kB, quando o sistema expõe /proc
    pub memory_rss_kb: Option<u64>,
    pub database: DatabaseHealth,
    pub pitr: PitrHealth,
    pub timestamp: DateTime<Utc>,
}

// GET /health — rota pública de diagnóstico
#[utoipa::path(
    get,
    path = "/health",
    tag = "Saúde",
    responses(
        (status = 200, description = "Serviço saudável", body = HealthResponse),
        (status = 503, description = "Banco de dados inacessível", body = HealthResponse)
    )
)]
pub async fn health(State(app_state): State<AppState>) -> impl IntoResponse {
    let database = match sqlx::query("SELECT 1").execute(&app_state.db_pool).await {
        Ok(_) => DatabaseHealth { connected: true, error: None },
        Err(e) => DatabaseHealth { connected: false, error: Some(e.to_string()) },
    };

    let status_code = if database.connected { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };

    let response = HealthResponse {
        status: if database.connected { "ok" } else { "degraded" },
        uptime_secs: app_state.started_at.elapsed().as_secs(),
        memory_rss_kb: read_rss_kb(),
        database,
        pitr: PitrHealth { enabled: app_state.config.pitr_enabled },
        timestamp: Utc::now(),
    };

    (status_code, Json(response))
}

// Lê VmRSS de /proc/self/status; fora do Linux retorna None.
fn read_rss_kb() -> Option<u64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    status
        .lines()
        .find(|line| line.starts_with("VmRSS:"))
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|kb| kb.parse().ok())
}
