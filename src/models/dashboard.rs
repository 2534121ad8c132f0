// src/models/dashboard.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Uma linha por usuário; criada com padrões no primeiro GET (upsert preguiçoso).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[schema(ignore)]
    pub user_id: Uuid,

    // Layout/visibilidade/tema: dados estruturados opacos para o backend.
    #[schema(example = json!({"theme": "dark", "cards": ["sales", "tasks"]}))]
    pub settings: Value,

    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePreferencesPayload {
    pub settings: Value,
}

// Os cards do topo do dashboard.
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub leads_count: i64,
    pub customers_count: i64,
    pub open_tasks: i64,
    pub jobs_scheduled: i64,

    // Total de faturas ainda não pagas (a receber)
    #[schema(example = "1200.00")]
    pub receivables_total: Decimal,
}
