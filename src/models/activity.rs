// src/models/activity.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Ação registrada na trilha de auditoria. Persistida como texto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    Created,
    Updated,
    Deleted,
    Converted,
    PaymentCompleted,
}

impl ActivityAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityAction::Created => "created",
            ActivityAction::Updated => "updated",
            ActivityAction::Deleted => "deleted",
            ActivityAction::Converted => "converted",
            ActivityAction::PaymentCompleted => "payment_completed",
        }
    }
}

// Tipo da entidade referenciada por um registro de atividade ou evento do feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Lead,
    Customer,
    Estimate,
    Invoice,
    Job,
    Task,
    PortalToken,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Lead => "lead",
            EntityKind::Customer => "customer",
            EntityKind::Estimate => "estimate",
            EntityKind::Invoice => "invoice",
            EntityKind::Job => "job",
            EntityKind::Task => "task",
            EntityKind::PortalToken => "portal_token",
        }
    }

    // Nome da tabela correspondente, usado pelo feed em tempo real.
    pub fn table(self) -> &'static str {
        match self {
            EntityKind::Lead => "leads",
            EntityKind::Customer => "customers",
            EntityKind::Estimate => "estimates",
            EntityKind::Invoice => "invoices",
            EntityKind::Job => "jobs",
            EntityKind::Task => "tasks",
            EntityKind::PortalToken => "portal_tokens",
        }
    }
}

// Registro imutável da trilha: nunca atualizado ou apagado pela aplicação.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: Uuid,

    #[schema(ignore)]
    pub user_id: Uuid,

    #[schema(example = "lead")]
    pub entity_type: String,
    pub entity_id: Uuid,

    #[schema(example = "created")]
    pub action: String,
    pub description: Option<String>,
    pub metadata: Option<Value>,

    pub created_at: DateTime<Utc>,
}

// Evento da tabela de conformidade observada pelo feed.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceEvent {
    pub id: Uuid,

    #[schema(ignore)]
    pub user_id: Uuid,

    #[schema(example = "critical")]
    pub severity: String,
    pub message: String,

    pub created_at: DateTime<Utc>,
}
