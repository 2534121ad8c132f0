// src/models/realtime.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

// Tipo de mudança de linha entregue pelo feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

// Evento de mudança de linha, escopado ao usuário dono.
// Entrega: at-least-once enquanto inscrito; sem replay; ordem não garantida entre tabelas.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent {
    #[schema(ignore)]
    pub user_id: Uuid,

    #[schema(example = "leads")]
    pub table: String,
    pub kind: ChangeKind,
    pub entity_id: Uuid,

    // Registro novo (insert/update) ou o antigo (delete).
    pub record: Value,

    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl AlertSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertSeverity::Info => "info",
            AlertSeverity::Warning => "warning",
            AlertSeverity::Critical => "critical",
        }
    }
}

// Alerta vindo da trilha de conformidade; os críticos viram aviso visível.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceAlert {
    #[schema(ignore)]
    pub user_id: Uuid,

    pub severity: AlertSeverity,
    pub message: String,
    pub occurred_at: DateTime<Utc>,
}

// Mensagem transportada pelo canal broadcast do hub.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum FeedMessage {
    Change(ChangeEvent),
    Compliance(ComplianceAlert),
}

impl FeedMessage {
    pub fn user_id(&self) -> Uuid {
        match self {
            FeedMessage::Change(ev) => ev.user_id,
            FeedMessage::Compliance(al) => al.user_id,
        }
    }
}
