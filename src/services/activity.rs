// src/services/activity.rs
//
// Trilha de auditoria best-effort. A mutação de negócio é autoritativa,
// o registro de atividade é advisory: uma falha aqui é logada no canal
// de diagnóstico e nunca devolvida ao chamador.

use serde_json::Value;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::db::ActivityRepository;
use crate::models::activity::{ActivityAction, ActivityLog, EntityKind};
use crate::models::realtime::AlertSeverity;
use crate::realtime::hub::ChangeHub;

#[derive(Clone)]
pub struct ActivityLogger {
    repo: ActivityRepository,
    hub: ChangeHub,
}

impl ActivityLogger {
    pub fn new(repo: ActivityRepository, hub: ChangeHub) -> Self {
        Self { repo, hub }
    }

    /// Grava um registro na trilha. Fire-and-forget: não retorna erro.
    pub async fn log(
        &self,
        user_id: Uuid,
        action: ActivityAction,
        entity: EntityKind,
        entity_id: Uuid,
        description: Option<&str>,
        metadata: Option<&Value>,
    ) {
        if let Err(e) = self
            .repo
            .insert(user_id, entity.as_str(), entity_id, action.as_str(), description, metadata)
            .await
        {
            tracing::warn!(
                entity = entity.as_str(),
                action = action.as_str(),
                "Falha ao gravar registro de atividade (ignorada): {}",
                e
            );
        }
    }

    /// Registra um evento de conformidade e o publica no feed.
    /// Mesma política best-effort da trilha.
    pub async fn compliance(&self, user_id: Uuid, severity: AlertSeverity, message: &str) {
        if let Err(e) = self
            .repo
            .insert_compliance_event(user_id, severity.as_str(), message)
            .await
        {
            tracing::warn!("Falha ao gravar evento de conformidade (ignorada): {}", e);
        }

        self.hub.publish_compliance(user_id, severity, message);
    }

    /// Histórico de um registro específico, mais recente primeiro.
    pub async fn for_entity(
        &self,
        user_id: Uuid,
        entity: EntityKind,
        entity_id: Uuid,
    ) -> Result<Vec<ActivityLog>, AppError> {
        self.repo.list_for_entity(user_id, entity.as_str(), entity_id).await
    }

    /// Últimas atividades do usuário, para o painel.
    pub async fn recent(&self, user_id: Uuid, limit: i64) -> Result<Vec<ActivityLog>, AppError> {
        self.repo.list_recent(user_id, limit).await
    }
}
