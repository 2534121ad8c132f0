// src/db/activity_repo.rs

use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::activity::{ActivityLog, ComplianceEvent},
};

#[derive(Clone)]
pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insere um registro da trilha. A tabela é append-only:
    /// não existe update nem delete neste repositório.
    pub async fn insert(
        &self,
        user_id: Uuid,
        entity_type: &str,
        entity_id: Uuid,
        action: &str,
        description: Option<&str>,
        metadata: Option<&Value>,
    ) -> Result<ActivityLog, AppError> {
        let entry = sqlx::query_as::<_, ActivityLog>(
            r#"
            INSERT INTO activity_logs (user_id, entity_type, entity_id, action, description, metadata)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(entity_type)
        .bind(entity_id)
        .bind(action)
        .bind(description)
        .bind(metadata)
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    /// Trilha de uma entidade, mais recente primeiro.
    pub async fn list_for_entity(
        &self,
        user_id: Uuid,
        entity_type: &str,
        entity_id: Uuid,
    ) -> Result<Vec<ActivityLog>, AppError> {
        let entries = sqlx::query_as::<_, ActivityLog>(
            r#"
            SELECT * FROM activity_logs
            WHERE user_id = $1 AND entity_type = $2 AND entity_id = $3
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(entity_type)
        .bind(entity_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    pub async fn list_recent(&self, user_id: Uuid, limit: i64) -> Result<Vec<ActivityLog>, AppError> {
        let entries = sqlx::query_as::<_, ActivityLog>(
            r#"
            SELECT * FROM activity_logs
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    pub async fn insert_compliance_event(
        &self,
        user_id: Uuid,
        severity: &str,
        message: &str,
    ) -> Result<ComplianceEvent, AppError> {
        let event = sqlx::query_as::<_, ComplianceEvent>(
            r#"
            INSERT INTO compliance_events (user_id, severity, message)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(severity)
        .bind(message)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }
}
