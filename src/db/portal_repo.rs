// src/db/portal_repo.rs

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::portal::PortalToken};

#[derive(Clone)]
pub struct PortalRepository {
    pool: PgPool,
}

impl PortalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert_token(
        &self,
        user_id: Uuid,
        customer_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<PortalToken, AppError> {
        let row = sqlx::query_as::<_, PortalToken>(
            r#"
            INSERT INTO portal_tokens (user_id, customer_id, token, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(customer_id)
        .bind(token)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Busca por correspondência exata do token opaco.
    pub async fn find_by_token(&self, token: &str) -> Result<Option<PortalToken>, AppError> {
        let row = sqlx::query_as::<_, PortalToken>("SELECT * FROM portal_tokens WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    /// Revogação pelo staff emissor; escopada por user_id como todo o resto.
    pub async fn revoke(&self, user_id: Uuid, id: Uuid) -> Result<Option<PortalToken>, AppError> {
        let row = sqlx::query_as::<_, PortalToken>(
            r#"
            UPDATE portal_tokens SET revoked = TRUE
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
