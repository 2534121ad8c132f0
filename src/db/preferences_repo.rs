// src/db/preferences_repo.rs

use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::dashboard::UserPreferences};

#[derive(Clone)]
pub struct PreferencesRepository {
    pool: PgPool,
}

impl PreferencesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Busca as preferências; no primeiro acesso cria a linha com os padrões.
    /// A PK em user_id garante no máximo uma linha por usuário.
    pub async fn get_or_create(&self, user_id: Uuid) -> Result<UserPreferences, AppError> {
        let existing = sqlx::query_as::<_, UserPreferences>(
            "SELECT * FROM user_preferences WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(prefs) = existing {
            return Ok(prefs);
        }

        // Upsert preguiçoso: se outra sessão inseriu no meio tempo, mantém a existente.
        let prefs = sqlx::query_as::<_, UserPreferences>(
            r#"
            INSERT INTO user_preferences (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING *
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(prefs)
    }

    // UPSERT (Insert or Update)
    pub async fn upsert(&self, user_id: Uuid, settings: &Value) -> Result<UserPreferences, AppError> {
        let prefs = sqlx::query_as::<_, UserPreferences>(
            r#"
            INSERT INTO user_preferences (user_id, settings)
            VALUES ($1, $2)
            ON CONFLICT (user_id)
            DO UPDATE SET
                settings   = EXCLUDED.settings,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(settings)
        .fetch_one(&self.pool)
        .await?;

        Ok(prefs)
    }
}
