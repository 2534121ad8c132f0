// src/services/dashboard_service.rs
//
// Preferências de dashboard e o resumo agregado dos cards.

use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::PreferencesRepository,
    models::dashboard::{DashboardSummary, UserPreferences},
};

#[derive(Clone)]
pub struct DashboardService {
    repo: PreferencesRepository,
    pool: PgPool,
}

impl DashboardService {
    pub fn new(repo: PreferencesRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    /// Preferências do usuário; cria a linha com padrões no primeiro acesso.
    pub async fn get_preferences(&self, user_id: Uuid) -> Result<UserPreferences, AppError> {
        self.repo.get_or_create(user_id).await
    }

    pub async fn update_preferences(
        &self,
        user_id: Uuid,
        settings: &Value,
    ) -> Result<UserPreferences, AppError> {
        self.repo.upsert(user_id, settings).await
    }

    /// Agregados do dashboard calculados no banco, escopados pelo usuário.
    pub async fn summary(&self, user_id: Uuid) -> Result<DashboardSummary, AppError> {
        let summary = sqlx::query_as::<_, DashboardSummary>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM leads
                  WHERE user_id = $1 AND status NOT IN ('converted', 'lost')) AS leads_count,
                (SELECT COUNT(*) FROM customers
                  WHERE user_id = $1) AS customers_count,
                (SELECT COUNT(*) FROM tasks
                  WHERE user_id = $1 AND status != 'done') AS open_tasks,
                (SELECT COUNT(*) FROM jobs
                  WHERE user_id = $1 AND status IN ('scheduled', 'in_progress')) AS jobs_scheduled,
                (SELECT COALESCE(SUM(total_amount), 0) FROM invoices
                  WHERE user_id = $1 AND payment_status != 'paid'
                    AND status != 'cancelled') AS receivables_total
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(summary)
    }
}
