// src/db/operations_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::operations::{
        CreateJobPayload, CreateTaskPayload, Job, Task, UpdateJobPayload, UpdateTaskPayload,
    },
};

#[derive(Clone)]
pub struct OperationsRepository {
    pool: PgPool,
}

impl OperationsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  TRABALHOS (JOBS)
    // =========================================================================

    pub async fn list_jobs(&self, user_id: Uuid) -> Result<Vec<Job>, AppError> {
        let jobs = sqlx::query_as::<_, Job>(
            "SELECT * FROM jobs WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(jobs)
    }

    pub async fn create_job(&self, user_id: Uuid, input: &CreateJobPayload) -> Result<Job, AppError> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs (user_id, customer_id, title, description, status, scheduled_date)
            VALUES ($1, $2, $3, $4, COALESCE($5, 'scheduled'::job_status), $6)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(input.customer_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.status)
        .bind(input.scheduled_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(job)
    }

    pub async fn update_job(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: &UpdateJobPayload,
    ) -> Result<Option<Job>, AppError> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            UPDATE jobs SET
                customer_id    = COALESCE($3, customer_id),
                title          = COALESCE($4, title),
                description    = COALESCE($5, description),
                status         = COALESCE($6, status),
                scheduled_date = COALESCE($7, scheduled_date),
                updated_at     = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(input.customer_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.status)
        .bind(input.scheduled_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(job)
    }

    pub async fn delete_job(&self, user_id: Uuid, id: Uuid) -> Result<Option<Job>, AppError> {
        let job =
            sqlx::query_as::<_, Job>("DELETE FROM jobs WHERE id = $1 AND user_id = $2 RETURNING *")
                .bind(id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(job)
    }

    /// Coleção somente-leitura do portal.
    pub async fn list_jobs_for_customer(
        &self,
        user_id: Uuid,
        customer_id: Uuid,
    ) -> Result<Vec<Job>, AppError> {
        let jobs = sqlx::query_as::<_, Job>(
            r#"
            SELECT * FROM jobs
            WHERE user_id = $1 AND customer_id = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(jobs)
    }

    // =========================================================================
    //  TAREFAS
    // =========================================================================

    pub async fn list_tasks(&self, user_id: Uuid) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    pub async fn create_task(
        &self,
        user_id: Uuid,
        input: &CreateTaskPayload,
    ) -> Result<Task, AppError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (user_id, title, description, status, priority, due_date)
            VALUES ($1, $2, $3, COALESCE($4, 'open'::task_status), COALESCE($5, 'medium'::task_priority), $6)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.status)
        .bind(input.priority)
        .bind(input.due_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    pub async fn update_task(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: &UpdateTaskPayload,
    ) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks SET
                title       = COALESCE($3, title),
                description = COALESCE($4, description),
                status      = COALESCE($5, status),
                priority    = COALESCE($6, priority),
                due_date    = COALESCE($7, due_date),
                updated_at  = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.status)
        .bind(input.priority)
        .bind(input.due_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    pub async fn delete_task(&self, user_id: Uuid, id: Uuid) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(
            "DELETE FROM tasks WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }
}
