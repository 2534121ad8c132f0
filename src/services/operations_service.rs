// src/services/operations_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::OperationsRepository,
    models::activity::{ActivityAction, EntityKind},
    models::operations::{
        CreateJobPayload, CreateTaskPayload, Job, Task, UpdateJobPayload, UpdateTaskPayload,
    },
    models::realtime::ChangeKind,
    realtime::hub::ChangeHub,
    services::activity::ActivityLogger,
};

#[derive(Clone)]
pub struct OperationsService {
    repo: OperationsRepository,
    activity: ActivityLogger,
    hub: ChangeHub,
}

impl OperationsService {
    pub fn new(repo: OperationsRepository, activity: ActivityLogger, hub: ChangeHub) -> Self {
        Self { repo, activity, hub }
    }

    fn publish(&self, user_id: Uuid, entity: EntityKind, kind: ChangeKind, entity_id: Uuid, record: &impl serde::Serialize) {
        let payload = serde_json::to_value(record).unwrap_or_default();
        self.hub.publish_change(user_id, entity.table(), kind, entity_id, payload);
    }

    // =========================================================================
    //  TRABALHOS (JOBS)
    // =========================================================================

    pub async fn list_jobs(&self, user_id: Uuid) -> Result<Vec<Job>, AppError> {
        self.repo.list_jobs(user_id).await
    }

    pub async fn create_job(&self, user_id: Uuid, input: &CreateJobPayload) -> Result<Job, AppError> {
        let job = self.repo.create_job(user_id, input).await?;

        self.activity
            .log(
                user_id,
                ActivityAction::Created,
                EntityKind::Job,
                job.id,
                Some(&format!("Trabalho criado: {}", job.title)),
                None,
            )
            .await;
        self.publish(user_id, EntityKind::Job, ChangeKind::Insert, job.id, &job);

        Ok(job)
    }

    pub async fn update_job(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: &UpdateJobPayload,
    ) -> Result<Job, AppError> {
        let job = self
            .repo
            .update_job(user_id, id, input)
            .await?
            .ok_or(AppError::NotFound("Trabalho"))?;

        self.activity
            .log(
                user_id,
                ActivityAction::Updated,
                EntityKind::Job,
                job.id,
                Some(&format!("Trabalho atualizado: {}", job.title)),
                None,
            )
            .await;
        self.publish(user_id, EntityKind::Job, ChangeKind::Update, job.id, &job);

        Ok(job)
    }

    pub async fn delete_job(&self, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let job = self
            .repo
            .delete_job(user_id, id)
            .await?
            .ok_or(AppError::NotFound("Trabalho"))?;

        self.activity
            .log(
                user_id,
                ActivityAction::Deleted,
                EntityKind::Job,
                job.id,
                Some(&format!("Trabalho removido: {}", job.title)),
                None,
            )
            .await;
        self.publish(user_id, EntityKind::Job, ChangeKind::Delete, job.id, &job);

        Ok(())
    }

    // =========================================================================
    //  TAREFAS
    // =========================================================================

    pub async fn list_tasks(&self, user_id: Uuid) -> Result<Vec<Task>, AppError> {
        self.repo.list_tasks(user_id).await
    }

    pub async fn create_task(
        &self,
        user_id: Uuid,
        input: &CreateTaskPayload,
    ) -> Result<Task, AppError> {
        let task = self.repo.create_task(user_id, input).await?;

        self.activity
            .log(
                user_id,
                ActivityAction::Created,
                EntityKind::Task,
                task.id,
                Some(&format!("Tarefa criada: {}", task.title)),
                None,
            )
            .await;
        self.publish(user_id, EntityKind::Task, ChangeKind::Insert, task.id, &task);

        Ok(task)
    }

    pub async fn update_task(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: &UpdateTaskPayload,
    ) -> Result<Task, AppError> {
        let task = self
            .repo
            .update_task(user_id, id, input)
            .await?
            .ok_or(AppError::NotFound("Tarefa"))?;

        self.activity
            .log(
                user_id,
                ActivityAction::Updated,
                EntityKind::Task,
                task.id,
                Some(&format!("Tarefa atualizada: {}", task.title)),
                None,
            )
            .await;
        self.publish(user_id, EntityKind::Task, ChangeKind::Update, task.id, &task);

        Ok(task)
    }

    pub async fn delete_task(&self, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let task = self
            .repo
            .delete_task(user_id, id)
            .await?
            .ok_or(AppError::NotFound("Tarefa"))?;

        self.activity
            .log(
                user_id,
                ActivityAction::Deleted,
                EntityKind::Task,
                task.id,
                Some(&format!("Tarefa removida: {}", task.title)),
                None,
            )
            .await;
        self.publish(user_id, EntityKind::Task, ChangeKind::Delete, task.id, &task);

        Ok(())
    }
}
