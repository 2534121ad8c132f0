// src/handlers/operations.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::operations::{
        CreateJobPayload, CreateTaskPayload, Job, Task, UpdateJobPayload, UpdateTaskPayload,
    },
};

// =============================================================================
//  ÁREA 1: TRABALHOS
// =============================================================================

// GET /api/jobs
#[utoipa::path(
    get,
    path = "/api/jobs",
    tag = "Operações",
    responses(
        (status = 200, description = "Trabalhos do usuário", body = Vec<Job>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_jobs(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let jobs = app_state.operations_service.list_jobs(user.id).await?;
    Ok((StatusCode::OK, Json(jobs)))
}

// POST /api/jobs
#[utoipa::path(
    post,
    path = "/api/jobs",
    tag = "Operações",
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Trabalho criado", body = Job),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_job(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateJobPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let job = app_state.operations_service.create_job(user.id, &payload).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

// PATCH /api/jobs/{id}
#[utoipa::path(
    patch,
    path = "/api/jobs/{id}",
    tag = "Operações",
    request_body = UpdateJobPayload,
    params(("id" = Uuid, Path, description = "ID do trabalho")),
    responses(
        (status = 200, description = "Trabalho atualizado", body = Job),
        (status = 404, description = "Trabalho não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_job(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateJobPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let job = app_state.operations_service.update_job(user.id, id, &payload).await?;
    Ok((StatusCode::OK, Json(job)))
}

// DELETE /api/jobs/{id}
#[utoipa::path(
    delete,
    path = "/api/jobs/{id}",
    tag = "Operações",
    params(("id" = Uuid, Path, description = "ID do trabalho")),
    responses(
        (status = 204, description = "Trabalho removido"),
        (status = 404, description = "Trabalho não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_job(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.operations_service.delete_job(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ÁREA 2: TAREFAS
// =============================================================================

// GET /api/tasks
#[utoipa::path(
    get,
    path = "/api/tasks",
    tag = "Operações",
    responses(
        (status = 200, description = "Tarefas do usuário", body = Vec<Task>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_tasks(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let tasks = app_state.operations_service.list_tasks(user.id).await?;
    Ok((StatusCode::OK, Json(tasks)))
}

// POST /api/tasks
#[utoipa::path(
    post,
    path = "/api/tasks",
    tag = "Operações",
    request_body = CreateTaskPayload,
    responses(
        (status = 201, description = "Tarefa criada", body = Task),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_task(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateTaskPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let task = app_state.operations_service.create_task(user.id, &payload).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

// PATCH /api/tasks/{id}
#[utoipa::path(
    patch,
    path = "/api/tasks/{id}",
    tag = "Operações",
    request_body = UpdateTaskPayload,
    params(("id" = Uuid, Path, description = "ID da tarefa")),
    responses(
        (status = 200, description = "Tarefa atualizada", body = Task),
        (status = 404, description = "Tarefa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_task(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTaskPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let task = app_state.operations_service.update_task(user.id, id, &payload).await?;
    Ok((StatusCode::OK, Json(task)))
}

// DELETE /api/tasks/{id}
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    tag = "Operações",
    params(("id" = Uuid, Path, description = "ID da tarefa")),
    responses(
        (status = 204, description = "Tarefa removida"),
        (status = 404, description = "Tarefa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_task(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.operations_service.delete_task(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
