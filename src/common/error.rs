use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    // Update/delete sem linha correspondente: não existe OU não pertence ao usuário.
    #[error("{0} não encontrado")]
    NotFound(&'static str),

    #[error("Fatura já está paga")]
    InvoiceAlreadyPaid,

    #[error("Pagamento da fatura já falhou")]
    PaymentAlreadyFailed,

    #[error("Token do portal inválido ou expirado")]
    PortalTokenInvalid,

    // Erros de integridade do webhook: devem virar erro de servidor
    // para que o processador de pagamento reenvie o evento.
    #[error("Assinatura do webhook inválida: {0}")]
    WebhookSignature(String),

    #[error("Payload do webhook inválido: {0}")]
    WebhookPayload(String),

    #[error("Nenhuma fatura para a sessão de checkout '{0}'")]
    SessionNotFound(String),

    #[error("Erro do provedor de pagamento: {0}")]
    PaymentProvider(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::EmailAlreadyExists => {
                (StatusCode::CONFLICT, "Este e-mail já está em uso.".to_string())
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos.".to_string())
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.".to_string(),
            ),
            AppError::UserNotFound => {
                (StatusCode::NOT_FOUND, "Usuário não encontrado.".to_string())
            }
            AppError::NotFound(entity) => {
                (StatusCode::NOT_FOUND, format!("{} não encontrado.", entity))
            }
            AppError::InvoiceAlreadyPaid => {
                (StatusCode::CONFLICT, "Esta fatura já foi paga.".to_string())
            }
            AppError::PaymentAlreadyFailed => (
                StatusCode::CONFLICT,
                "O pagamento desta fatura já falhou; não é possível criar um novo checkout."
                    .to_string(),
            ),
            AppError::PortalTokenInvalid => (
                StatusCode::UNAUTHORIZED,
                "Token do portal inválido ou expirado.".to_string(),
            ),

            // Falhas antes do commit autoritativo do webhook: 5xx obriga o reenvio.
            ref e @ (AppError::WebhookSignature(_)
            | AppError::WebhookPayload(_)
            | AppError::SessionNotFound(_)) => {
                tracing::error!("Falha de integridade no webhook: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Falha ao processar o evento de pagamento.".to_string(),
                )
            }

            AppError::PaymentProvider(ref msg) => {
                tracing::error!("Erro do provedor de pagamento: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "Falha ao comunicar com o provedor de pagamento.".to_string(),
                )
            }

            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.".to_string())
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn erros_de_integridade_do_webhook_viram_5xx() {
        let resp = AppError::SessionNotFound("cs_test_123".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let resp = AppError::WebhookSignature("assinatura ausente".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn nao_encontrado_vira_404() {
        let resp = AppError::NotFound("Lead").into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn fatura_paga_vira_409() {
        let resp = AppError::InvoiceAlreadyPaid.into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn pagamento_falho_vira_409() {
        let resp = AppError::PaymentAlreadyFailed.into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }
}
