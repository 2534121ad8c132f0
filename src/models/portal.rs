// src/models/portal.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::crm::Customer;
use crate::models::finance::{Estimate, Invoice};
use crate::models::operations::Job;

// Credencial opaca e temporária do portal do cliente.
// Validade: now < expires_at E não revogado.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PortalToken {
    pub id: Uuid,

    #[schema(ignore)]
    pub user_id: Uuid,

    pub customer_id: Uuid,

    #[serde(skip_serializing)] // o segredo só sai na emissão, dentro da URL
    #[schema(ignore)]
    pub token: String,

    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
    pub created_at: DateTime<Utc>,
}

impl PortalToken {
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.revoked && now < self.expires_at
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssuePortalTokenPayload {
    pub customer_id: Uuid,

    // Padrão: 168 horas (7 dias). Zero ou negativo emitiria um token já morto.
    #[validate(range(min = 1, message = "deve ser pelo menos 1 hora"))]
    #[schema(example = 168)]
    pub expires_hours: Option<i64>,
}

// Resposta da emissão: o token e a URL pronta do portal.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssuedPortalToken {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub token: String,
    pub portal_url: String,
    pub expires_at: DateTime<Utc>,
}

// Pacote somente-leitura carregado para um token válido:
// exatamente as quatro coleções do cliente vinculado.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PortalBundle {
    pub customer: Customer,
    pub jobs: Vec<Job>,
    pub estimates: Vec<Estimate>,
    pub invoices: Vec<Invoice>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn token(expires_at: DateTime<Utc>, revoked: bool) -> PortalToken {
        PortalToken {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            token: "abc".into(),
            expires_at,
            revoked,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn token_expirado_e_rejeitado() {
        let now = Utc::now();
        assert!(!token(now - Duration::hours(1), false).is_valid_at(now));
        // Expirar exatamente agora também invalida (now < expires_at é estrito)
        assert!(!token(now, false).is_valid_at(now));
    }

    #[test]
    fn token_revogado_e_rejeitado_mesmo_dentro_do_prazo() {
        let now = Utc::now();
        assert!(!token(now + Duration::hours(1), true).is_valid_at(now));
    }

    #[test]
    fn token_vigente_e_aceito() {
        let now = Utc::now();
        assert!(token(now + Duration::hours(168), false).is_valid_at(now));
    }
}
