// src/services/portal_service.rs
//
// Portal do cliente: emissão de tokens opacos, validação e montagem do
// pacote somente-leitura. O token nunca é derivável de dados do cliente:
// 24 bytes do CSPRNG do sistema, em hexadecimal.

use chrono::{Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CrmRepository, FinanceRepository, OperationsRepository, PortalRepository},
    models::activity::{ActivityAction, EntityKind},
    models::portal::{IssuePortalTokenPayload, IssuedPortalToken, PortalBundle, PortalToken},
    models::realtime::AlertSeverity,
    services::activity::ActivityLogger,
};

const DEFAULT_VALIDITY_HOURS: i64 = 168;
const TOKEN_BYTES: usize = 24;

#[derive(Clone)]
pub struct PortalService {
    repo: PortalRepository,
    crm_repo: CrmRepository,
    finance_repo: FinanceRepository,
    operations_repo: OperationsRepository,
    activity: ActivityLogger,
    app_origin: String,
}

impl PortalService {
    pub fn new(
        repo: PortalRepository,
        crm_repo: CrmRepository,
        finance_repo: FinanceRepository,
        operations_repo: OperationsRepository,
        activity: ActivityLogger,
        app_origin: String,
    ) -> Self {
        Self { repo, crm_repo, finance_repo, operations_repo, activity, app_origin }
    }

    /// Emite um token de acesso ao portal para um cliente do usuário.
    pub async fn issue_token(
        &self,
        user_id: Uuid,
        payload: IssuePortalTokenPayload,
    ) -> Result<IssuedPortalToken, AppError> {
        // O cliente precisa pertencer ao emissor
        let customer = self
            .crm_repo
            .find_customer(user_id, payload.customer_id)
            .await?
            .ok_or(AppError::NotFound("Cliente"))?;

        let hours = payload.expires_hours.unwrap_or(DEFAULT_VALIDITY_HOURS);
        let expires_at = Utc::now() + Duration::hours(hours);

        let token = generate_token();
        let row = self
            .repo
            .insert_token(user_id, customer.id, &token, expires_at)
            .await?;

        self.activity
            .log(
                user_id,
                ActivityAction::Created,
                EntityKind::PortalToken,
                row.id,
                Some(&format!(
                    "Acesso ao portal emitido para {} {}",
                    customer.first_name, customer.last_name
                )),
                None,
            )
            .await;

        Ok(IssuedPortalToken {
            id: row.id,
            customer_id: row.customer_id,
            portal_url: format!("{}/client/login?token={}", self.app_origin, token),
            token,
            expires_at: row.expires_at,
        })
    }

    /// Valida um token apresentado pelo portal. Token desconhecido, expirado
    /// ou revogado recebe o mesmo erro opaco; o emissor é alertado pelo canal
    /// de conformidade quando um token conhecido mas inválido é apresentado.
    pub async fn validate_token(&self, token: &str) -> Result<PortalToken, AppError> {
        let row = self
            .repo
            .find_by_token(token)
            .await?
            .ok_or(AppError::PortalTokenInvalid)?;

        if !row.is_valid_at(Utc::now()) {
            let (severity, motivo) = if row.revoked {
                (AlertSeverity::Critical, "revogado")
            } else {
                (AlertSeverity::Warning, "expirado")
            };
            self.activity
                .compliance(
                    row.user_id,
                    severity,
                    &format!("Tentativa de acesso ao portal com token {}", motivo),
                )
                .await;
            return Err(AppError::PortalTokenInvalid);
        }

        Ok(row)
    }

    /// Monta o pacote do portal: o cliente vinculado e exatamente as quatro
    /// coleções dele, nada de outros clientes.
    pub async fn load_bundle(&self, token: &str) -> Result<PortalBundle, AppError> {
        let row = self.validate_token(token).await?;

        // As quatro buscas em paralelo; qualquer falha derruba o pacote inteiro.
        let (customer, jobs, estimates, invoices) = tokio::try_join!(
            self.crm_repo.find_customer(row.user_id, row.customer_id),
            self.operations_repo.list_jobs_for_customer(row.user_id, row.customer_id),
            self.finance_repo.list_estimates_for_customer(row.user_id, row.customer_id),
            self.finance_repo.list_invoices_for_customer(row.user_id, row.customer_id),
        )?;

        let customer = customer.ok_or(AppError::NotFound("Cliente"))?;

        Ok(PortalBundle { customer, jobs, estimates, invoices })
    }

    /// Revoga um token emitido pelo próprio usuário.
    pub async fn revoke_token(&self, user_id: Uuid, id: Uuid) -> Result<PortalToken, AppError> {
        let row = self
            .repo
            .revoke(user_id, id)
            .await?
            .ok_or(AppError::NotFound("Token de portal"))?;

        self.activity
            .log(
                user_id,
                ActivityAction::Updated,
                EntityKind::PortalToken,
                row.id,
                Some("Acesso ao portal revogado"),
                None,
            )
            .await;

        Ok(row)
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn token_gerado_tem_48_hex() {
        let t = generate_token();
        assert_eq!(t.len(), TOKEN_BYTES * 2);
        assert!(t.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn tokens_nao_se_repetem() {
        let mut seen = HashSet::new();
        for _ in 0..100 {
            assert!(seen.insert(generate_token()));
        }
    }
}
