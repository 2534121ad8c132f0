// src/services/finance_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::FinanceRepository,
    models::activity::{ActivityAction, EntityKind},
    models::finance::{
        CreateEstimatePayload, CreateInvoicePayload, Estimate, Invoice, UpdateEstimatePayload,
        UpdateInvoicePayload,
    },
    models::realtime::ChangeKind,
    realtime::hub::ChangeHub,
    services::activity::ActivityLogger,
};

#[derive(Clone)]
pub struct FinanceService {
    repo: FinanceRepository,
    activity: ActivityLogger,
    hub: ChangeHub,
}

impl FinanceService {
    pub fn new(repo: FinanceRepository, activity: ActivityLogger, hub: ChangeHub) -> Self {
        Self { repo, activity, hub }
    }

    fn publish(&self, user_id: Uuid, entity: EntityKind, kind: ChangeKind, entity_id: Uuid, record: &impl serde::Serialize) {
        let payload = serde_json::to_value(record).unwrap_or_default();
        self.hub.publish_change(user_id, entity.table(), kind, entity_id, payload);
    }

    // =========================================================================
    //  ORÇAMENTOS
    // =========================================================================

    pub async fn list_estimates(&self, user_id: Uuid) -> Result<Vec<Estimate>, AppError> {
        self.repo.list_estimates(user_id).await
    }

    pub async fn create_estimate(
        &self,
        user_id: Uuid,
        input: &CreateEstimatePayload,
    ) -> Result<Estimate, AppError> {
        let estimate = self.repo.create_estimate(user_id, input).await?;

        self.activity
            .log(
                user_id,
                ActivityAction::Created,
                EntityKind::Estimate,
                estimate.id,
                Some(&format!("Orçamento criado: {}", estimate.estimate_number)),
                None,
            )
            .await;
        self.publish(user_id, EntityKind::Estimate, ChangeKind::Insert, estimate.id, &estimate);

        Ok(estimate)
    }

    pub async fn update_estimate(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: &UpdateEstimatePayload,
    ) -> Result<Estimate, AppError> {
        let estimate = self
            .repo
            .update_estimate(user_id, id, input)
            .await?
            .ok_or(AppError::NotFound("Orçamento"))?;

        self.activity
            .log(
                user_id,
                ActivityAction::Updated,
                EntityKind::Estimate,
                estimate.id,
                Some(&format!("Orçamento atualizado: {}", estimate.estimate_number)),
                None,
            )
            .await;
        self.publish(user_id, EntityKind::Estimate, ChangeKind::Update, estimate.id, &estimate);

        Ok(estimate)
    }

    pub async fn delete_estimate(&self, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let estimate = self
            .repo
            .delete_estimate(user_id, id)
            .await?
            .ok_or(AppError::NotFound("Orçamento"))?;

        self.activity
            .log(
                user_id,
                ActivityAction::Deleted,
                EntityKind::Estimate,
                estimate.id,
                Some(&format!("Orçamento removido: {}", estimate.estimate_number)),
                None,
            )
            .await;
        self.publish(user_id, EntityKind::Estimate, ChangeKind::Delete, estimate.id, &estimate);

        Ok(())
    }

    // =========================================================================
    //  FATURAS
    // =========================================================================

    pub async fn list_invoices(&self, user_id: Uuid) -> Result<Vec<Invoice>, AppError> {
        self.repo.list_invoices(user_id).await
    }

    pub async fn create_invoice(
        &self,
        user_id: Uuid,
        input: &CreateInvoicePayload,
    ) -> Result<Invoice, AppError> {
        let invoice = self.repo.create_invoice(user_id, input).await?;

        self.activity
            .log(
                user_id,
                ActivityAction::Created,
                EntityKind::Invoice,
                invoice.id,
                Some(&format!("Fatura criada: {}", invoice.invoice_number)),
                None,
            )
            .await;
        self.publish(user_id, EntityKind::Invoice, ChangeKind::Insert, invoice.id, &invoice);

        Ok(invoice)
    }

    pub async fn update_invoice(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: &UpdateInvoicePayload,
    ) -> Result<Invoice, AppError> {
        let invoice = self
            .repo
            .update_invoice(user_id, id, input)
            .await?
            .ok_or(AppError::NotFound("Fatura"))?;

        self.activity
            .log(
                user_id,
                ActivityAction::Updated,
                EntityKind::Invoice,
                invoice.id,
                Some(&format!("Fatura atualizada: {}", invoice.invoice_number)),
                None,
            )
            .await;
        self.publish(user_id, EntityKind::Invoice, ChangeKind::Update, invoice.id, &invoice);

        Ok(invoice)
    }

    pub async fn delete_invoice(&self, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let invoice = self
            .repo
            .delete_invoice(user_id, id)
            .await?
            .ok_or(AppError::NotFound("Fatura"))?;

        self.activity
            .log(
                user_id,
                ActivityAction::Deleted,
                EntityKind::Invoice,
                invoice.id,
                Some(&format!("Fatura removida: {}", invoice.invoice_number)),
                None,
            )
            .await;
        self.publish(user_id, EntityKind::Invoice, ChangeKind::Delete, invoice.id, &invoice);

        Ok(())
    }
}
