// src/services/crm_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CrmRepository,
    models::activity::{ActivityAction, EntityKind},
    models::crm::{
        CreateCustomerPayload, CreateLeadPayload, Customer, Lead, LeadStatus,
        UpdateCustomerPayload, UpdateLeadPayload,
    },
    models::realtime::ChangeKind,
    realtime::hub::ChangeHub,
    services::activity::ActivityLogger,
};

#[derive(Clone)]
pub struct CrmService {
    repo: CrmRepository,
    activity: ActivityLogger,
    hub: ChangeHub,
    pool: PgPool,
}

impl CrmService {
    pub fn new(repo: CrmRepository, activity: ActivityLogger, hub: ChangeHub, pool: PgPool) -> Self {
        Self { repo, activity, hub, pool }
    }

    // Publica a mudança no feed; advisory, nunca falha a operação.
    fn publish(&self, user_id: Uuid, entity: EntityKind, kind: ChangeKind, entity_id: Uuid, record: &impl serde::Serialize) {
        let payload = serde_json::to_value(record).unwrap_or_default();
        self.hub.publish_change(user_id, entity.table(), kind, entity_id, payload);
    }

    // =========================================================================
    //  LEADS
    // =========================================================================

    pub async fn list_leads(&self, user_id: Uuid) -> Result<Vec<Lead>, AppError> {
        self.repo.list_leads(user_id).await
    }

    pub async fn create_lead(
        &self,
        user_id: Uuid,
        input: &CreateLeadPayload,
    ) -> Result<Lead, AppError> {
        let lead = self.repo.create_lead(user_id, input).await?;

        self.activity
            .log(
                user_id,
                ActivityAction::Created,
                EntityKind::Lead,
                lead.id,
                Some(&format!("Lead criado: {} {}", lead.first_name, lead.last_name)),
                None,
            )
            .await;
        self.publish(user_id, EntityKind::Lead, ChangeKind::Insert, lead.id, &lead);

        Ok(lead)
    }

    pub async fn update_lead(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: &UpdateLeadPayload,
    ) -> Result<Lead, AppError> {
        let lead = self
            .repo
            .update_lead(user_id, id, input)
            .await?
            .ok_or(AppError::NotFound("Lead"))?;

        self.activity
            .log(
                user_id,
                ActivityAction::Updated,
                EntityKind::Lead,
                lead.id,
                Some(&format!("Lead atualizado: {} {}", lead.first_name, lead.last_name)),
                None,
            )
            .await;
        self.publish(user_id, EntityKind::Lead, ChangeKind::Update, lead.id, &lead);

        Ok(lead)
    }

    pub async fn delete_lead(&self, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let lead = self
            .repo
            .delete_lead(user_id, id)
            .await?
            .ok_or(AppError::NotFound("Lead"))?;

        self.activity
            .log(
                user_id,
                ActivityAction::Deleted,
                EntityKind::Lead,
                lead.id,
                Some(&format!("Lead removido: {} {}", lead.first_name, lead.last_name)),
                None,
            )
            .await;
        self.publish(user_id, EntityKind::Lead, ChangeKind::Delete, lead.id, &lead);

        Ok(())
    }

    /// Converte um lead em cliente. Inserção do cliente e marcação do lead
    /// acontecem na mesma transação; a trilha e o feed vêm depois do commit.
    pub async fn convert_lead(&self, user_id: Uuid, id: Uuid) -> Result<Customer, AppError> {
        let lead = self
            .repo
            .find_lead(user_id, id)
            .await?
            .ok_or(AppError::NotFound("Lead"))?;

        let mut tx = self.pool.begin().await?;

        let customer = self
            .repo
            .insert_customer(
                &mut *tx,
                user_id,
                &lead.first_name,
                &lead.last_name,
                lead.email.as_deref(),
                lead.phone.as_deref(),
                None,
                lead.notes.as_deref(),
            )
            .await?;

        self.repo
            .set_lead_status(&mut *tx, user_id, id, LeadStatus::Converted)
            .await?
            .ok_or(AppError::NotFound("Lead"))?;

        tx.commit().await?;

        self.activity
            .log(
                user_id,
                ActivityAction::Converted,
                EntityKind::Lead,
                lead.id,
                Some(&format!(
                    "Lead convertido em cliente: {} {}",
                    lead.first_name, lead.last_name
                )),
                Some(&serde_json::json!({ "customer_id": customer.id })),
            )
            .await;
        self.publish(user_id, EntityKind::Customer, ChangeKind::Insert, customer.id, &customer);

        Ok(customer)
    }

    // =========================================================================
    //  CLIENTES
    // =========================================================================

    pub async fn list_customers(&self, user_id: Uuid) -> Result<Vec<Customer>, AppError> {
        self.repo.list_customers(user_id).await
    }

    pub async fn create_customer(
        &self,
        user_id: Uuid,
        input: &CreateCustomerPayload,
    ) -> Result<Customer, AppError> {
        let customer = self.repo.create_customer(user_id, input).await?;

        self.activity
            .log(
                user_id,
                ActivityAction::Created,
                EntityKind::Customer,
                customer.id,
                Some(&format!("Cliente criado: {} {}", customer.first_name, customer.last_name)),
                None,
            )
            .await;
        self.publish(user_id, EntityKind::Customer, ChangeKind::Insert, customer.id, &customer);

        Ok(customer)
    }

    pub async fn update_customer(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: &UpdateCustomerPayload,
    ) -> Result<Customer, AppError> {
        let customer = self
            .repo
            .update_customer(user_id, id, input)
            .await?
            .ok_or(AppError::NotFound("Cliente"))?;

        self.activity
            .log(
                user_id,
                ActivityAction::Updated,
                EntityKind::Customer,
                customer.id,
                Some(&format!(
                    "Cliente atualizado: {} {}",
                    customer.first_name, customer.last_name
                )),
                None,
            )
            .await;
        self.publish(user_id, EntityKind::Customer, ChangeKind::Update, customer.id, &customer);

        Ok(customer)
    }

    pub async fn delete_customer(&self, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let customer = self
            .repo
            .delete_customer(user_id, id)
            .await?
            .ok_or(AppError::NotFound("Cliente"))?;

        self.activity
            .log(
                user_id,
                ActivityAction::Deleted,
                EntityKind::Customer,
                customer.id,
                Some(&format!(
                    "Cliente removido: {} {}",
                    customer.first_name, customer.last_name
                )),
                None,
            )
            .await;
        self.publish(user_id, EntityKind::Customer, ChangeKind::Delete, customer.id, &customer);

        Ok(())
    }
}
