// src/db/crm_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::crm::{
        CreateCustomerPayload, CreateLeadPayload, Customer, Lead, LeadStatus,
        UpdateCustomerPayload, UpdateLeadPayload,
    },
};

#[derive(Clone)]
pub struct CrmRepository {
    pool: PgPool,
}

impl CrmRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  LEADS
    // =========================================================================

    /// Todos os leads do usuário, mais recentes primeiro
    pub async fn list_leads(&self, user_id: Uuid) -> Result<Vec<Lead>, AppError> {
        let leads = sqlx::query_as::<_, Lead>(
            "SELECT * FROM leads WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(leads)
    }

    pub async fn find_lead(&self, user_id: Uuid, id: Uuid) -> Result<Option<Lead>, AppError> {
        let lead = sqlx::query_as::<_, Lead>("SELECT * FROM leads WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(lead)
    }

    /// O user_id é carimbado aqui; qualquer valor vindo do cliente é ignorado.
    pub async fn create_lead(
        &self,
        user_id: Uuid,
        input: &CreateLeadPayload,
    ) -> Result<Lead, AppError> {
        let lead = sqlx::query_as::<_, Lead>(
            r#"
            INSERT INTO leads (user_id, first_name, last_name, email, phone, source, status, notes)
            VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 'new'::lead_status), $8)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.source)
        .bind(input.status)
        .bind(&input.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(lead)
    }

    /// Atualização parcial, escopada por id E user_id.
    /// None = nenhuma linha correspondeu (inexistente ou de outro usuário).
    pub async fn update_lead(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: &UpdateLeadPayload,
    ) -> Result<Option<Lead>, AppError> {
        let lead = sqlx::query_as::<_, Lead>(
            r#"
            UPDATE leads SET
                first_name = COALESCE($3, first_name),
                last_name  = COALESCE($4, last_name),
                email      = COALESCE($5, email),
                phone      = COALESCE($6, phone),
                source     = COALESCE($7, source),
                status     = COALESCE($8, status),
                notes      = COALESCE($9, notes),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.source)
        .bind(input.status)
        .bind(&input.notes)
        .fetch_optional(&self.pool)
        .await?;

        Ok(lead)
    }

    pub async fn delete_lead(&self, user_id: Uuid, id: Uuid) -> Result<Option<Lead>, AppError> {
        let lead = sqlx::query_as::<_, Lead>(
            "DELETE FROM leads WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(lead)
    }

    /// Marca o status do lead dentro de uma transação (conversão).
    pub async fn set_lead_status<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        id: Uuid,
        status: LeadStatus,
    ) -> Result<Option<Lead>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let lead = sqlx::query_as::<_, Lead>(
            r#"
            UPDATE leads SET status = $3, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(status)
        .fetch_optional(executor)
        .await?;

        Ok(lead)
    }

    // =========================================================================
    //  CLIENTES
    // =========================================================================

    pub async fn list_customers(&self, user_id: Uuid) -> Result<Vec<Customer>, AppError> {
        let customers = sqlx::query_as::<_, Customer>(
            "SELECT * FROM customers WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    pub async fn find_customer(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Customer>, AppError> {
        let customer =
            sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(customer)
    }

    pub async fn create_customer(
        &self,
        user_id: Uuid,
        input: &CreateCustomerPayload,
    ) -> Result<Customer, AppError> {
        self.insert_customer(
            &self.pool,
            user_id,
            &input.first_name,
            &input.last_name,
            input.email.as_deref(),
            input.phone.as_deref(),
            input.address.as_deref(),
            input.notes.as_deref(),
        )
        .await
    }

    /// Versão com executor para participar da transação de conversão de lead.
    #[allow(clippy::too_many_arguments)]
    pub async fn insert_customer<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        first_name: &str,
        last_name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Customer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (user_id, first_name, last_name, email, phone, address, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(phone)
        .bind(address)
        .bind(notes)
        .fetch_one(executor)
        .await?;

        Ok(customer)
    }

    pub async fn update_customer(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: &UpdateCustomerPayload,
    ) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers SET
                first_name = COALESCE($3, first_name),
                last_name  = COALESCE($4, last_name),
                email      = COALESCE($5, email),
                phone      = COALESCE($6, phone),
                address    = COALESCE($7, address),
                notes      = COALESCE($8, notes),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.address)
        .bind(&input.notes)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    pub async fn delete_customer(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<_, Customer>(
            "DELETE FROM customers WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }
}
