// src/db/finance_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::finance::{
        CreateEstimatePayload, CreateInvoicePayload, Estimate, Invoice, UpdateEstimatePayload,
        UpdateInvoicePayload,
    },
};

#[derive(Clone)]
pub struct FinanceRepository {
    pool: PgPool,
}

impl FinanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  ORÇAMENTOS
    // =========================================================================

    pub async fn list_estimates(&self, user_id: Uuid) -> Result<Vec<Estimate>, AppError> {
        let estimates = sqlx::query_as::<_, Estimate>(
            "SELECT * FROM estimates WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(estimates)
    }

    pub async fn create_estimate(
        &self,
        user_id: Uuid,
        input: &CreateEstimatePayload,
    ) -> Result<Estimate, AppError> {
        let estimate = sqlx::query_as::<_, Estimate>(
            r#"
            INSERT INTO estimates (user_id, customer_id, estimate_number, title, total_amount, status, valid_until)
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'draft'::estimate_status), $7)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(input.customer_id)
        .bind(&input.estimate_number)
        .bind(&input.title)
        .bind(input.total_amount)
        .bind(input.status)
        .bind(input.valid_until)
        .fetch_one(&self.pool)
        .await?;

        Ok(estimate)
    }

    pub async fn update_estimate(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: &UpdateEstimatePayload,
    ) -> Result<Option<Estimate>, AppError> {
        let estimate = sqlx::query_as::<_, Estimate>(
            r#"
            UPDATE estimates SET
                customer_id  = COALESCE($3, customer_id),
                title        = COALESCE($4, title),
                total_amount = COALESCE($5, total_amount),
                status       = COALESCE($6, status),
                valid_until  = COALESCE($7, valid_until),
                updated_at   = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(input.customer_id)
        .bind(&input.title)
        .bind(input.total_amount)
        .bind(input.status)
        .bind(input.valid_until)
        .fetch_optional(&self.pool)
        .await?;

        Ok(estimate)
    }

    pub async fn delete_estimate(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Estimate>, AppError> {
        let estimate = sqlx::query_as::<_, Estimate>(
            "DELETE FROM estimates WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(estimate)
    }

    /// Coleção somente-leitura do portal, escopada ao cliente vinculado.
    pub async fn list_estimates_for_customer(
        &self,
        user_id: Uuid,
        customer_id: Uuid,
    ) -> Result<Vec<Estimate>, AppError> {
        let estimates = sqlx::query_as::<_, Estimate>(
            r#"
            SELECT * FROM estimates
            WHERE user_id = $1 AND customer_id = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(estimates)
    }

    // =========================================================================
    //  FATURAS
    // =========================================================================

    pub async fn list_invoices(&self, user_id: Uuid) -> Result<Vec<Invoice>, AppError> {
        let invoices = sqlx::query_as::<_, Invoice>(
            "SELECT * FROM invoices WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(invoices)
    }

    pub async fn find_invoice(&self, user_id: Uuid, id: Uuid) -> Result<Option<Invoice>, AppError> {
        let invoice =
            sqlx::query_as::<_, Invoice>("SELECT * FROM invoices WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(invoice)
    }

    pub async fn create_invoice(
        &self,
        user_id: Uuid,
        input: &CreateInvoicePayload,
    ) -> Result<Invoice, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            INSERT INTO invoices (user_id, customer_id, invoice_number, total_amount, status, due_date)
            VALUES ($1, $2, $3, $4, COALESCE($5, 'draft'::invoice_status), $6)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(input.customer_id)
        .bind(&input.invoice_number)
        .bind(input.total_amount)
        .bind(input.status)
        .bind(input.due_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(invoice)
    }

    pub async fn update_invoice(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: &UpdateInvoicePayload,
    ) -> Result<Option<Invoice>, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            UPDATE invoices SET
                customer_id  = COALESCE($3, customer_id),
                total_amount = COALESCE($4, total_amount),
                status       = COALESCE($5, status),
                due_date     = COALESCE($6, due_date),
                updated_at   = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(input.customer_id)
        .bind(input.total_amount)
        .bind(input.status)
        .bind(input.due_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    pub async fn delete_invoice(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Invoice>, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>(
            "DELETE FROM invoices WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    pub async fn list_invoices_for_customer(
        &self,
        user_id: Uuid,
        customer_id: Uuid,
    ) -> Result<Vec<Invoice>, AppError> {
        let invoices = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT * FROM invoices
            WHERE user_id = $1 AND customer_id = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(invoices)
    }

    // =========================================================================
    //  COBRANÇA (checkout e webhook)
    // =========================================================================

    /// Grava a sessão de checkout e move o pagamento para 'pending'.
    /// Estados terminais (paid, failed) não saem do lugar nem aqui.
    pub async fn set_checkout_session(
        &self,
        user_id: Uuid,
        id: Uuid,
        session_id: &str,
    ) -> Result<Option<Invoice>, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            UPDATE invoices SET
                stripe_session_id = $3,
                payment_status    = 'pending',
                updated_at        = NOW()
            WHERE id = $1 AND user_id = $2
              AND payment_status IN ('unpaid', 'pending')
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    /// Busca do webhook: NÃO escopada por usuário; o evento vem do processador externo.
    pub async fn find_by_session(&self, session_id: &str) -> Result<Option<Invoice>, AppError> {
        let invoice =
            sqlx::query_as::<_, Invoice>("SELECT * FROM invoices WHERE stripe_session_id = $1")
                .bind(session_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(invoice)
    }

    /// Transição autoritativa: paid_at é definido exatamente uma vez.
    pub async fn mark_paid(&self, id: Uuid) -> Result<Option<Invoice>, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            UPDATE invoices SET
                payment_status = 'paid',
                status         = 'paid',
                paid_at        = NOW(),
                updated_at     = NOW()
            WHERE id = $1 AND paid_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    pub async fn mark_payment_failed(&self, id: Uuid) -> Result<Option<Invoice>, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            UPDATE invoices SET
                payment_status = 'failed',
                updated_at     = NOW()
            WHERE id = $1 AND payment_status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }
}
