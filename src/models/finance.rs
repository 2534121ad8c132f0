// src/models/finance.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "estimate_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EstimateStatus {
    Draft,
    Sent,
    Accepted,
    Declined,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "invoice_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
    Cancelled,
}

// Ciclo de vida do pagamento de uma fatura.
// unpaid -> pending -> {paid | failed}; paid e failed são terminais.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Unpaid,
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    /// As transições só andam para frente; reaplicar o estado atual não é permitido.
    pub fn can_transition(self, next: PaymentStatus) -> bool {
        use PaymentStatus::*;
        matches!(
            (self, next),
            (Unpaid, Pending) | (Unpaid, Paid) | (Unpaid, Failed) | (Pending, Paid) | (Pending, Failed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, PaymentStatus::Paid | PaymentStatus::Failed)
    }
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    pub id: Uuid,

    #[schema(ignore)]
    pub user_id: Uuid,

    pub customer_id: Option<Uuid>,

    #[schema(example = "EST-0001")]
    pub estimate_number: String,
    #[schema(example = "Reforma do telhado")]
    pub title: String,

    #[schema(example = "1500.00")]
    pub total_amount: Decimal,

    pub status: EstimateStatus,

    #[schema(value_type = Option<String>, format = Date, example = "2026-10-01")]
    pub valid_until: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,

    #[schema(ignore)]
    pub user_id: Uuid,

    pub customer_id: Option<Uuid>,

    #[schema(example = "INV-0001")]
    pub invoice_number: String,

    #[schema(example = "100.00")]
    pub total_amount: Decimal,

    pub status: InvoiceStatus,
    pub payment_status: PaymentStatus,

    // Definido uma única vez quando a sessão de checkout é criada.
    #[schema(ignore)]
    pub stripe_session_id: Option<String>,

    // Definido exatamente uma vez na confirmação do webhook.
    pub paid_at: Option<DateTime<Utc>>,

    #[schema(value_type = Option<String>, format = Date, example = "2026-09-30")]
    pub due_date: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEstimatePayload {
    pub customer_id: Option<Uuid>,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "EST-0001")]
    pub estimate_number: String,

    #[validate(length(min = 1, message = "required"))]
    pub title: String,

    #[schema(example = "1500.00")]
    pub total_amount: Decimal,

    pub status: Option<EstimateStatus>,
    #[schema(value_type = Option<String>, format = Date)]
    pub valid_until: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEstimatePayload {
    pub customer_id: Option<Uuid>,
    #[validate(length(min = 1, message = "required"))]
    pub title: Option<String>,
    pub total_amount: Option<Decimal>,
    pub status: Option<EstimateStatus>,
    #[schema(value_type = Option<String>, format = Date)]
    pub valid_until: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoicePayload {
    pub customer_id: Option<Uuid>,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "INV-0001")]
    pub invoice_number: String,

    #[schema(example = "100.00")]
    pub total_amount: Decimal,

    pub status: Option<InvoiceStatus>,
    #[schema(value_type = Option<String>, format = Date)]
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInvoicePayload {
    pub customer_id: Option<Uuid>,
    pub total_amount: Option<Decimal>,
    pub status: Option<InvoiceStatus>,
    #[schema(value_type = Option<String>, format = Date)]
    pub due_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::PaymentStatus::*;

    #[test]
    fn pagamento_so_avanca() {
        assert!(Unpaid.can_transition(Pending));
        assert!(Unpaid.can_transition(Paid));
        assert!(Pending.can_transition(Paid));
        assert!(Pending.can_transition(Failed));

        // Estados terminais não saem do lugar
        assert!(!Paid.can_transition(Pending));
        assert!(!Paid.can_transition(Unpaid));
        assert!(!Failed.can_transition(Paid));

        // Reaplicar o mesmo estado não é uma transição
        assert!(!Paid.can_transition(Paid));
        assert!(!Pending.can_transition(Pending));
    }

    #[test]
    fn terminais() {
        assert!(Paid.is_terminal());
        assert!(Failed.is_terminal());
        assert!(!Unpaid.is_terminal());
        assert!(!Pending.is_terminal());
    }
}
