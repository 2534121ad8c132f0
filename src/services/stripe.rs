// src/services/stripe.rs
//
// Provedor de pagamento por trás de um trait, para que o serviço de cobrança
// não dependa da API concreta do Stripe (e possa ser testado com um dublê).

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;

use crate::common::error::AppError;
use crate::models::finance::Invoice;

const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

/// Sessão de checkout criada no provedor.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    pub session_id: String,
    pub url: String,
}

#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Cria uma sessão de checkout para pagamento único de uma fatura.
    async fn create_checkout_session(
        &self,
        invoice: &Invoice,
        success_url: &str,
        cancel_url: &str,
    ) -> Result<CheckoutSession, AppError>;
}

#[derive(Clone)]
pub struct StripeProvider {
    client: Client,
    secret_key: String,
}

impl StripeProvider {
    pub fn new(secret_key: String) -> Self {
        Self { client: Client::new(), secret_key }
    }

    async fn stripe_request<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        form: &[(&str, &str)],
    ) -> Result<T, AppError> {
        let url = format!("{STRIPE_API_BASE}{endpoint}");

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.secret_key, Option::<&str>::None)
            .form(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Requisição à API do Stripe falhou: {}", e);
                AppError::PaymentProvider(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %error_body, "Erro da API do Stripe");
            return Err(AppError::PaymentProvider(format!("Stripe retornou {status}")));
        }

        response.json::<T>().await.map_err(|e| AppError::PaymentProvider(e.to_string()))
    }
}

#[async_trait]
impl PaymentProvider for StripeProvider {
    async fn create_checkout_session(
        &self,
        invoice: &Invoice,
        success_url: &str,
        cancel_url: &str,
    ) -> Result<CheckoutSession, AppError> {
        // O Stripe trabalha em centavos.
        let amount_cents = (invoice.total_amount * rust_decimal::Decimal::from(100))
            .round()
            .to_i64()
            .map(|v| v.to_string())
            .ok_or_else(|| AppError::PaymentProvider("valor da fatura inválido".to_string()))?;

        let product_name = format!("Fatura {}", invoice.invoice_number);
        let invoice_id = invoice.id.to_string();

        let form = [
            ("mode", "payment"),
            ("success_url", success_url),
            ("cancel_url", cancel_url),
            ("line_items[0][price_data][currency]", "brl"),
            ("line_items[0][price_data][product_data][name]", product_name.as_str()),
            ("line_items[0][price_data][unit_amount]", amount_cents.as_str()),
            ("line_items[0][quantity]", "1"),
            ("metadata[invoice_id]", invoice_id.as_str()),
        ];

        let session: StripeCheckoutSession =
            self.stripe_request("/checkout/sessions", &form).await?;

        let url = session
            .url
            .ok_or_else(|| AppError::PaymentProvider("sessão criada sem URL".to_string()))?;

        Ok(CheckoutSession { session_id: session.id, url })
    }
}

// Resposta da API do Stripe.
#[derive(Debug, Deserialize)]
struct StripeCheckoutSession {
    id: String,
    url: Option<String>,
}
