// src/services/notifier.rs

use async_trait::async_trait;

use crate::common::error::AppError;
use crate::models::finance::Invoice;

/// Disparo do recibo após a confirmação de pagamento.
/// Sempre best-effort: o chamador loga a falha e segue em frente.
#[async_trait]
pub trait ReceiptNotifier: Send + Sync {
    async fn send_receipt(&self, invoice: &Invoice) -> Result<(), AppError>;
}

/// Implementação padrão: registra o recibo no log estruturado.
/// Um provedor de e-mail entra aqui quando houver um.
pub struct LogReceiptNotifier;

#[async_trait]
impl ReceiptNotifier for LogReceiptNotifier {
    async fn send_receipt(&self, invoice: &Invoice) -> Result<(), AppError> {
        tracing::info!(
            invoice = %invoice.invoice_number,
            amount = %invoice.total_amount,
            "Recibo de pagamento emitido"
        );
        Ok(())
    }
}
