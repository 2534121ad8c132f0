// src/services/webhook.rs
//
// Verificação e parse dos eventos de webhook do Stripe.
// A verificação criptográfica da assinatura é obrigatória: o cabeçalho
// `stripe-signature` carrega `t=<timestamp>,v1=<hmac>`, e o HMAC-SHA256
// é calculado sobre "{t}.{corpo}" com o segredo compartilhado.

use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use crate::common::error::AppError;

// Tolerância de frescor do timestamp (segundos).
const TIMESTAMP_TOLERANCE_SECS: i64 = 300;

/// Tipos de evento que o processador conhece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEventKind {
    CheckoutSessionCompleted,
    CheckoutSessionExpired,
    /// Qualquer outro tipo: reconhecido e ignorado.
    Other(String),
}

impl From<&str> for WebhookEventKind {
    fn from(s: &str) -> Self {
        match s {
            "checkout.session.completed" => Self::CheckoutSessionCompleted,
            "checkout.session.expired" => Self::CheckoutSessionExpired,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Evento já verificado e interpretado.
#[derive(Debug, Clone)]
pub struct WebhookEvent {
    pub id: String,
    pub kind: WebhookEventKind,
    /// ID da sessão de checkout (objeto do evento), quando aplicável.
    pub session_id: Option<String>,
}

#[derive(Clone)]
pub struct WebhookVerifier {
    secret: String,
}

impl WebhookVerifier {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    /// Verifica a assinatura e interpreta o corpo.
    pub fn verify_and_parse(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, AppError> {
        self.verify_signature(payload, signature, Utc::now().timestamp())?;
        Self::parse(payload)
    }

    /// Só o parse, sem assinatura. Usado pelos testes de interpretação.
    pub fn parse(payload: &[u8]) -> Result<WebhookEvent, AppError> {
        let raw: RawStripeEvent = serde_json::from_slice(payload)
            .map_err(|e| AppError::WebhookPayload(e.to_string()))?;

        let kind = WebhookEventKind::from(raw.event_type.as_str());
        let session_id = raw
            .data
            .object
            .get("id")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());

        Ok(WebhookEvent { id: raw.id, kind, session_id })
    }

    fn verify_signature(
        &self,
        payload: &[u8],
        signature: &str,
        now_ts: i64,
    ) -> Result<(), AppError> {
        // Cabeçalho no formato: t=timestamp,v1=assinatura
        let mut timestamp: Option<&str> = None;
        let mut sig_v1: Option<&str> = None;

        for part in signature.split(',') {
            if let Some((key, value)) = part.split_once('=') {
                match key {
                    "t" => timestamp = Some(value),
                    "v1" => sig_v1 = Some(value),
                    _ => {}
                }
            }
        }

        let timestamp = timestamp
            .ok_or_else(|| AppError::WebhookSignature("timestamp ausente".to_string()))?;
        let sig_v1 =
            sig_v1.ok_or_else(|| AppError::WebhookSignature("assinatura v1 ausente".to_string()))?;

        let body = std::str::from_utf8(payload)
            .map_err(|_| AppError::WebhookSignature("corpo não é UTF-8".to_string()))?;
        let signed_payload = format!("{}.{}", timestamp, body);

        let mut mac = Hmac::<Sha256>::new_from_slice(self.secret.as_bytes())
            .map_err(|_| AppError::WebhookSignature("segredo inválido".to_string()))?;
        mac.update(signed_payload.as_bytes());
        let expected = hex::encode(mac.finalize().into_bytes());

        // Comparação em tempo constante
        if !constant_time_eq(sig_v1.as_bytes(), expected.as_bytes()) {
            return Err(AppError::WebhookSignature("assinatura não confere".to_string()));
        }

        // Frescor do timestamp
        let ts: i64 = timestamp
            .parse()
            .map_err(|_| AppError::WebhookSignature("timestamp malformado".to_string()))?;
        if (now_ts - ts).abs() > TIMESTAMP_TOLERANCE_SECS {
            return Err(AppError::WebhookSignature("timestamp fora da tolerância".to_string()));
        }

        Ok(())
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0, |acc, (x, y)| acc | (x ^ y)) == 0
}

// Formato bruto do evento Stripe.
#[derive(Debug, Deserialize)]
struct RawStripeEvent {
    id: String,
    #[serde(rename = "type")]
    event_type: String,
    data: RawEventData,
}

#[derive(Debug, Deserialize)]
struct RawEventData {
    object: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_teste_assinatura";

    fn sign(payload: &[u8], secret: &str, ts: i64) -> String {
        let signed = format!("{}.{}", ts, std::str::from_utf8(payload).unwrap());
        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(signed.as_bytes());
        format!("t={},v1={}", ts, hex::encode(mac.finalize().into_bytes()))
    }

    fn payload(event_type: &str, session_id: &str) -> Vec<u8> {
        serde_json::to_vec(&serde_json::json!({
            "id": "evt_1",
            "type": event_type,
            "data": { "object": { "id": session_id } }
        }))
        .unwrap()
    }

    #[test]
    fn assinatura_valida_passa() {
        let verifier = WebhookVerifier::new(SECRET.to_string());
        let body = payload("checkout.session.completed", "cs_123");
        let now = Utc::now().timestamp();
        let sig = sign(&body, SECRET, now);

        assert!(verifier.verify_signature(&body, &sig, now).is_ok());
    }

    #[test]
    fn corpo_adulterado_e_rejeitado() {
        let verifier = WebhookVerifier::new(SECRET.to_string());
        let body = payload("checkout.session.completed", "cs_123");
        let now = Utc::now().timestamp();
        let sig = sign(&body, SECRET, now);

        let adulterado = payload("checkout.session.completed", "cs_999");
        let err = verifier.verify_signature(&adulterado, &sig, now).unwrap_err();
        assert!(matches!(err, AppError::WebhookSignature(_)));
    }

    #[test]
    fn segredo_errado_e_rejeitado() {
        let verifier = WebhookVerifier::new(SECRET.to_string());
        let body = payload("checkout.session.completed", "cs_123");
        let now = Utc::now().timestamp();
        let sig = sign(&body, "whsec_outro", now);

        assert!(verifier.verify_signature(&body, &sig, now).is_err());
    }

    #[test]
    fn timestamp_velho_e_rejeitado() {
        let verifier = WebhookVerifier::new(SECRET.to_string());
        let body = payload("checkout.session.completed", "cs_123");
        let now = Utc::now().timestamp();
        let sig = sign(&body, SECRET, now - TIMESTAMP_TOLERANCE_SECS - 1);

        assert!(verifier.verify_signature(&body, &sig, now).is_err());
    }

    #[test]
    fn cabecalho_sem_v1_e_rejeitado() {
        let verifier = WebhookVerifier::new(SECRET.to_string());
        let body = payload("checkout.session.completed", "cs_123");
        let err = verifier
            .verify_signature(&body, "t=1234567890", Utc::now().timestamp())
            .unwrap_err();
        assert!(matches!(err, AppError::WebhookSignature(_)));
    }

    #[test]
    fn parse_extrai_tipo_e_sessao() {
        let body = payload("checkout.session.completed", "cs_123");
        let event = WebhookVerifier::parse(&body).unwrap();
        assert_eq!(event.kind, WebhookEventKind::CheckoutSessionCompleted);
        assert_eq!(event.session_id.as_deref(), Some("cs_123"));
    }

    #[test]
    fn evento_desconhecido_vira_other() {
        let body = payload("invoice.finalized", "in_1");
        let event = WebhookVerifier::parse(&body).unwrap();
        assert_eq!(event.kind, WebhookEventKind::Other("invoice.finalized".to_string()));
    }

    #[test]
    fn corpo_invalido_e_erro_de_payload() {
        let err = WebhookVerifier::parse(b"nao e json").unwrap_err();
        assert!(matches!(err, AppError::WebhookPayload(_)));
    }
}
