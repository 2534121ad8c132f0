// Verificação de ponta a ponta dos eventos de webhook: assinatura
// obrigatória, tolerância de timestamp e interpretação do corpo.

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crm_backend::common::error::AppError;
use crm_backend::services::webhook::{WebhookEventKind, WebhookVerifier};

const SECRET: &str = "whsec_integracao";

fn sign_with(payload: &[u8], secret: &str, ts: i64) -> String {
    let signed = format!("{}.{}", ts, std::str::from_utf8(payload).unwrap());
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(signed.as_bytes());
    format!("t={},v1={}", ts, hex::encode(mac.finalize().into_bytes()))
}

fn sign(payload: &[u8]) -> String {
    sign_with(payload, SECRET, Utc::now().timestamp())
}

fn event_body(event_type: &str, session_id: &str) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({
        "id": "evt_integracao",
        "type": event_type,
        "data": { "object": { "id": session_id, "object": "checkout.session" } }
    }))
    .unwrap()
}

#[test]
fn evento_assinado_e_aceito_e_interpretado() {
    let verifier = WebhookVerifier::new(SECRET.to_string());
    let body = event_body("checkout.session.completed", "cs_live_abc");

    let event = verifier.verify_and_parse(&body, &sign(&body)).unwrap();
    assert_eq!(event.kind, WebhookEventKind::CheckoutSessionCompleted);
    assert_eq!(event.session_id.as_deref(), Some("cs_live_abc"));
}

#[test]
fn sessao_expirada_e_reconhecida() {
    let verifier = WebhookVerifier::new(SECRET.to_string());
    let body = event_body("checkout.session.expired", "cs_live_abc");

    let event = verifier.verify_and_parse(&body, &sign(&body)).unwrap();
    assert_eq!(event.kind, WebhookEventKind::CheckoutSessionExpired);
}

#[test]
fn corpo_trocado_apos_assinar_e_rejeitado() {
    let verifier = WebhookVerifier::new(SECRET.to_string());
    let original = event_body("checkout.session.completed", "cs_live_abc");
    let sig = sign(&original);

    // Atacante troca a sessão mantendo a assinatura do corpo original
    let forjado = event_body("checkout.session.completed", "cs_live_outro");
    let err = verifier.verify_and_parse(&forjado, &sig).unwrap_err();
    assert!(matches!(err, AppError::WebhookSignature(_)));
}

#[test]
fn evento_reapresentado_fora_da_janela_e_rejeitado() {
    let verifier = WebhookVerifier::new(SECRET.to_string());
    let body = event_body("checkout.session.completed", "cs_live_abc");

    // Assinado uma hora atrás: replay fora da tolerância de 5 minutos
    let sig = sign_with(&body, SECRET, Utc::now().timestamp() - 3600);
    let err = verifier.verify_and_parse(&body, &sig).unwrap_err();
    assert!(matches!(err, AppError::WebhookSignature(_)));
}

#[test]
fn cabecalho_malformado_e_rejeitado() {
    let verifier = WebhookVerifier::new(SECRET.to_string());
    let body = event_body("checkout.session.completed", "cs_live_abc");

    for header in ["", "lixo", "v1=abc", "t=abc,v1="] {
        let err = verifier.verify_and_parse(&body, header).unwrap_err();
        assert!(matches!(err, AppError::WebhookSignature(_)), "cabeçalho: {:?}", header);
    }
}

#[test]
fn evento_desconhecido_bem_assinado_passa_como_other() {
    let verifier = WebhookVerifier::new(SECRET.to_string());
    let body = event_body("payment_intent.created", "pi_1");

    let event = verifier.verify_and_parse(&body, &sign(&body)).unwrap();
    assert_eq!(event.kind, WebhookEventKind::Other("payment_intent.created".to_string()));
}
