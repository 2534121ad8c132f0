// Semântica do token do portal: validade estrita no tempo, revogação
// imediata e o formato do payload de emissão.

use chrono::{Duration, Utc};
use uuid::Uuid;
use validator::Validate;

use crm_backend::models::portal::{IssuePortalTokenPayload, PortalToken};

fn token(expires_in: Duration, revoked: bool) -> PortalToken {
    let now = Utc::now();
    PortalToken {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        customer_id: Uuid::new_v4(),
        token: "a".repeat(48),
        expires_at: now + expires_in,
        revoked,
        created_at: now,
    }
}

#[test]
fn validade_exige_prazo_e_nao_revogacao() {
    let now = Utc::now();

    assert!(token(Duration::hours(168), false).is_valid_at(now));
    assert!(!token(Duration::hours(-1), false).is_valid_at(now));
    assert!(!token(Duration::hours(168), true).is_valid_at(now));
    assert!(!token(Duration::hours(-1), true).is_valid_at(now));
}

#[test]
fn expiracao_e_estrita_no_instante_exato() {
    let t = token(Duration::zero(), false);
    // now == expires_at já é inválido (now < expires_at é estrito)
    assert!(!t.is_valid_at(t.expires_at));
    // Um instante antes ainda vale
    assert!(t.is_valid_at(t.expires_at - Duration::milliseconds(1)));
}

#[test]
fn revogacao_vence_mesmo_com_prazo_longo() {
    let now = Utc::now();
    let t = token(Duration::days(365), true);
    assert!(!t.is_valid_at(now));
}

#[test]
fn payload_de_emissao_sem_prazo_usa_padrao_do_servico() {
    // expiresHours ausente chega como None; o serviço aplica 168 horas
    let payload: IssuePortalTokenPayload = serde_json::from_value(serde_json::json!({
        "customerId": Uuid::new_v4(),
    }))
    .unwrap();

    assert!(payload.expires_hours.is_none());

    let payload: IssuePortalTokenPayload = serde_json::from_value(serde_json::json!({
        "customerId": Uuid::new_v4(),
        "expiresHours": 24,
    }))
    .unwrap();

    assert_eq!(payload.expires_hours, Some(24));
}

#[test]
fn prazo_zero_ou_negativo_e_rejeitado_na_validacao() {
    // Um prazo <= 0 emitiria um token já morto
    for hours in [0, -24] {
        let payload: IssuePortalTokenPayload = serde_json::from_value(serde_json::json!({
            "customerId": Uuid::new_v4(),
            "expiresHours": hours,
        }))
        .unwrap();

        assert!(payload.validate().is_err(), "expiresHours = {hours} deveria falhar");
    }

    let payload: IssuePortalTokenPayload = serde_json::from_value(serde_json::json!({
        "customerId": Uuid::new_v4(),
        "expiresHours": 1,
    }))
    .unwrap();
    assert!(payload.validate().is_ok());
}
