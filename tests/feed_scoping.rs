// O feed em tempo real entrega cada evento apenas ao usuário dono,
// e os alertas de conformidade circulam pelo mesmo canal.

use serde_json::json;
use uuid::Uuid;

use crm_backend::models::realtime::{AlertSeverity, ChangeKind, FeedMessage};
use crm_backend::realtime::hub::ChangeHub;

#[tokio::test]
async fn eventos_de_outro_usuario_sao_filtrados() {
    let hub = ChangeHub::new(32);
    let mut rx = hub.subscribe();

    let ana = Uuid::new_v4();
    let bruno = Uuid::new_v4();

    hub.publish_change(ana, "leads", ChangeKind::Insert, Uuid::new_v4(), json!({"name": "A"}));
    hub.publish_change(bruno, "leads", ChangeKind::Insert, Uuid::new_v4(), json!({"name": "B"}));
    hub.publish_change(ana, "tasks", ChangeKind::Update, Uuid::new_v4(), json!({"name": "C"}));

    // Mesma regra aplicada pela rota SSE: descarta o que não é do inscrito
    let mut received = Vec::new();
    for _ in 0..3 {
        let msg = rx.recv().await.unwrap();
        if msg.user_id() == ana {
            received.push(msg);
        }
    }

    assert_eq!(received.len(), 2);
}

#[tokio::test]
async fn alerta_de_conformidade_chega_com_severidade() {
    let hub = ChangeHub::new(8);
    let mut rx = hub.subscribe();

    let user = Uuid::new_v4();
    hub.publish_compliance(user, AlertSeverity::Critical, "Sessão de pagamento desconhecida");

    match rx.recv().await.unwrap() {
        FeedMessage::Compliance(alert) => {
            assert_eq!(alert.user_id, user);
            assert_eq!(alert.severity, AlertSeverity::Critical);
        }
        other => panic!("esperava alerta de conformidade, recebi {:?}", other),
    }
}

#[test]
fn mensagens_do_feed_serializam_sem_tag_externa() {
    let user = Uuid::new_v4();
    let hub = ChangeHub::new(4);
    let mut rx = hub.subscribe();
    hub.publish_change(user, "invoices", ChangeKind::Update, Uuid::new_v4(), json!({"total": "10.00"}));

    let msg = rx.try_recv().unwrap();
    let value = serde_json::to_value(&msg).unwrap();

    // O consumidor SSE lê os campos direto do objeto, sem envelope
    assert_eq!(value["table"], "invoices");
    assert_eq!(value["kind"], "update");
    assert!(value.get("record").is_some());
}
