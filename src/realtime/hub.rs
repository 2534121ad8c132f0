// src/realtime/hub.rs
//
// Hub de mudanças em tempo real: um canal broadcast por processo.
// Cada sessão SSE inscrita recebe os eventos do seu próprio usuário;
// entrega at-least-once enquanto inscrito, sem replay de eventos anteriores.

use chrono::Utc;
use serde_json::Value;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::models::realtime::{
    AlertSeverity, ChangeEvent, ChangeKind, ComplianceAlert, FeedMessage,
};

#[derive(Clone)]
pub struct ChangeHub {
    tx: broadcast::Sender<FeedMessage>,
}

impl ChangeHub {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FeedMessage> {
        self.tx.subscribe()
    }

    /// Publica uma mudança de linha. Sem inscritos não é erro:
    /// o feed é advisory, nunca bloqueia a mutação que o originou.
    pub fn publish_change(&self, user_id: Uuid, table: &str, kind: ChangeKind, entity_id: Uuid, record: Value) {
        let event = ChangeEvent {
            user_id,
            table: table.to_string(),
            kind,
            entity_id,
            record,
            occurred_at: Utc::now(),
        };
        let _ = self.tx.send(FeedMessage::Change(event));
    }

    pub fn publish_compliance(&self, user_id: Uuid, severity: AlertSeverity, message: &str) {
        let alert = ComplianceAlert {
            user_id,
            severity,
            message: message.to_string(),
            occurred_at: Utc::now(),
        };
        let _ = self.tx.send(FeedMessage::Compliance(alert));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn inscrito_recebe_mudanca_do_proprio_usuario() {
        let hub = ChangeHub::new(16);
        let mut rx = hub.subscribe();

        let user = Uuid::new_v4();
        let entity = Uuid::new_v4();
        hub.publish_change(user, "leads", ChangeKind::Insert, entity, json!({"firstName": "Ana"}));

        match rx.recv().await.unwrap() {
            FeedMessage::Change(ev) => {
                assert_eq!(ev.user_id, user);
                assert_eq!(ev.table, "leads");
                assert_eq!(ev.kind, ChangeKind::Insert);
                assert_eq!(ev.entity_id, entity);
            }
            other => panic!("mensagem inesperada: {:?}", other),
        }
    }

    #[tokio::test]
    async fn publicar_sem_inscritos_nao_falha() {
        let hub = ChangeHub::new(16);
        // Nenhum receiver vivo; publish não deve entrar em pânico nem retornar erro.
        hub.publish_change(Uuid::new_v4(), "tasks", ChangeKind::Delete, Uuid::new_v4(), json!({}));
        hub.publish_compliance(Uuid::new_v4(), AlertSeverity::Critical, "teste");
    }

    #[tokio::test]
    async fn alerta_critico_circula_pelo_hub() {
        let hub = ChangeHub::new(16);
        let mut rx = hub.subscribe();
        let user = Uuid::new_v4();

        hub.publish_compliance(user, AlertSeverity::Critical, "assinatura de webhook rejeitada");

        match rx.recv().await.unwrap() {
            FeedMessage::Compliance(al) => {
                assert_eq!(al.user_id, user);
                assert_eq!(al.severity, AlertSeverity::Critical);
            }
            other => panic!("mensagem inesperada: {:?}", other),
        }
    }

    #[tokio::test]
    async fn eventos_de_tabelas_diferentes_chegam_a_todos_os_inscritos() {
        let hub = ChangeHub::new(16);
        let mut a = hub.subscribe();
        let mut b = hub.subscribe();

        let user = Uuid::new_v4();
        hub.publish_change(user, "invoices", ChangeKind::Update, Uuid::new_v4(), json!({}));

        assert!(matches!(a.recv().await.unwrap(), FeedMessage::Change(_)));
        assert!(matches!(b.recv().await.unwrap(), FeedMessage::Change(_)));
    }
}
