// src/realtime/cache.rs
//
// Cópia local de uma coleção dentro de uma sessão, mantida por dois caminhos
// de escrita independentes: o resultado da mutação local e os eventos remotos
// do feed. Reconciliação por last-writer-wins no updated_at, chaveada pelo id
// da entidade. Modelo de consistência fraca assumido: o cache não detecta nem
// mescla conflitos; a próxima busca completa substitui tudo.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{
    crm::{Customer, Lead},
    finance::{Estimate, Invoice},
    operations::{Job, Task},
};

/// Registro que pode viver no cache de sessão.
pub trait CacheRecord {
    fn id(&self) -> Uuid;
    fn updated_at(&self) -> DateTime<Utc>;
}

macro_rules! impl_cache_record {
    ($($ty:ty),+ $(,)?) => {
        $(impl CacheRecord for $ty {
            fn id(&self) -> Uuid {
                self.id
            }
            fn updated_at(&self) -> DateTime<Utc> {
                self.updated_at
            }
        })+
    };
}

impl_cache_record!(Lead, Customer, Estimate, Invoice, Job, Task);

#[derive(Debug, Default)]
pub struct SessionCache<T> {
    rows: Vec<T>,
}

impl<T: CacheRecord + Clone> SessionCache<T> {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Resultado de um fetch completo: substitui a lista inteira.
    pub fn replace_all(&mut self, rows: Vec<T>) {
        self.rows = rows;
    }

    /// Caminho local: o resultado confirmado de uma mutação desta sessão.
    /// Criações entram no topo (ordem de criação descendente).
    pub fn apply_local(&mut self, record: T) {
        match self.rows.iter_mut().find(|r| r.id() == record.id()) {
            Some(existing) => *existing = record,
            None => self.rows.insert(0, record),
        }
    }

    /// Caminho remoto: evento do feed de outra sessão.
    /// Last-writer-wins: só aplica se o registro recebido for mais novo.
    pub fn apply_remote(&mut self, record: T) {
        match self.rows.iter_mut().find(|r| r.id() == record.id()) {
            Some(existing) => {
                if record.updated_at() > existing.updated_at() {
                    *existing = record;
                }
            }
            None => self.rows.insert(0, record),
        }
    }

    /// Remoção (local ou remota); id desconhecido é ignorado.
    pub fn remove(&mut self, id: Uuid) {
        self.rows.retain(|r| r.id() != id);
    }

    pub fn get(&self, id: Uuid) -> Option<&T> {
        self.rows.iter().find(|r| r.id() == id)
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: Uuid,
        name: &'static str,
        updated_at: DateTime<Utc>,
    }

    impl CacheRecord for Row {
        fn id(&self) -> Uuid {
            self.id
        }
        fn updated_at(&self) -> DateTime<Utc> {
            self.updated_at
        }
    }

    fn row(name: &'static str, updated_at: DateTime<Utc>) -> Row {
        Row { id: Uuid::new_v4(), name, updated_at }
    }

    #[test]
    fn criacao_local_entra_no_topo() {
        let mut cache = SessionCache::new();
        let now = Utc::now();
        cache.replace_all(vec![row("antigo", now)]);

        cache.apply_local(row("novo", now));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.rows()[0].name, "novo");
    }

    #[test]
    fn escrita_local_substitui_sem_olhar_timestamp() {
        // A mutação local é o resultado confirmado pelo servidor:
        // vence mesmo que o relógio do registro em cache esteja à frente.
        let mut cache = SessionCache::new();
        let now = Utc::now();
        let mut r = row("original", now + Duration::seconds(30));
        cache.apply_local(r.clone());

        r.name = "confirmado";
        r.updated_at = now;
        cache.apply_local(r.clone());

        assert_eq!(cache.get(r.id).unwrap().name, "confirmado");
    }

    #[test]
    fn evento_remoto_mais_novo_vence() {
        let mut cache = SessionCache::new();
        let now = Utc::now();
        let mut r = row("local", now);
        cache.apply_local(r.clone());

        r.name = "remoto";
        r.updated_at = now + Duration::seconds(5);
        cache.apply_remote(r.clone());

        assert_eq!(cache.get(r.id).unwrap().name, "remoto");
    }

    #[test]
    fn evento_remoto_atrasado_e_descartado() {
        let mut cache = SessionCache::new();
        let now = Utc::now();
        let mut r = row("local", now);
        cache.apply_local(r.clone());

        r.name = "atrasado";
        r.updated_at = now - Duration::seconds(5);
        cache.apply_remote(r.clone());

        // O registro local mais novo permanece.
        assert_eq!(cache.get(r.id).unwrap().name, "local");
    }

    #[test]
    fn insercao_remota_de_id_desconhecido() {
        let mut cache = SessionCache::new();
        let r = row("de outra sessão", Utc::now());
        cache.apply_remote(r.clone());
        assert_eq!(cache.len(), 1);
        assert!(cache.get(r.id).is_some());
    }

    #[test]
    fn remocao_e_idempotente() {
        let mut cache = SessionCache::new();
        let r = row("x", Utc::now());
        cache.apply_local(r.clone());

        cache.remove(r.id);
        cache.remove(r.id); // segunda vez não faz nada
        assert!(cache.is_empty());
    }

    #[test]
    fn falha_de_mutacao_nao_toca_o_cache() {
        // O contrato dos serviços: em caso de falha nada é aplicado.
        // Aqui só documentamos que o cache não muda se nada for aplicado.
        let mut cache = SessionCache::new();
        let r = row("unico", Utc::now());
        cache.replace_all(vec![r.clone()]);
        let antes: Vec<Row> = cache.rows().to_vec();

        // (nenhum apply — a operação falhou antes de confirmar)

        assert_eq!(cache.rows(), antes.as_slice());
    }
}
