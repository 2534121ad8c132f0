// src/handlers/realtime.rs
//
// Feed de mudanças em tempo real, entregue por SSE. Cada conexão recebe
// apenas os eventos do próprio usuário; filtros opcionais por tabela e
// por tipo de mudança. O receptor broadcast é derrubado junto com a
// conexão, em qualquer caminho de saída.

use axum::{
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use serde::Deserialize;
use serde_json::json;
use std::{convert::Infallible, time::Duration};
use tokio_stream::{wrappers::BroadcastStream, StreamExt};
use utoipa::IntoParams;

use crate::{
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::realtime::{AlertSeverity, ChangeKind, FeedMessage},
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct FeedQuery {
    // Restringe o feed a uma tabela (ex.: "leads")
    pub table: Option<String>,
    // Restringe a um tipo de mudança (insert, update, delete)
    pub event: Option<ChangeKind>,
}

// GET /api/realtime/events
#[utoipa::path(
    get,
    path = "/api/realtime/events",
    tag = "Tempo real",
    params(FeedQuery),
    responses(
        (status = 200, description = "Stream SSE de mudanças e alertas do usuário")
    ),
    security(("api_jwt" = []))
)]
pub async fn change_feed(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<FeedQuery>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = app_state.hub.subscribe();
    let user_id = user.id;

    let stream = BroadcastStream::new(rx).filter_map(move |msg| {
        let msg = match msg {
            Ok(msg) => msg,
            // Consumidor ficou para trás e o canal descartou eventos.
            // Não há replay: avisamos em vez de sumir com eles em silêncio.
            Err(lagged) => {
                tracing::warn!("Feed em tempo real perdeu eventos: {}", lagged);
                let warn = Event::default()
                    .event("feed_lagged")
                    .json_data(json!({ "warning": "eventos descartados; recarregue a coleção" }));
                return warn.ok().map(Ok);
            }
        };

        if msg.user_id() != user_id {
            return None;
        }

        if let FeedMessage::Change(ref ev) = msg {
            if let Some(ref table) = query.table {
                if &ev.table != table {
                    return None;
                }
            }
            if let Some(kind) = query.event {
                if ev.kind != kind {
                    return None;
                }
            }
        }

        // Alertas críticos chegam com nome próprio para o aviso visível
        let name = match &msg {
            FeedMessage::Change(_) => "change",
            FeedMessage::Compliance(alert) if alert.severity == AlertSeverity::Critical => {
                "critical_alert"
            }
            FeedMessage::Compliance(_) => "compliance",
        };

        match Event::default().event(name).json_data(&msg) {
            Ok(event) => Some(Ok(event)),
            Err(e) => {
                tracing::warn!("Falha ao serializar evento do feed: {}", e);
                None
            }
        }
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}
