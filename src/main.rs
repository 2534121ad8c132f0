// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crm_backend::config::{AppState, Config};
use crm_backend::docs::ApiDoc;
use crm_backend::handlers;
use crm_backend::middleware::auth::auth_middleware;

#[tokio::main]
async fn main() {
    // Carrega variáveis do .env quando presente; em produção vêm do ambiente
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let config = Config::from_env().expect("Configuração de ambiente incompleta.");
    let bind_addr = config.bind_addr.clone();

    let app_state = AppState::new(config)
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Tudo sob /api (exceto /api/auth) exige o JWT
    let api_routes = Router::new()
        .route("/auth/me", get(handlers::auth::get_me))
        // CRM
        .route("/leads", get(handlers::crm::list_leads).post(handlers::crm::create_lead))
        .route(
            "/leads/{id}",
            axum::routing::patch(handlers::crm::update_lead).delete(handlers::crm::delete_lead),
        )
        .route("/leads/{id}/convert", post(handlers::crm::convert_lead))
        .route(
            "/customers",
            get(handlers::crm::list_customers).post(handlers::crm::create_customer),
        )
        .route(
            "/customers/{id}",
            axum::routing::patch(handlers::crm::update_customer)
                .delete(handlers::crm::delete_customer),
        )
        // Finanças
        .route(
            "/estimates",
            get(handlers::finance::list_estimates).post(handlers::finance::create_estimate),
        )
        .route(
            "/estimates/{id}",
            axum::routing::patch(handlers::finance::update_estimate)
                .delete(handlers::finance::delete_estimate),
        )
        .route(
            "/invoices",
            get(handlers::finance::list_invoices).post(handlers::finance::create_invoice),
        )
        .route(
            "/invoices/{id}",
            axum::routing::patch(handlers::finance::update_invoice)
                .delete(handlers::finance::delete_invoice),
        )
        .route("/billing/checkout", post(handlers::billing::create_checkout))
        // Operações
        .route(
            "/jobs",
            get(handlers::operations::list_jobs).post(handlers::operations::create_job),
        )
        .route(
            "/jobs/{id}",
            axum::routing::patch(handlers::operations::update_job)
                .delete(handlers::operations::delete_job),
        )
        .route(
            "/tasks",
            get(handlers::operations::list_tasks).post(handlers::operations::create_task),
        )
        .route(
            "/tasks/{id}",
            axum::routing::patch(handlers::operations::update_task)
                .delete(handlers::operations::delete_task),
        )
        // Portal (emissão/revogação pelo staff)
        .route("/portal/tokens", post(handlers::portal::issue_portal_token))
        .route("/portal/tokens/{id}", axum::routing::delete(handlers::portal::revoke_portal_token))
        // Dashboard
        .route("/dashboard/summary", get(handlers::dashboard::dashboard_summary))
        .route(
            "/preferences",
            get(handlers::dashboard::get_preferences).put(handlers::dashboard::update_preferences),
        )
        // Atividade
        .route("/activity", get(handlers::activity::list_recent_activity))
        .route("/activity/{entity}/{id}", get(handlers::activity::list_entity_activity))
        // Feed em tempo real
        .route("/realtime/events", get(handlers::realtime::change_feed))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_middleware));

    // Combina tudo no router principal
    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(handlers::health::health))
        // Públicas por natureza: o webhook autentica pela assinatura,
        // o portal autentica pelo token opaco
        .route("/webhook", post(handlers::billing::stripe_webhook))
        .route("/portal/session", get(handlers::portal::portal_session))
        .nest("/api/auth", auth_routes)
        .nest("/api", api_routes)
        .with_state(app_state);

    // Inicia o servidor
    let listener = TcpListener::bind(&bind_addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
