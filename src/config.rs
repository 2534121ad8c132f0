// src/config.rs

use std::sync::Arc;
use std::time::{Duration, Instant};

use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::db::{
    ActivityRepository, CrmRepository, FinanceRepository, OperationsRepository, PortalRepository,
    PreferencesRepository, UserRepository,
};
use crate::realtime::hub::ChangeHub;
use crate::services::activity::ActivityLogger;
use crate::services::auth::AuthService;
use crate::services::billing_service::BillingService;
use crate::services::crm_service::CrmService;
use crate::services::dashboard_service::DashboardService;
use crate::services::finance_service::FinanceService;
use crate::services::notifier::{LogReceiptNotifier, ReceiptNotifier};
use crate::services::operations_service::OperationsService;
use crate::services::portal_service::PortalService;
use crate::services::stripe::{PaymentProvider, StripeProvider};
use crate::services::webhook::WebhookVerifier;

// Configuração lida do ambiente na inicialização.
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub stripe_secret_key: String,
    pub stripe_webhook_secret: String,
    // Origem pública da aplicação; compõe a URL do portal e os redirects do checkout.
    pub app_origin: String,
    pub bind_addr: String,
    pub pitr_enabled: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let env = |key: &str| -> anyhow::Result<String> {
            std::env::var(key).map_err(|_| anyhow::anyhow!("{} deve ser definida", key))
        };

        Ok(Self {
            database_url: env("DATABASE_URL")?,
            jwt_secret: env("JWT_SECRET")?,
            stripe_secret_key: env("STRIPE_SECRET_KEY")?,
            stripe_webhook_secret: env("STRIPE_WEBHOOK_SECRET")?,
            app_origin: std::env::var("APP_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            pitr_enabled: std::env::var("PITR_ENABLED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        })
    }
}

// O estado compartilhado que será acessível em toda a aplicação.
// Montado uma única vez aqui, na raiz de composição; nada de singleton implícito.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub config: Config,

    pub auth_service: AuthService,
    pub crm_service: CrmService,
    pub finance_service: FinanceService,
    pub operations_service: OperationsService,
    pub billing_service: BillingService,
    pub portal_service: PortalService,
    pub dashboard_service: DashboardService,
    pub activity: ActivityLogger,
    pub hub: ChangeHub,

    pub started_at: Instant,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let db_pool = match PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
        {
            Ok(pool) => {
                tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
                pool
            }
            Err(e) => {
                tracing::error!("🔥 Falha ao conectar ao banco de dados: {:?}", e);
                return Err(e.into());
            }
        };

        Ok(Self::with_pool(db_pool, config))
    }

    // Separado de `new` para que a montagem não dependa de rede.
    pub fn with_pool(db_pool: PgPool, config: Config) -> Self {
        let hub = ChangeHub::new(256);

        let user_repo = UserRepository::new(db_pool.clone());
        let crm_repo = CrmRepository::new(db_pool.clone());
        let finance_repo = FinanceRepository::new(db_pool.clone());
        let operations_repo = OperationsRepository::new(db_pool.clone());
        let activity_repo = ActivityRepository::new(db_pool.clone());
        let portal_repo = PortalRepository::new(db_pool.clone());
        let preferences_repo = PreferencesRepository::new(db_pool.clone());

        let activity = ActivityLogger::new(activity_repo, hub.clone());

        let auth_service = AuthService::new(user_repo, config.jwt_secret.clone());
        let crm_service = CrmService::new(
            crm_repo.clone(),
            activity.clone(),
            hub.clone(),
            db_pool.clone(),
        );
        let finance_service =
            FinanceService::new(finance_repo.clone(), activity.clone(), hub.clone());
        let operations_service =
            OperationsService::new(operations_repo.clone(), activity.clone(), hub.clone());

        let provider: Arc<dyn PaymentProvider> =
            Arc::new(StripeProvider::new(config.stripe_secret_key.clone()));
        let notifier: Arc<dyn ReceiptNotifier> = Arc::new(LogReceiptNotifier);
        let verifier = WebhookVerifier::new(config.stripe_webhook_secret.clone());

        let billing_service = BillingService::new(
            Arc::new(finance_repo.clone()),
            activity.clone(),
            hub.clone(),
            provider,
            notifier,
            verifier,
            config.app_origin.clone(),
        );

        let portal_service = PortalService::new(
            portal_repo,
            crm_repo,
            finance_repo,
            operations_repo,
            activity.clone(),
            config.app_origin.clone(),
        );

        let dashboard_service = DashboardService::new(preferences_repo, db_pool.clone());

        Self {
            db_pool,
            config,
            auth_service,
            crm_service,
            finance_service,
            operations_service,
            billing_service,
            portal_service,
            dashboard_service,
            activity,
            hub,
            started_at: Instant::now(),
        }
    }
}
