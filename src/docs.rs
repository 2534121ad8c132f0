// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- CRM ---
        handlers::crm::list_leads,
        handlers::crm::create_lead,
        handlers::crm::update_lead,
        handlers::crm::delete_lead,
        handlers::crm::convert_lead,
        handlers::crm::list_customers,
        handlers::crm::create_customer,
        handlers::crm::update_customer,
        handlers::crm::delete_customer,

        // --- Finanças ---
        handlers::finance::list_estimates,
        handlers::finance::create_estimate,
        handlers::finance::update_estimate,
        handlers::finance::delete_estimate,
        handlers::finance::list_invoices,
        handlers::finance::create_invoice,
        handlers::finance::update_invoice,
        handlers::finance::delete_invoice,

        // --- Operações ---
        handlers::operations::list_jobs,
        handlers::operations::create_job,
        handlers::operations::update_job,
        handlers::operations::delete_job,
        handlers::operations::list_tasks,
        handlers::operations::create_task,
        handlers::operations::update_task,
        handlers::operations::delete_task,

        // --- Cobrança ---
        handlers::billing::create_checkout,
        handlers::billing::stripe_webhook,

        // --- Portal ---
        handlers::portal::issue_portal_token,
        handlers::portal::revoke_portal_token,
        handlers::portal::portal_session,

        // --- Dashboard ---
        handlers::dashboard::dashboard_summary,
        handlers::dashboard::get_preferences,
        handlers::dashboard::update_preferences,

        // --- Atividade ---
        handlers::activity::list_recent_activity,
        handlers::activity::list_entity_activity,

        // --- Tempo real ---
        handlers::realtime::change_feed,

        // --- Saúde ---
        handlers::health::health,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- CRM ---
            models::crm::LeadStatus,
            models::crm::Lead,
            models::crm::Customer,
            models::crm::CreateLeadPayload,
            models::crm::UpdateLeadPayload,
            models::crm::CreateCustomerPayload,
            models::crm::UpdateCustomerPayload,

            // --- Finanças ---
            models::finance::EstimateStatus,
            models::finance::InvoiceStatus,
            models::finance::PaymentStatus,
            models::finance::Estimate,
            models::finance::Invoice,
            models::finance::CreateEstimatePayload,
            models::finance::UpdateEstimatePayload,
            models::finance::CreateInvoicePayload,
            models::finance::UpdateInvoicePayload,

            // --- Operações ---
            models::operations::JobStatus,
            models::operations::TaskStatus,
            models::operations::TaskPriority,
            models::operations::Job,
            models::operations::Task,
            models::operations::CreateJobPayload,
            models::operations::UpdateJobPayload,
            models::operations::CreateTaskPayload,
            models::operations::UpdateTaskPayload,

            // --- Portal ---
            models::portal::PortalToken,
            models::portal::IssuePortalTokenPayload,
            models::portal::IssuedPortalToken,
            models::portal::PortalBundle,

            // --- Dashboard ---
            models::dashboard::UserPreferences,
            models::dashboard::UpdatePreferencesPayload,
            models::dashboard::DashboardSummary,

            // --- Atividade ---
            models::activity::ActivityAction,
            models::activity::EntityKind,
            models::activity::ActivityLog,
            models::activity::ComplianceEvent,

            // --- Tempo real ---
            models::realtime::ChangeKind,
            models::realtime::ChangeEvent,
            models::realtime::AlertSeverity,
            models::realtime::ComplianceAlert,

            // --- Respostas dos handlers ---
            handlers::billing::CheckoutPayload,
            handlers::billing::CheckoutResponse,
            handlers::health::HealthResponse,
            handlers::health::DatabaseHealth,
            handlers::health::PitrHealth,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "CRM", description = "Leads e Clientes"),
        (name = "Finanças", description = "Orçamentos e Faturas"),
        (name = "Operações", description = "Trabalhos e Tarefas"),
        (name = "Cobrança", description = "Checkout e Webhook de Pagamento"),
        (name = "Portal", description = "Portal do Cliente"),
        (name = "Dashboard", description = "Resumo e Preferências"),
        (name = "Atividade", description = "Trilha de Auditoria"),
        (name = "Tempo real", description = "Feed de Mudanças (SSE)"),
        (name = "Saúde", description = "Diagnóstico do Serviço")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
