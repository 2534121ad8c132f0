pub mod activity;
pub mod auth;
pub mod billing_service;
pub mod crm_service;
pub mod dashboard_service;
pub mod finance_service;
pub mod notifier;
pub mod operations_service;
pub mod portal_service;
pub mod stripe;
pub mod webhook;
