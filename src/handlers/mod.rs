pub mod activity;
pub mod auth;
pub mod billing;
pub mod crm;
pub mod dashboard;
pub mod finance;
pub mod health;
pub mod operations;
pub mod portal;
pub mod realtime;
