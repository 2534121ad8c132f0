pub mod activity_repo;
pub mod crm_repo;
pub mod finance_repo;
pub mod operations_repo;
pub mod portal_repo;
pub mod preferences_repo;
pub mod user_repo;

pub use activity_repo::ActivityRepository;
pub use crm_repo::CrmRepository;
pub use finance_repo::FinanceRepository;
pub use operations_repo::OperationsRepository;
pub use portal_repo::PortalRepository;
pub use preferences_repo::PreferencesRepository;
pub use user_repo::UserRepository;
