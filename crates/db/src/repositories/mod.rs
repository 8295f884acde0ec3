//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod breaker_repo;
pub mod history_repo;
pub mod lock_repo;
pub mod personnel_repo;
pub mod plan_repo;
pub mod settings_repo;

pub use breaker_repo::BreakerRepo;
pub use history_repo::HistoryRepo;
pub use lock_repo::LockRepo;
pub use personnel_repo::PersonnelRepo;
pub use plan_repo::PlanRepo;
pub use settings_repo::SettingsRepo;
