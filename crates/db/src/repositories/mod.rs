//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod alert_repo;
pub mod alert_settings_repo;
pub mod delivery_log_repo;
pub mod inventory_repo;
pub mod merchant_repo;

pub use alert_repo::AlertRepo;
pub use alert_settings_repo::AlertSettingsRepo;
pub use delivery_log_repo::DeliveryLogRepo;
pub use inventory_repo::InventoryRepo;
pub use merchant_repo::MerchantRepo;
