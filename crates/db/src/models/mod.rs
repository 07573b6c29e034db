//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` update DTO (all `Option` fields) where the entity is
//!   patchable

pub mod alert;
pub mod alert_settings;
pub mod delivery_log;
pub mod inventory;
