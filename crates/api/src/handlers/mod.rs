//! Request handlers for the alerting resources.
//!
//! Each submodule provides async handler functions for a single resource.
//! Handlers delegate to repositories in `stockwatch_db` or to the alerting
//! engine, and map errors via [`crate::error::AppError`].

pub mod alert;
pub mod alert_cycle;
pub mod alert_settings;
