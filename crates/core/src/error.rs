use crate::types::DbId;

/// Domain errors raised by the alerting core.
///
/// Provider and persistence failures have their own types at the layers that
/// produce them; this enum covers only the caller-facing taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} {id} does not exist")]
    NotFound { entity: &'static str, id: DbId },

    #[error("{0}")]
    Validation(String),
}
