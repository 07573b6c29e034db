/// Database primary keys are BIGSERIAL, so ids are `i64` everywhere.
pub type DbId = i64;

/// Timestamps are stored and compared in UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
