/// Row ids for every LOTO table (Postgres BIGSERIAL).
pub type DbId = i64;

/// `last_updated`, `created_at`, `uploaded_at` and history timestamps, always UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
