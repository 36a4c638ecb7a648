//! Visit entity recording a single redirect resolution.

use chrono::{DateTime, Utc};

/// An immutable log entry of one redirect resolution event.
///
/// Belongs to exactly one link and is never mutated after insertion.
/// Unresolvable dimensions carry the classifier sentinels
/// (`"unknown"` / `"direct"`), never NULL.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Visit {
    pub id: i64,
    pub link_id: i64,
    pub ip_address: String,
    pub language: String,
    pub device_type: String,
    pub referer: String,
    pub created_at: DateTime<Utc>,
}

/// Input data for recording a new visit.
#[derive(Debug, Clone)]
pub struct NewVisit {
    pub link_id: i64,
    pub ip_address: String,
    pub language: String,
    pub device_type: String,
    pub referer: String,
}
