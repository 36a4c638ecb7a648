//! DTOs for link visit statistics.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Visit;

/// Query parameters for a statistics request.
///
/// Both dates are inclusive calendar days.
#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// A single classified visit.
#[derive(Debug, Serialize)]
pub struct VisitResponse {
    pub ip_address: String,
    pub language: String,
    pub device_type: String,
    pub referer: String,
    pub created_at: DateTime<Utc>,
}

impl From<Visit> for VisitResponse {
    fn from(visit: Visit) -> Self {
        Self {
            ip_address: visit.ip_address,
            language: visit.language,
            device_type: visit.device_type,
            referer: visit.referer,
            created_at: visit.created_at,
        }
    }
}

/// Visit records for one link over a date range.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total: usize,
    pub visits: Vec<VisitResponse>,
}
