//! Link entity representing a shortened URL with per-device destinations.

use chrono::{DateTime, Utc};

use crate::utils::traffic::DeviceClass;

/// A shortened link owned by an account.
///
/// The short id is derived from the storage-assigned numeric id and is
/// nullable only until first persisted; once generated it never changes.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Link {
    pub id: i64,
    pub account_id: i64,
    pub ios_url: Option<String>,
    pub android_url: Option<String>,
    pub desktop_url: Option<String>,
    pub default_url: String,
    pub description: Option<String>,
    pub short_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Picks the destination URL for a classified device.
    ///
    /// Platform destinations fall back to the default; unknown devices
    /// always go to the default.
    pub fn destination_for(&self, device: DeviceClass) -> &str {
        let platform_url = match device {
            DeviceClass::Ios => self.ios_url.as_deref(),
            DeviceClass::Android => self.android_url.as_deref(),
            DeviceClass::Desktop => self.desktop_url.as_deref(),
            DeviceClass::Unknown => None,
        };
        platform_url.unwrap_or(&self.default_url)
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub account_id: i64,
    pub ios_url: Option<String>,
    pub android_url: Option<String>,
    pub desktop_url: Option<String>,
    pub default_url: String,
    pub description: Option<String>,
}

/// Replacement destination set for an existing link.
///
/// All four destinations and the description are overwritten; the short id
/// and owner are immutable.
#[derive(Debug, Clone)]
pub struct LinkUpdate {
    pub ios_url: Option<String>,
    pub android_url: Option<String>,
    pub desktop_url: Option<String>,
    pub default_url: String,
    pub description: Option<String>,
}
