//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Link, LinkUpdate, NewLink};

/// Request to create a shortened link.
///
/// Platform destinations are optional; the default URL handles every device
/// class without a specific one.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    #[validate(url(message = "Invalid URL format"))]
    pub ios_url: Option<String>,

    #[validate(url(message = "Invalid URL format"))]
    pub android_url: Option<String>,

    #[validate(url(message = "Invalid URL format"))]
    pub desktop_url: Option<String>,

    #[validate(url(message = "Invalid URL format"))]
    pub default_url: String,

    pub description: Option<String>,
}

impl CreateLinkRequest {
    /// Converts the request into a domain insert for the given owner.
    pub fn into_new_link(self, account_id: i64) -> NewLink {
        NewLink {
            account_id,
            ios_url: self.ios_url,
            android_url: self.android_url,
            desktop_url: self.desktop_url,
            default_url: self.default_url,
            description: self.description,
        }
    }
}

/// Request to replace the destination set of a link.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLinkRequest {
    #[validate(url(message = "Invalid URL format"))]
    pub ios_url: Option<String>,

    #[validate(url(message = "Invalid URL format"))]
    pub android_url: Option<String>,

    #[validate(url(message = "Invalid URL format"))]
    pub desktop_url: Option<String>,

    #[validate(url(message = "Invalid URL format"))]
    pub default_url: String,

    pub description: Option<String>,
}

impl From<UpdateLinkRequest> for LinkUpdate {
    fn from(req: UpdateLinkRequest) -> Self {
        LinkUpdate {
            ios_url: req.ios_url,
            android_url: req.android_url,
            desktop_url: req.desktop_url,
            default_url: req.default_url,
            description: req.description,
        }
    }
}

/// JSON representation of a link.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub short_id: Option<String>,
    pub ios_url: Option<String>,
    pub android_url: Option<String>,
    pub desktop_url: Option<String>,
    pub default_url: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            short_id: link.short_id,
            ios_url: link.ios_url,
            android_url: link.android_url,
            desktop_url: link.desktop_url,
            default_url: link.default_url,
            description: link.description,
            created_at: link.created_at,
        }
    }
}

/// List of links owned by an account.
#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub links: Vec<LinkResponse>,
}
