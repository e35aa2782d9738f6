//! DTOs for link endpoints.

use crate::domain::entities::Link;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to create a short link.
///
/// A missing `url` is reported as an invalid URL by the service, not as a
/// deserialization failure.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    /// Destination URL (absolute http/https).
    #[serde(default)]
    #[validate(length(max = 8192, message = "URL is too long"))]
    pub url: Option<String>,

    /// Optional custom short code (6-8 letters and digits).
    #[serde(default, alias = "custom_code")]
    pub custom_code: Option<String>,
}

impl CreateLinkRequest {
    /// Custom code, with an empty form field treated as absent.
    pub fn custom_code(&self) -> Option<String> {
        self.custom_code.clone().filter(|c| !c.is_empty())
    }
}

/// JSON representation of a stored link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub code: String,
    pub url: String,
    pub short_url: String,
    pub clicks: i64,
    pub last_clicked: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl LinkResponse {
    pub fn from_link(link: Link, short_url: String) -> Self {
        Self {
            code: link.code,
            url: link.url,
            short_url,
            clicks: link.clicks,
            last_clicked: link.last_clicked,
            created_at: link.created_at,
        }
    }
}
