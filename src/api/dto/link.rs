//! DTOs for link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Link;

/// Body of `POST /api/link`.
///
/// Older clients send the target as `from`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    #[serde(alias = "from", default)]
    pub original_url: String,
}

/// JSON representation of a stored link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub id: i64,
    pub owner_id: i64,
    pub original_url: String,
    pub code: String,
    pub short_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

impl LinkResponse {
    pub fn from_link(link: Link, short_url: String) -> Self {
        Self {
            id: link.id,
            owner_id: link.owner_id,
            original_url: link.original_url,
            code: link.code,
            short_url,
            clicks: link.clicks,
            created_at: link.created_at,
        }
    }
}
