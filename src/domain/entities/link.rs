//! Link entity representing a shortened URL owned by a user.

use chrono::{DateTime, Utc};

/// A shortened URL with its click counter.
///
/// `clicks` starts at zero and only ever grows, one step per resolved redirect.
#[derive(Debug, Clone)]
pub struct Link {
    pub id: i64,
    pub owner_id: i64,
    pub original_url: String,
    pub code: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        owner_id: i64,
        original_url: String,
        code: String,
        clicks: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            original_url,
            code,
            clicks,
            created_at,
        }
    }

    /// Returns true if `user_id` owns this link.
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.owner_id == user_id
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub owner_id: i64,
    pub original_url: String,
    pub code: String,
}
