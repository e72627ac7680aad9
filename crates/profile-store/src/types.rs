//! Registered profile row types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row per successfully registered LinkedIn profile.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RegisteredProfile {
    /// Surrogate identifier assigned by the store. Immutable.
    pub id: i64,
    /// Telegram user id that registered this profile.
    pub owner_id: i64,
    /// Canonical external URL. Globally unique across all rows.
    pub profile_url: String,
    pub full_name: Option<String>,
    pub headline: Option<String>,
    pub location: Option<String>,
    pub current_company: Option<String>,
    pub summary: Option<String>,
    pub picture_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Optional enrichment attributes merged into a row at insert or update.
///
/// All fields absent when enrichment was skipped or failed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileAttributes {
    pub full_name: Option<String>,
    pub headline: Option<String>,
    pub location: Option<String>,
    pub current_company: Option<String>,
    pub summary: Option<String>,
    pub picture_url: Option<String>,
}

impl ProfileAttributes {
    /// True when no attribute carries data.
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.headline.is_none()
            && self.location.is_none()
            && self.current_company.is_none()
            && self.summary.is_none()
            && self.picture_url.is_none()
    }
}

/// A (value, occurrence count) pair for aggregate stats.
#[derive(Debug, Clone, FromRow)]
pub struct FieldCount {
    pub value: String,
    pub count: i64,
}
