//! SQLite-backed registration store.

use crate::error::StoreError;
use crate::types::*;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::{debug, info, instrument};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS profiles (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    owner_id        INTEGER NOT NULL,
    profile_url     TEXT NOT NULL UNIQUE,
    full_name       TEXT,
    headline        TEXT,
    location        TEXT,
    current_company TEXT,
    summary         TEXT,
    picture_url     TEXT,
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_profiles_owner ON profiles(owner_id);
"#;

/// Registration store over a SQLite connection pool.
///
/// The `UNIQUE` constraint on `profile_url` is the conflict signal for the
/// registration workflow: a violation surfaces as [`StoreError::DuplicateUrl`],
/// everything else as [`StoreError::Database`].
#[derive(Clone)]
pub struct ProfileStore {
    pool: SqlitePool,
}

impl ProfileStore {
    /// Open (creating if missing) the database at `url` and bootstrap the schema.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.bootstrap().await?;
        info!("Profile store ready at {}", url);
        Ok(store)
    }

    /// In-memory store for tests. Single connection so the database survives
    /// across pool checkouts.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let store = Self { pool };
        store.bootstrap().await?;
        Ok(store)
    }

    async fn bootstrap(&self) -> Result<(), StoreError> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    /// Fetch the profile registered by `owner_id`, if any.
    #[instrument(skip(self))]
    pub async fn get(&self, owner_id: i64) -> Result<Option<RegisteredProfile>, StoreError> {
        let profile = sqlx::query_as::<_, RegisteredProfile>(
            "SELECT * FROM profiles WHERE owner_id = ?",
        )
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    /// Whether `owner_id` already has a registered profile.
    pub async fn exists(&self, owner_id: i64) -> Result<bool, StoreError> {
        Ok(self.get(owner_id).await?.is_some())
    }

    /// Insert a new registration. Fails with [`StoreError::DuplicateUrl`]
    /// when `profile_url` already exists, regardless of owner.
    #[instrument(skip(self, attrs))]
    pub async fn insert(
        &self,
        owner_id: i64,
        profile_url: &str,
        attrs: &ProfileAttributes,
    ) -> Result<RegisteredProfile, StoreError> {
        let now = Utc::now();
        let profile = sqlx::query_as::<_, RegisteredProfile>(
            "INSERT INTO profiles \
             (owner_id, profile_url, full_name, headline, location, current_company, summary, picture_url, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING *",
        )
        .bind(owner_id)
        .bind(profile_url)
        .bind(&attrs.full_name)
        .bind(&attrs.headline)
        .bind(&attrs.location)
        .bind(&attrs.current_company)
        .bind(&attrs.summary)
        .bind(&attrs.picture_url)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::from_write)?;

        debug!("Inserted profile {} for owner {}", profile.id, owner_id);
        Ok(profile)
    }

    /// Update an owner's registration in place, preserving `id` and
    /// `created_at` and releasing the previous URL for the uniqueness
    /// constraint. Returns `None` when the owner has no row.
    #[instrument(skip(self, attrs))]
    pub async fn update(
        &self,
        owner_id: i64,
        profile_url: &str,
        attrs: &ProfileAttributes,
    ) -> Result<Option<RegisteredProfile>, StoreError> {
        let profile = sqlx::query_as::<_, RegisteredProfile>(
            "UPDATE profiles \
             SET profile_url = ?, full_name = ?, headline = ?, location = ?, \
                 current_company = ?, summary = ?, picture_url = ?, updated_at = ? \
             WHERE owner_id = ? \
             RETURNING *",
        )
        .bind(profile_url)
        .bind(&attrs.full_name)
        .bind(&attrs.headline)
        .bind(&attrs.location)
        .bind(&attrs.current_company)
        .bind(&attrs.summary)
        .bind(&attrs.picture_url)
        .bind(Utc::now())
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::from_write)?;

        Ok(profile)
    }

    /// All profiles except the one owned by `owner_id`, newest first.
    /// Doubles as the broadcast target set.
    #[instrument(skip(self))]
    pub async fn list_others(&self, owner_id: i64) -> Result<Vec<RegisteredProfile>, StoreError> {
        let profiles = sqlx::query_as::<_, RegisteredProfile>(
            "SELECT * FROM profiles WHERE owner_id <> ? ORDER BY created_at DESC, id DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(profiles)
    }

    /// All profiles except the one with `profile_url`, newest first.
    ///
    /// Exclusion key for the duplicate-URL recovery branch, which re-derives
    /// everything it needs from the store rather than from in-flight state.
    pub async fn list_others_by_url(
        &self,
        profile_url: &str,
    ) -> Result<Vec<RegisteredProfile>, StoreError> {
        let profiles = sqlx::query_as::<_, RegisteredProfile>(
            "SELECT * FROM profiles WHERE profile_url <> ? ORDER BY created_at DESC, id DESC",
        )
        .bind(profile_url)
        .fetch_all(&self.pool)
        .await?;
        Ok(profiles)
    }

    /// Delete the owner's registration. Returns the number of rows removed
    /// (0 or 1).
    #[instrument(skip(self))]
    pub async fn delete(&self, owner_id: i64) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM profiles WHERE owner_id = ?")
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            info!("Deleted profile for owner {}", owner_id);
        }
        Ok(result.rows_affected())
    }

    /// Case-insensitive substring search over name, headline, company and
    /// location.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<RegisteredProfile>, StoreError> {
        let pattern = format!("%{}%", query.to_lowercase());
        let profiles = sqlx::query_as::<_, RegisteredProfile>(
            "SELECT * FROM profiles \
             WHERE lower(coalesce(full_name, '')) LIKE ?1 \
                OR lower(coalesce(headline, '')) LIKE ?1 \
                OR lower(coalesce(current_company, '')) LIKE ?1 \
                OR lower(coalesce(location, '')) LIKE ?1 \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(profiles)
    }

    /// Total number of registered profiles.
    pub async fn count_all(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profiles")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// One page of profiles, newest first. Pages are zero-based.
    pub async fn list_page(
        &self,
        page: i64,
        per_page: i64,
    ) -> Result<Vec<RegisteredProfile>, StoreError> {
        let profiles = sqlx::query_as::<_, RegisteredProfile>(
            "SELECT * FROM profiles ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
        )
        .bind(per_page)
        .bind(page * per_page)
        .fetch_all(&self.pool)
        .await?;
        Ok(profiles)
    }

    /// Most common non-empty companies, descending by occurrence.
    pub async fn top_companies(&self, limit: i64) -> Result<Vec<FieldCount>, StoreError> {
        let rows = sqlx::query_as::<_, FieldCount>(
            "SELECT current_company AS value, COUNT(*) AS count FROM profiles \
             WHERE current_company IS NOT NULL AND current_company <> '' \
             GROUP BY current_company ORDER BY count DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Most common non-empty locations, descending by occurrence.
    pub async fn top_locations(&self, limit: i64) -> Result<Vec<FieldCount>, StoreError> {
        let rows = sqlx::query_as::<_, FieldCount>(
            "SELECT location AS value, COUNT(*) AS count FROM profiles \
             WHERE location IS NOT NULL AND location <> '' \
             GROUP BY location ORDER BY count DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Every profile in insertion order, for export.
    pub async fn all_profiles(&self) -> Result<Vec<RegisteredProfile>, StoreError> {
        let profiles = sqlx::query_as::<_, RegisteredProfile>(
            "SELECT * FROM profiles ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(profiles)
    }

    /// Health check - the store is healthy when the pool answers a trivial
    /// query.
    pub async fn health_check(&self) -> bool {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .is_ok()
    }
}
