//! libSQL backend: on-device `ProfileStore` implementation.
//!
//! Supports local file and in-memory databases.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::info;
use uuid::Uuid;

use crate::error::StoreError;
use crate::onboarding::model::ProfileRecord;
use crate::store::migrations;
use crate::store::traits::ProfileStore;

/// libSQL database backend.
///
/// Stores a single connection that is reused for all operations.
pub struct LibSqlBackend {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

/// A profile row as read back from the database.
#[derive(Debug, Clone)]
pub struct StoredProfile {
    pub id: Uuid,
    pub record: ProfileRecord,
    pub created_at: DateTime<Utc>,
}

impl LibSqlBackend {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Open(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| StoreError::Open(format!("Failed to open libSQL database: {e}")))?;

        let backend = Self::from_database(db).await?;
        info!(path = %path.display(), "Database opened");
        Ok(backend)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, StoreError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| StoreError::Open(format!("Failed to create in-memory database: {e}")))?;

        Self::from_database(db).await
    }

    async fn from_database(db: LibSqlDatabase) -> Result<Self, StoreError> {
        let conn = db
            .connect()
            .map_err(|e| StoreError::Open(format!("Failed to create connection: {e}")))?;
        migrations::run_migrations(&conn).await?;
        Ok(Self {
            db: Arc::new(db),
            conn,
        })
    }

    fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Number of stored profiles.
    pub async fn count_profiles(&self) -> Result<usize, StoreError> {
        let mut rows = self
            .conn()
            .query("SELECT COUNT(*) FROM profiles", ())
            .await
            .map_err(|e| StoreError::Query(format!("count_profiles: {e}")))?;

        match rows.next().await {
            Ok(Some(row)) => {
                let count: i64 = row
                    .get(0)
                    .map_err(|e| StoreError::Query(format!("count_profiles: {e}")))?;
                Ok(count as usize)
            }
            Ok(None) => Ok(0),
            Err(e) => Err(StoreError::Query(format!("count_profiles: {e}"))),
        }
    }

    /// All stored profiles, in insertion order.
    pub async fn list_profiles(&self) -> Result<Vec<StoredProfile>, StoreError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT id, phone_number, first_name, profile_picture, created_at
                 FROM profiles ORDER BY rowid ASC",
                (),
            )
            .await
            .map_err(|e| StoreError::Query(format!("list_profiles: {e}")))?;

        let mut profiles = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| StoreError::Query(format!("list_profiles: {e}")))?
        {
            profiles.push(row_to_profile(&row)?);
        }
        Ok(profiles)
    }
}

/// Parse an RFC 3339 string into DateTime<Utc>.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Query(format!("invalid created_at '{s}': {e}")))
}

/// Map a libsql Row to a StoredProfile. Corrupt ids or timestamps are errors.
///
/// Column order: 0:id, 1:phone_number, 2:first_name, 3:profile_picture, 4:created_at
fn row_to_profile(row: &libsql::Row) -> Result<StoredProfile, StoreError> {
    let column = |e: libsql::Error| StoreError::Query(format!("list_profiles: {e}"));
    let id_str: String = row.get(0).map_err(column)?;
    let created_str: String = row.get(4).map_err(column)?;
    let id = Uuid::parse_str(&id_str)
        .map_err(|e| StoreError::Query(format!("invalid profile id '{id_str}': {e}")))?;
    Ok(StoredProfile {
        id,
        record: ProfileRecord {
            phone_number: row.get(1).map_err(column)?,
            first_name: row.get(2).map_err(column)?,
            profile_picture: row.get(3).map_err(column)?,
        },
        created_at: parse_datetime(&created_str)?,
    })
}

#[async_trait]
impl ProfileStore for LibSqlBackend {
    async fn create_profile(&self, record: &ProfileRecord) -> Result<(), StoreError> {
        let id = Uuid::new_v4();
        let now = Utc::now().to_rfc3339();

        self.conn()
            .execute(
                "INSERT INTO profiles (id, phone_number, first_name, profile_picture, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    id.to_string(),
                    record.phone_number.as_str(),
                    record.first_name.as_str(),
                    record.profile_picture.as_str(),
                    now
                ],
            )
            .await
            .map_err(|e| StoreError::Query(format!("create_profile: {e}")))?;

        info!(profile_id = %id, "Profile stored");
        Ok(())
    }
}
