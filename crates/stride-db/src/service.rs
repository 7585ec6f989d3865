//! Service layer over the database handle.
//!
//! `StrideService` wraps `StrideDb` (raw database access) and
//! `SchemaRegistry` (validation of JSON columns on read). All repo methods are
//! implemented as `impl StrideService`.

use std::path::Path;

use stride_config::DatabaseConfig;
use stride_schema::SchemaRegistry;

use crate::StrideDb;
use crate::error::DatabaseError;

pub struct StrideService {
    db: StrideDb,
    schema: SchemaRegistry,
}

impl StrideService {
    /// Create a service over a local database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = StrideDb::open_local(db_path).await?;
        Ok(Self::from_db(db))
    }

    /// Open the database named by the `[database]` config section.
    ///
    /// A configured `url` wins over `path`. For a local file the parent
    /// directory is created if needed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the directory cannot be created or the
    /// database cannot be opened.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        if config.is_remote() {
            tracing::debug!(url = %config.url, "opening hosted database");
            let db = StrideDb::open_remote(&config.url, &config.auth_token).await?;
            return Ok(Self::from_db(db));
        }

        if let Some(parent) = Path::new(&config.path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| DatabaseError::Other(e.into()))?;
            }
        }
        tracing::debug!(path = %config.path, "opening local database");
        Self::new_local(&config.path).await
    }

    /// Create from an existing `StrideDb`.
    #[must_use]
    pub fn from_db(db: StrideDb) -> Self {
        Self {
            db,
            schema: SchemaRegistry::new(),
        }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &StrideDb {
        &self.db
    }

    /// Access the schema registry.
    #[must_use]
    pub const fn schema(&self) -> &SchemaRegistry {
        &self.schema
    }
}
