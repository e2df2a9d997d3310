#![warn(missing_docs)]
//! A SQLite implementation of the `flocx-core` repositories.
//!
//! [`Db`] implements every repository port on top of `sqlx`. The schema ships
//! with the crate as reversible migrations, so [`Db::setup_db`] and
//! [`Db::drop_db`] create and remove every table.

use sqlx::{migrate::Migrator, sqlite};
use std::str::FromStr;
use tokio::try_join;

pub mod config;
mod r#impl;
mod types;

use config::SqliteConfig;

static MIGRATOR: Migrator = sqlx::migrate!("./schema");

/// SQLite database implementation for the marketplace repositories.
///
/// This struct provides separate reader and writer connection pools to a SQLite database,
/// implementing all the repository traits defined in `flocx-core`. The writer pool holds a
/// single connection, so every mutation (and the transaction around it) is serialized.
///
/// `Db` is a cheap handle: clone it into whatever owns a request or unit of work.
///
/// # Example
///
/// ```no_run
/// # use flocx_sqlite::{Db, config::SqliteConfig};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = SqliteConfig::default();
/// let db = Db::open(&config).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Db {
    /// Connection pool for read operations
    pub reader: sqlx::Pool<sqlx::Sqlite>,
    /// Connection pool for write operations (limited to 1 connection)
    pub writer: sqlx::Pool<sqlx::Sqlite>,
}

impl Db {
    /// Open a connection to the specified SQLite database.
    ///
    /// Creates a new database if one doesn't exist (when `create_if_missing` is true)
    /// and applies all pending migrations.
    ///
    /// Without a `database_path` the database lives in memory, shared between the
    /// reader and writer pools and discarded when the last connection closes. Each
    /// call opens a distinct in-memory database, which keeps tests isolated.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if:
    /// - Database connection fails
    /// - Migrations fail to apply
    pub async fn open(config: &SqliteConfig) -> Result<Self, sqlx::Error> {
        let db_path = config
            .database_path
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned());

        let options =
            sqlite::SqliteConnectOptions::from_str(db_path.as_deref().unwrap_or(":memory:"))?
                .busy_timeout(config.busy_timeout)
                .foreign_keys(true)
                .journal_mode(sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlite::SqliteSynchronous::Normal)
                .pragma("journal_size_limit", "27103364")
                .pragma("mmap_size", "134217728")
                .pragma("temp_store", "memory")
                .create_if_missing(config.create_if_missing);

        let reader = sqlite::SqlitePoolOptions::new().connect_with(options.clone());
        let writer = sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options);

        let (reader, writer) = try_join!(reader, writer)?;

        let db = Self { reader, writer };
        db.setup_db().await?;

        tracing::info!(
            path = db_path.as_deref().unwrap_or(":memory:"),
            "opened marketplace database"
        );

        Ok(db)
    }

    /// Create every table by applying any pending migration.
    pub async fn setup_db(&self) -> Result<(), sqlx::migrate::MigrateError> {
        MIGRATOR.run(&self.writer).await
    }

    /// Drop every table by reverting all applied migrations.
    ///
    /// The database stays usable: a later [`Db::setup_db`] recreates an empty schema.
    pub async fn drop_db(&self) -> Result<(), sqlx::migrate::MigrateError> {
        MIGRATOR.undo(&self.writer, 0).await
    }
}
