//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: user-scoped queries over the three tables

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{DbConnectionRequest, DbLead, DbUserSettings};
pub use schema::SQLITE_INIT;
pub use sqlite::{OutreachStorage, SaveSummary, SqlitePool};

use crate::error::OutreachError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

/// Open (creating if missing) the database and apply the schema.
pub async fn connect(database_url: &str) -> Result<OutreachStorage, OutreachError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
    let storage = OutreachStorage::new(pool);
    storage.init_schema().await?;
    info!(database_url = %database_url, "database ready");
    Ok(storage)
}
