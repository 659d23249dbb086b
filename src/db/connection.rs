use std::time::Duration;

use anyhow::{Context, Result};
use diesel::PgConnection;
use diesel::r2d2::ConnectionManager;

use super::{DbConnection, DbPool};
use crate::db::error::RepositoryError;

const CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Build the r2d2 pool used by every repository call.
pub fn create_pool(database_url: &str, max_size: u32) -> Result<DbPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);

    diesel::r2d2::Pool::builder()
        .max_size(max_size)
        .connection_timeout(CONNECTION_TIMEOUT)
        .build(manager)
        .context("Failed to create database pool")
}

pub fn get_connection(pool: &DbPool) -> Result<DbConnection, RepositoryError> {
    pool.get().map_err(Into::into)
}
