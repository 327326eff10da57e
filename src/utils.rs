use std::{error::Error, fmt::Debug, time::Duration};

use actix_web::web;
use diesel::{r2d2::ConnectionManager, PgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use r2d2::{Pool, PooledConnection};
use thiserror::Error;

use crate::{configuration::DatabaseSettings, telemetry::spawn_blocking_with_tracing};

pub type DbPool = Pool<ConnectionManager<PgConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<PgConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

pub const DEFAULT_PAGE_LIMIT: i64 = 100;

pub fn error_fmt_chain(f: &mut std::fmt::Formatter<'_>, source: &Option<impl Error>) -> std::fmt::Result{
    if let Some(error) = source{
        write!(f, "\n\tCaused By:\n\t")?;
        write!(f, "{:?}", &error)?;
        error_fmt_chain(f, &error.source())
    } else {
        Ok(())
    }
}

// Connections are established lazily, so startup does not wait on postgres
pub fn get_connection_pool(settings: &DatabaseSettings) -> DbPool{
    Pool::builder()
        .connection_timeout(Duration::from_secs(5))
        .build_unchecked(ConnectionManager::<PgConnection>::new(settings.get_database_table_url()))
}

pub async fn get_pooled_connection(
    pool: &web::Data<DbPool>
) -> Result<DbConnection, PoolGetError>{
    let pool_clone = pool.clone();

    let res = spawn_blocking_with_tracing(move || {
        pool_clone.get()
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Running pending migrations",
    skip_all
)]
pub async fn run_migrations(pool: &DbPool) -> Result<(), anyhow::Error>{
    let pool = pool.clone();

    spawn_blocking_with_tracing(move || -> Result<(), anyhow::Error> {
        let mut conn = pool.get()?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;
        Ok(())
    })
    .await?
}

// (limit, offset) from optional 1-based page and page size
pub fn page_bounds(page: Option<i64>, limit: Option<i64>) -> (i64, i64){
    let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, 500);
    let page = page.unwrap_or(1).max(1);
    (limit, (page - 1).saturating_mul(limit))
}

#[derive(Error)]
pub enum PoolGetError{
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to get connection from pool")]
    DbPoolError(#[from] r2d2::Error),
}

impl Debug for PoolGetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}
