#![allow(clippy::pedantic)]
#![allow(clippy::nursery)]
#![deny(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::uninlined_format_args)]

// `sqlx_macros::migrate!` expands to paths under `::sqlx`.
extern crate sqlx_core as sqlx;

use sqlx_core::pool::{Pool, PoolOptions};
use sqlx_postgres::{PgConnectOptions, Postgres};
use std::str::FromStr;

pub mod repo;

pub type PgPool = Pool<Postgres>;

pub async fn connect_postgres(url: &str) -> Result<PgPool, sqlx_core::Error> {
    connect_postgres_with_max(url, 10).await
}

pub async fn connect_postgres_with_max(
    url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx_core::Error> {
    let options = PgConnectOptions::from_str(url)?;
    PoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Applies the embedded schema migrations; a no-op for already-applied steps.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx_core::migrate::MigrateError> {
    sqlx_macros::migrate!("../blog-server/migrations")
        .run(pool)
        .await
}
