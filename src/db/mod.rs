pub mod postgres;
pub mod store;

pub use postgres::PgInviteStore;
pub use store::{InviteStore, InviteTx, SaveOutcome};

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::Config;
use crate::error::Result;

/// Create a Postgres connection pool
pub async fn create_pool(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;
    Ok(pool)
}
