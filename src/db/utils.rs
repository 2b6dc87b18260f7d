use sqlx::{
    ConnectOptions, Connection, PgConnection,
    postgres::PgConnectOptions,
};
use tracing::{debug, error};

use crate::{config::DatabaseConfig, error::Result};

pub fn connect_options(config: &DatabaseConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(config.host())
        .port(*config.port())
        .database(config.name())
        .username(config.user())
        .password(config.password())
}

/// Opens a single connection. Each logical step opens its own and closes it
/// when done; there is no pool.
pub async fn connect(config: &DatabaseConfig) -> Result<PgConnection> {
    match connect_options(config).connect().await {
        Ok(connection) => {
            debug!(host = %config.host(), database = %config.name(), "database connection opened");
            Ok(connection)
        }
        Err(err) => {
            error!("Database connection failed: {}", err);
            Err(err.into())
        }
    }
}

pub async fn close(connection: PgConnection) -> Result<()> {
    connection.close().await?;
    Ok(())
}
