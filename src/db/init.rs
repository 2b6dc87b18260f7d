use sqlx::{PgConnection, postgres::PgQueryResult};
use tracing::{error, info};

use crate::{
    config::DatabaseConfig,
    db::utils::{close, connect},
    error::Result,
};

pub async fn create_stock_data(
    connection: &mut PgConnection,
) -> Result<PgQueryResult, sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS stock_data (
            id SERIAL PRIMARY KEY,
            symbol VARCHAR(10) NOT NULL,
            timestamp TIMESTAMP NOT NULL,
            open NUMERIC(10, 4),
            high NUMERIC(10, 4),
            low NUMERIC(10, 4),
            close NUMERIC(10, 4),
            volume BIGINT,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(connection)
    .await
}

pub async fn ensure_schema(config: &DatabaseConfig) -> Result<()> {
    let mut connection = connect(config).await?;

    if let Err(err) = create_stock_data(&mut connection).await {
        error!("Error creating table: {}", err);
        let _ = close(connection).await;
        return Err(err.into());
    }

    close(connection).await?;
    info!("Stock table created or already exists");

    Ok(())
}
