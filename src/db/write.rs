use serde_json::Value;
use sqlx::{Connection, PgConnection, Postgres};
use tracing::{info, warn};

use crate::{
    config::DatabaseConfig,
    db::utils::{close, connect},
    error::Result,
    models::QuoteRecord,
    services::time_series::parse_time_series,
};

pub async fn insert_quote(
    record: &QuoteRecord,
    tx: &mut sqlx::Transaction<'_, Postgres>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO stock_data
        (symbol, timestamp, open, high, low, close, volume)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(record.symbol())
    .bind(record.timestamp())
    .bind(record.open())
    .bind(record.high())
    .bind(record.low())
    .bind(record.close())
    .bind(record.volume())
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected())
}

/// Inserts every record in one transaction and returns how many were written.
pub async fn insert_quotes(
    connection: &mut PgConnection,
    records: &[QuoteRecord],
) -> Result<usize> {
    let mut tx = connection.begin().await?;
    let mut inserted_count = 0;

    for record in records {
        insert_quote(record, &mut tx).await?;
        inserted_count += 1;
    }

    tx.commit().await?;

    Ok(inserted_count)
}

/// Parses the intraday response and stores the bars that parse cleanly.
/// A response without a time series is not an error; it stores nothing.
pub async fn store_quotes(
    config: &DatabaseConfig,
    data: &Value,
    symbol: &str,
    series_key: &str,
) -> Result<usize> {
    let Some(parsed) = parse_time_series(data, symbol, series_key) else {
        warn!("No time series data found in API response");
        return Ok(0);
    };

    if *parsed.skipped() > 0 {
        warn!("Skipped {} unparseable entries", parsed.skipped());
    }

    let records = parsed.into_records();
    let mut connection = connect(config).await?;

    let inserted_count = match insert_quotes(&mut connection, &records).await {
        Ok(count) => count,
        Err(err) => {
            let _ = close(connection).await;
            return Err(err);
        }
    };

    close(connection).await?;
    info!("Successfully inserted {} records", inserted_count);

    Ok(inserted_count)
}
