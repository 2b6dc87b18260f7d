use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::{
    api::{build_client, get_intraday},
    config::{ApiConfig, Config, DatabaseConfig},
    db::{ensure_schema, store_quotes},
    error::Result,
    scheduler::Task,
};

pub const FETCH_AND_STORE_TASK_ID: &str = "fetch_and_store_stock_data";

#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch(&self, config: &ApiConfig) -> Result<Value>;
}

#[async_trait]
pub trait QuoteStore: Send + Sync {
    async fn ensure_schema(&self) -> Result<()>;

    async fn store(&self, data: &Value, symbol: &str, series_key: &str) -> Result<usize>;
}

pub struct AlphaVantageSource {
    client: Client,
}

impl AlphaVantageSource {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
        })
    }
}

#[async_trait]
impl QuoteSource for AlphaVantageSource {
    async fn fetch(&self, config: &ApiConfig) -> Result<Value> {
        get_intraday(&self.client, config).await
    }
}

pub struct PostgresStore {
    config: DatabaseConfig,
}

impl PostgresStore {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl QuoteStore for PostgresStore {
    async fn ensure_schema(&self) -> Result<()> {
        ensure_schema(&self.config).await
    }

    async fn store(&self, data: &Value, symbol: &str, series_key: &str) -> Result<usize> {
        store_quotes(&self.config, data, symbol, series_key).await
    }
}

/// Ensure table, fetch, store. Each call is independent of the previous one.
pub struct StockPipeline<S, T> {
    api: ApiConfig,
    source: S,
    store: T,
}

impl StockPipeline<AlphaVantageSource, PostgresStore> {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            config.api().clone(),
            AlphaVantageSource::new(config.api())?,
            PostgresStore::new(config.database().clone()),
        ))
    }
}

impl<S: QuoteSource, T: QuoteStore> StockPipeline<S, T> {
    pub fn new(api: ApiConfig, source: S, store: T) -> Self {
        Self { api, source, store }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn store(&self) -> &T {
        &self.store
    }

    /// Runs the three steps once and returns the number of inserted rows.
    pub async fn execute(&self) -> Result<usize> {
        match self.run_steps().await {
            Ok(count) => {
                if count > 0 {
                    info!(
                        "Pipeline completed successfully. Inserted {} records.",
                        count
                    );
                } else {
                    warn!("Pipeline completed but no new records were inserted.");
                }
                Ok(count)
            }
            Err(err) => {
                error!("Pipeline failed: {}", err);
                Err(err)
            }
        }
    }

    async fn run_steps(&self) -> Result<usize> {
        self.store.ensure_schema().await?;
        let data = self.source.fetch(&self.api).await?;
        self.store
            .store(&data, self.api.symbol(), &self.api.series_key())
            .await
    }
}

#[async_trait]
impl<S: QuoteSource, T: QuoteStore> Task for StockPipeline<S, T> {
    fn id(&self) -> &str {
        FETCH_AND_STORE_TASK_ID
    }

    async fn run(&self) -> Result<()> {
        self.execute().await.map(|_| ())
    }
}
