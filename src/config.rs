use std::{env, str::FromStr, time::Duration};

use derive_getters::Getters;
use derive_new::new;

use crate::error::{PipelineError, Result};

pub const DEFAULT_SYMBOL: &str = "IBM";
pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co";
pub const DEFAULT_INTERVAL: &str = "5min";
pub const MAX_SYMBOL_LEN: usize = 10;

const STOCK_API_KEY: &str = "STOCK_API_KEY";
const STOCK_SYMBOL: &str = "STOCK_SYMBOL";
const STOCK_API_BASE_URL: &str = "STOCK_API_BASE_URL";
const STOCK_API_TIMEOUT_SECS: &str = "STOCK_API_TIMEOUT_SECS";
const POSTGRES_HOST: &str = "POSTGRES_HOST";
const POSTGRES_DB: &str = "POSTGRES_DB";
const POSTGRES_USER: &str = "POSTGRES_USER";
const POSTGRES_PASSWORD: &str = "POSTGRES_PASSWORD";
const POSTGRES_PORT: &str = "POSTGRES_PORT";
const PIPELINE_RETRIES: &str = "PIPELINE_RETRIES";
const PIPELINE_RETRY_DELAY_SECS: &str = "PIPELINE_RETRY_DELAY_SECS";

#[derive(Clone, Debug, Getters, new)]
pub struct Config {
    api: ApiConfig,
    database: DatabaseConfig,
    retry: RetryConfig,
}

/// Settings for the quote API. The key stays optional here so that a missing
/// key surfaces when the fetch is attempted, not while loading.
#[derive(Clone, Debug, Getters, new)]
pub struct ApiConfig {
    api_key: Option<String>,
    symbol: String,
    base_url: String,
    interval: String,
    timeout: Duration,
}

#[derive(Clone, Debug, Getters, new)]
pub struct DatabaseConfig {
    host: String,
    name: String,
    user: String,
    password: String,
    port: u16,
}

#[derive(Clone, Copy, Debug, Getters, new)]
pub struct RetryConfig {
    retries: usize,
    delay: Duration,
}

/// Reads a configuration variable; `None` when it is unset.
pub trait Lookup: Fn(&str) -> Option<String> {}

impl<F: Fn(&str) -> Option<String>> Lookup for F {}

fn env_lookup(name: &str) -> Option<String> {
    env::var(name).ok()
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup(lookup: &impl Lookup) -> Result<Self> {
        Ok(Self {
            api: ApiConfig::from_lookup(lookup)?,
            database: DatabaseConfig::from_lookup(lookup)?,
            retry: RetryConfig::from_lookup(lookup)?,
        })
    }

    pub fn with_symbol(mut self, symbol: String) -> Result<Self> {
        self.api = self.api.with_symbol(symbol)?;
        Ok(self)
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup(lookup: &impl Lookup) -> Result<Self> {
        let api_key = lookup(STOCK_API_KEY).filter(|key| !key.trim().is_empty());
        let symbol = lookup(STOCK_SYMBOL).unwrap_or_else(|| DEFAULT_SYMBOL.to_string());
        let base_url = lookup(STOCK_API_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout = Duration::from_secs(parse_var(lookup, STOCK_API_TIMEOUT_SECS, 10)?);

        Ok(Self {
            api_key,
            symbol: validate_symbol(symbol)?,
            base_url,
            interval: DEFAULT_INTERVAL.to_string(),
            timeout,
        })
    }

    pub fn with_symbol(mut self, symbol: String) -> Result<Self> {
        self.symbol = validate_symbol(symbol)?;
        Ok(self)
    }

    /// Name of the object holding the bars in an intraday response.
    pub fn series_key(&self) -> String {
        format!("Time Series ({})", self.interval)
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup(lookup: &impl Lookup) -> Result<Self> {
        Ok(Self {
            host: lookup(POSTGRES_HOST).unwrap_or_else(|| "postgres".to_string()),
            name: lookup(POSTGRES_DB).unwrap_or_else(|| "airflow".to_string()),
            user: lookup(POSTGRES_USER).unwrap_or_else(|| "airflow".to_string()),
            password: lookup(POSTGRES_PASSWORD).unwrap_or_else(|| "airflow".to_string()),
            port: parse_var(lookup, POSTGRES_PORT, 5432)?,
        })
    }
}

impl RetryConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup(lookup: &impl Lookup) -> Result<Self> {
        Ok(Self {
            retries: parse_var(lookup, PIPELINE_RETRIES, 1)?,
            delay: Duration::from_secs(parse_var(lookup, PIPELINE_RETRY_DELAY_SECS, 300)?),
        })
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            retries: 1,
            delay: Duration::from_secs(300),
        }
    }
}

pub fn validate_symbol(symbol: String) -> Result<String> {
    let symbol = symbol.trim().to_string();

    if symbol.is_empty() {
        return Err(PipelineError::Config(String::from("symbol cannot be empty")));
    }

    if symbol.chars().count() > MAX_SYMBOL_LEN {
        return Err(PipelineError::Config(format!(
            "symbol '{}' exceeds {} characters",
            symbol, MAX_SYMBOL_LEN
        )));
    }

    Ok(symbol)
}

fn parse_var<T: FromStr>(lookup: &impl Lookup, name: &str, default: T) -> Result<T> {
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| PipelineError::Config(format!("invalid value '{}' for {}", value, name))),
        None => Ok(default),
    }
}
