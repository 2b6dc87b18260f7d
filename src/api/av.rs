use reqwest::Client;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::{
    config::ApiConfig,
    error::{PipelineError, Result},
};

use super::utils::make_request;

const INTRADAY_FUNCTION: &str = "TIME_SERIES_INTRADAY";

/// Builds the client used for quote requests; every request is bounded by the
/// configured timeout.
pub fn build_client(config: &ApiConfig) -> Result<Client> {
    Client::builder()
        .timeout(*config.timeout())
        .build()
        .map_err(PipelineError::from)
}

pub async fn get_intraday(client: &Client, config: &ApiConfig) -> Result<Value> {
    let api_key = config.api_key().as_deref().ok_or_else(|| {
        PipelineError::Config(String::from("API key not found in environment variables"))
    })?;

    let params = [
        ("function", INTRADAY_FUNCTION),
        ("symbol", config.symbol().as_str()),
        ("interval", config.interval().as_str()),
        ("apikey", api_key),
    ];

    info!(symbol = %config.symbol(), interval = %config.interval(), "fetching intraday quotes");

    let data = match make_request(client, config.base_url(), "query", &params).await {
        Ok(data) => data,
        Err(err @ PipelineError::Parse(_)) => {
            error!("JSON parsing failed: {}", err);
            return Err(err);
        }
        Err(err) => {
            error!("{}", err);
            return Err(err);
        }
    };

    check_response(data)
}

/// Rejects bodies that report an API error and logs rate-limit advisories.
pub fn check_response(data: Value) -> Result<Value> {
    let Some(body) = data.as_object() else {
        return Err(PipelineError::Parse(String::from(
            "Unexpected API response format: not an object",
        )));
    };

    if let Some(message) = body.get("Error Message") {
        let err = PipelineError::Api(value_text(message));
        error!("{}", err);
        return Err(err);
    }

    for advisory in ["Note", "Information"] {
        if let Some(message) = body.get(advisory) {
            warn!("API {}: {}", advisory, value_text(message));
        }
    }

    Ok(data)
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
