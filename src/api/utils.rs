use reqwest::Client;
use serde_json::Value;

use crate::error::{PipelineError, Result};

pub async fn make_request(
    client: &Client,
    base_url: &str,
    endpoint: &str,
    params: &[(&str, &str)],
) -> Result<Value> {
    let url = format!("{}/{}", base_url.trim_end_matches('/'), endpoint);
    let res = client.get(&url).query(params).send().await?;

    if !res.status().is_success() {
        return Err(PipelineError::Network(format!(
            "Request failed: {}",
            res.status()
        )));
    }

    let text = res.text().await?;
    let data = serde_json::from_str::<Value>(&text)?;

    Ok(data)
}
