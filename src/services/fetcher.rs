// src/services/fetcher.rs

//! Client for the remote menu provider.

use std::time::Duration;

use reqwest::Client;
use serde_json::{Map, Value};

use crate::error::{AppError, Result};
use crate::models::FetcherConfig;

/// Downloads the provider's weekly menus.
pub struct MenuFetcher {
    client: Client,
    api_url: String,
}

impl MenuFetcher {
    /// Create a fetcher with the configured user agent and timeout.
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
        })
    }

    /// Fetch all menus, keyed by provider menu id.
    pub async fn fetch_all(&self) -> Result<Map<String, Value>> {
        log::info!("Downloading menus from {}...", self.api_url);
        let value: Value = self
            .client
            .get(&self.api_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match value {
            Value::Object(menus) => {
                log::info!("Received {} menus", menus.len());
                Ok(menus)
            }
            other => Err(AppError::validation(format!(
                "Expected an object of menus, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
