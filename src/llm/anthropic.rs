use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::GatewayConfig;
use crate::errors::VantageError;
use super::provider::ResearchProvider;
use super::types::{MessagesResponse, ContentBlock, WEB_SEARCH_TOOL_NAME, WEB_SEARCH_TOOL_TYPE};

pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    model: String,
    max_tokens: u32,
    base_url: String,
}

impl AnthropicProvider {
    pub fn new(config: &GatewayConfig) -> Result<Self, VantageError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VantageError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ResearchProvider for AnthropicProvider {
    async fn research(
        &self,
        system: &str,
        user: &str,
    ) -> Result<Vec<ContentBlock>, VantageError> {
        let body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "system": system,
            "tools": [{"type": WEB_SEARCH_TOOL_TYPE, "name": WEB_SEARCH_TOOL_NAME}],
            "messages": [{"role": "user", "content": user}]
        });

        let resp = self.client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    VantageError::Timeout(format!("Messages API request timed out: {}", e))
                } else {
                    // Transport failures carry a synthetic gateway status
                    VantageError::Upstream {
                        status: 502,
                        message: format!("Messages API request failed: {}", e),
                    }
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            let data: Value = resp.json().await.unwrap_or_default();
            let message = data
                .pointer("/error/message")
                .and_then(|m| m.as_str())
                .unwrap_or("API request failed")
                .to_string();
            return Err(VantageError::Upstream { status: status.as_u16(), message });
        }

        let data: MessagesResponse = resp.json().await.map_err(|e| VantageError::Upstream {
            status: 502,
            message: format!("Malformed upstream response body: {}", e),
        })?;

        if let Some(usage) = &data.usage {
            debug!(
                model = %self.model,
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                stop_reason = data.stop_reason.as_deref(),
                "Messages API completion"
            );
        }

        Ok(data.content)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
