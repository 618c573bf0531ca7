use super::{ChatTurn, GatewayError, LlmRequest, LlmResponse};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::collections::HashMap;

const API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Request wrapper for the OpenAI chat completions API
pub struct OpenAiRequest {
    api_key: String,
    model: String,
    additional_params: HashMap<String, String>,
    client: Client,
}

impl OpenAiRequest {
    pub fn new(api_key: String, model: String, additional_params: HashMap<String, String>) -> Self {
        Self {
            api_key,
            model,
            additional_params,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl LlmRequest for OpenAiRequest {
    async fn request(
        &self,
        turns: &[ChatTurn],
        instruction: &str,
    ) -> Result<LlmResponse, GatewayError> {
        let mut messages: Vec<serde_json::Value> = turns
            .iter()
            .map(|turn| json!({"role": turn.role, "content": turn.content}))
            .collect();
        // The reasoning instruction rides along as a final user turn
        messages.push(json!({"role": "user", "content": instruction}));

        let mut request_body = json!({
            "model": self.model,
            "messages": messages,
        });

        // Add additional parameters from the configuration
        for (key, value) in &self.additional_params {
            // Try to convert the value to a number first if it looks like one
            if let Ok(num_val) = value.parse::<f64>() {
                request_body[key] = json!(num_val);
            } else {
                request_body[key] = json!(value);
            }
        }

        tracing::debug!(target: "kinex::gateway", model = %self.model, "sending chat completion request");
        let response = self
            .client
            .post(API_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api { status, body });
        }

        let response_body: serde_json::Value = response.json().await?;

        let content = response_body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                GatewayError::MalformedResponse(
                    "no message content in OpenAI response".to_string(),
                )
            })?
            .to_string();
        let usage = response_body["usage"]["total_tokens"].as_u64().unwrap_or(0);
        let truncated = response_body["choices"][0]["finish_reason"] == "length";

        Ok(LlmResponse {
            raw: response_body,
            content,
            usage,
            truncated,
        })
    }
}
