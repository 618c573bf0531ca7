use super::{ChatTurn, GatewayError, LlmRequest, LlmResponse};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::collections::HashMap;

/// Request wrapper for the Gemini `generateContent` API
pub struct GeminiRequest {
    api_key: String,
    model: String,
    additional_params: HashMap<String, String>,
    client: Client,
}

impl GeminiRequest {
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
impl LlmRequest for GeminiRequest {
    async fn request(
        &self,
        turns: &[ChatTurn],
        instruction: &str,
    ) -> Result<LlmResponse, GatewayError> {
        let mut contents: Vec<serde_json::Value> = turns
            .iter()
            .map(|turn| {
                json!({
                    "role": turn.role,
                    "parts": [{"text": turn.content}]
                })
            })
            .collect();
        // The reasoning instruction rides along as a final user turn
        contents.push(json!({
            "role": "user",
            "parts": [{"text": instruction}]
        }));

        let mut request_body = json!({
            "contents": contents,
            "generationConfig": {
                // Model is specified in the URL, not here
                "maxOutputTokens": 8192
            }
        });

        // Add additional parameters from the configuration
        for (key, value) in &self.additional_params {
            // Try to convert the value to a number first if it looks like one
            if let Ok(num_val) = value.parse::<f64>() {
                request_body["generationConfig"][key] = json!(num_val);
            } else {
                request_body["generationConfig"][key] = json!(value);
            }
        }

        let api_url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );

        tracing::debug!(target: "kinex::gateway", model = %self.model, "sending generateContent request");
        let response = self
            .client
            .post(api_url)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api { status, body });
        }

        let response_body: serde_json::Value = response.json().await?;

        // The answer text lives at candidates[0].content.parts[0].text
        let content = response_body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                GatewayError::MalformedResponse(
                    "no candidate content in Gemini response".to_string(),
                )
            })?
            .to_string();
        let usage = response_body["usageMetadata"]["totalTokenCount"]
            .as_u64()
            .unwrap_or(0);
        let truncated = response_body["candidates"][0]["finishReason"] == "MAX_TOKENS";

        Ok(LlmResponse {
            raw: response_body,
            content,
            usage,
            truncated,
        })
    }
}
