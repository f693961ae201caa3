use super::{GenerationRequest, Generator};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde_json::Value;

/// Generator backed by the Gemini `generateContent` REST endpoint.
pub struct GeminiGenerator {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiGenerator {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl Generator for GeminiGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let body = serde_json::json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": request.instruction }]
                }
            ]
        });

        tracing::debug!(kind = %request.kind, model = %self.model, "Sending generation request");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .context("Failed to send request to Gemini")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("Gemini API error ({}): {}", status, body);
        }

        let payload: Value = response
            .json()
            .await
            .context("Invalid response format from Gemini")?;
        Ok(extract_text(&payload))
    }

    fn backend_name(&self) -> &'static str {
        "gemini"
    }
}

/// Concatenates the text parts of the first candidate. A reply without any
/// text is an empty result, not a failure.
fn extract_text(payload: &Value) -> String {
    payload["candidates"][0]["content"]["parts"]
        .as_array()
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part["text"].as_str())
                .collect()
        })
        .unwrap_or_default()
}
