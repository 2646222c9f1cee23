use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use log::{info, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;

use crate::gateway::ModelGateway;

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: usize,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount", default)]
    prompt_token_count: usize,
    #[serde(rename = "candidatesTokenCount", default)]
    candidates_token_count: usize,
    #[serde(rename = "totalTokenCount", default)]
    total_token_count: usize,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorDetails,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetails {
    message: String,
    status: Option<String>,
}

/// Gemini API gateway implementation.
pub struct GeminiGateway {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
    max_tokens: usize,
    temperature: f32,
}

impl GeminiGateway {
    /// Create a new Gemini gateway; the API key comes from `GEMINI_API_KEY`.
    pub fn new(model: Option<String>, temperature: Option<f32>) -> Result<Self> {
        let api_key =
            env::var("GEMINI_API_KEY").context("GEMINI_API_KEY environment variable not set")?;
        Ok(Self {
            api_key,
            model: model.unwrap_or_else(|| "gemini-2.0-flash".to_string()),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            client: Client::new(),
            max_tokens: 8192,
            temperature: temperature.unwrap_or(0.7),
        })
    }

    #[allow(dead_code)]
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

#[async_trait]
impl ModelGateway for GeminiGateway {
    fn name(&self) -> &str {
        "Gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn send_prompt(&self, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: Some(GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_tokens,
            }),
        };

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.model
            ))
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Gemini")?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            if let Ok(error_response) = serde_json::from_str::<GeminiError>(&response_text) {
                return Err(anyhow!(
                    "Gemini API error: {} (status: {:?})",
                    error_response.error.message,
                    error_response.error.status
                ));
            }
            return Err(anyhow!(
                "Gemini API error (status {}): {}",
                status,
                response_text
            ));
        }

        let api_response: GenerateContentResponse =
            serde_json::from_str(&response_text).context("Failed to parse Gemini response")?;

        let candidate = api_response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("No candidates in Gemini response"))?;

        if let Some(finish_reason) = &candidate.finish_reason {
            if finish_reason == "MAX_TOKENS" {
                warn!(
                    "Gemini response was truncated at the max_tokens limit ({}); the response may be incomplete.",
                    self.max_tokens
                );
            }
        }

        if let Some(usage) = api_response.usage_metadata {
            info!(
                "Gemini token usage - Prompt: {}, Completion: {}, Total: {}",
                usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
            );
        }

        let text = candidate
            .content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect::<Vec<_>>()
            .join("");

        if text.is_empty() {
            return Err(anyhow!("No text content in Gemini response"));
        }

        Ok(text)
    }
}
