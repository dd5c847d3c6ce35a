//! Vision client: one request, one response, no retries.
//!
//! Talks to any OpenAI-compatible chat-completions endpoint that
//! accepts image content. Callers needing resilience wrap this; the
//! client itself never retries.

use std::fs;
use std::path::Path;
use std::time::Duration;

use base64::{engine::general_purpose, Engine as _};
use serde_json::{json, Value};
use tracing::debug;

use crema_core::ANALYSIS_PROMPT;

/// Endpoint configuration, built once from flags and environment.
#[derive(Debug, Clone)]
pub struct VisionConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com".to_string(),
            model: "gpt-4o".to_string(),
            api_key: None,
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum VisionError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("invalid JSON response: {0}")]
    InvalidJson(String),

    #[error("request timeout after {0} seconds")]
    Timeout(u64),

    #[error("service returned no analysis text")]
    EmptyResponse,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct VisionClient {
    config: VisionConfig,
    client: reqwest::blocking::Client,
}

impl VisionClient {
    pub fn new(config: VisionConfig) -> Result<Self, VisionError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VisionError::Http(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    /// Send an image for analysis and return the raw report text.
    pub fn analyze_image(&self, path: &Path) -> Result<String, VisionError> {
        let bytes = fs::read(path)?;
        let encoded = general_purpose::STANDARD.encode(&bytes);
        let body = self.request_body(mime_for(path), &encoded);

        let url = format!(
            "{}/v1/chat/completions",
            self.config.endpoint.trim_end_matches('/')
        );
        debug!(%url, model = %self.config.model, bytes = bytes.len(), "sending analysis request");

        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().map_err(|e| {
            if e.is_timeout() {
                VisionError::Timeout(self.config.timeout_secs)
            } else {
                VisionError::Http(format!("request failed: {e}"))
            }
        })?;

        if !response.status().is_success() {
            return Err(VisionError::Http(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        let payload: Value = response
            .json()
            .map_err(|e| VisionError::InvalidJson(format!("failed to parse response: {e}")))?;

        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or(VisionError::EmptyResponse)?;

        Ok(content.to_string())
    }

    fn request_body(&self, mime: &str, encoded_image: &str) -> Value {
        json!({
            "model": self.config.model,
            "messages": [
                {
                    "role": "system",
                    "content": ANALYSIS_PROMPT,
                },
                {
                    "role": "user",
                    "content": [
                        {
                            "type": "text",
                            "text": "Please analyze this image following the exact structure provided.",
                        },
                        {
                            "type": "image_url",
                            "image_url": {
                                "url": format!("data:{mime};base64,{encoded_image}"),
                                "detail": "high",
                            },
                        },
                    ],
                },
            ],
            "max_tokens": 800,
        })
    }
}

fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_detection() {
        assert_eq!(mime_for(Path::new("a.png")), "image/png");
        assert_eq!(mime_for(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(mime_for(Path::new("a")), "image/jpeg");
    }

    #[test]
    fn test_request_body_carries_prompt_and_image() {
        let client = VisionClient::new(VisionConfig::default()).unwrap();
        let body = client.request_body("image/jpeg", "QUJD");
        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["messages"][0]["content"], ANALYSIS_PROMPT);
        let url = body["messages"][1]["content"][1]["image_url"]["url"]
            .as_str()
            .unwrap();
        assert_eq!(url, "data:image/jpeg;base64,QUJD");
    }
}
