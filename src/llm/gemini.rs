use std::path::Path;
use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};

use crate::error::{Error, Result};

pub const DEFAULT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

const DEFAULT_SYSTEM_PROMPT: &str = include_str!("../../prompts/system.txt");

const TEMPERATURE: f64 = 0.2;
const TOP_P: f64 = 0.9;
const TOP_K: u32 = 40;

/// Client for the `generateContent` endpoint.
///
/// One POST per call, no retries. The API key travels as the `key` query
/// parameter and is stripped from any transport error before it is returned.
pub struct GeminiClient {
    http: Client,
    endpoint: String,
    api_key: String,
    system_prompt: String,
}

impl GeminiClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        system_prompt: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            system_prompt: system_prompt.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends the instruction and returns the model's text, every part of
    /// every candidate joined by newlines.
    pub async fn request_design(&self, instruction: &str) -> Result<String> {
        let payload = build_payload(&self.system_prompt, instruction);

        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::Transport(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Transport(e.without_url()))?;

        let value: Value = serde_json::from_str(&body).map_err(|e| {
            let snippet: String = body.chars().take(100).collect();
            Error::InvalidResponse(format!("HTTP {status}: {e} | body: {snippet}"))
        })?;

        if let Some(err) = value.get("error") {
            return Err(Error::Api(describe_api_error(err)));
        }

        Ok(extract_candidate_text(&value))
    }
}

/// Reads the system instruction from disk, falling back to the built-in copy.
pub fn load_system_prompt(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => {
            log::warn!("{} is empty, using built-in system prompt", path.display());
            default_system_prompt()
        }
        Err(e) => {
            log::warn!(
                "could not read {} ({e}), using built-in system prompt",
                path.display()
            );
            default_system_prompt()
        }
    }
}

pub fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.trim().to_string()
}

fn build_payload(system_prompt: &str, instruction: &str) -> Value {
    json!({
        "systemInstruction": {
            "role": "system",
            "parts": [{"text": system_prompt}]
        },
        "contents": [
            {
                "role": "user",
                "parts": [{"text": instruction}]
            }
        ],
        "generationConfig": {
            "temperature": TEMPERATURE,
            "top_p": TOP_P,
            "top_k": TOP_K,
            "response_mime_type": "application/json"
        }
    })
}

fn extract_candidate_text(value: &Value) -> String {
    let mut blocks = Vec::new();
    let candidates = value
        .get("candidates")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for candidate in candidates {
        let parts = candidate
            .get("content")
            .and_then(|c| c.get("parts"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        for part in parts {
            if let Some(text) = part.get("text").and_then(Value::as_str) {
                blocks.push(text);
            }
        }
    }

    blocks.join("\n").trim().to_string()
}

fn describe_api_error(err: &Value) -> String {
    let message = err.get("message").and_then(Value::as_str);
    let status = err.get("status").and_then(Value::as_str);
    match (status, message) {
        (Some(status), Some(message)) => format!("{status}: {message}"),
        (None, Some(message)) => message.to_string(),
        _ => err.to_string(),
    }
}
