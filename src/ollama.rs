//! Prompting a local model through Ollama's `/api/generate`.

use reqwest::blocking::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::Settings;
use crate::error::Result;
use crate::openai::client::ensure_success;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    format: &'a str,
    system: &'a str,
}

#[derive(Debug, Clone)]
pub struct OllamaClient {
    url: String,
    model: String,
    http: Client,
}

impl OllamaClient {
    pub fn new(url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            model: model.into(),
            http: Client::new(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.ollama_url.as_str(), settings.models.local.as_str())
    }

    /// Runs one non-streaming JSON-mode generation.
    ///
    /// Returns the `response` field, or the whole reply body when the field is
    /// missing.
    pub fn generate(&self, system: &str, prompt: &str) -> Result<String> {
        let payload = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            format: "json",
            system,
        };
        debug!(model = %self.model, url = %self.url, "local generate");
        let response = ensure_success(self.http.post(&self.url).json(&payload).send()?)?;
        let body: Value = response.json()?;
        Ok(match body.get("response").and_then(Value::as_str) {
            Some(text) => text.to_string(),
            None => body.to_string(),
        })
    }
}
