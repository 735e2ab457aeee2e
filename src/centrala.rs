//! Task-data download and answer submission for the course endpoint.

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::openai::client::ensure_success;

/// Reader for per-task JSON published under `{base}/data/{apikey}/`.
#[derive(Debug, Clone)]
pub struct TaskData {
    base_url: String,
    api_key: String,
    http: Client,
}

impl TaskData {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            http: Client::new(),
        }
    }

    /// Builds a reader from `CENTRALA_URL` / `AIDEVS3_API_KEY`.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let base_url = settings.centrala_url()?;
        let api_key = settings.aidevs_api_key()?;
        Ok(Self::new(base_url, api_key))
    }

    /// Downloads `{base}/data/{apikey}/{name}`; anything but 2xx is an error.
    pub fn fetch_json(&self, name: &str) -> Result<Value> {
        let url = format!("{}/data/{}/{name}", self.base_url, self.api_key);
        info!(file = name, "fetching task data");
        let response = ensure_success(self.http.get(url).send()?)?;
        Ok(response.json()?)
    }

    /// Reads the `description` field of `robotid.json`.
    pub fn robot_description(&self) -> Result<String> {
        let data = self.fetch_json("robotid.json")?;
        data.get("description")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|description| !description.is_empty())
            .map(str::to_string)
            .ok_or(Error::MissingField {
                field: "description",
            })
    }
}

#[derive(Debug, Serialize)]
struct SubmissionPayload<'a, T: Serialize + ?Sized> {
    task: &'a str,
    apikey: &'a str,
    answer: &'a T,
}

/// Raw reply of the submission endpoint, left for the caller to judge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub status: StatusCode,
    pub body: String,
}

impl Submission {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Poster for `{task, apikey, answer}` submissions.
#[derive(Debug, Clone)]
pub struct Submitter {
    url: String,
    api_key: String,
    http: Client,
}

impl Submitter {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            http: Client::new(),
        }
    }

    /// Builds a submitter from `AIDEVS3_API_URL` / `AIDEVS3_API_KEY`.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let url = settings.aidevs_api_url()?;
        let api_key = settings.aidevs_api_key()?;
        Ok(Self::new(url, api_key))
    }

    /// Posts an answer. The status is not checked: a rejected answer comes
    /// back as a [`Submission`] like an accepted one.
    pub fn send_answer<T>(&self, task: &str, answer: &T) -> Result<Submission>
    where
        T: Serialize + ?Sized,
    {
        let payload = SubmissionPayload {
            task,
            apikey: &self.api_key,
            answer,
        };
        info!(task, "submitting answer");
        let response = self.http.post(&self.url).json(&payload).send()?;
        let status = response.status();
        let body = response.text()?;
        Ok(Submission { status, body })
    }
}
