use std::io;
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures surfaced by the task drivers and the helpers behind them.
#[derive(Debug, Error)]
pub enum Error {
    /// A required environment variable is unset or blank.
    #[error("{name} is not set in the environment")]
    MissingEnv { name: &'static str },

    #[error("Failed to read config file '{}': {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Filesystem failure while scanning or reading task data.
    #[error("Failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Transport failure (connection, TLS, body decoding).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote service answered with a non-2xx status.
    #[error("API error {status}: {body}")]
    Api { status: StatusCode, body: String },

    /// A field the pipeline depends on was absent from a JSON reply.
    #[error("response did not contain `{field}`")]
    MissingField { field: &'static str },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Error;
    use reqwest::StatusCode;

    #[test]
    fn missing_env_names_the_variable() {
        let err = Error::MissingEnv {
            name: "OPENAI_API_KEY",
        };
        assert_eq!(err.to_string(), "OPENAI_API_KEY is not set in the environment");
    }

    #[test]
    fn api_error_keeps_status_and_body() {
        let err = Error::Api {
            status: StatusCode::UNAUTHORIZED,
            body: "bad key".to_string(),
        };
        assert_eq!(err.to_string(), "API error 401 Unauthorized: bad key");
    }
}
