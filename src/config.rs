use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
pub const AIDEVS3_API_KEY: &str = "AIDEVS3_API_KEY";
pub const AIDEVS3_API_URL: &str = "AIDEVS3_API_URL";
pub const CENTRALA_URL: &str = "CENTRALA_URL";
pub const OLLAMA_URL: &str = "OLLAMA_URL";
pub const TP_CONFIG: &str = "TP_CONFIG";
pub const TP_DATA_DIR: &str = "TP_DATA_DIR";

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434/api/generate";
pub const DEFAULT_DATA_DIR: &str = "data";

/// Model overrides read from the `[models]` table of the config file.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ModelsConfig {
    pub chat: Option<String>,
    pub vision: Option<String>,
    pub transcription: Option<String>,
    pub image: Option<String>,
    pub local: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    models: Option<ModelsConfig>,
}

/// Model identifiers used by the drivers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Models {
    pub chat: String,
    pub vision: String,
    pub transcription: String,
    pub image: String,
    pub local: String,
}

impl Default for Models {
    fn default() -> Self {
        Self {
            chat: "gpt-4o".to_string(),
            vision: "gpt-4o".to_string(),
            transcription: "whisper-1".to_string(),
            image: "dall-e-3".to_string(),
            local: "llama2:7b".to_string(),
        }
    }
}

impl Models {
    fn apply(&mut self, overrides: ModelsConfig) {
        let ModelsConfig {
            chat,
            vision,
            transcription,
            image,
            local,
        } = overrides;
        for (slot, value) in [
            (&mut self.chat, chat),
            (&mut self.vision, vision),
            (&mut self.transcription, transcription),
            (&mut self.image, image),
            (&mut self.local, local),
        ] {
            if let Some(value) = value.filter(|value| !value.trim().is_empty()) {
                *slot = value;
            }
        }
    }
}

/// Resolved process configuration: credentials from the environment, defaults
/// from the optional config file.
///
/// Credentials stay optional until a driver asks for one; drivers ask before
/// their first request.
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub models: Models,
    pub openai_base_url: String,
    pub ollama_url: String,
    pub config_path: Option<PathBuf>,
    openai_api_key: Option<String>,
    aidevs_api_key: Option<String>,
    aidevs_api_url: Option<String>,
    centrala_url: Option<String>,
}

impl Settings {
    /// Loads `.env` (if present) and reads the process environment.
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds settings from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let (file, config_path) = match locate_config(&var) {
            Some(ConfigLocation { path, explicit }) => {
                if explicit || path.is_file() {
                    (read_config_file(&path)?, Some(path))
                } else {
                    (ConfigFile::default(), None)
                }
            }
            None => (ConfigFile::default(), None),
        };

        let mut models = Models::default();
        if let Some(overrides) = file.models {
            models.apply(overrides);
        }

        let data_dir = var(TP_DATA_DIR)
            .map(PathBuf::from)
            .or(file.data_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let settings = Self {
            data_dir,
            models,
            openai_base_url: var(OPENAI_BASE_URL)
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            ollama_url: var(OLLAMA_URL).unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string()),
            config_path,
            openai_api_key: var(OPENAI_API_KEY),
            aidevs_api_key: var(AIDEVS3_API_KEY),
            aidevs_api_url: var(AIDEVS3_API_URL),
            centrala_url: var(CENTRALA_URL),
        };
        debug!(
            data_dir = %settings.data_dir.display(),
            openai_api_key_present = settings.openai_api_key.is_some(),
            aidevs_api_key_present = settings.aidevs_api_key.is_some(),
            "settings resolved"
        );
        Ok(settings)
    }

    pub fn openai_api_key(&self) -> Result<&str> {
        required(&self.openai_api_key, OPENAI_API_KEY)
    }

    pub fn aidevs_api_key(&self) -> Result<&str> {
        required(&self.aidevs_api_key, AIDEVS3_API_KEY)
    }

    pub fn aidevs_api_url(&self) -> Result<&str> {
        required(&self.aidevs_api_url, AIDEVS3_API_URL)
    }

    pub fn centrala_url(&self) -> Result<&str> {
        required(&self.centrala_url, CENTRALA_URL)
    }

    /// Resolves a task subdirectory, preferring an explicit data root.
    pub fn task_dir(&self, data_dir: Option<&Path>, name: &str) -> PathBuf {
        data_dir.unwrap_or(&self.data_dir).join(name)
    }
}

fn required<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str> {
    value.as_deref().ok_or(Error::MissingEnv { name })
}

struct ConfigLocation {
    path: PathBuf,
    explicit: bool,
}

fn locate_config(var: &impl Fn(&str) -> Option<String>) -> Option<ConfigLocation> {
    if let Some(path) = var(TP_CONFIG) {
        return Some(ConfigLocation {
            path: PathBuf::from(path),
            explicit: true,
        });
    }

    let base = var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| var("HOME").map(|home| PathBuf::from(home).join(".config")))?;
    Some(ConfigLocation {
        path: base.join("taskpipe").join("config.toml"),
        explicit: false,
    })
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let raw = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Checks that the config file in effect (if any) parses.
///
/// Returns the path that was validated, or `None` when no file exists and the
/// built-in defaults apply.
pub fn validate_config() -> Result<Option<PathBuf>> {
    Settings::load().map(|settings| settings.config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        std::env::temp_dir().join(format!("taskpipe-config-{label}-{nanos}"))
    }

    fn settings_with(vars: &[(&str, &str)]) -> Result<Settings> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Settings::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_without_file_or_env() {
        let settings = settings_with(&[]).expect("settings should load");
        assert_eq!(settings.models, Models::default());
        assert_eq!(settings.data_dir, PathBuf::from("data"));
        assert_eq!(settings.openai_base_url, DEFAULT_OPENAI_BASE_URL);
        assert!(settings.config_path.is_none());
    }

    #[test]
    fn missing_key_reports_variable_name() {
        let settings = settings_with(&[]).expect("settings should load");
        let err = settings.openai_api_key().unwrap_err();
        assert!(matches!(err, Error::MissingEnv { name } if name == OPENAI_API_KEY));
    }

    #[test]
    fn blank_values_count_as_missing() {
        let settings = settings_with(&[(AIDEVS3_API_KEY, "   ")]).expect("settings should load");
        assert!(settings.aidevs_api_key().is_err());
    }

    #[test]
    fn env_values_are_trimmed() {
        let settings = settings_with(&[(OPENAI_API_KEY, " sk-test \n")]).expect("settings");
        assert_eq!(settings.openai_api_key().unwrap(), "sk-test");
    }

    #[test]
    fn explicit_config_overrides_models_and_env_wins_for_data_dir() {
        let path = unique_temp_path("models");
        fs::write(
            &path,
            "data_dir = \"/srv/tasks\"\n[models]\nchat = \"gpt-4o-mini\"\ntranscription = \"\"\n",
        )
        .expect("config should be writable");
        let path_str = path.to_string_lossy().to_string();

        let settings = settings_with(&[(TP_CONFIG, &path_str)]).expect("settings");
        assert_eq!(settings.models.chat, "gpt-4o-mini");
        assert_eq!(settings.models.transcription, "whisper-1");
        assert_eq!(settings.data_dir, PathBuf::from("/srv/tasks"));
        assert_eq!(settings.config_path.as_deref(), Some(path.as_path()));

        let settings =
            settings_with(&[(TP_CONFIG, &path_str), (TP_DATA_DIR, "local")]).expect("settings");
        assert_eq!(settings.data_dir, PathBuf::from("local"));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let path = unique_temp_path("missing");
        let err = settings_with(&[(TP_CONFIG, &path.to_string_lossy())]).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn implicit_missing_config_falls_back_to_defaults() {
        let dir = unique_temp_path("xdg");
        let settings = settings_with(&[("XDG_CONFIG_HOME", &dir.to_string_lossy())])
            .expect("settings should load");
        assert!(settings.config_path.is_none());
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let path = unique_temp_path("invalid");
        fs::write(&path, "[models\nchat = 1").expect("config should be writable");
        let err = settings_with(&[(TP_CONFIG, &path.to_string_lossy())]).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn task_dir_prefers_explicit_root() {
        let settings = settings_with(&[]).expect("settings");
        assert_eq!(
            settings.task_dir(None, "map"),
            PathBuf::from("data").join("map")
        );
        assert_eq!(
            settings.task_dir(Some(Path::new("/tmp/x")), "map"),
            PathBuf::from("/tmp/x/map")
        );
    }
}
