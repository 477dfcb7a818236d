use crate::errors::{AppError, AppResult};
use crate::llm::DEFAULT_MAX_REPLY_TOKENS;
use crate::llm::client::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub mod migrate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_endpoint")]
    pub model_endpoint: String,
    #[serde(default = "default_model")]
    pub model_name: String,
    /// Name of the environment variable holding the API token.
    #[serde(default = "default_token_env")]
    pub token_env: String,
    #[serde(default = "default_max_reply_tokens")]
    pub max_reply_tokens: u32,
    #[serde(default = "default_model_timeout")]
    pub model_timeout_secs: u64,
    #[serde(default = "default_retention_days")]
    pub retention_days: i64,
    /// Who summaries are addressed to.
    #[serde(default = "default_recipient")]
    pub recipient: String,
    /// Optional file overriding the built-in extraction prompt.
    #[serde(default)]
    pub prompt_file: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}
fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
fn default_token_env() -> String {
    "HF_TOKEN".to_string()
}
fn default_max_reply_tokens() -> u32 {
    DEFAULT_MAX_REPLY_TOKENS
}
fn default_model_timeout() -> u64 {
    60
}
fn default_retention_days() -> i64 {
    crate::core::purge::DEFAULT_RETENTION_DAYS
}
fn default_recipient() -> String {
    "supervisor".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            model_endpoint: default_endpoint(),
            model_name: default_model(),
            token_env: default_token_env(),
            max_reply_tokens: default_max_reply_tokens(),
            model_timeout_secs: default_model_timeout(),
            retention_days: default_retention_days(),
            recipient: default_recipient(),
            prompt_file: None,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rdowntime")
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".rdowntime")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rdowntime.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rdowntime.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        let mut cfg: Config = serde_yaml::from_str(&content)?;
        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        Ok(cfg)
    }

    /// Write config and create an empty DB file. Returns the DB path.
    ///
    /// In test mode the config file is left untouched.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) => {
                let p = expand_tilde(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => dir.join("rdowntime.sqlite"),
        };

        if !is_test {
            fs::create_dir_all(&dir)?;

            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Config::default()
            };
            let yaml = serde_yaml::to_string(&config)?;
            fs::write(Self::config_file(), yaml)?;
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok(db_path)
    }
}
