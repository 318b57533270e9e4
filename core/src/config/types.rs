use serde::{Deserialize, Serialize};

use crate::query::QueryConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    /// Query-engine options for the task table.
    #[serde(default = "default_table")]
    pub table: QueryConfig,

    /// Owner assigned to tasks created from the form.
    #[serde(default = "default_user_id")]
    pub default_user_id: i64,
}

/// The task table searches its text columns, the id and the status; `userId` is
/// never searched.
fn default_table() -> QueryConfig {
    QueryConfig {
        filterable: true,
        ..QueryConfig::default()
    }
    .with_search_keys(["title", "body", "id", "status"])
}

fn default_user_id() -> i64 {
    1
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            remote: RemoteConfig::default(),
            storage: StorageConfig::default(),
            table: default_table(),
            default_user_id: default_user_id(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "warn" or "taskdesk_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_tasks_path")]
    pub tasks_path: String,

    /// Queried with `?postId=<task id>`.
    #[serde(default = "default_comments_path")]
    pub comments_path: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    "https://jsonplaceholder.typicode.com".to_string()
}

fn default_tasks_path() -> String {
    "/posts".to_string()
}

fn default_comments_path() -> String {
    "/comments".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            tasks_path: default_tasks_path(),
            comments_path: default_comments_path(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// When false the store runs in memory only and nothing is persisted.
    #[serde(default = "default_storage_enabled")]
    pub enabled: bool,

    /// Directory holding one `<key>.json` file per key. Resolved at load time when unset.
    #[serde(default)]
    pub directory: Option<String>,

    #[serde(default = "default_storage_key")]
    pub key: String,
}

fn default_storage_enabled() -> bool {
    true
}

fn default_storage_key() -> String {
    crate::store::DEFAULT_STORAGE_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            enabled: default_storage_enabled(),
            directory: None,
            key: default_storage_key(),
        }
    }
}
