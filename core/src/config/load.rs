use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default taskdesk data directory: ~/.taskdesk
pub fn get_taskdesk_data_dir() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home.join(".taskdesk"))
}

pub fn load_from_str(s: &str) -> anyhow::Result<AppConfig> {
    Ok(toml::from_str::<AppConfig>(s)?)
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.taskdesk/config.toml (highest)
    let data_dir = get_taskdesk_data_dir()?;
    let user_config = data_dir.join("config.toml");

    // Priority 2: ./config.toml (current directory)
    let local_config = Path::new("config.toml");

    let mut cfg: AppConfig = if user_config.exists() {
        load_from_str(&std::fs::read_to_string(&user_config)?)?
    } else if local_config.exists() {
        load_from_str(&std::fs::read_to_string(local_config)?)?
    } else {
        AppConfig::default()
    };

    apply_env_overrides(&mut cfg, |name| std::env::var(name).ok());

    if cfg.storage.enabled && is_blank(cfg.storage.directory.as_deref()) {
        cfg.storage.directory = Some(data_dir.join("data").to_string_lossy().to_string());
    }
    if cfg.logging.file && is_blank(cfg.logging.directory.as_deref()) {
        cfg.logging.directory = Some(data_dir.join("logs").to_string_lossy().to_string());
    }

    Ok(cfg)
}

fn is_blank(value: Option<&str>) -> bool {
    value.map(|s| s.trim().is_empty()).unwrap_or(true)
}

// Environment variable overrides (Priority 0: highest)
fn apply_env_overrides(cfg: &mut AppConfig, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("TASKDESK_API_URL").filter(|v| !v.trim().is_empty()) {
        cfg.remote.base_url = v;
    }
    if let Some(v) = var("TASKDESK_DATA_DIR").filter(|v| !v.trim().is_empty()) {
        cfg.storage.directory = Some(v);
    }
    if let Some(v) = var("TASKDESK_STORAGE").filter(|v| !v.trim().is_empty()) {
        cfg.storage.enabled = !matches!(v.trim().to_ascii_lowercase().as_str(), "off" | "false" | "0");
    }
}
