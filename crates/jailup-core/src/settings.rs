use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

pub const SETTINGS_ENV: &str = "JAILUP_CONFIG";
pub const DEFAULT_SETTINGS_PATH: &str = "/usr/local/etc/jailup.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub iocroot: PathBuf,
    pub restore_on_failure: bool,
    pub jls: String,
    pub start_command: Vec<String>,
    pub stop_command: Vec<String>,
    pub freebsd_update: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            iocroot: PathBuf::from("/iocage"),
            restore_on_failure: true,
            jls: "jls".to_string(),
            start_command: vec!["jail".into(), "-c".into(), "ioc-{uuid}".into()],
            stop_command: vec!["jail".into(), "-r".into(), "ioc-{uuid}".into()],
            freebsd_update: "freebsd-update".to_string(),
        }
    }
}

impl Settings {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let settings: Self = toml::from_str(input).context("failed to parse jailup settings")?;
        if settings.start_command.is_empty() {
            return Err(anyhow!("start_command must name a program"));
        }
        if settings.stop_command.is_empty() {
            return Err(anyhow!("stop_command must name a program"));
        }
        if settings.jls.trim().is_empty() {
            return Err(anyhow!("jls must name a program"));
        }
        if settings.freebsd_update.trim().is_empty() {
            return Err(anyhow!("freebsd_update must name a program"));
        }
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings: {}", path.display()))?;
        Self::from_toml_str(&raw)
            .with_context(|| format!("invalid settings file: {}", path.display()))
    }

    pub fn discover(explicit: Option<&Path>, env_value: Option<&str>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if let Some(value) = env_value.map(str::trim).filter(|value| !value.is_empty()) {
            return Self::load(Path::new(value));
        }

        let default_path = Path::new(DEFAULT_SETTINGS_PATH);
        if default_path.exists() {
            return Self::load(default_path);
        }
        Ok(Self::default())
    }
}
