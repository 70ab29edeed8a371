use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use jailup_core::JailConfig;

use crate::collaborators::ConfigStore;
use crate::layout::config_path;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonConfigStore;

impl JsonConfigStore {
    pub fn write_config(&self, dataset_path: &Path, config: &JailConfig) -> Result<()> {
        let path = config_path(dataset_path);
        let payload = config.to_json_string()?;

        // Staged beside the target, then renamed into place.
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, payload.as_bytes())
            .with_context(|| format!("failed to write jail config: {}", staging.display()))?;
        fs::rename(&staging, &path)
            .with_context(|| format!("failed to replace jail config: {}", path.display()))?;
        Ok(())
    }
}

impl ConfigStore for JsonConfigStore {
    fn load_config(&self, dataset_path: &Path) -> Result<JailConfig> {
        let path = config_path(dataset_path);
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read jail config: {}", path.display()))?;
        JailConfig::from_json_str(&raw)
            .with_context(|| format!("failed to load jail config: {}", path.display()))
    }
}
