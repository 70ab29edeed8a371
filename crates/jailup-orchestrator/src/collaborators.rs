use std::path::Path;

use anyhow::Result;
use jailup_core::{JailConfig, JailEntry, JailRecord, RunningStatus};

pub trait JailLister {
    fn list_jails(&self) -> Result<Vec<JailEntry>>;

    fn running_status(&self, uuid: &str) -> Result<RunningStatus>;
}

pub trait ConfigStore {
    fn load_config(&self, dataset_path: &Path) -> Result<JailConfig>;
}

pub trait JailControl {
    fn start(&self, jail: &JailRecord, config: &JailConfig) -> Result<()>;

    fn stop(&self, jail: &JailRecord, config: &JailConfig) -> Result<()>;
}

pub trait UpgradeMechanism {
    /// Upgrades the base system under `root_path` and returns the release
    /// now installed there.
    fn upgrade(
        &self,
        config: &JailConfig,
        target_release: &str,
        root_path: &Path,
    ) -> Result<String>;
}

#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub lister: &'a dyn JailLister,
    pub configs: &'a dyn ConfigStore,
    pub control: &'a dyn JailControl,
    pub upgrader: &'a dyn UpgradeMechanism,
}
