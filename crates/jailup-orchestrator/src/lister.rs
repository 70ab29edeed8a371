use std::fs;
use std::process::Command;

use anyhow::{anyhow, Context, Result};
use jailup_core::{JailEntry, RunningStatus};

use crate::collaborators::{ConfigStore, JailLister};
use crate::command::capture_command;
use crate::config_store::JsonConfigStore;
use crate::layout::{config_path, host_jail_name, IocageLayout};

#[derive(Debug, Clone)]
pub struct HostJailLister {
    layout: IocageLayout,
    jls: String,
}

impl HostJailLister {
    pub fn new(layout: IocageLayout, jls: impl Into<String>) -> Self {
        Self {
            layout,
            jls: jls.into(),
        }
    }
}

impl JailLister for HostJailLister {
    fn list_jails(&self) -> Result<Vec<JailEntry>> {
        let dir = self.layout.jails_dir();
        let configs = JsonConfigStore;

        let mut jails = Vec::new();
        for entry in fs::read_dir(&dir)
            .with_context(|| format!("failed to read jail datasets: {}", dir.display()))?
        {
            let entry = entry
                .with_context(|| format!("failed to read jail datasets: {}", dir.display()))?;
            let file_type = entry.file_type().with_context(|| {
                format!("failed to inspect jail dataset: {}", entry.path().display())
            })?;
            if !file_type.is_dir() {
                continue;
            }

            let dataset_path = entry.path();
            if !config_path(&dataset_path).exists() {
                continue;
            }
            let Some(dir_name) = dataset_path.file_name().and_then(|v| v.to_str()) else {
                continue;
            };
            let dir_name = dir_name.to_string();

            let config = match configs.load_config(&dataset_path) {
                Ok(config) => config,
                Err(err) => {
                    let detail = format!("{err:#}");
                    tracing::warn!(
                        dataset = %dataset_path.display(),
                        error = %detail,
                        "skipping jail with unreadable config"
                    );
                    continue;
                }
            };

            let uuid = config
                .host_hostuuid
                .filter(|uuid| !uuid.trim().is_empty())
                .unwrap_or(dir_name);
            let tag = config
                .tag
                .filter(|tag| !tag.trim().is_empty())
                .unwrap_or_else(|| uuid.clone());
            jails.push(JailEntry::new(tag, uuid, dataset_path));
        }

        jails.sort_by(|a, b| a.tag.cmp(&b.tag).then_with(|| a.uuid.cmp(&b.uuid)));
        Ok(jails)
    }

    fn running_status(&self, uuid: &str) -> Result<RunningStatus> {
        let name = host_jail_name(uuid);
        let mut command = Command::new(&self.jls);
        command.args(["-j", name.as_str(), "jid"]);
        let output = capture_command(&mut command, None, "failed to query jail status")?;

        // jls exits non-zero when no jail has that name.
        if !output.status.success() {
            return Ok(RunningStatus::stopped());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let jid = stdout
            .trim()
            .parse::<u32>()
            .map_err(|_| anyhow!("unexpected jls output for {name}: '{}'", stdout.trim()))?;
        Ok(RunningStatus::running(jid))
    }
}
