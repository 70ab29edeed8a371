use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use anyhow::{anyhow, Context, Result};
use jailup_core::{JailConfig, EMPTY_RELEASE};

use crate::collaborators::UpgradeMechanism;
use crate::command::{capture_command, ensure_success};
use crate::config_store::JsonConfigStore;
use crate::layout::{freebsd_update_conf, freebsd_update_workdir};

const MAX_INSTALL_PASSES: usize = 3;
const NOTHING_TO_INSTALL: &str = "No updates are available to install";

#[derive(Debug, Clone)]
pub struct FreebsdUpdate {
    program: String,
    configs: JsonConfigStore,
}

impl FreebsdUpdate {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            configs: JsonConfigStore,
        }
    }

    fn command(&self, root_path: &Path, extra: &[OsString]) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg("-b")
            .arg(root_path)
            .arg("-d")
            .arg(freebsd_update_workdir(root_path))
            .arg("-f")
            .arg(freebsd_update_conf(root_path))
            .args(extra)
            .env("PAGER", "/bin/cat");
        command
    }
}

impl UpgradeMechanism for FreebsdUpdate {
    fn upgrade(
        &self,
        config: &JailConfig,
        target_release: &str,
        root_path: &Path,
    ) -> Result<String> {
        let target_release = target_release.trim();
        validate_target_release(&config.release, target_release)?;

        let mut fetch = self.command(
            root_path,
            &[
                "--currently-running".into(),
                config.release.as_str().into(),
                "-r".into(),
                target_release.into(),
                "upgrade".into(),
            ],
        );
        // freebsd-update asks for confirmation of the component list.
        let output = capture_command(&mut fetch, Some("y\n"), "freebsd-update upgrade")?;
        ensure_success(&output, "freebsd-update upgrade")?;

        // The first pass installs the kernel side, later passes the world;
        // freebsd-update says when nothing is left.
        for pass in 1..=MAX_INSTALL_PASSES {
            let mut install = self.command(root_path, &["install".into()]);
            let output = capture_command(&mut install, None, "freebsd-update install")?;
            let stdout = String::from_utf8_lossy(&output.stdout);
            if stdout.contains(NOTHING_TO_INSTALL) {
                if pass == 1 {
                    return Err(anyhow!(
                        "freebsd-update staged nothing to install for {target_release}"
                    ));
                }
                break;
            }
            ensure_success(&output, "freebsd-update install")?;
            tracing::debug!(
                pass,
                root = %root_path.display(),
                "freebsd-update install pass done"
            );
        }

        let dataset_path = root_path
            .parent()
            .ok_or_else(|| anyhow!("jail root has no dataset: {}", root_path.display()))?;
        let mut updated = config.clone();
        updated.release = target_release.to_string();
        self.configs
            .write_config(dataset_path, &updated)
            .with_context(|| format!("failed to record release {target_release}"))?;

        Ok(target_release.to_string())
    }
}

pub(crate) fn validate_target_release(current: &str, target: &str) -> Result<()> {
    if target.is_empty() {
        return Err(anyhow!("target release must not be empty"));
    }
    if target == EMPTY_RELEASE {
        return Err(anyhow!("cannot upgrade to {EMPTY_RELEASE}"));
    }
    if target == current {
        return Err(anyhow!("jail is already at {target}"));
    }
    if target.chars().any(char::is_whitespace) {
        return Err(anyhow!("target release contains whitespace: '{target}'"));
    }
    Ok(())
}
