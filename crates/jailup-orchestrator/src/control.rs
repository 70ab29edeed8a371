use anyhow::Result;
use jailup_core::{JailConfig, JailRecord};

use crate::collaborators::JailControl;
use crate::command::{expand_template, run_command, TemplateVars};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandJailControl {
    start_command: Vec<String>,
    stop_command: Vec<String>,
}

impl CommandJailControl {
    pub fn new(start_command: Vec<String>, stop_command: Vec<String>) -> Self {
        Self {
            start_command,
            stop_command,
        }
    }

    fn run_template(&self, template: &[String], jail: &JailRecord, action: &str) -> Result<()> {
        let root = jail.root_path();
        let mut command = expand_template(
            template,
            TemplateVars {
                uuid: &jail.uuid,
                tag: &jail.tag,
                dataset: jail.dataset_path(),
                root: &root,
            },
        )?;
        run_command(&mut command, &format!("{action} command"))
    }
}

impl JailControl for CommandJailControl {
    fn start(&self, jail: &JailRecord, _config: &JailConfig) -> Result<()> {
        self.run_template(&self.start_command, jail, "start")
    }

    fn stop(&self, jail: &JailRecord, _config: &JailConfig) -> Result<()> {
        self.run_template(&self.stop_command, jail, "stop")
    }
}
