use std::io;

use anyhow::Result;
use jailup_core::{Settings, SETTINGS_ENV};
use jailup_orchestrator::{
    report, sequencer_options, Collaborators, HostCollaborators, ReportEvent,
    UpgradeOrchestrator, UpgradeRequest,
};

use crate::completion::write_completions_script;
use crate::render::{current_output_style, SpinningUpgrade, TerminalSink};
use crate::{Cli, Commands};

pub(crate) fn run_cli(cli: Cli) -> Result<u8> {
    let output_style = current_output_style(cli.plain);

    match cli.command {
        Commands::Upgrade { jail, release } => {
            let env_value = std::env::var(SETTINGS_ENV).ok();
            let settings = Settings::discover(cli.config.as_deref(), env_value.as_deref())?;
            tracing::debug!(
                iocroot = %settings.iocroot.display(),
                restore_on_failure = settings.restore_on_failure,
                "loaded settings"
            );

            let host = HostCollaborators::from_settings(&settings);
            let upgrader = SpinningUpgrade::new(&host.upgrader, output_style);
            let collaborators = Collaborators {
                upgrader: &upgrader,
                ..host.collaborators()
            };
            let orchestrator =
                UpgradeOrchestrator::new(collaborators, sequencer_options(&settings));

            let request = UpgradeRequest {
                jail_identifier: jail,
                target_release: release,
            };
            let result = orchestrator.run(&request);

            let mut sink = TerminalSink::stdio(output_style);
            Ok(report(ReportEvent::from(&result), &mut sink))
        }
        Commands::Completions { shell } => {
            write_completions_script(shell, &mut io::stdout().lock())?;
            Ok(0)
        }
    }
}
