mod collaborators;
mod command;
mod config_store;
mod control;
mod eligibility;
mod error;
mod freebsd_update;
mod layout;
mod lister;
mod report;
mod sequencer;

pub use collaborators::{Collaborators, ConfigStore, JailControl, JailLister, UpgradeMechanism};
pub use config_store::JsonConfigStore;
pub use control::CommandJailControl;
pub use eligibility::check_eligible;
pub use error::{EligibilityError, Restoration, UpgradeError};
pub use freebsd_update::FreebsdUpdate;
pub use layout::{
    config_path, freebsd_update_conf, freebsd_update_workdir, host_jail_name, IocageLayout,
};
pub use lister::HostJailLister;
pub use report::{report, ReportEvent, ReportLevel, ReportRecord, ReportSink};
pub use sequencer::{
    OperationOutcome, SequencerOptions, UpgradeOrchestrator, UpgradeRequest, UpgradeState,
};

use jailup_core::Settings;

#[derive(Debug, Clone)]
pub struct HostCollaborators {
    pub lister: HostJailLister,
    pub configs: JsonConfigStore,
    pub control: CommandJailControl,
    pub upgrader: FreebsdUpdate,
}

impl HostCollaborators {
    pub fn from_settings(settings: &Settings) -> Self {
        let layout = IocageLayout::new(&settings.iocroot);
        Self {
            lister: HostJailLister::new(layout, settings.jls.clone()),
            configs: JsonConfigStore,
            control: CommandJailControl::new(
                settings.start_command.clone(),
                settings.stop_command.clone(),
            ),
            upgrader: FreebsdUpdate::new(settings.freebsd_update.clone()),
        }
    }

    pub fn collaborators(&self) -> Collaborators<'_> {
        Collaborators {
            lister: &self.lister,
            configs: &self.configs,
            control: &self.control,
            upgrader: &self.upgrader,
        }
    }
}

pub fn sequencer_options(settings: &Settings) -> SequencerOptions {
    SequencerOptions {
        restore_on_failure: settings.restore_on_failure,
    }
}
