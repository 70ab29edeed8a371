use jailup_core::{JailConfig, JailEntry, JailRecord};
use jailup_resolver::resolve_jail;

use crate::collaborators::Collaborators;
use crate::eligibility::check_eligible;
use crate::error::{Restoration, UpgradeError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeRequest {
    pub jail_identifier: String,
    pub target_release: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationOutcome {
    pub uuid: String,
    pub tag: String,
    pub prior_release: String,
    pub new_release: String,
    pub was_auto_started: bool,
}

impl OperationOutcome {
    pub fn success_message(&self) -> String {
        format!(
            "{} ({}) successfully upgraded from {} to {}!",
            self.uuid, self.tag, self.prior_release, self.new_release
        )
    }
}

#[derive(Debug)]
pub enum UpgradeState {
    Idle,
    Resolved {
        entry: JailEntry,
    },
    Validated {
        record: JailRecord,
        config: JailConfig,
    },
    Running {
        record: JailRecord,
        config: JailConfig,
        auto_started: bool,
    },
    Upgraded {
        record: JailRecord,
        config: JailConfig,
        auto_started: bool,
        new_release: String,
    },
    Restored {
        record: JailRecord,
        auto_started: bool,
        new_release: String,
    },
    Done(OperationOutcome),
    Failed(UpgradeError),
}

impl UpgradeState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Resolved { .. } => "resolved",
            Self::Validated { .. } => "validated",
            Self::Running { .. } => "running",
            Self::Upgraded { .. } => "upgraded",
            Self::Restored { .. } => "restored",
            Self::Done(_) => "done",
            Self::Failed(_) => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done(_) | Self::Failed(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequencerOptions {
    pub restore_on_failure: bool,
}

impl Default for SequencerOptions {
    fn default() -> Self {
        Self {
            restore_on_failure: true,
        }
    }
}

pub struct UpgradeOrchestrator<'a> {
    collaborators: Collaborators<'a>,
    options: SequencerOptions,
}

impl<'a> UpgradeOrchestrator<'a> {
    pub fn new(collaborators: Collaborators<'a>, options: SequencerOptions) -> Self {
        Self {
            collaborators,
            options,
        }
    }

    pub fn run(&self, request: &UpgradeRequest) -> Result<OperationOutcome, UpgradeError> {
        let mut state = UpgradeState::Idle;
        loop {
            state = match self.advance(state, request) {
                UpgradeState::Done(outcome) => return Ok(outcome),
                UpgradeState::Failed(err) => return Err(err),
                next => next,
            };
        }
    }

    pub fn advance(&self, state: UpgradeState, request: &UpgradeRequest) -> UpgradeState {
        let from = state.name();
        let next = self.transition(state, request);
        tracing::debug!(
            from,
            to = next.name(),
            jail = %request.jail_identifier,
            "upgrade state transition"
        );
        next
    }

    fn transition(&self, state: UpgradeState, request: &UpgradeRequest) -> UpgradeState {
        match state {
            UpgradeState::Idle => self.resolve(request),
            UpgradeState::Resolved { entry } => self.validate(entry),
            UpgradeState::Validated { record, config } => self.ensure_running(record, config),
            UpgradeState::Running {
                record,
                config,
                auto_started,
            } => self.upgrade(record, config, auto_started, &request.target_release),
            UpgradeState::Upgraded {
                record,
                config,
                auto_started,
                new_release,
            } => self.restore(record, config, auto_started, new_release),
            UpgradeState::Restored {
                record,
                auto_started,
                new_release,
            } => UpgradeState::Done(OperationOutcome {
                uuid: record.uuid,
                tag: record.tag,
                prior_release: record.release,
                new_release,
                was_auto_started: auto_started,
            }),
            terminal @ (UpgradeState::Done(_) | UpgradeState::Failed(_)) => terminal,
        }
    }

    fn resolve(&self, request: &UpgradeRequest) -> UpgradeState {
        let jails = match self.collaborators.lister.list_jails() {
            Ok(jails) => jails,
            Err(cause) => {
                return UpgradeState::Failed(UpgradeError::Lookup {
                    what: "list jails".to_string(),
                    cause,
                });
            }
        };

        match resolve_jail(&request.jail_identifier, &jails) {
            Ok(entry) => UpgradeState::Resolved { entry },
            Err(err) => UpgradeState::Failed(err.into()),
        }
    }

    fn validate(&self, entry: JailEntry) -> UpgradeState {
        let config = match self.collaborators.configs.load_config(&entry.dataset_path) {
            Ok(config) => config,
            Err(cause) => {
                return UpgradeState::Failed(UpgradeError::Lookup {
                    what: format!("load config for {entry}"),
                    cause,
                });
            }
        };

        let record = JailRecord::from_entry(entry, &config);
        match check_eligible(&record) {
            Ok(()) => UpgradeState::Validated { record, config },
            Err(err) => UpgradeState::Failed(err.into()),
        }
    }

    fn ensure_running(&self, record: JailRecord, config: JailConfig) -> UpgradeState {
        let status = match self.collaborators.lister.running_status(&record.uuid) {
            Ok(status) => status,
            Err(cause) => {
                return UpgradeState::Failed(UpgradeError::Lookup {
                    what: format!("query running status of {record}"),
                    cause,
                });
            }
        };

        if status.is_running() {
            tracing::debug!(jail = %record, jid = ?status.jid, "jail already running");
            return UpgradeState::Running {
                record,
                config,
                auto_started: false,
            };
        }

        if let Err(cause) = self.collaborators.control.start(&record, &config) {
            return UpgradeState::Failed(UpgradeError::Start {
                uuid: record.uuid,
                tag: record.tag,
                cause,
            });
        }
        UpgradeState::Running {
            record,
            config,
            auto_started: true,
        }
    }

    fn upgrade(
        &self,
        record: JailRecord,
        config: JailConfig,
        auto_started: bool,
        target_release: &str,
    ) -> UpgradeState {
        let root_path = record.root_path();
        match self
            .collaborators
            .upgrader
            .upgrade(&config, target_release, &root_path)
        {
            Ok(new_release) => UpgradeState::Upgraded {
                record,
                config,
                auto_started,
                new_release,
            },
            Err(cause) => {
                let restoration = self.restore_after_failure(&record, &config, auto_started);
                UpgradeState::Failed(UpgradeError::UpgradeExecution {
                    uuid: record.uuid,
                    tag: record.tag,
                    release: target_release.to_string(),
                    cause,
                    restoration,
                })
            }
        }
    }

    fn restore(
        &self,
        record: JailRecord,
        config: JailConfig,
        auto_started: bool,
        new_release: String,
    ) -> UpgradeState {
        if auto_started {
            if let Err(cause) = self.collaborators.control.stop(&record, &config) {
                return UpgradeState::Failed(UpgradeError::Stop {
                    uuid: record.uuid,
                    tag: record.tag,
                    new_release,
                    cause,
                });
            }
        }

        UpgradeState::Restored {
            record,
            auto_started,
            new_release,
        }
    }

    fn restore_after_failure(
        &self,
        record: &JailRecord,
        config: &JailConfig,
        auto_started: bool,
    ) -> Restoration {
        if !auto_started {
            return Restoration::NotNeeded;
        }
        if !self.options.restore_on_failure {
            return Restoration::LeftRunning;
        }

        match self.collaborators.control.stop(record, config) {
            Ok(()) => Restoration::Stopped,
            Err(err) => {
                let detail = format!("{err:#}");
                tracing::warn!(
                    jail = %record,
                    error = %detail,
                    "failed to stop jail after failed upgrade"
                );
                Restoration::Failed(err)
            }
        }
    }
}
