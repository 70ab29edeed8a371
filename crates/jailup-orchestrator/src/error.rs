use jailup_resolver::ResolveError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EligibilityError {
    #[error("Upgrading is not supported for empty jails.")]
    EmptyReleaseUnsupported { uuid: String, tag: String },
    #[error("Please run \"iocage migrate\" before trying to upgrade {uuid} ({tag})")]
    BasejailNeedsMigration { uuid: String, tag: String },
    #[error("Please convert back to a jail before trying to upgrade {uuid} ({tag})")]
    TemplateNeedsConversion { uuid: String, tag: String },
    #[error("{jail_type} is not a supported jail type.")]
    UnsupportedType {
        uuid: String,
        tag: String,
        jail_type: String,
    },
}

#[derive(Debug)]
pub enum Restoration {
    NotNeeded,
    Stopped,
    LeftRunning,
    Failed(anyhow::Error),
}

#[derive(Debug, Error)]
pub enum UpgradeError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Ineligible(#[from] EligibilityError),
    #[error("failed to {what}: {cause:#}")]
    Lookup { what: String, cause: anyhow::Error },
    #[error("failed to start {uuid} ({tag}): {cause:#}")]
    Start {
        uuid: String,
        tag: String,
        cause: anyhow::Error,
    },
    #[error("failed to upgrade {uuid} ({tag}) to {release}: {cause:#}")]
    UpgradeExecution {
        uuid: String,
        tag: String,
        release: String,
        cause: anyhow::Error,
        restoration: Restoration,
    },
    #[error("{uuid} ({tag}) was upgraded to {new_release} but failed to stop: {cause:#}")]
    Stop {
        uuid: String,
        tag: String,
        new_release: String,
        cause: anyhow::Error,
    },
}
