use jailup_core::JailEntry;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("jail identifier must not be empty")]
    EmptyIdentifier,
    #[error("{identifier} not found!")]
    NotFound { identifier: String },
    #[error("Multiple jails found for {identifier}:")]
    Ambiguous {
        identifier: String,
        conflicts: Vec<JailEntry>,
    },
}
