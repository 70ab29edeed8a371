use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::JailConfig;

pub const EMPTY_RELEASE: &str = "EMPTY";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct JailEntry {
    pub tag: String,
    pub uuid: String,
    pub dataset_path: PathBuf,
}

impl JailEntry {
    pub fn new(
        tag: impl Into<String>,
        uuid: impl Into<String>,
        dataset_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            tag: tag.into(),
            uuid: uuid.into(),
            dataset_path: dataset_path.into(),
        }
    }
}

impl fmt::Display for JailEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.uuid, self.tag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JailType {
    Jail,
    Basejail,
    Template,
    Other(String),
}

impl JailType {
    pub fn parse(value: &str) -> Self {
        match value {
            "jail" => Self::Jail,
            "basejail" => Self::Basejail,
            "template" => Self::Template,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Jail => "jail",
            Self::Basejail => "basejail",
            Self::Template => "template",
            Self::Other(value) => value,
        }
    }
}

impl fmt::Display for JailType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JailRecord {
    pub tag: String,
    pub uuid: String,
    pub dataset_path: PathBuf,
    pub release: String,
    pub jail_type: JailType,
}

impl JailRecord {
    pub fn from_entry(entry: JailEntry, config: &JailConfig) -> Self {
        Self {
            tag: entry.tag,
            uuid: entry.uuid,
            dataset_path: entry.dataset_path,
            release: config.release.clone(),
            jail_type: config.jail_type(),
        }
    }

    pub fn dataset_path(&self) -> &Path {
        &self.dataset_path
    }

    pub fn root_path(&self) -> PathBuf {
        self.dataset_path.join("root")
    }

    pub fn has_empty_release(&self) -> bool {
        self.release == EMPTY_RELEASE
    }
}

impl fmt::Display for JailRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.uuid, self.tag)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunningStatus {
    pub jid: Option<u32>,
}

impl RunningStatus {
    pub fn running(jid: u32) -> Self {
        Self { jid: Some(jid) }
    }

    pub fn stopped() -> Self {
        Self { jid: None }
    }

    pub fn is_running(&self) -> bool {
        self.jid.is_some()
    }
}
