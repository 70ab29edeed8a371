use jailup_resolver::ResolveError;

use crate::error::{Restoration, UpgradeError};
use crate::sequencer::OperationOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRecord {
    pub level: ReportLevel,
    pub message: String,
}

impl ReportRecord {
    fn new(level: ReportLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

pub trait ReportSink {
    fn emit(&mut self, record: ReportRecord);
}

impl ReportSink for Vec<ReportRecord> {
    fn emit(&mut self, record: ReportRecord) {
        self.push(record);
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ReportEvent<'a> {
    Success(&'a OperationOutcome),
    Failure(&'a UpgradeError),
}

impl<'a> From<&'a Result<OperationOutcome, UpgradeError>> for ReportEvent<'a> {
    fn from(value: &'a Result<OperationOutcome, UpgradeError>) -> Self {
        match value {
            Ok(outcome) => Self::Success(outcome),
            Err(err) => Self::Failure(err),
        }
    }
}

impl ReportEvent<'_> {
    pub fn severity(&self) -> ReportLevel {
        match self {
            Self::Success(_) => ReportLevel::Info,
            Self::Failure(_) => ReportLevel::Error,
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self.severity() {
            ReportLevel::Error => 1,
            ReportLevel::Info | ReportLevel::Warn => 0,
        }
    }

    pub fn records(&self) -> Vec<ReportRecord> {
        match self {
            Self::Success(outcome) => {
                vec![ReportRecord::new(ReportLevel::Info, outcome.success_message())]
            }
            Self::Failure(err) => failure_records(err),
        }
    }
}

pub fn report(event: ReportEvent<'_>, sink: &mut dyn ReportSink) -> u8 {
    for record in event.records() {
        sink.emit(record);
    }
    event.exit_code()
}

fn failure_records(err: &UpgradeError) -> Vec<ReportRecord> {
    let mut records = vec![ReportRecord::new(ReportLevel::Error, err.to_string())];

    match err {
        UpgradeError::Resolve(ResolveError::Ambiguous { conflicts, .. }) => {
            records.extend(
                conflicts
                    .iter()
                    .map(|jail| ReportRecord::new(ReportLevel::Error, format!("  {jail}"))),
            );
        }
        UpgradeError::UpgradeExecution {
            uuid,
            tag,
            restoration,
            ..
        } => match restoration {
            Restoration::NotNeeded => {}
            Restoration::Stopped => records.push(ReportRecord::new(
                ReportLevel::Info,
                format!("{uuid} ({tag}) was stopped again"),
            )),
            Restoration::LeftRunning => records.push(ReportRecord::new(
                ReportLevel::Warn,
                format!("{uuid} ({tag}) was started for the upgrade and is still running"),
            )),
            Restoration::Failed(cause) => records.push(ReportRecord::new(
                ReportLevel::Warn,
                format!("{uuid} ({tag}) could not be stopped again: {cause:#}"),
            )),
        },
        _ => {}
    }

    records
}
