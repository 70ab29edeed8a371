mod config;
mod record;
mod settings;

pub use config::JailConfig;
pub use record::{JailEntry, JailRecord, JailType, RunningStatus, EMPTY_RELEASE};
pub use settings::{Settings, DEFAULT_SETTINGS_PATH, SETTINGS_ENV};
