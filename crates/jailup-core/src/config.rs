use std::collections::BTreeMap;

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::JailType;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JailConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_hostuuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub release: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl JailConfig {
    pub fn from_json_str(input: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(input).context("failed to parse jail config")?;
        if config.release.trim().is_empty() {
            return Err(anyhow!("jail config release must not be empty"));
        }
        Ok(config)
    }

    pub fn to_json_string(&self) -> anyhow::Result<String> {
        let mut rendered =
            serde_json::to_string_pretty(self).context("failed to serialize jail config")?;
        rendered.push('\n');
        Ok(rendered)
    }

    pub fn jail_type(&self) -> JailType {
        JailType::parse(&self.kind)
    }
}
