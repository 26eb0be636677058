use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub(crate) const DEFAULT_TERMINAL: &str = "kitty";
pub(crate) const HIDDEN_USER: &str = "***";
pub(crate) const HIDDEN_HOST: &str = "****";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ConnectionProfile {
    pub(crate) name: String,
    pub(crate) host: String,
    #[serde(default)]
    pub(crate) port: String,
    pub(crate) user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) password: Option<String>,
    #[serde(default)]
    pub(crate) key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) key_password: Option<String>,
}

impl ConnectionProfile {
    /// `user@host` with `:port` appended when one is set.
    pub(crate) fn target(&self) -> String {
        if self.port.is_empty() {
            format!("{}@{}", self.user, self.host)
        } else {
            format!("{}@{}:{}", self.user, self.host, self.port)
        }
    }

    pub(crate) fn display_target(&self, hide: bool) -> String {
        if hide {
            format!("{HIDDEN_USER}@{HIDDEN_HOST}")
        } else {
            self.target()
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        require("Name", &self.name)?;
        require("Host", &self.host)?;
        require("User", &self.user)?;
        parse_port(&self.port)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ConnectionStore {
    #[serde(default = "default_terminal")]
    pub(crate) terminal_name: String,
    #[serde(default)]
    pub(crate) ssh_entries: Vec<ConnectionProfile>,
    #[serde(default)]
    pub(crate) hide_data: bool,
    #[serde(skip)]
    pub(crate) path: PathBuf,
}

impl ConnectionStore {
    pub(crate) fn empty(path: PathBuf) -> Self {
        Self {
            terminal_name: default_terminal(),
            ssh_entries: vec![],
            hide_data: false,
            path,
        }
    }
}

fn default_terminal() -> String {
    DEFAULT_TERMINAL.to_string()
}

pub(crate) fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty(field));
    }
    Ok(())
}

/// Empty input means "no explicit port". Only plain decimal digits without a
/// leading zero are accepted, so the stored port reads exactly as typed.
pub(crate) fn parse_port(value: &str) -> Result<Option<u16>, ValidationError> {
    if value.is_empty() {
        return Ok(None);
    }
    if !value.bytes().all(|b| b.is_ascii_digit()) || value.starts_with('0') {
        return Err(ValidationError::Port);
    }
    match value.parse::<u16>() {
        Ok(0) | Err(_) => Err(ValidationError::Port),
        Ok(port) => Ok(Some(port)),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FileEntry {
    pub(crate) name: String,
    pub(crate) path: PathBuf,
    pub(crate) is_dir: bool,
    pub(crate) disabled: bool,
}
