//! Error taxonomy shared across the backup core.
//!
//! Four failure classes matter to a backup pass:
//!
//! - [`BackupError::Auth`] - no valid or refreshable credential; fatal.
//! - [`BackupError::Transport`] - a network or HTTP error on a fetch; fatal
//!   to the resource currently being synced.
//! - [`BackupError::Malformed`] - an expected field is missing or has the
//!   wrong shape; aborts only the current resource's export.
//! - [`BackupError::Store`] / [`BackupError::Serde`] - the file store or
//!   manifest serialization failed; fatal, because manifest consistency
//!   cannot be guaranteed past this point.
//!
//! No layer below the CLI retries anything. A failed pass leaves every
//! previously committed manifest entry and export file intact, so the next
//! pass picks up the remaining work.

use std::fmt;

#[derive(Debug)]
pub enum BackupError {
    Auth(String),
    Transport(reqwest::Error),
    Malformed(String),
    Store(std::io::Error),
    Serde(serde_json::Error),
}

impl BackupError {
    /// Whether a sync pass must abort instead of moving to the next
    /// playlist. Store and serialization failures poison the manifest;
    /// everything else is scoped to the resource that raised it.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            BackupError::Auth(_) | BackupError::Store(_) | BackupError::Serde(_)
        )
    }
}

impl fmt::Display for BackupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackupError::Auth(msg) => write!(f, "authentication failure: {}", msg),
            BackupError::Transport(err) => write!(f, "transport failure: {}", err),
            BackupError::Malformed(msg) => write!(f, "malformed response: {}", msg),
            BackupError::Store(err) => write!(f, "store failure: {}", err),
            BackupError::Serde(err) => write!(f, "serialization failure: {}", err),
        }
    }
}

impl std::error::Error for BackupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BackupError::Transport(err) => Some(err),
            BackupError::Store(err) => Some(err),
            BackupError::Serde(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for BackupError {
    fn from(err: reqwest::Error) -> Self {
        BackupError::Transport(err)
    }
}

impl From<std::io::Error> for BackupError {
    fn from(err: std::io::Error) -> Self {
        BackupError::Store(err)
    }
}

impl From<serde_json::Error> for BackupError {
    fn from(err: serde_json::Error) -> Self {
        BackupError::Serde(err)
    }
}
