//! Sync configuration

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("username is required")]
    MissingUsername,

    #[error("token is required")]
    MissingToken,
}

/// Settings for a discovery and sync run
#[derive(Clone, Default)]
pub struct SyncConfig {
    /// Directory to search for pipelines (current directory when unset)
    pub root_path: Option<PathBuf>,

    /// Fleet-management API username
    pub username: String,

    /// Fleet-management API token
    pub token: String,

    /// Log what would be synced instead of calling the API
    pub dry_run: bool,
}

impl SyncConfig {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
            ..Default::default()
        }
    }

    pub fn with_root_path(mut self, root_path: impl Into<PathBuf>) -> Self {
        self.root_path = Some(root_path.into());
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Check that the credentials needed for the API are present.
    ///
    /// An empty root path is valid; it falls back to the current
    /// directory when discovery runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.username.is_empty() {
            return Err(ConfigError::MissingUsername);
        }
        if self.token.is_empty() {
            return Err(ConfigError::MissingToken);
        }
        Ok(())
    }
}

impl fmt::Debug for SyncConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncConfig")
            .field("root_path", &self.root_path)
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = SyncConfig::new("testuser", "testtoken").with_root_path("/some/path");
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_missing_username() {
        let config = SyncConfig::new("", "testtoken").with_root_path("/some/path");
        assert_eq!(config.validate(), Err(ConfigError::MissingUsername));
    }

    #[test]
    fn test_missing_token() {
        let config = SyncConfig::new("testuser", "").with_root_path("/some/path");
        assert_eq!(config.validate(), Err(ConfigError::MissingToken));
    }

    #[test]
    fn test_missing_both_reports_username_first() {
        let config = SyncConfig::default().with_root_path("/some/path");
        assert_eq!(config.validate(), Err(ConfigError::MissingUsername));
    }

    #[test]
    fn test_empty_root_path_is_valid() {
        let config = SyncConfig::new("testuser", "testtoken");
        assert!(config.root_path.is_none());
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = SyncConfig::new("testuser", "s3cret");
        let debug = format!("{:?}", config);
        assert!(debug.contains("testuser"));
        assert!(!debug.contains("s3cret"));
    }
}
