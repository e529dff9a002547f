//! CLI command definitions

use crate::core::SyncConfig;
use clap::Args;
use std::path::PathBuf;

/// Discover pipelines and sync them
#[derive(Debug, Args, Clone)]
pub struct SyncCommand {
    /// Fleet-management API username
    #[arg(long, env = "FM_USERNAME")]
    pub username: Option<String>,

    /// Fleet-management API token
    #[arg(long, env = "FM_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Log the pipelines that would be synced without calling the API
    #[arg(long, env = "FM_DRY_RUN")]
    pub dry_run: bool,
}

impl SyncCommand {
    /// Build the sync configuration. Missing credentials are left empty
    /// and reported by [`SyncConfig::validate`].
    pub fn to_config(&self, root_path: Option<PathBuf>) -> SyncConfig {
        SyncConfig {
            root_path,
            username: self.username.clone().unwrap_or_default(),
            token: self.token.clone().unwrap_or_default(),
            dry_run: self.dry_run,
        }
    }
}

/// Discover and validate pipelines
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Output the discovered pipelines as JSON API payloads
    #[arg(long)]
    pub json: bool,
}
