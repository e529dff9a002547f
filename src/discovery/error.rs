//! Discovery error types

use crate::core::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a file's bytes into a pipeline definition
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML pipeline: {0}")]
    Yaml(#[source] serde_yaml::Error),

    #[error("could not find closing tag for fleet-management metadata block")]
    MissingClosingTag,

    #[error("failed to parse metadata: {0}")]
    Metadata(#[source] serde_yaml::Error),

    #[error("file is not valid UTF-8")]
    NotUtf8(#[from] std::string::FromUtf8Error),
}

/// Failure to locate or load a `contents_file` reference
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("contents file not found at absolute path: {}", .path.display())]
    NotFoundAbsolute { path: PathBuf },

    #[error(
        "contents file '{reference}' not found (tried {} and {})",
        .relative_to_source.display(),
        .relative_to_root.display()
    )]
    NotFound {
        reference: String,
        relative_to_source: PathBuf,
        relative_to_root: PathBuf,
    },

    #[error("failed to resolve absolute path for {}: {source}", .path.display())]
    Absolute {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("contents file {} is empty", .path.display())]
    Empty { path: PathBuf },

    #[error("failed to read contents file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error that aborts a discovery run
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("discovery was cancelled")]
    Cancelled,

    #[error("failed to get current working directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    #[error("failed to walk directory {}: {source}", .root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse pipeline from {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("invalid pipeline in {}: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },

    #[error("failed to load contents for pipeline in {}: {source}", .path.display())]
    ContentsFile {
        path: PathBuf,
        #[source]
        source: ResolveError,
    },

    #[error(
        "duplicate pipeline name '{name}' found in {} and {}",
        .first.display(),
        .second.display()
    )]
    DuplicateName {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },
}

impl DiscoveryError {
    /// Whether the run stopped because it was cancelled rather than failing
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DiscoveryError::Cancelled)
    }
}
