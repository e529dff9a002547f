//! Pipeline discovery
//!
//! Walks a directory tree, parses every file that looks like a pipeline,
//! and returns the validated set. Any malformed pipeline, unresolvable
//! contents file, or duplicate name aborts the whole run.

pub mod cancel;
pub mod error;
pub mod parser;
pub mod resolver;

pub use cancel::CancellationToken;
pub use error::{DiscoveryError, ParseError, ResolveError};
pub use parser::SourceFormat;
pub use resolver::{load_contents, resolve_contents_path};

use crate::core::{ContentSource, Pipeline};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Events emitted while a discovery run progresses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryEvent {
    /// A file was ignored because it does not hold a pipeline
    FileSkipped { path: PathBuf },
    /// A pipeline was validated and added to the result set
    PipelineFound { name: String, path: PathBuf },
}

/// Type for event handlers
pub type EventHandler = Box<dyn Fn(&DiscoveryEvent) + Send + Sync>;

/// A configured discovery run
#[derive(Default)]
pub struct Discovery {
    root: Option<PathBuf>,
    event_handlers: Vec<EventHandler>,
}

impl Discovery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search under `root` instead of the current directory
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Add an event handler
    pub fn add_event_handler<F>(&mut self, handler: F)
    where
        F: Fn(&DiscoveryEvent) + Send + Sync + 'static,
    {
        self.event_handlers.push(Box::new(handler));
    }

    fn emit(&self, event: DiscoveryEvent) {
        for handler in &self.event_handlers {
            handler(&event);
        }
    }

    fn root(&self) -> Result<PathBuf, DiscoveryError> {
        match &self.root {
            Some(root) if !root.as_os_str().is_empty() => Ok(root.clone()),
            _ => std::env::current_dir().map_err(DiscoveryError::CurrentDir),
        }
    }

    /// Walk the tree and collect every pipeline in traversal order.
    ///
    /// The cancellation token is checked before each entry; once it is
    /// set the run stops and nothing found so far is returned.
    pub fn run(&self, cancel: &CancellationToken) -> Result<Vec<Pipeline>, DiscoveryError> {
        let root = self.root()?;
        let mut pipelines = Vec::new();
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        for entry in WalkDir::new(&root).follow_links(false).sort_by_file_name() {
            if cancel.is_cancelled() {
                debug!(root = %root.display(), "discovery cancelled");
                return Err(DiscoveryError::Cancelled);
            }

            let entry = entry.map_err(|source| DiscoveryError::Walk {
                root: root.clone(),
                source,
            })?;
            if entry.file_type().is_dir() {
                continue;
            }

            let path = entry.path();
            let Some(pipeline) = load_pipeline(path, &root)? else {
                self.emit(DiscoveryEvent::FileSkipped {
                    path: path.to_path_buf(),
                });
                continue;
            };

            if let Some(first) = seen.get(pipeline.name()) {
                return Err(DiscoveryError::DuplicateName {
                    name: pipeline.name().to_string(),
                    first: first.clone(),
                    second: path.to_path_buf(),
                });
            }
            seen.insert(pipeline.name().to_string(), path.to_path_buf());

            debug!(
                name = pipeline.name(),
                path = %path.display(),
                enabled = pipeline.enabled(),
                "found pipeline"
            );
            self.emit(DiscoveryEvent::PipelineFound {
                name: pipeline.name().to_string(),
                path: path.to_path_buf(),
            });
            pipelines.push(pipeline);
        }

        info!(
            root = %root.display(),
            pipeline_count = pipelines.len(),
            "pipeline discovery completed"
        );
        Ok(pipelines)
    }
}

/// Discover all pipelines under `root`, or the current directory when unset
pub fn find_pipelines(
    root: Option<&Path>,
    cancel: &CancellationToken,
) -> Result<Vec<Pipeline>, DiscoveryError> {
    let mut discovery = Discovery::new();
    if let Some(root) = root {
        discovery = discovery.with_root(root);
    }
    discovery.run(cancel)
}

/// Parse, name, validate and load a single file.
///
/// `Ok(None)` means the file is not a pipeline.
fn load_pipeline(path: &Path, root: &Path) -> Result<Option<Pipeline>, DiscoveryError> {
    let Some(format) = SourceFormat::from_path(path) else {
        return Ok(None);
    };

    let data = std::fs::read(path).map_err(|source| DiscoveryError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let spec = format.parse(&data).map_err(|source| DiscoveryError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let Some(spec) = spec else {
        return Ok(None);
    };

    let spec = spec.with_default_name(path);
    let content_source = spec.validate().map_err(|source| DiscoveryError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;

    let (contents, contents_file) = match content_source {
        ContentSource::Inline(contents) => (contents, None),
        ContentSource::File(reference) => {
            let resolved = resolve_contents_path(&reference, path, root)
                .and_then(|resolved| load_contents(&resolved).map(|contents| (contents, resolved)));
            let (contents, resolved) = resolved.map_err(|source| DiscoveryError::ContentsFile {
                path: path.to_path_buf(),
                source,
            })?;
            (contents, Some(resolved))
        }
    };

    Ok(Some(Pipeline::new(spec, contents, path.to_path_buf(), contents_file)))
}
