//! Pipeline domain model

use crate::sync::FleetPipeline;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Validation errors for a pipeline definition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("pipeline '{name}': cannot have both 'contents' and 'contents_file' fields")]
    BothContentFields { name: String },

    #[error("pipeline '{name}': must have either 'contents' or 'contents_file' field")]
    NoContentFields { name: String },
}

/// Pipeline definition as written in a source file, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSpec {
    /// Pipeline name (defaults to the file stem)
    #[serde(default)]
    pub name: Option<String>,

    /// Inline configuration text
    #[serde(default)]
    pub contents: Option<String>,

    /// Path to a file holding the configuration text
    #[serde(default)]
    pub contents_file: Option<String>,

    /// Label selectors used for targeting collectors
    #[serde(default)]
    pub matchers: Vec<String>,

    /// Whether the pipeline is enabled
    #[serde(default)]
    pub enabled: bool,
}

/// Where the configuration text of a validated pipeline comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// Text written directly in the pipeline definition
    Inline(String),
    /// Reference to an external file, not yet resolved
    File(String),
}

impl PipelineSpec {
    /// Fill in the name from the file stem of `path` when none was given
    pub fn with_default_name(mut self, path: &Path) -> Self {
        if non_empty(&self.name).is_none() {
            self.name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned());
        }
        self
    }

    /// The pipeline name, or an empty string if it is still unset
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Check that exactly one content source is present and return it
    pub fn validate(&self) -> Result<ContentSource, ValidationError> {
        match (non_empty(&self.contents), non_empty(&self.contents_file)) {
            (Some(_), Some(_)) => Err(ValidationError::BothContentFields {
                name: self.name().to_string(),
            }),
            (None, None) => Err(ValidationError::NoContentFields {
                name: self.name().to_string(),
            }),
            (Some(contents), None) => Ok(ContentSource::Inline(contents.to_string())),
            (None, Some(file)) => Ok(ContentSource::File(file.to_string())),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// A discovered, validated pipeline with its contents loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    name: String,
    contents: String,
    matchers: Vec<String>,
    enabled: bool,

    /// File the pipeline was discovered in
    source: PathBuf,

    /// Absolute path the contents were loaded from, if any
    contents_file: Option<PathBuf>,
}

impl Pipeline {
    /// Build a pipeline from a validated spec and its loaded contents
    pub fn new(
        spec: PipelineSpec,
        contents: String,
        source: PathBuf,
        contents_file: Option<PathBuf>,
    ) -> Self {
        Self {
            name: spec.name.unwrap_or_default(),
            contents,
            matchers: spec.matchers,
            enabled: spec.enabled,
            source,
            contents_file,
        }
    }

    /// Create an inline pipeline that was not read from disk, for fixtures
    /// and callers that build pipelines in code.
    ///
    /// Contents are taken as given and not validated; discovered pipelines
    /// always go through [`PipelineSpec::validate`] instead.
    pub fn inline(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
            matchers: Vec::new(),
            enabled: false,
            source: PathBuf::new(),
            contents_file: None,
        }
    }

    pub fn with_matchers<I, S>(mut self, matchers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.matchers = matchers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn matchers(&self) -> &[String] {
        &self.matchers
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn contents_file(&self) -> Option<&Path> {
        self.contents_file.as_deref()
    }

    /// Convert to the shape the fleet-management API expects
    pub fn to_fleet_pipeline(&self) -> FleetPipeline {
        FleetPipeline {
            name: self.name.clone(),
            contents: self.contents.clone(),
            matchers: self.matchers.clone(),
            enabled: Some(self.enabled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, contents: Option<&str>, contents_file: Option<&str>) -> PipelineSpec {
        PipelineSpec {
            name: Some(name.to_string()),
            contents: contents.map(str::to_string),
            contents_file: contents_file.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_inline_contents() {
        let source = spec("test", Some("some content"), None).validate().unwrap();
        assert_eq!(source, ContentSource::Inline("some content".to_string()));
    }

    #[test]
    fn test_validate_contents_file() {
        let source = spec("test", None, Some("/path/to/file")).validate().unwrap();
        assert_eq!(source, ContentSource::File("/path/to/file".to_string()));
    }

    #[test]
    fn test_validate_both_fields_fails() {
        let err = spec("test", Some("some content"), Some("/path/to/file"))
            .validate()
            .unwrap_err();
        assert!(matches!(err, ValidationError::BothContentFields { .. }));
        assert!(err.to_string().contains("'test'"));
    }

    #[test]
    fn test_validate_no_fields_fails() {
        let err = spec("test", None, None).validate().unwrap_err();
        assert!(matches!(err, ValidationError::NoContentFields { .. }));
        assert!(err.to_string().contains("'test'"));
    }

    #[test]
    fn test_empty_strings_count_as_absent() {
        let source = spec("test", Some(""), Some("config.alloy")).validate().unwrap();
        assert_eq!(source, ContentSource::File("config.alloy".to_string()));
    }

    #[test]
    fn test_default_name_from_file_stem() {
        let spec = PipelineSpec::default().with_default_name(Path::new("/tmp/pipelines/b.yaml"));
        assert_eq!(spec.name(), "b");

        let spec = PipelineSpec {
            name: Some(String::new()),
            ..Default::default()
        }
        .with_default_name(Path::new("metrics.v2.yml"));
        assert_eq!(spec.name(), "metrics.v2");
    }

    #[test]
    fn test_explicit_name_is_kept() {
        let spec = spec("p1", Some("x"), None).with_default_name(Path::new("a.yaml"));
        assert_eq!(spec.name(), "p1");
    }

    #[test]
    fn test_parse_spec_from_yaml() {
        let yaml = r#"
name: my-pipeline
contents_file: config.alloy
matchers:
  - env=prod
  - team=infra
enabled: true
"#;
        let spec: PipelineSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(spec.name(), "my-pipeline");
        assert_eq!(spec.contents_file.as_deref(), Some("config.alloy"));
        assert_eq!(spec.matchers, vec!["env=prod", "team=infra"]);
        assert!(spec.enabled);
    }

    #[test]
    fn test_enabled_defaults_to_false() {
        let spec: PipelineSpec = serde_yaml::from_str("contents: x").unwrap();
        assert!(!spec.enabled);
        assert!(spec.matchers.is_empty());
    }

    #[test]
    fn test_to_fleet_pipeline() {
        let pipeline = Pipeline::inline("my-pipeline", "config content")
            .with_matchers(["env=prod"])
            .with_enabled(true);

        let api = pipeline.to_fleet_pipeline();
        assert_eq!(api.name, "my-pipeline");
        assert_eq!(api.contents, "config content");
        assert_eq!(api.matchers, vec!["env=prod".to_string()]);
        assert_eq!(api.enabled, Some(true));
    }

    #[test]
    fn test_inline_pipeline_keeps_contents_as_given() {
        let pipeline = Pipeline::inline("p", "");
        assert_eq!(pipeline.contents(), "");
        assert_eq!(pipeline.source(), Path::new(""));
        assert!(pipeline.contents_file().is_none());
    }

    #[test]
    fn test_to_fleet_pipeline_disabled_is_explicit() {
        let api = Pipeline::inline("p", "c").to_fleet_pipeline();
        assert_eq!(api.enabled, Some(false));
    }
}
