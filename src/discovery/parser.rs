//! Pipeline source formats
//!
//! Two formats are recognized:
//!
//! * YAML files (`.yaml`, `.yml`) hold a pipeline definition directly.
//! * Alloy files (`.alloy`) carry the definition in a YAML block comment at
//!   the top of the file, and the whole file becomes the pipeline contents:
//!
//! ```text
//! /* fleet-management
//! name: my-pipeline
//! enabled: true
//! matchers:
//!   - "foo=bar"
//! */
//! prometheus.exporter.self "default" { }
//! ```

use crate::core::PipelineSpec;
use crate::discovery::ParseError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;

const ALLOY_METADATA_HEADER: &[u8] = b"/* fleet-management";
const ALLOY_METADATA_FOOTER: &[u8] = b"*/";

/// A file format that can hold a pipeline definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Plain YAML pipeline definition
    Yaml,
    /// Alloy configuration with an embedded metadata header
    Alloy,
}

/// Metadata accepted in an Alloy header. The contents come from the file itself.
#[derive(Debug, Default, Deserialize)]
struct AlloyMetadata {
    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    matchers: Vec<String>,

    #[serde(default)]
    enabled: bool,
}

impl SourceFormat {
    /// Pick a format from the file extension, ignoring case
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(SourceFormat::Yaml),
            "alloy" => Some(SourceFormat::Alloy),
            _ => None,
        }
    }

    /// Parse a pipeline definition from the raw file bytes.
    ///
    /// Returns `Ok(None)` when the file is not a pipeline at all, which
    /// only happens for Alloy files without a metadata header.
    pub fn parse(self, data: &[u8]) -> Result<Option<PipelineSpec>, ParseError> {
        match self {
            SourceFormat::Yaml => parse_yaml(data).map(Some),
            SourceFormat::Alloy => parse_alloy(data),
        }
    }
}

fn parse_yaml(data: &[u8]) -> Result<PipelineSpec, ParseError> {
    from_yaml_document(data).map_err(ParseError::Yaml)
}

fn parse_alloy(data: &[u8]) -> Result<Option<PipelineSpec>, ParseError> {
    let Some(metadata) = alloy_metadata_block(data)? else {
        return Ok(None);
    };

    let metadata: AlloyMetadata = from_yaml_document(metadata).map_err(ParseError::Metadata)?;
    let contents = String::from_utf8(data.to_vec())?;

    Ok(Some(PipelineSpec {
        name: metadata.name,
        contents: Some(contents),
        contents_file: None,
        matchers: metadata.matchers,
        enabled: metadata.enabled,
    }))
}

/// Slice out the YAML between the header and footer markers.
///
/// `Ok(None)` means the header is missing; a header without a footer is
/// an error.
fn alloy_metadata_block(data: &[u8]) -> Result<Option<&[u8]>, ParseError> {
    let trimmed = data.trim_ascii();
    let Some(rest) = trimmed.strip_prefix(ALLOY_METADATA_HEADER) else {
        return Ok(None);
    };

    let end = rest
        .windows(ALLOY_METADATA_FOOTER.len())
        .position(|window| window == ALLOY_METADATA_FOOTER)
        .ok_or(ParseError::MissingClosingTag)?;

    Ok(Some(&rest[..end]))
}

/// Deserialize a YAML document, treating an empty or null document as all defaults
fn from_yaml_document<T>(data: &[u8]) -> Result<T, serde_yaml::Error>
where
    T: DeserializeOwned + Default,
{
    if data.trim_ascii().is_empty() {
        return Ok(T::default());
    }
    let document: Option<T> = serde_yaml::from_slice(data)?;
    Ok(document.unwrap_or_default())
}
