//! Resolution of `contents_file` references

use crate::discovery::ResolveError;
use std::path::{Path, PathBuf};

/// Find the file a `contents_file` reference points to.
///
/// Absolute references are used as-is and must name an existing file.
/// Relative references are looked up next to the pipeline file first, then
/// under the discovery root; directories never match. The returned path is
/// always absolute.
pub fn resolve_contents_path(
    reference: &str,
    source_path: &Path,
    root: &Path,
) -> Result<PathBuf, ResolveError> {
    let reference_path = Path::new(reference);

    if reference_path.is_absolute() {
        if reference_path.is_file() {
            return Ok(reference_path.to_path_buf());
        }
        return Err(ResolveError::NotFoundAbsolute {
            path: reference_path.to_path_buf(),
        });
    }

    let source_dir = source_path.parent().unwrap_or_else(|| Path::new(""));
    let relative_to_source = absolute(source_dir)?.join(reference_path);
    if relative_to_source.is_file() {
        return Ok(relative_to_source);
    }

    let relative_to_root = absolute(root)?.join(reference_path);
    if relative_to_root.is_file() {
        return Ok(relative_to_root);
    }

    Err(ResolveError::NotFound {
        reference: reference.to_string(),
        relative_to_source,
        relative_to_root,
    })
}

/// Read a resolved contents file into memory. An empty file is an error.
pub fn load_contents(path: &Path) -> Result<String, ResolveError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ResolveError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if contents.is_empty() {
        return Err(ResolveError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(contents)
}

fn absolute(path: &Path) -> Result<PathBuf, ResolveError> {
    // `std::path::absolute` rejects an empty path, which is what `parent()`
    // yields for a bare file name.
    let path = if path.as_os_str().is_empty() {
        Path::new(".")
    } else {
        path
    };
    std::path::absolute(path).map_err(|source| ResolveError::Absolute {
        path: path.to_path_buf(),
        source,
    })
}
