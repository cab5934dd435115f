//! Filesystem-backed resources.

use std::io;
use std::path::{Component, Path, PathBuf};

use super::{LocationKind, ResourceSpace, TemplateLocation};
use crate::error::ViewError;

/// Resolves `file:` locations against a root directory.
///
/// Relative paths are joined onto the root; absolute paths are used as-is.
/// Paths containing `..` are rejected. Classpath locations never exist here.
#[derive(Debug, Clone)]
pub struct FileSystemResources {
    root: PathBuf,
}

impl FileSystemResources {
    /// Creates a resource space rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the directory relative paths are joined onto.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, location: &TemplateLocation) -> Result<PathBuf, ViewError> {
        let path = Path::new(location.path());
        if path.components().any(|c| matches!(c, Component::ParentDir)) {
            return Err(ViewError::InvalidLocation {
                location: location.to_string(),
                reason: "parent directory components are not allowed".to_string(),
            });
        }
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            Ok(self.root.join(path))
        }
    }
}

impl ResourceSpace for FileSystemResources {
    fn exists(&self, location: &TemplateLocation) -> Result<bool, ViewError> {
        if location.kind() != LocationKind::File {
            return Ok(false);
        }
        let path = self.resolve(location)?;
        match std::fs::metadata(&path) {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ViewError::io(path, e)),
        }
    }

    fn read(&self, location: &TemplateLocation) -> Result<String, ViewError> {
        if location.kind() != LocationKind::File {
            return Err(ViewError::NotFound {
                path: location.to_string(),
            });
        }
        let path = self.resolve(location)?;
        std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                ViewError::NotFound {
                    path: location.to_string(),
                }
            } else {
                ViewError::io(path, e)
            }
        })
    }
}
