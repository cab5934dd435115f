//! In-memory resources standing in for the application classpath.
//!
//! [`EmbeddedResources`] answers `classpath:` locations from a map of
//! relative path to content. The map is filled inline, or by walking a
//! directory once with [`walk_resource_dir`] and reading every file into
//! memory under a mount point.
//!
//! ```rust
//! use theme_views::{EmbeddedResources, ResourceSpace, TemplateLocation};
//!
//! let resources = EmbeddedResources::new()
//!     .add("templates/login.html", "<h1>Sign in</h1>")
//!     .add("templates/dark/login.html", "<h1 class=\"dark\">Sign in</h1>");
//!
//! let location = TemplateLocation::new("classpath:/templates/dark/login.html");
//! assert!(resources.exists(&location).unwrap());
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{LocationKind, ResourceSpace, TemplateLocation};
use crate::error::ViewError;

/// A file discovered while walking a resource directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFile {
    /// Path relative to the walked root, always `/`-separated.
    pub relative: String,
    /// Full filesystem path for reading content.
    pub absolute_path: PathBuf,
}

impl ResourceFile {
    /// Creates a file descriptor from its relative and absolute paths.
    pub fn new(relative: impl Into<String>, absolute_path: impl Into<PathBuf>) -> Self {
        Self {
            relative: relative.into(),
            absolute_path: absolute_path.into(),
        }
    }
}

/// Resources held in memory, keyed by `/`-separated relative path.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedResources {
    entries: HashMap<String, String>,
}

impl EmbeddedResources {
    /// Creates an empty resource set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a resource, returning the updated set for chaining.
    ///
    /// A leading `/` on `path` is ignored. Adding the same path twice keeps
    /// the last content.
    pub fn add(mut self, path: &str, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    /// Adds a resource in place. A leading `/` on `path` is ignored.
    pub fn insert(&mut self, path: &str, content: impl Into<String>) {
        self.entries
            .insert(path.trim_start_matches('/').to_string(), content.into());
    }

    /// Reads every file under `root` into memory, keyed as `mount/relative`.
    ///
    /// An empty `mount` keys files by their relative path alone.
    pub fn from_dir(root: impl AsRef<Path>, mount: &str) -> Result<Self, ViewError> {
        let root = root.as_ref();
        let files = walk_resource_dir(root).map_err(|e| ViewError::io(root, e))?;
        let mount = mount.trim_matches('/');

        let mut resources = Self::new();
        for file in files {
            let content = std::fs::read_to_string(&file.absolute_path)
                .map_err(|e| ViewError::io(&file.absolute_path, e))?;
            let key = if mount.is_empty() {
                file.relative
            } else {
                format!("{}/{}", mount, file.relative)
            };
            resources.entries.insert(key, content);
        }
        tracing::debug!(
            root = %root.display(),
            count = resources.len(),
            "embedded resources loaded"
        );
        Ok(resources)
    }

    /// Returns the number of resources.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no resources are held.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over all resource paths.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|s| s.as_str())
    }
}

impl ResourceSpace for EmbeddedResources {
    fn exists(&self, location: &TemplateLocation) -> Result<bool, ViewError> {
        Ok(location.kind() == LocationKind::Classpath
            && self.entries.contains_key(location.path()))
    }

    fn read(&self, location: &TemplateLocation) -> Result<String, ViewError> {
        match location.kind() {
            LocationKind::Classpath => self.entries.get(location.path()).cloned(),
            LocationKind::File => None,
        }
        .ok_or_else(|| ViewError::NotFound {
            path: location.to_string(),
        })
    }
}

/// Walks a directory recursively and collects every regular file.
///
/// The result is not sorted.
pub fn walk_resource_dir(root: impl AsRef<Path>) -> Result<Vec<ResourceFile>, std::io::Error> {
    let root_canonical = root.as_ref().canonicalize()?;
    let mut files = Vec::new();
    walk_dir_recursive(&root_canonical, &root_canonical, &mut files)?;
    Ok(files)
}

fn walk_dir_recursive(
    current: &Path,
    root: &Path,
    files: &mut Vec<ResourceFile>,
) -> Result<(), std::io::Error> {
    for entry in std::fs::read_dir(current)? {
        let path = entry?.path();
        if path.is_dir() {
            walk_dir_recursive(&path, root, files)?;
        } else if path.is_file() {
            if let Ok(relative) = path.strip_prefix(root) {
                let relative = relative
                    .to_string_lossy()
                    .replace(std::path::MAIN_SEPARATOR, "/");
                files.push(ResourceFile::new(relative, path));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_add_and_read() {
        let resources = EmbeddedResources::new().add("/templates/login.html", "hello");
        let location = TemplateLocation::new("classpath:/templates/login.html");

        assert_eq!(resources.len(), 1);
        assert!(resources.exists(&location).unwrap());
        assert_eq!(resources.read(&location).unwrap(), "hello");
    }

    #[test]
    fn test_add_overwrites() {
        let resources = EmbeddedResources::new()
            .add("templates/a.html", "first")
            .add("templates/a.html", "second");
        let location = TemplateLocation::new("classpath:templates/a.html");
        assert_eq!(resources.read(&location).unwrap(), "second");
    }

    #[test]
    fn test_file_location_is_not_embedded() {
        let resources = EmbeddedResources::new().add("templates/a.html", "x");
        let location = TemplateLocation::new("file:templates/a.html");
        assert!(!resources.exists(&location).unwrap());
        assert!(matches!(
            resources.read(&location),
            Err(ViewError::NotFound { .. })
        ));
    }

    #[test]
    fn test_walk_resource_dir_nested() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("dark/partials")).unwrap();
        fs::write(dir.path().join("login.html"), "a").unwrap();
        fs::write(dir.path().join("dark/partials/footer.html"), "b").unwrap();

        let mut relative: Vec<String> = walk_resource_dir(dir.path())
            .unwrap()
            .into_iter()
            .map(|f| f.relative)
            .collect();
        relative.sort();

        assert_eq!(relative, vec!["dark/partials/footer.html", "login.html"]);
    }

    #[test]
    fn test_from_dir_mounts_under_prefix() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("dark")).unwrap();
        fs::write(dir.path().join("dark/login.html"), "dark login").unwrap();

        let resources = EmbeddedResources::from_dir(dir.path(), "/templates/").unwrap();
        let location = TemplateLocation::new("classpath:/templates/dark/login.html");

        assert_eq!(resources.read(&location).unwrap(), "dark login");
        assert_eq!(resources.paths().collect::<Vec<_>>(), vec!["templates/dark/login.html"]);
    }

    #[test]
    fn test_from_dir_missing_root() {
        let result = EmbeddedResources::from_dir("/definitely/not/here", "templates");
        assert!(matches!(result, Err(ViewError::Io { .. })));
    }
}
