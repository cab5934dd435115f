//! Resource locations as written in template settings.

use std::fmt;

use super::ResourceSpace;
use crate::error::ViewError;

/// Scheme prefix selecting embedded resources.
pub const CLASSPATH_PREFIX: &str = "classpath:";

/// Scheme prefix selecting the filesystem.
pub const FILE_PREFIX: &str = "file:";

/// Which kind of resource space a location points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationKind {
    /// Resources bundled with the application.
    Classpath,
    /// Files on disk.
    File,
}

/// A template location such as `classpath:/templates/dark/login.html`.
///
/// Locations without a scheme are filesystem paths. For classpath locations
/// the leading `/` is dropped, so `classpath:/templates/a.html` and
/// `classpath:templates/a.html` name the same resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateLocation {
    kind: LocationKind,
    path: String,
}

impl TemplateLocation {
    /// Parses a location string.
    pub fn new(location: &str) -> Self {
        if let Some(rest) = location.strip_prefix(CLASSPATH_PREFIX) {
            Self {
                kind: LocationKind::Classpath,
                path: rest.trim_start_matches('/').to_string(),
            }
        } else if let Some(rest) = location.strip_prefix(FILE_PREFIX) {
            Self {
                kind: LocationKind::File,
                path: rest.to_string(),
            }
        } else {
            Self {
                kind: LocationKind::File,
                path: location.to_string(),
            }
        }
    }

    /// Returns which resource space the location targets.
    pub fn kind(&self) -> LocationKind {
        self.kind
    }

    /// The path with the scheme removed.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Probes whether the location exists in the given resource space.
    pub fn exists(&self, resources: &dyn ResourceSpace) -> Result<bool, ViewError> {
        let found = resources.exists(self)?;
        tracing::trace!(location = %self, found, "probed template location");
        Ok(found)
    }
}

impl fmt::Display for TemplateLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LocationKind::Classpath => write!(f, "{}/{}", CLASSPATH_PREFIX, self.path),
            LocationKind::File => write!(f, "{}{}", FILE_PREFIX, self.path),
        }
    }
}

impl From<&str> for TemplateLocation {
    fn from(location: &str) -> Self {
        Self::new(location)
    }
}
