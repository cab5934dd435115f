//! Resource spaces that template locations are probed against.
//!
//! - [`TemplateLocation`]: a parsed `classpath:` or `file:` location
//! - [`ResourceSpace`]: existence check and read for locations
//! - [`FileSystemResources`], [`EmbeddedResources`], [`LayeredResources`]:
//!   the provided spaces

mod embedded;
mod filesystem;
mod location;

pub use embedded::{walk_resource_dir, EmbeddedResources, ResourceFile};
pub use filesystem::FileSystemResources;
pub use location::{LocationKind, TemplateLocation, CLASSPATH_PREFIX, FILE_PREFIX};

use std::sync::Arc;

use crate::error::ViewError;

/// Somewhere templates can be looked up.
///
/// `exists` is the probe the theme resolver uses to decide between a themed
/// and a base template. It must not fail merely because a resource is
/// absent; errors are reserved for probes that could not be answered.
pub trait ResourceSpace: Send + Sync {
    /// Returns whether a resource exists at the location.
    fn exists(&self, location: &TemplateLocation) -> Result<bool, ViewError>;

    /// Reads the resource at the location as UTF-8 text.
    fn read(&self, location: &TemplateLocation) -> Result<String, ViewError>;
}

impl<R: ResourceSpace + ?Sized> ResourceSpace for Arc<R> {
    fn exists(&self, location: &TemplateLocation) -> Result<bool, ViewError> {
        (**self).exists(location)
    }

    fn read(&self, location: &TemplateLocation) -> Result<String, ViewError> {
        (**self).read(location)
    }
}

/// An ordered stack of resource spaces; the first layer holding a location wins.
#[derive(Clone, Default)]
pub struct LayeredResources {
    layers: Vec<Arc<dyn ResourceSpace>>,
}

impl LayeredResources {
    /// Creates a stack with no layers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a layer with lower priority than those already added.
    pub fn with_layer(mut self, layer: impl ResourceSpace + 'static) -> Self {
        self.layers.push(Arc::new(layer));
        self
    }

    /// Returns the number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns true if no layers were added.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl std::fmt::Debug for LayeredResources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayeredResources")
            .field("layers", &self.layers.len())
            .finish()
    }
}

impl ResourceSpace for LayeredResources {
    fn exists(&self, location: &TemplateLocation) -> Result<bool, ViewError> {
        for layer in &self.layers {
            if layer.exists(location)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn read(&self, location: &TemplateLocation) -> Result<String, ViewError> {
        for layer in &self.layers {
            if layer.exists(location)? {
                return layer.read(location);
            }
        }
        Err(ViewError::NotFound {
            path: location.to_string(),
        })
    }
}
