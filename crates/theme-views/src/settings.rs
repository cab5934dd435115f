//! Template lookup settings shared by the base resolver and theme resolvers.
//!
//! [`TemplateSettings`] holds the prefix and suffix that turn a template name
//! into a resource location, plus the caching knobs applied to every resolver
//! built from it. Settings can be built fluently or parsed from YAML:
//!
//! ```rust
//! use theme_views::TemplateSettings;
//!
//! let settings = TemplateSettings::from_yaml_str(
//!     "prefix: \"file:templates/\"\ncache: false\n",
//! ).unwrap();
//!
//! assert_eq!(settings.prefix(), "file:templates/");
//! assert_eq!(settings.suffix(), ".html");
//! assert!(!settings.is_cache());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ViewError;

/// Default location prefix, pointing at embedded resources.
pub const DEFAULT_PREFIX: &str = "classpath:/templates/";

/// Default template file suffix.
pub const DEFAULT_SUFFIX: &str = ".html";

/// Default maximum number of cached views per resolver.
pub const DEFAULT_CACHE_LIMIT: usize = 1024;

/// Prefix, suffix and cache configuration for template views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TemplateSettings {
    prefix: String,
    suffix: String,
    cache: bool,
    cache_limit: usize,
    cache_unresolved: bool,
}

impl TemplateSettings {
    /// Creates settings with the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses settings from YAML. Missing keys keep their defaults.
    pub fn from_yaml_str(source: &str) -> Result<Self, ViewError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Sets the location prefix, such as `classpath:/templates/`.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sets the template file suffix, such as `.html`.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Turns view caching on or off.
    pub fn with_cache(mut self, cache: bool) -> Self {
        self.cache = cache;
        self
    }

    /// Sets the maximum number of cached views per resolver.
    pub fn with_cache_limit(mut self, limit: usize) -> Self {
        self.cache_limit = limit;
        self
    }

    /// Sets whether unresolved view names are cached.
    pub fn with_cache_unresolved(mut self, cache_unresolved: bool) -> Self {
        self.cache_unresolved = cache_unresolved;
        self
    }

    /// Returns the location prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the template file suffix.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Whether resolvers built from these settings cache views.
    pub fn is_cache(&self) -> bool {
        self.cache
    }

    /// Returns the maximum number of cached views per resolver.
    pub fn cache_limit(&self) -> usize {
        self.cache_limit
    }

    /// Whether a `None` resolution is remembered as well.
    pub fn cache_unresolved(&self) -> bool {
        self.cache_unresolved
    }

    /// Builds the resource location for a template name.
    ///
    /// This is plain concatenation: `prefix + name + suffix`.
    pub fn location_for(&self, template_name: &str) -> String {
        let mut location =
            String::with_capacity(self.prefix.len() + template_name.len() + self.suffix.len());
        location.push_str(&self.prefix);
        location.push_str(template_name);
        location.push_str(&self.suffix);
        location
    }
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
            cache: true,
            cache_limit: DEFAULT_CACHE_LIMIT,
            cache_unresolved: true,
        }
    }
}
