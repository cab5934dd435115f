//! The base resolver producing template and redirect views.

use std::sync::Arc;

use super::{CachingViewResolver, ViewLoader, ViewResolver};
use crate::error::ViewError;
use crate::locale::Locale;
use crate::resource::ResourceSpace;
use crate::settings::TemplateSettings;
use crate::view::{RedirectView, TemplateView, ViewRef};

/// View names starting with this prefix resolve to a [`RedirectView`].
pub const REDIRECT_URL_PREFIX: &str = "redirect:";

/// Creates a [`TemplateView`] for every view name it accepts.
///
/// The template name of the view is the view name itself; prefix and suffix
/// are applied only when the template is located. An optional list of
/// view-name patterns limits which names are accepted. A pattern is either an
/// exact name or has a single `*` wildcard at its start or end.
pub struct TemplateViewLoader {
    settings: TemplateSettings,
    resources: Arc<dyn ResourceSpace>,
    view_names: Vec<String>,
}

impl TemplateViewLoader {
    /// Creates a loader accepting every view name.
    pub fn new(settings: TemplateSettings, resources: Arc<dyn ResourceSpace>) -> Self {
        Self {
            settings,
            resources,
            view_names: Vec::new(),
        }
    }

    /// Restricts the view names this loader accepts.
    pub fn with_view_names<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.view_names = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the settings given to created views.
    pub fn settings(&self) -> &TemplateSettings {
        &self.settings
    }

    /// Whether this loader accepts the view name.
    pub fn can_handle(&self, view_name: &str) -> bool {
        self.view_names.is_empty()
            || self
                .view_names
                .iter()
                .any(|pattern| matches_pattern(pattern, view_name))
    }
}

impl ViewLoader for TemplateViewLoader {
    fn load_view(&self, view_name: &str, _locale: &Locale) -> Result<Option<ViewRef>, ViewError> {
        if let Some(url) = view_name.strip_prefix(REDIRECT_URL_PREFIX) {
            return Ok(Some(Arc::new(RedirectView::new(url))));
        }
        if !self.can_handle(view_name) {
            tracing::trace!(view = view_name, "view name not handled");
            return Ok(None);
        }
        Ok(Some(Arc::new(TemplateView::new(
            view_name,
            self.settings.clone(),
            Arc::clone(&self.resources),
        ))))
    }
}

fn matches_pattern(pattern: &str, name: &str) -> bool {
    if pattern == "*" {
        true
    } else if let Some(prefix) = pattern.strip_suffix('*') {
        name.starts_with(prefix)
    } else if let Some(suffix) = pattern.strip_prefix('*') {
        name.ends_with(suffix)
    } else {
        pattern == name
    }
}

/// Caching resolver over a [`TemplateViewLoader`].
///
/// This is the usual delegate for a theme resolver.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use theme_views::{
///     EmbeddedResources, Locale, TemplateSettings, TemplateViewResolver, ViewResolver,
/// };
///
/// let resources = Arc::new(EmbeddedResources::new().add("templates/login.html", "login"));
/// let resolver = TemplateViewResolver::new(TemplateSettings::default(), resources);
///
/// let view = resolver.resolve_view_name("login", &Locale::default()).unwrap().unwrap();
/// assert_eq!(view.as_template().unwrap().template_name(), "login");
/// ```
pub struct TemplateViewResolver {
    inner: CachingViewResolver<TemplateViewLoader>,
}

impl TemplateViewResolver {
    /// Creates a resolver accepting every view name, cached per `settings`.
    pub fn new(settings: TemplateSettings, resources: Arc<dyn ResourceSpace>) -> Self {
        Self::from_loader(TemplateViewLoader::new(settings, resources))
    }

    /// Wraps a configured loader, taking cache settings from the loader's settings.
    pub fn from_loader(loader: TemplateViewLoader) -> Self {
        let settings = loader.settings.clone();
        Self {
            inner: CachingViewResolver::with_settings(loader, &settings),
        }
    }

    /// Returns the settings given to created views.
    pub fn settings(&self) -> &TemplateSettings {
        self.inner.loader().settings()
    }

    /// Whether resolved views are cached.
    pub fn is_cache(&self) -> bool {
        self.inner.is_cache()
    }

    /// Drops every cached view.
    pub fn clear_cache(&self) {
        self.inner.clear_cache();
    }

    /// Drops the cached view for one name and locale.
    ///
    /// Returns whether an entry was removed.
    pub fn remove_from_cache(&self, view_name: &str, locale: &Locale) -> bool {
        self.inner.remove_from_cache(view_name, locale)
    }
}

impl ViewResolver for TemplateViewResolver {
    fn resolve_view_name(
        &self,
        view_name: &str,
        locale: &Locale,
    ) -> Result<Option<ViewRef>, ViewError> {
        self.inner.resolve_view_name(view_name, locale)
    }
}
