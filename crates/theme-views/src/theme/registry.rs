//! Lazily built theme resolvers, one per theme name.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::{ThemeViewResolver, ThemeViewResolverFactory};
use crate::error::ViewError;
use crate::locale::Locale;
use crate::resolver::ViewResolver;
use crate::view::ViewRef;

/// Keeps one [`ThemeViewResolver`] per theme, created on first use.
///
/// Requests without a theme, or with an empty theme name, go straight to the
/// delegate.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use theme_views::{
///     EmbeddedResources, Locale, TemplateSettings, TemplateViewResolver, ThemeFactory,
///     ThemedViewResolvers,
/// };
///
/// let resources = Arc::new(
///     EmbeddedResources::new()
///         .add("templates/login.html", "base")
///         .add("templates/dark/login.html", "dark"),
/// );
/// let settings = TemplateSettings::default();
/// let delegate = Arc::new(TemplateViewResolver::new(settings.clone(), resources.clone()));
/// let factory = ThemeFactory::new(delegate.clone(), settings, resources);
/// let themes = ThemedViewResolvers::new(factory, delegate);
///
/// let locale = Locale::default();
/// let dark = themes.resolve_view_name(Some("dark"), "login", &locale).unwrap().unwrap();
/// let base = themes.resolve_view_name(None, "login", &locale).unwrap().unwrap();
/// assert_eq!(dark.as_template().unwrap().template_name(), "dark/login");
/// assert_eq!(base.as_template().unwrap().template_name(), "login");
/// ```
pub struct ThemedViewResolvers<F> {
    factory: F,
    delegate: Arc<dyn ViewResolver>,
    resolvers: RwLock<HashMap<String, Arc<ThemeViewResolver>>>,
}

impl<F: ThemeViewResolverFactory> ThemedViewResolvers<F> {
    /// Creates an empty registry.
    ///
    /// `delegate` serves requests that carry no theme.
    pub fn new(factory: F, delegate: Arc<dyn ViewResolver>) -> Self {
        Self {
            factory,
            delegate,
            resolvers: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the resolver for a theme, creating it on first use.
    pub fn resolver_for(&self, theme: &str) -> Arc<ThemeViewResolver> {
        {
            let resolvers = self.resolvers.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(resolver) = resolvers.get(theme) {
                return Arc::clone(resolver);
            }
        }
        let mut resolvers = self.resolvers.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            resolvers
                .entry(theme.to_string())
                .or_insert_with(|| Arc::new(self.factory.create(theme))),
        )
    }

    /// Resolves a view for a theme, or through the delegate when there is none.
    pub fn resolve_view_name(
        &self,
        theme: Option<&str>,
        view_name: &str,
        locale: &Locale,
    ) -> Result<Option<ViewRef>, ViewError> {
        match theme.filter(|t| !t.is_empty()) {
            Some(theme) => self.resolver_for(theme).resolve_view_name(view_name, locale),
            None => self.delegate.resolve_view_name(view_name, locale),
        }
    }

    /// Names of themes that have a resolver, sorted.
    pub fn themes(&self) -> Vec<String> {
        let resolvers = self.resolvers.read().unwrap_or_else(PoisonError::into_inner);
        let mut themes: Vec<String> = resolvers.keys().cloned().collect();
        themes.sort();
        themes
    }

    /// Drops every theme resolver along with its cache.
    pub fn clear(&self) {
        self.resolvers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
