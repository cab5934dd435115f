//! The theme-aware decorator resolver.

use std::sync::Arc;

use crate::error::ViewError;
use crate::locale::Locale;
use crate::resolver::{CachingViewResolver, ViewLoader, ViewResolver};
use crate::resource::{ResourceSpace, TemplateLocation};
use crate::settings::TemplateSettings;
use crate::view::ViewRef;

/// Loading step of [`ThemeViewResolver`].
///
/// Asks the delegate for the base view and, for template views, points the
/// view at `theme/<template>` when that template exists.
pub struct ThemeViewLoader {
    delegate: Arc<dyn ViewResolver>,
    settings: TemplateSettings,
    resources: Arc<dyn ResourceSpace>,
    theme: String,
}

impl ThemeViewLoader {
    /// Returns the theme name this loader applies.
    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// `theme + "/" + template_name`.
    pub fn themed_template_name(&self, template_name: &str) -> String {
        format!("{}/{}", self.theme, template_name)
    }

    fn themed_location(&self, template_name: &str) -> TemplateLocation {
        TemplateLocation::new(&self.settings.location_for(template_name))
    }
}

impl ViewLoader for ThemeViewLoader {
    fn load_view(&self, view_name: &str, locale: &Locale) -> Result<Option<ViewRef>, ViewError> {
        let Some(view) = self.delegate.resolve_view_name(view_name, locale)? else {
            return Ok(None);
        };
        if self.theme.is_empty() {
            return Ok(Some(view));
        }
        let Some(template) = view.as_template() else {
            return Ok(Some(view));
        };

        let themed_name = self.themed_template_name(template.template_name());
        let location = self.themed_location(&themed_name);
        if !location.exists(self.resources.as_ref())? {
            tracing::debug!(
                view = view_name,
                theme = %self.theme,
                template = template.template_name(),
                "no themed template, using base"
            );
            return Ok(Some(view));
        }

        // The delegate may share its view; rewrite a private copy.
        let mut themed = view.clone_view();
        if let Some(template) = themed.as_template_mut() {
            template.set_template_name(themed_name.as_str());
        }
        tracing::debug!(
            view = view_name,
            theme = %self.theme,
            template = %themed_name,
            "using themed template"
        );
        Ok(Some(Arc::from(themed)))
    }
}

/// A resolver that prefers a theme's variant of each template.
///
/// Resolution goes to the delegate first. When the delegate returns a
/// template view and `prefix + theme + "/" + template + suffix` exists in the
/// resource space, the returned view renders the themed template. Otherwise
/// the delegate's view is returned as it is. An empty theme name never
/// probes and always yields the delegate's view. Results are cached per view name
/// and locale according to the settings.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use theme_views::{
///     EmbeddedResources, Locale, TemplateSettings, TemplateViewResolver, ThemeViewResolver,
///     ViewResolver,
/// };
///
/// let resources = Arc::new(
///     EmbeddedResources::new()
///         .add("templates/login.html", "base")
///         .add("templates/dark/login.html", "dark"),
/// );
/// let settings = TemplateSettings::default();
/// let delegate = Arc::new(TemplateViewResolver::new(settings.clone(), resources.clone()));
/// let resolver = ThemeViewResolver::new(delegate, settings, resources, "dark");
///
/// let locale = Locale::default();
/// let login = resolver.resolve_view_name("login", &locale).unwrap().unwrap();
/// assert_eq!(login.as_template().unwrap().template_name(), "dark/login");
/// ```
pub struct ThemeViewResolver {
    inner: CachingViewResolver<ThemeViewLoader>,
}

impl ThemeViewResolver {
    /// Creates a resolver for `theme` over `delegate`.
    ///
    /// Caching follows `settings`; the probe uses its prefix and suffix.
    pub fn new(
        delegate: Arc<dyn ViewResolver>,
        settings: TemplateSettings,
        resources: Arc<dyn ResourceSpace>,
        theme: impl Into<String>,
    ) -> Self {
        let loader = ThemeViewLoader {
            delegate,
            settings,
            resources,
            theme: theme.into(),
        };
        let settings = loader.settings.clone();
        Self {
            inner: CachingViewResolver::with_settings(loader, &settings),
        }
    }

    /// Returns the theme name.
    pub fn theme(&self) -> &str {
        self.inner.loader().theme()
    }

    /// Returns `theme + "/" + template_name`.
    pub fn themed_template_name(&self, template_name: &str) -> String {
        self.inner.loader().themed_template_name(template_name)
    }

    /// Whether resolved views are cached.
    pub fn is_cache(&self) -> bool {
        self.inner.is_cache()
    }

    /// Returns the maximum number of cached views.
    pub fn cache_limit(&self) -> usize {
        self.inner.cache_limit()
    }

    /// Drops every cached view. The delegate's cache is untouched.
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

impl ViewResolver for ThemeViewResolver {
    fn resolve_view_name(
        &self,
        view_name: &str,
        locale: &Locale,
    ) -> Result<Option<ViewRef>, ViewError> {
        self.inner.resolve_view_name(view_name, locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::TemplateViewResolver;
    use crate::resource::{EmbeddedResources, FileSystemResources};
    use crate::view::RedirectView;

    fn resources() -> Arc<dyn ResourceSpace> {
        Arc::new(
            EmbeddedResources::new()
                .add("templates/login.html", "base login")
                .add("templates/logout.html", "base logout")
                .add("templates/dark/login.html", "dark login"),
        )
    }

    fn theme_resolver(theme: &str) -> ThemeViewResolver {
        let settings = TemplateSettings::default();
        let resources = resources();
        let delegate = Arc::new(TemplateViewResolver::new(
            settings.clone(),
            Arc::clone(&resources),
        ));
        ThemeViewResolver::new(delegate, settings, resources, theme)
    }

    fn template_name(view: &ViewRef) -> String {
        view.as_template().unwrap().template_name().to_string()
    }

    #[test]
    fn test_themed_template_used_when_present() {
        let resolver = theme_resolver("dark");
        let view = resolver
            .resolve_view_name("login", &Locale::default())
            .unwrap()
            .unwrap();
        assert_eq!(template_name(&view), "dark/login");
    }

    #[test]
    fn test_base_template_used_when_missing() {
        let resolver = theme_resolver("dark");
        let view = resolver
            .resolve_view_name("logout", &Locale::default())
            .unwrap()
            .unwrap();
        assert_eq!(template_name(&view), "logout");
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let resolver = theme_resolver("solarized");
        let view = resolver
            .resolve_view_name("login", &Locale::default())
            .unwrap()
            .unwrap();
        assert_eq!(template_name(&view), "login");
    }

    #[test]
    fn test_themed_template_name() {
        let resolver = theme_resolver("dark");
        assert_eq!(resolver.theme(), "dark");
        assert_eq!(resolver.themed_template_name("casLoginView"), "dark/casLoginView");
    }

    #[test]
    fn test_redirect_view_untouched() {
        let resolver = theme_resolver("dark");
        let view = resolver
            .resolve_view_name("redirect:/login", &Locale::default())
            .unwrap()
            .unwrap();
        assert!(view.as_template().is_none());
    }

    /// Delegate returning the same shared view for every name.
    struct FixedResolver(Option<ViewRef>);

    impl ViewResolver for FixedResolver {
        fn resolve_view_name(
            &self,
            _view_name: &str,
            _locale: &Locale,
        ) -> Result<Option<ViewRef>, ViewError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_non_template_view_is_same_instance() {
        let shared: ViewRef = Arc::new(RedirectView::new("/elsewhere"));
        let delegate = Arc::new(FixedResolver(Some(Arc::clone(&shared))));
        let resolver =
            ThemeViewResolver::new(delegate, TemplateSettings::default(), resources(), "dark");

        let view = resolver
            .resolve_view_name("anything", &Locale::default())
            .unwrap()
            .unwrap();
        assert!(Arc::ptr_eq(&view, &shared));
    }

    #[test]
    fn test_delegate_none_yields_none() {
        let delegate = Arc::new(FixedResolver(None));
        let resolver =
            ThemeViewResolver::new(delegate, TemplateSettings::default(), resources(), "dark");
        assert!(resolver
            .resolve_view_name("login", &Locale::default())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_delegate_view_not_mutated() {
        let settings = TemplateSettings::default();
        let resources = resources();
        let delegate = Arc::new(TemplateViewResolver::new(
            settings.clone(),
            Arc::clone(&resources),
        ));
        let resolver = ThemeViewResolver::new(
            Arc::clone(&delegate) as Arc<dyn ViewResolver>,
            settings,
            resources,
            "dark",
        );
        let locale = Locale::default();

        let themed = resolver.resolve_view_name("login", &locale).unwrap().unwrap();
        let base = delegate.resolve_view_name("login", &locale).unwrap().unwrap();

        assert_eq!(template_name(&themed), "dark/login");
        assert_eq!(template_name(&base), "login");
    }

    #[test]
    fn test_existence_check_error_propagates() {
        let settings = TemplateSettings::default().with_prefix("file:../templates/");
        let resources: Arc<dyn ResourceSpace> = Arc::new(FileSystemResources::new("/tmp"));
        let delegate = Arc::new(TemplateViewResolver::new(
            settings.clone(),
            Arc::clone(&resources),
        ));
        let resolver = ThemeViewResolver::new(delegate, settings, resources, "dark");

        let result = resolver.resolve_view_name("login", &Locale::default());
        assert!(matches!(result, Err(ViewError::InvalidLocation { .. })));
    }

    #[test]
    fn test_empty_theme_skips_lookup_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("templates")).unwrap();
        std::fs::write(dir.path().join("templates/login.html"), "base").unwrap();

        let settings = TemplateSettings::default().with_prefix("file:templates/");
        let resources: Arc<dyn ResourceSpace> = Arc::new(FileSystemResources::new(dir.path()));
        let delegate = Arc::new(TemplateViewResolver::new(
            settings.clone(),
            Arc::clone(&resources),
        ));
        let resolver = ThemeViewResolver::new(delegate, settings, resources, "");

        let view = resolver
            .resolve_view_name("login", &Locale::default())
            .unwrap()
            .unwrap();
        assert_eq!(template_name(&view), "login");
    }

    #[test]
    fn test_theme_resolution_is_cached() {
        let resolver = theme_resolver("dark");
        let locale = Locale::default();
        let a = resolver.resolve_view_name("login", &locale).unwrap().unwrap();
        let b = resolver.resolve_view_name("login", &locale).unwrap().unwrap();
        assert!(Arc::ptr_eq(&a, &b));

        resolver.clear_cache();
        let c = resolver.resolve_view_name("login", &locale).unwrap().unwrap();
        assert!(!Arc::ptr_eq(&a, &c));
    }
}
