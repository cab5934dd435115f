//! Factories producing one theme resolver per theme name.

use std::sync::Arc;

use super::ThemeViewResolver;
use crate::resolver::ViewResolver;
use crate::resource::ResourceSpace;
use crate::settings::TemplateSettings;

/// Creates a [`ThemeViewResolver`] for a theme.
pub trait ThemeViewResolverFactory: Send + Sync {
    fn create(&self, theme: &str) -> ThemeViewResolver;
}

/// Factory holding the delegate, settings and resource space shared by all
/// themes.
///
/// Every resolver it creates owns its own cache; the only things shared
/// between themes are the immutable settings and the delegate.
#[derive(Clone)]
pub struct ThemeFactory {
    delegate: Arc<dyn ViewResolver>,
    settings: TemplateSettings,
    resources: Arc<dyn ResourceSpace>,
}

impl ThemeFactory {
    /// Creates a factory from the parts every theme resolver shares.
    pub fn new(
        delegate: Arc<dyn ViewResolver>,
        settings: TemplateSettings,
        resources: Arc<dyn ResourceSpace>,
    ) -> Self {
        Self {
            delegate,
            settings,
            resources,
        }
    }

    /// Returns the resolver each theme resolver decorates.
    pub fn delegate(&self) -> &Arc<dyn ViewResolver> {
        &self.delegate
    }

    /// Returns the settings applied to every created resolver.
    pub fn settings(&self) -> &TemplateSettings {
        &self.settings
    }
}

impl ThemeViewResolverFactory for ThemeFactory {
    fn create(&self, theme: &str) -> ThemeViewResolver {
        tracing::debug!(theme, cache = self.settings.is_cache(), "creating theme resolver");
        ThemeViewResolver::new(
            Arc::clone(&self.delegate),
            self.settings.clone(),
            Arc::clone(&self.resources),
            theme,
        )
    }
}
