//! View resolution.
//!
//! - [`ViewResolver`]: maps a view name and locale to a view
//! - [`ViewLoader`]: the uncached loading step behind a resolver
//! - [`CachingViewResolver`]: wraps a loader with a bounded view cache
//! - [`TemplateViewResolver`]: the base resolver producing template views

mod caching;
mod template;

pub use caching::CachingViewResolver;
pub use template::{TemplateViewLoader, TemplateViewResolver, REDIRECT_URL_PREFIX};

use std::sync::Arc;

use crate::error::ViewError;
use crate::locale::Locale;
use crate::view::ViewRef;

/// Resolves view names to views.
///
/// `Ok(None)` means this resolver does not handle the name. Errors are
/// reserved for resolution that was attempted and failed.
pub trait ViewResolver: Send + Sync {
    fn resolve_view_name(
        &self,
        view_name: &str,
        locale: &Locale,
    ) -> Result<Option<ViewRef>, ViewError>;
}

impl<R: ViewResolver + ?Sized> ViewResolver for Arc<R> {
    fn resolve_view_name(
        &self,
        view_name: &str,
        locale: &Locale,
    ) -> Result<Option<ViewRef>, ViewError> {
        (**self).resolve_view_name(view_name, locale)
    }
}

/// Creates views without caching. Paired with [`CachingViewResolver`].
pub trait ViewLoader: Send + Sync {
    fn load_view(&self, view_name: &str, locale: &Locale) -> Result<Option<ViewRef>, ViewError>;
}
