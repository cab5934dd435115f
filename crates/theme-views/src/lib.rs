//! # Theme Views - theme-aware template lookup
//!
//! `theme-views` resolves view names to template views and lets a named
//! theme override any template without touching resolution logic. A theme
//! resolver asks a base resolver for the view, then checks whether
//! `theme/<template>` exists; if so, the view renders the themed template,
//! otherwise the base one.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use theme_views::{
//!     EmbeddedResources, Locale, TemplateSettings, TemplateViewResolver, ThemeFactory,
//!     ThemeViewResolverFactory, View, ViewResolver,
//! };
//! use minijinja::context;
//!
//! let resources = Arc::new(
//!     EmbeddedResources::new()
//!         .add("templates/login.html", "Sign in, {{ user }}")
//!         .add("templates/dark/login.html", "Sign in (dark), {{ user }}"),
//! );
//! let settings = TemplateSettings::default();
//! let base = Arc::new(TemplateViewResolver::new(settings.clone(), resources.clone()));
//! let factory = ThemeFactory::new(base, settings, resources);
//!
//! let dark = factory.create("dark");
//! let view = dark.resolve_view_name("login", &Locale::default()).unwrap().unwrap();
//! assert_eq!(
//!     view.render(&context! { user => "ana" }).unwrap(),
//!     "Sign in (dark), ana"
//! );
//! ```
//!
//! ## Layers
//!
//! - [`TemplateSettings`]: prefix, suffix and cache settings, YAML-loadable
//! - [`ResourceSpace`]: where templates live ([`EmbeddedResources`] for
//!   `classpath:` locations, [`FileSystemResources`] for `file:` ones)
//! - [`ViewResolver`] and [`CachingViewResolver`]: resolution with a bounded cache
//! - [`TemplateViewResolver`]: the base resolver
//! - [`ThemeViewResolver`], [`ThemeFactory`], [`ThemedViewResolvers`]: themes
//!
//! Logging goes through `tracing`; install a subscriber to see theme and
//! cache decisions at `debug` level.

mod error;
mod locale;
pub mod resolver;
pub mod resource;
mod settings;
pub mod theme;
pub mod view;

pub use error::ViewError;
pub use locale::Locale;
pub use resolver::{
    CachingViewResolver, TemplateViewLoader, TemplateViewResolver, ViewLoader, ViewResolver,
    REDIRECT_URL_PREFIX,
};
pub use resource::{
    walk_resource_dir, EmbeddedResources, FileSystemResources, LayeredResources, LocationKind,
    ResourceFile, ResourceSpace, TemplateLocation,
};
pub use settings::{TemplateSettings, DEFAULT_CACHE_LIMIT, DEFAULT_PREFIX, DEFAULT_SUFFIX};
pub use theme::{
    ThemeFactory, ThemeViewLoader, ThemeViewResolver, ThemeViewResolverFactory,
    ThemedViewResolvers,
};
pub use view::{RedirectView, TemplateView, View, ViewRef, DEFAULT_CONTENT_TYPE};
