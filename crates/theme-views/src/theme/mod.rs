//! Theme-aware view resolution.
//!
//! - [`ThemeViewResolver`]: decorates a delegate resolver, preferring
//!   `theme/<template>` when it exists
//! - [`ThemeViewResolverFactory`] / [`ThemeFactory`]: build one resolver per theme
//! - [`ThemedViewResolvers`]: lazily keeps a resolver for each theme in use

mod factory;
mod registry;
mod resolver;

pub use factory::{ThemeFactory, ThemeViewResolverFactory};
pub use registry::ThemedViewResolvers;
pub use resolver::{ThemeViewLoader, ThemeViewResolver};
