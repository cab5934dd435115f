//! Views produced by resolvers.
//!
//! [`View`] is the object a resolver hands back for a view name. The theme
//! layer only ever touches one kind of view, [`TemplateView`], and finds it
//! through the [`View::as_template`] capability check rather than by type.

mod redirect;
mod template;

pub use redirect::RedirectView;
pub use template::TemplateView;

use std::fmt::Debug;
use std::sync::Arc;

use minijinja::Value;

use crate::error::ViewError;

/// Content type reported by views that do not override it.
pub const DEFAULT_CONTENT_TYPE: &str = "text/html;charset=UTF-8";

/// A shared, resolved view.
pub type ViewRef = Arc<dyn View>;

/// A renderable result of view resolution.
pub trait View: Debug + Send + Sync {
    fn content_type(&self) -> &str {
        DEFAULT_CONTENT_TYPE
    }

    /// Renders the view with the given model.
    fn render(&self, model: &Value) -> Result<String, ViewError>;

    /// Returns an owned copy that can be modified without affecting `self`.
    fn clone_view(&self) -> Box<dyn View>;

    /// Returns the template view behind this view, if it is one.
    fn as_template(&self) -> Option<&TemplateView> {
        None
    }

    /// Mutable form of [`as_template`](Self::as_template).
    fn as_template_mut(&mut self) -> Option<&mut TemplateView> {
        None
    }
}
