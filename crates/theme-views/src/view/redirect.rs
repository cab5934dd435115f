//! Redirect views.

use minijinja::Value;

use super::View;
use crate::error::ViewError;

/// A view that redirects to another URL instead of rendering a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectView {
    url: String,
}

impl RedirectView {
    /// Creates a redirect to `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Returns the redirect target.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl View for RedirectView {
    fn content_type(&self) -> &str {
        "text/plain"
    }

    /// Redirects have no body.
    fn render(&self, _model: &Value) -> Result<String, ViewError> {
        Ok(String::new())
    }

    fn clone_view(&self) -> Box<dyn View> {
        Box::new(self.clone())
    }
}
