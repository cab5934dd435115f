//! Template-backed views.

use std::fmt;
use std::sync::Arc;

use minijinja::{Environment, ErrorKind, Value};

use super::View;
use crate::error::ViewError;
use crate::resource::{ResourceSpace, TemplateLocation};
use crate::settings::TemplateSettings;

/// A view rendered from a named template.
///
/// The template name is the only mutable part: it is what the theme resolver
/// rewrites when a themed variant exists. The location of the template is
/// `prefix + template_name + suffix` from the view's settings.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use theme_views::{EmbeddedResources, TemplateSettings, TemplateView, View};
/// use minijinja::context;
///
/// let resources = Arc::new(
///     EmbeddedResources::new().add("templates/hello.html", "Hello, {{ name }}!"),
/// );
/// let view = TemplateView::new("hello", TemplateSettings::default(), resources);
///
/// let output = view.render(&context! { name => "World" }).unwrap();
/// assert_eq!(output, "Hello, World!");
/// ```
#[derive(Clone)]
pub struct TemplateView {
    template_name: String,
    settings: TemplateSettings,
    resources: Arc<dyn ResourceSpace>,
}

impl TemplateView {
    /// Creates a view for `template_name`, located through `settings` in `resources`.
    pub fn new(
        template_name: impl Into<String>,
        settings: TemplateSettings,
        resources: Arc<dyn ResourceSpace>,
    ) -> Self {
        Self {
            template_name: template_name.into(),
            settings,
            resources,
        }
    }

    /// Returns the current template name, without prefix or suffix.
    pub fn template_name(&self) -> &str {
        &self.template_name
    }

    /// Points the view at another template.
    pub fn set_template_name(&mut self, template_name: impl Into<String>) {
        self.template_name = template_name.into();
    }

    /// The resource location this view renders from.
    pub fn template_location(&self) -> TemplateLocation {
        TemplateLocation::new(&self.settings.location_for(&self.template_name))
    }

    fn environment(&self) -> Environment<'static> {
        let mut env = Environment::new();
        let settings = self.settings.clone();
        let resources = Arc::clone(&self.resources);

        // Includes and extends resolve through the same prefix/suffix rules.
        env.set_loader(move |name| {
            let location = TemplateLocation::new(&settings.location_for(name));
            match resources.read(&location) {
                Ok(source) => Ok(Some(source)),
                Err(ViewError::NotFound { .. }) => Ok(None),
                Err(e) => Err(minijinja::Error::new(
                    ErrorKind::InvalidOperation,
                    e.to_string(),
                )),
            }
        });
        env
    }
}

impl fmt::Debug for TemplateView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateView")
            .field("template_name", &self.template_name)
            .field("prefix", &self.settings.prefix())
            .field("suffix", &self.settings.suffix())
            .finish()
    }
}

impl View for TemplateView {
    fn render(&self, model: &Value) -> Result<String, ViewError> {
        let env = self.environment();
        let tmpl = env.get_template(&self.template_name)?;
        Ok(tmpl.render(model)?)
    }

    fn clone_view(&self) -> Box<dyn View> {
        Box::new(self.clone())
    }

    fn as_template(&self) -> Option<&TemplateView> {
        Some(self)
    }

    fn as_template_mut(&mut self) -> Option<&mut TemplateView> {
        Some(self)
    }
}
