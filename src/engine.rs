use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::context::Context;
use crate::errors::{Error, Result};
use crate::renderer::Processor;
use crate::template::Template;

/// The template registry and main entry point.
///
/// Templates are parsed once at registration, rendering never mutates the
/// registry, so an `Engine` can be shared freely between renders.
#[derive(Debug, Default)]
pub struct Engine {
    /// All the parsed templates, by name
    pub templates: HashMap<String, Template>,
}

impl Engine {
    /// Loads and parses every file matched by a glob.
    ///
    /// ```ignore
    /// let engine = Engine::new("templates/**/*.html")?;
    /// ```
    ///
    /// Template names are the file paths with the static prefix of the glob
    /// stripped, e.g. `templates/lease/contract.html` becomes
    /// `lease/contract.html`.
    pub fn new(dir: &str) -> Result<Engine> {
        if dir.find('*').is_none() {
            return Err(Error::msg(format!(
                "Engine expects a glob as input, no `*` was found in `{}`",
                dir
            )));
        }
        let mut engine = Engine::default();
        engine.load_from_glob(dir)?;
        Ok(engine)
    }

    fn load_from_glob(&mut self, dir: &str) -> Result<()> {
        // the static prefix of the glob is stripped from template names
        let parent_dir = dir.split_at(dir.find('*').unwrap_or(0)).0;

        let walker = globwalk::glob(dir)
            .map_err(|e| Error::chain(format!("Invalid glob `{}`", dir), e))?;
        for entry in walker.filter_map(std::result::Result::ok) {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let name = path
                .to_string_lossy()
                .replace('\\', "/")
                .replacen(parent_dir, "", 1);
            self.add_template_file(&name, path)?;
        }
        Ok(())
    }

    fn add_template_file(&mut self, name: &str, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::chain(format!("Failed to load `{}`", path.display()), e))?;
        self.add_raw_template(name, &content)
    }

    /// Parses and registers a template under `name`, replacing any previous
    /// template with that name
    pub fn add_raw_template(&mut self, name: &str, content: &str) -> Result<()> {
        let template = Template::new(name, content)
            .map_err(|e| Error::chain(format!("Failed to parse `{}`", name), e))?;
        self.templates.insert(name.to_string(), template);
        Ok(())
    }

    pub fn get_template(&self, template_name: &str) -> Result<&Template> {
        self.templates
            .get(template_name)
            .ok_or_else(|| Error::template_not_found(template_name))
    }

    /// Renders a registered template against the given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        let template = self.get_template(template_name)?;
        let data = context.clone().into_json();
        Processor::new(template, &data).render()
    }

    /// Renders a registered template against an already-built JSON value
    pub fn render_value(&self, template_name: &str, data: &Value) -> Result<String> {
        let template = self.get_template(template_name)?;
        Processor::new(template, data).render()
    }

    /// Renders a one-off template string: the per-request flow of the
    /// document service, fresh template text in, rendered document out
    pub fn one_off(content: &str, context: &Context) -> Result<String> {
        let data = context.clone().into_json();
        Engine::one_off_value(content, &data)
    }

    /// Same as [`Engine::one_off`] with the data already a JSON value
    pub fn one_off_value(content: &str, data: &Value) -> Result<String> {
        let template = Template::new("__one_off__", content)?;
        Processor::new(&template, data).render()
    }
}

#[cfg(test)]
mod tests {
    use super::Engine;
    use crate::context::Context;

    #[test]
    fn can_render_registered_template() {
        let mut engine = Engine::default();
        engine
            .add_raw_template("greeting", "<p>Здравствуйте, <span data-ph=\"name\"></span>!</p>")
            .unwrap();
        let mut context = Context::new();
        context.insert("name", "Мария");
        assert_eq!(
            engine.render("greeting", &context).unwrap(),
            "<p>Здравствуйте, <span>Мария</span>!</p>"
        );
    }

    #[test]
    fn missing_template_is_an_error() {
        let engine = Engine::default();
        assert_eq!(
            engine.render("nope", &Context::new()).unwrap_err().to_string(),
            "Template 'nope' not found"
        );
    }

    #[test]
    fn registration_rejects_broken_templates() {
        let mut engine = Engine::default();
        assert!(engine.add_raw_template("broken", "<div><span></div>").is_err());
    }

    #[test]
    fn one_off_requires_no_registry() {
        let mut context = Context::new();
        context.insert("city", "Казань");
        assert_eq!(
            Engine::one_off("г. <span data-ph=\"city\"></span>", &context).unwrap(),
            "г. <span>Казань</span>"
        );
    }

    #[test]
    fn rejects_non_glob_input() {
        assert!(Engine::new("templates").is_err());
    }

    #[test]
    fn loads_templates_from_glob() {
        use std::fs;

        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("lease")).unwrap();
        fs::write(
            dir.path().join("lease/contract.html"),
            "<h1>Договор аренды</h1>",
        )
        .unwrap();
        fs::write(dir.path().join("act.html"), "<h1>Акт приёма-передачи</h1>").unwrap();

        let glob = format!("{}/**/*.html", dir.path().display());
        let engine = Engine::new(&glob).unwrap();
        assert_eq!(engine.templates.len(), 2);
        assert!(engine.templates.contains_key("lease/contract.html"));
        assert!(engine.templates.contains_key("act.html"));
        assert_eq!(
            engine.render("act.html", &Context::new()).unwrap(),
            "<h1>Акт приёма-передачи</h1>"
        );
    }
}
