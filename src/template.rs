use crate::errors::Result;
use crate::parser::{ast::Node, parse};

/// This represents a parsed contract template
#[derive(Debug, Clone)]
pub struct Template {
    /// Name of the template, usually its path relative to the template directory
    pub name: String,
    /// The original source markup
    pub source: String,
    /// The AST the renderer walks
    pub ast: Vec<Node>,
}

impl Template {
    /// Parse the template source, returning an error on structurally broken markup
    pub fn new(name: &str, source: &str) -> Result<Template> {
        let ast = parse(source)?;
        Ok(Template { name: name.to_string(), source: source.to_string(), ast })
    }
}
