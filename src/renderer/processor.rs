use std::borrow::Cow;

use serde_json::Value;

use crate::context::{JsonRender, JsonTruthy};
use crate::errors::Result;
use crate::formatters::{format_amount, format_date_long, key_format, KeyFormat};
use crate::parser::ast::{
    is_directive_attr, Attr, CondExpr, Element, Node, Placeholder, Repeat, PLACEHOLDER_CLASSES,
};
use crate::renderer::call_stack::CallStack;
use crate::template::Template;
use crate::utils::escape_html;

/// Walks the template AST and renders the output.
///
/// Directive attributes and chip classes are filtered at serialization time,
/// so no code path can leave directive residue in the output.
pub struct Processor<'a> {
    /// The template we're rendering
    template: &'a Template,
    /// The scope chain: root context plus any enclosing repeat items
    call_stack: CallStack<'a>,
}

impl<'a> Processor<'a> {
    pub fn new(template: &'a Template, context: &'a Value) -> Self {
        Processor { template, call_stack: CallStack::new(context) }
    }

    pub fn render(&mut self) -> Result<String> {
        let template = self.template;
        let mut output = String::with_capacity(template.source.len());
        self.render_body(&template.ast, &mut output)?;
        Ok(output)
    }

    fn render_body(&mut self, body: &'a [Node], output: &mut String) -> Result<()> {
        for node in body {
            self.render_node(node, output)?;
        }
        Ok(())
    }

    fn render_node(&mut self, node: &'a Node, output: &mut String) -> Result<()> {
        match node {
            Node::Text(text) => output.push_str(text),
            Node::Element(element) => self.render_element(element, output)?,
            Node::Placeholder(placeholder) => self.render_placeholder(placeholder, output),
            Node::Condition(condition) => {
                if self.eval_condition(&condition.expr) {
                    self.render_node(&condition.child, output)?;
                }
            }
            Node::Repeat(repeat) => self.render_repeat(repeat, output)?,
        }
        Ok(())
    }

    /// The element survives with its directives stripped, the wizard's
    /// preview children are replaced by the formatted value
    fn render_placeholder(&mut self, placeholder: &'a Placeholder, output: &mut String) {
        let element = &placeholder.element;
        write_open_tag(element, output);
        if element.void {
            return;
        }
        output.push_str(&escape_html(&self.format_placeholder(&placeholder.key)));
        output.push_str("</");
        output.push_str(&element.tag);
        output.push('>');
    }

    fn render_element(&mut self, element: &'a Element, output: &mut String) -> Result<()> {
        write_open_tag(element, output);
        if element.void {
            return Ok(());
        }
        self.render_body(&element.children, output)?;
        output.push_str("</");
        output.push_str(&element.tag);
        output.push('>');
        Ok(())
    }

    /// One copy of the body per array item, in array order. A path that does
    /// not name an array in any scope deletes the element wholesale.
    fn render_repeat(&mut self, repeat: &'a Repeat, output: &mut String) -> Result<()> {
        let resolved = match self.call_stack.lookup(&repeat.path) {
            Some(value) => value,
            None => return Ok(()),
        };

        match resolved {
            Cow::Borrowed(Value::Array(items)) => {
                for item in items {
                    self.call_stack.push_frame(&repeat.path, Cow::Borrowed(item));
                    self.render_body(&repeat.body, output)?;
                    self.call_stack.pop();
                }
            }
            Cow::Owned(Value::Array(items)) => {
                for item in items {
                    self.call_stack.push_frame(&repeat.path, Cow::Owned(item));
                    self.render_body(&repeat.body, output)?;
                    self.call_stack.pop();
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn eval_condition(&self, expr: &CondExpr) -> bool {
        let resolved = self.call_stack.lookup(&expr.path);
        let result = match &expr.equals {
            Some(literal) => resolved.map_or(false, |value| value.render() == *literal),
            None => resolved.map_or(false, |value| value.is_truthy()),
        };
        if expr.negated {
            !result
        } else {
            result
        }
    }

    fn format_placeholder(&self, key: &str) -> String {
        match key_format(key) {
            KeyFormat::Date => format_date_long(&self.resolve_string(key)),
            KeyFormat::Amount => format_amount(&self.resolve_string(key)),
            KeyFormat::AmountOf(sibling) => format_amount(&self.resolve_string(&sibling)),
            KeyFormat::Verbatim => self.resolve_string(key),
        }
    }

    /// A resolution miss renders as the empty string, never as an error
    fn resolve_string(&self, path: &str) -> String {
        self.call_stack.lookup(path).map(|value| value.render()).unwrap_or_default()
    }
}

fn write_open_tag(element: &Element, output: &mut String) {
    output.push('<');
    output.push_str(&element.tag);
    for attr in &element.attrs {
        if is_directive_attr(&attr.name) {
            continue;
        }
        if attr.name.eq_ignore_ascii_case("class") {
            if let Some(kept) = sanitized_class(attr.value.as_deref().unwrap_or("")) {
                write_attr(&Attr::new("class", Some(kept.as_str())), output);
            }
            continue;
        }
        write_attr(attr, output);
    }
    if element.self_closed {
        output.push_str("/>");
    } else {
        output.push('>');
    }
}

fn write_attr(attr: &Attr, output: &mut String) {
    output.push(' ');
    output.push_str(&attr.name);
    if let Some(value) = &attr.value {
        if value.contains('"') {
            output.push_str("='");
            output.push_str(value);
            output.push('\'');
        } else {
            output.push_str("=\"");
            output.push_str(value);
            output.push('"');
        }
    }
}

/// Removes the chip classes, dropping the attribute entirely once empty
fn sanitized_class(value: &str) -> Option<String> {
    let kept: Vec<&str> = value
        .split_ascii_whitespace()
        .filter(|token| !PLACEHOLDER_CLASSES.contains(token))
        .collect();
    if kept.is_empty() {
        None
    } else {
        Some(kept.join(" "))
    }
}
