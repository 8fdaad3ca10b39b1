mod conditions;

use serde_derive::Serialize;

use crate::context::Context;
use crate::engine::Engine;
use crate::errors::Result;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub full_name: String,
    pub birth_date: String,
}

impl Person {
    pub fn new(full_name: &str, birth_date: &str) -> Person {
        Person { full_name: full_name.to_string(), birth_date: birth_date.to_string() }
    }
}

pub fn render_template(content: &str, context: &Context) -> Result<String> {
    Engine::one_off(content, context)
}

/// Nothing of the directive layer may survive rendering
pub fn assert_no_directive_residue(html: &str) {
    for needle in ["data-ph", "data-if", "data-repeat", "ph-chip", "ph-raw", "contenteditable"] {
        assert!(!html.contains(needle), "Directive residue `{}` in output: {}", needle, html);
    }
}
