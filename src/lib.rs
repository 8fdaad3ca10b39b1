//! # Dogovor
//!
//! A directive-based HTML renderer for lease contract documents.
//!
//! A contract template is ordinary HTML carrying three kinds of author-placed
//! directives: value placeholders (`data-ph`), conditional blocks (`data-if`)
//! and repeating blocks (`data-repeat`). Rendering substitutes structured
//! form data into the template with type-aware formatting (long Russian
//! calendar dates, amounts spelled out in words with grammatically correct
//! pluralization) and strips every directive from the output, so the result
//! is final presentation HTML safe to re-render, diff and export.
//!
//! Templates are parsed once into an AST and evaluated by tree recursion
//! against a scope chain, so nested repeats resolve against their item
//! naturally and rendering is a pure function of `(template, data)`.
//!
//! ## Example
//!
//! ```rust
//! use dogovor::{Context, Engine};
//!
//! let template = r#"<p>Арендодатель: <span class="ph-chip" data-ph="landlord.fullName"></span></p>
//! <div data-if="terms.petsAllowed"><p>Проживание домашних животных разрешено.</p></div>"#;
//!
//! let mut context = Context::new();
//! context.insert("landlord", &serde_json::json!({ "fullName": "Иванов И. И." }));
//! context.insert("terms", &serde_json::json!({ "petsAllowed": false }));
//!
//! let rendered = Engine::one_off(template, &context).unwrap();
//! assert_eq!(rendered, "<p>Арендодатель: <span>Иванов И. И.</span></p>\n");
//! ```

mod context;
mod engine;
mod errors;
mod formatters;
mod parser;
mod renderer;
mod store;
mod tables;
mod template;
mod utils;

// Library exports.

pub use crate::context::{dotted_pointer, Context, JsonRender, JsonTruthy};
pub use crate::engine::Engine;
pub use crate::errors::{Error, ErrorKind, Result};
pub use crate::formatters::{
    format_amount, format_date_long, format_date_short, format_rub_short, format_spaced,
};
pub use crate::store::{InMemoryVersionStore, VersionEntry, VersionStore};
pub use crate::tables::{condition_survey_table, fill_slot, inventory_table};
#[doc(hidden)]
pub use crate::template::Template;
pub use crate::utils::escape_html;
// Re-export Value and other useful things from serde
// so apps/tools can encode data in template types
pub use serde_json::value::{from_value, to_value, Map, Number, Value};

// Exposes the AST if one needs it but changing the AST is not considered
// a breaking change so it isn't public
#[doc(hidden)]
pub use crate::parser::ast;
