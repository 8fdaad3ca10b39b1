//! AST of a contract template.
//!
//! A template is ordinary HTML where some elements carry a directive
//! attribute: `data-ph` (substitute a value), `data-if` (keep or drop the
//! element) or `data-repeat` (emit the children once per array item). The
//! parser consumes those attributes into the variants below so the renderer
//! never has to scan markup again.

/// Attribute marking a placeholder element, its value is the dotted key
pub const PLACEHOLDER_ATTR: &str = "data-ph";
/// Attribute marking a conditional element, its value is a condition expression
pub const CONDITION_ATTR: &str = "data-if";
/// Attribute marking a repeating element, its value is the dotted path of an array
pub const REPEAT_ATTR: &str = "data-repeat";
/// Marks a chip as editable in the wizard, stripped from rendered output
pub const EDITABLE_ATTR: &str = "contenteditable";
/// Presentation classes of placeholder chips, stripped from rendered output
pub const PLACEHOLDER_CLASSES: [&str; 2] = ["ph-chip", "ph-raw"];

/// Whether an attribute belongs to the directive layer and must never
/// survive into rendered output
pub fn is_directive_attr(name: &str) -> bool {
    name.eq_ignore_ascii_case(PLACEHOLDER_ATTR)
        || name.eq_ignore_ascii_case(CONDITION_ATTR)
        || name.eq_ignore_ascii_case(REPEAT_ATTR)
        || name.eq_ignore_ascii_case(EDITABLE_ATTR)
}

/// A single attribute of an element, `value` is `None` for bare attributes
/// like `hidden`
#[derive(Clone, Debug, PartialEq)]
pub struct Attr {
    pub name: String,
    pub value: Option<String>,
}

impl Attr {
    pub fn new(name: &str, value: Option<&str>) -> Attr {
        Attr { name: name.to_string(), value: value.map(String::from) }
    }
}

/// An ordinary element with no directive of its own
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    /// Tag name as written in the template
    pub tag: String,
    pub attrs: Vec<Attr>,
    /// `true` for void elements (`<br>`) and for explicit `<x/>`:
    /// no children, no close tag
    pub void: bool,
    /// `true` if the source spelled the tag `<x/>`
    pub self_closed: bool,
    pub children: Vec<Node>,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&Attr> {
        self.attrs.iter().find(|a| a.name == name)
    }
}

/// A `data-ph` element: the element survives rendering, its children are
/// replaced by the formatted value of the key
#[derive(Clone, Debug, PartialEq)]
pub struct Placeholder {
    /// Dotted key into the context
    pub key: String,
    /// The carrying element with `data-ph` already removed from its attrs;
    /// its children are the wizard's preview text, dropped at render time
    pub element: Element,
}

/// The expression of a `data-if` directive.
///
/// Grammar: an optional `not:` prefix, then either `path == 'literal'` or a
/// bare path. Equality compares the string form of the resolved value, a bare
/// path is boolean-coerced.
#[derive(Clone, Debug, PartialEq)]
pub struct CondExpr {
    pub negated: bool,
    pub path: String,
    pub equals: Option<String>,
}

/// A `data-if` element: the wrapper is kept (minus the directive) when the
/// expression holds, dropped with its children otherwise
#[derive(Clone, Debug, PartialEq)]
pub struct Condition {
    pub expr: CondExpr,
    /// The carrying element with `data-if` already removed from its attrs.
    /// Boxed as a node so an element stacking `data-if` with `data-ph` keeps
    /// its placeholder behavior once the condition holds.
    pub child: Box<Node>,
}

/// A `data-repeat` element: the wrapper never survives rendering, only its
/// children do, once per item of the bound array
#[derive(Clone, Debug, PartialEq)]
pub struct Repeat {
    pub path: String,
    pub body: Vec<Node>,
}

/// All nodes a parsed template is made of
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Raw markup emitted verbatim: text, comments, doctype
    Text(String),
    Element(Element),
    Placeholder(Placeholder),
    Condition(Condition),
    Repeat(Repeat),
}
