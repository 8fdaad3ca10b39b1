use crate::errors::{Error, Result};

pub mod ast;

#[cfg(test)]
mod tests;

use self::ast::*;

/// Elements that never have children or a closing tag
const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose body is raw text: no directives are looked for inside
const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

/// Parses a template into its AST.
///
/// Templates are author-controlled: a structurally broken one (mismatched or
/// unterminated tags) is reported as an error rather than papered over.
pub fn parse(input: &str) -> Result<Vec<Node>> {
    let mut parser = Parser::new(input);
    parser.parse_nodes(None)
}

/// Parses a `data-if` expression: an optional `not:` prefix followed by
/// either `path == 'literal'` or a bare path.
pub fn parse_cond_expr(raw: &str) -> CondExpr {
    let raw = raw.trim();
    let (negated, rest) = match raw.strip_prefix("not:") {
        Some(r) => (true, r.trim_start()),
        None => (false, raw),
    };

    if let Some(idx) = rest.find("==") {
        let path = rest[..idx].trim().to_string();
        let mut literal = rest[idx + 2..].trim();
        if let Some(unquoted) =
            literal.strip_prefix('\'').and_then(|l| l.strip_suffix('\''))
        {
            literal = unquoted;
        }
        CondExpr { negated, path, equals: Some(literal.to_string()) }
    } else {
        CondExpr { negated, path: rest.to_string(), equals: None }
    }
}

/// Appends raw markup to the node list, merging with a trailing text node
fn push_text(nodes: &mut Vec<Node>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Node::Text(last)) = nodes.last_mut() {
        last.push_str(text);
    } else {
        nodes.push(Node::Text(text.to_string()));
    }
}

/// Turns a parsed element into its AST node. When an element stacks several
/// directives, precedence is repeat, then condition, then placeholder.
fn into_node(mut el: Element) -> Node {
    if let Some(pos) = el.attrs.iter().position(|a| a.name.eq_ignore_ascii_case(REPEAT_ATTR)) {
        let attr = el.attrs.remove(pos);
        let path = attr.value.unwrap_or_default().trim().to_string();
        return Node::Repeat(Repeat { path, body: el.children });
    }

    if let Some(pos) = el.attrs.iter().position(|a| a.name.eq_ignore_ascii_case(CONDITION_ATTR)) {
        let attr = el.attrs.remove(pos);
        let expr = parse_cond_expr(attr.value.as_deref().unwrap_or(""));
        return Node::Condition(Condition { expr, child: Box::new(into_node(el)) });
    }

    if let Some(pos) = el.attrs.iter().position(|a| a.name.eq_ignore_ascii_case(PLACEHOLDER_ATTR))
    {
        let attr = el.attrs.remove(pos);
        let key = attr.value.unwrap_or_default().trim().to_string();
        return Node::Placeholder(Placeholder { key, element: el });
    }

    Node::Element(el)
}

struct Parser<'a> {
    input: &'a str,
    /// Byte offset of the scanner
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Parser<'a> {
        Parser { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_ascii_whitespace() {
                break;
            }
            self.pos += 1;
        }
    }

    /// Parses sibling nodes until EOF, or until the closing tag of the
    /// enclosing element when `close_tag` is given.
    fn parse_nodes(&mut self, close_tag: Option<&str>) -> Result<Vec<Node>> {
        let mut nodes: Vec<Node> = Vec::new();
        let mut text_start = self.pos;

        loop {
            let lt = match self.input[self.pos..].find('<') {
                Some(rel) => self.pos + rel,
                None => {
                    if let Some(tag) = close_tag {
                        return Err(Error::msg(format!(
                            "Reached the end of the template while looking for `</{}>`",
                            tag
                        )));
                    }
                    push_text(&mut nodes, &self.input[text_start..]);
                    self.pos = self.input.len();
                    return Ok(nodes);
                }
            };

            let after = &self.input[lt + 1..];
            let markup = matches!(after.chars().next(), Some(c) if c.is_ascii_alphabetic())
                || after.starts_with('/')
                || after.starts_with('!');
            if !markup {
                // a lone `<` stays part of the surrounding text
                self.pos = lt + 1;
                continue;
            }

            if after.starts_with('/') {
                let (name, end) = self.scan_close_tag(lt)?;
                return match close_tag {
                    Some(tag) if name.eq_ignore_ascii_case(tag) => {
                        push_text(&mut nodes, &self.input[text_start..lt]);
                        self.pos = end;
                        Ok(nodes)
                    }
                    Some(tag) => Err(Error::msg(format!(
                        "Found `</{}>` while looking for `</{}>`",
                        name, tag
                    ))),
                    None => {
                        Err(Error::msg(format!("Found `</{}>` without a matching opening tag", name)))
                    }
                };
            }

            push_text(&mut nodes, &self.input[text_start..lt]);
            self.pos = lt;

            if after.starts_with("!--") {
                let end = match self.input[lt..].find("-->") {
                    Some(rel) => lt + rel + 3,
                    None => return Err(Error::msg("Unterminated comment in template")),
                };
                push_text(&mut nodes, &self.input[lt..end]);
                self.pos = end;
            } else if after.starts_with('!') {
                // doctype and friends pass through verbatim
                let end = match self.input[lt..].find('>') {
                    Some(rel) => lt + rel + 1,
                    None => return Err(Error::msg("Unterminated `<!` declaration in template")),
                };
                push_text(&mut nodes, &self.input[lt..end]);
                self.pos = end;
            } else {
                let node = self.parse_element()?;
                nodes.push(node);
            }

            text_start = self.pos;
        }
    }

    /// Parses one element starting at `<`, children included
    fn parse_element(&mut self) -> Result<Node> {
        self.pos += 1;
        let tag = self.scan_name()?;
        let mut attrs = Vec::new();
        let mut self_closed = false;

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(Error::msg(format!("Unterminated `<{}` tag", tag))),
                Some('>') => {
                    self.pos += 1;
                    break;
                }
                Some('/') => {
                    self.pos += 1;
                    self.skip_whitespace();
                    if self.peek() == Some('>') {
                        self.pos += 1;
                        self_closed = true;
                        break;
                    }
                    return Err(Error::msg(format!("Stray `/` in `<{}` tag", tag)));
                }
                Some(_) => attrs.push(self.scan_attr()?),
            }
        }

        let lower = tag.to_ascii_lowercase();
        let void = self_closed || VOID_ELEMENTS.contains(&lower.as_str());
        let children = if void {
            Vec::new()
        } else if RAW_TEXT_ELEMENTS.contains(&lower.as_str()) {
            self.scan_raw_text(&tag)?
        } else {
            self.parse_nodes(Some(&tag))?
        };

        Ok(into_node(Element { tag, attrs, void, self_closed, children }))
    }

    /// Scans a tag name, the scanner sits on its first character
    fn scan_name(&mut self) -> Result<String> {
        let rest = &self.input[self.pos..];
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':'))
            .unwrap_or(rest.len());
        if len == 0 {
            return Err(Error::msg("Expected a tag name after `<`"));
        }
        let name = rest[..len].to_string();
        self.pos += len;
        Ok(name)
    }

    /// Scans one attribute, quoted, unquoted or bare
    fn scan_attr(&mut self) -> Result<Attr> {
        let rest = &self.input[self.pos..];
        let len = rest
            .find(|c: char| c.is_ascii_whitespace() || c == '=' || c == '/' || c == '>')
            .unwrap_or(rest.len());
        if len == 0 {
            return Err(Error::msg("Expected an attribute name"));
        }
        let name = rest[..len].to_string();
        self.pos += len;
        self.skip_whitespace();

        if self.peek() != Some('=') {
            return Ok(Attr { name, value: None });
        }
        self.pos += 1;
        self.skip_whitespace();

        let value = match self.peek() {
            Some(quote) if quote == '"' || quote == '\'' => {
                self.pos += 1;
                let rest = &self.input[self.pos..];
                let end = rest.find(quote).ok_or_else(|| {
                    Error::msg(format!("Unterminated value for attribute `{}`", name))
                })?;
                let value = rest[..end].to_string();
                self.pos += end + 1;
                value
            }
            Some(_) => {
                let rest = &self.input[self.pos..];
                let end = rest
                    .find(|c: char| c.is_ascii_whitespace() || c == '>')
                    .unwrap_or(rest.len());
                let value = rest[..end].to_string();
                self.pos += end;
                value
            }
            None => return Err(Error::msg(format!("Unterminated value for attribute `{}`", name))),
        };

        Ok(Attr { name, value: Some(value) })
    }

    /// Scans the name of a closing tag without consuming it, returning the
    /// name and the offset right after `>`
    fn scan_close_tag(&mut self, lt: usize) -> Result<(String, usize)> {
        let name_start = lt + 2;
        let rest = &self.input[name_start..];
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':'))
            .unwrap_or(rest.len());
        if len == 0 {
            return Err(Error::msg("Expected a tag name after `</`"));
        }
        let name = rest[..len].to_string();
        let after = &rest[len..];
        let trimmed = after.trim_start();
        if !trimmed.starts_with('>') {
            return Err(Error::msg(format!("Unterminated `</{}` tag", name)));
        }
        let end = name_start + len + (after.len() - trimmed.len()) + 1;
        Ok((name, end))
    }

    /// Consumes the body of a raw text element (`<script>`, `<style>`) up to
    /// and including its closing tag
    fn scan_raw_text(&mut self, tag: &str) -> Result<Vec<Node>> {
        let start = self.pos;
        let mut search = self.pos;
        loop {
            let close_start = match self.input[search..].find("</") {
                Some(rel) => search + rel,
                None => {
                    return Err(Error::msg(format!(
                        "Reached the end of the template while looking for `</{}>`",
                        tag
                    )))
                }
            };
            let name_start = close_start + 2;
            let rest = &self.input[name_start..];
            let name_matches =
                rest.get(..tag.len()).map_or(false, |name| name.eq_ignore_ascii_case(tag));
            if name_matches {
                let after = &rest[tag.len()..];
                let trimmed = after.trim_start();
                if trimmed.starts_with('>') {
                    let end = name_start + tag.len() + (after.len() - trimmed.len()) + 1;
                    let mut children = Vec::new();
                    push_text(&mut children, &self.input[start..close_start]);
                    self.pos = end;
                    return Ok(children);
                }
            }
            search = close_start + 2;
        }
    }
}
