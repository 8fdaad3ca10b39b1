use std::borrow::Cow;

use serde_json::Value;

use crate::context::dotted_pointer;
use crate::renderer::stack_frame::{StackFrame, Val};

/// Contains the stack of repeat scopes for a render
#[derive(Debug)]
pub struct CallStack<'a> {
    /// The stack of frames, one per enclosing repeat item
    stack: Vec<StackFrame<'a>>,
    /// User supplied context for the render
    context: &'a Value,
}

impl<'a> CallStack<'a> {
    /// Create the initial call stack
    pub fn new(context: &'a Value) -> CallStack<'a> {
        CallStack { stack: Vec::new(), context }
    }

    /// Brings one repeat item into scope
    pub fn push_frame(&mut self, path: &'a str, item: Val<'a>) {
        self.stack.push(StackFrame::new(path, item));
    }

    pub fn pop(&mut self) {
        self.stack.pop().expect("Mismatched push/pop in repeat frames");
    }

    /// Resolves a dotted path, innermost repeat item first, falling back to
    /// the root context. A miss is `None`, never an error.
    pub fn lookup(&self, path: &str) -> Option<Val<'a>> {
        if path.is_empty() {
            return None;
        }
        for frame in self.stack.iter().rev() {
            if let Some(found) = frame.find_value(path) {
                return Some(found);
            }
        }
        dotted_pointer(self.context, path).map(Cow::Borrowed)
    }
}
