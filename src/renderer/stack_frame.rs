use std::borrow::Cow;

use serde_json::Value;

use crate::context::dotted_pointer;

pub type Val<'a> = Cow<'a, Value>;

/// Gets a value within a value by dotted pointer, keeping lifetime
#[inline]
pub fn value_by_pointer<'a>(pointer: &str, val: &Val<'a>) -> Option<Val<'a>> {
    match *val {
        Cow::Borrowed(r) => dotted_pointer(r, pointer).map(Cow::Borrowed),
        Cow::Owned(ref r) => dotted_pointer(r, pointer).map(|found| Cow::Owned(found.clone())),
    }
}

/// Entry in the call stack: one repeat item currently in scope
#[derive(Debug)]
pub struct StackFrame<'a> {
    /// The repeat path that opened this frame, for debugging
    pub path: &'a str,
    /// The array item this frame scopes lookups to
    pub item: Val<'a>,
}

impl<'a> StackFrame<'a> {
    pub fn new(path: &'a str, item: Val<'a>) -> Self {
        StackFrame { path, item }
    }

    /// Finds a value in this frame's item
    pub fn find_value(&self, pointer: &str) -> Option<Val<'a>> {
        value_by_pointer(pointer, &self.item)
    }
}
