use std::collections::BTreeMap;

use serde::ser::Serialize;
use serde_json::value::{to_value, Map, Value};

use crate::errors::{Error, Result};

/// The struct that holds the context of a document rendering.
///
/// Light wrapper around a `BTreeMap` for easier insertions of Serializable
/// values
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    data: BTreeMap<String, Value>,
}

impl Context {
    /// Initializes an empty context
    pub fn new() -> Self {
        Context { data: BTreeMap::new() }
    }

    /// Converts the `val` parameter to `Value` and insert it into the context.
    ///
    /// Panics if the serialization fails.
    ///
    /// ```rust
    /// # use dogovor::Context;
    /// let mut context = Context::new();
    /// context.insert("number_tenants", &3);
    /// ```
    pub fn insert<T: Serialize + ?Sized, S: Into<String>>(&mut self, key: S, val: &T) {
        self.data.insert(key.into(), to_value(val).unwrap());
    }

    /// Converts the `val` parameter to `Value` and insert it into the context.
    ///
    /// Returns an error if the serialization fails.
    pub fn try_insert<T: Serialize + ?Sized, S: Into<String>>(
        &mut self,
        key: S,
        val: &T,
    ) -> Result<()> {
        self.data.insert(key.into(), to_value(val)?);
        Ok(())
    }

    /// Appends the data of the `source` parameter to `self`, overwriting existing keys.
    pub fn extend(&mut self, mut source: Context) {
        self.data.append(&mut source.data);
    }

    /// Converts the context to a `serde_json::Value` consuming the context.
    pub fn into_json(self) -> Value {
        let mut m = Map::new();
        for (key, value) in self.data {
            m.insert(key, value);
        }
        Value::Object(m)
    }

    /// Takes a serde-json `Value` and convert it into a `Context` with no overhead/cloning.
    pub fn from_value(obj: Value) -> Result<Self> {
        match obj {
            Value::Object(m) => {
                let mut data = BTreeMap::new();
                for (key, value) in m {
                    data.insert(key, value);
                }
                Ok(Context { data })
            }
            _ => Err(Error::msg(
                "Creating a Context from a Value/Serialize requires it being a JSON object",
            )),
        }
    }

    /// Takes something that impl Serialize and create a context with it.
    /// Meant to be used if you have a hashmap or a struct and don't want to insert values
    /// one by one in the context.
    pub fn from_serialize(value: impl Serialize) -> Result<Self> {
        let obj = to_value(value).map_err(Error::json)?;
        Context::from_value(obj)
    }

    /// Returns the value at a given key index.
    pub fn get(&self, index: &str) -> Option<&Value> {
        self.data.get(index)
    }

    /// Remove a key from the context, returning the value at the key if the key was previously
    /// inserted into the context.
    pub fn remove(&mut self, index: &str) -> Option<Value> {
        self.data.remove(index)
    }

    /// Checks if a value exists at a specific index.
    pub fn contains_key(&self, index: &str) -> bool {
        self.data.contains_key(index)
    }
}

impl Default for Context {
    fn default() -> Context {
        Context::new()
    }
}

/// Resolves a dot-delimited path against a `Value`.
///
/// Traversal stops with `None` the moment a segment does not exist on the
/// current value. Numeric segments index into arrays, everything else is an
/// object key. Never panics.
pub fn dotted_pointer<'a>(value: &'a Value, pointer: &str) -> Option<&'a Value> {
    if pointer.is_empty() {
        return Some(value);
    }

    let mut current = value;
    for part in pointer.split('.') {
        match current {
            Value::Object(map) => match map.get(part) {
                Some(v) => current = v,
                None => return None,
            },
            Value::Array(list) => match part.parse::<usize>().ok().and_then(|i| list.get(i)) {
                Some(v) => current = v,
                None => return None,
            },
            _ => return None,
        }
    }

    Some(current)
}

/// Converts a `Value` to the string form used for substitution and equality
/// tests. Scalars render as themselves, `null` and compound values as the
/// empty string.
pub trait JsonRender {
    fn render(&self) -> String;
}

impl JsonRender for Value {
    fn render(&self) -> String {
        match *self {
            Value::String(ref s) => s.clone(),
            Value::Number(ref n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
        }
    }
}

/// Boolean coercion for conditional directives.
///
/// `true`/`false` pass through, `null` is false, numbers are false iff zero
/// and a string is false iff, trimmed and lowercased, it is empty or one of
/// the literal "no" spellings. Arrays and objects are always true.
pub trait JsonTruthy {
    fn is_truthy(&self) -> bool;
}

const FALSY_STRINGS: [&str; 6] = ["false", "0", "no", "нет", "null", "undefined"];

impl JsonTruthy for Value {
    fn is_truthy(&self) -> bool {
        match *self {
            Value::Bool(b) => b,
            Value::Null => false,
            Value::Number(ref n) => n.as_f64().map_or(true, |f| f != 0.0),
            Value::String(ref s) => {
                let s = s.trim().to_lowercase();
                !(s.is_empty() || FALSY_STRINGS.contains(&s.as_str()))
            }
            Value::Array(_) | Value::Object(_) => true,
        }
    }
}
