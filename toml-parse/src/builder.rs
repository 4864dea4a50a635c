//! The mutable tree assembled while parsing, before it is materialized into
//! an immutable [`crate::value::Value`].

use indexmap::IndexMap;

use crate::value::{Number, Value};

/// A node in the tree under construction. Carries the `closed`/`defined`
/// bookkeeping the final value tree has no use for.
pub(crate) enum Builder {
    Object(ObjectBuilder),
    Array(ArrayBuilder),
    Scalar(Scalar),
}

pub(crate) struct ObjectBuilder {
    pub entries: IndexMap<String, Builder>,
    /// No further mutation permitted via any path: set for inline tables
    /// and (indirectly, via their container) for closed array-of-tables
    /// elements that have been superseded.
    pub closed: bool,
    /// Explicitly introduced by a table header or used as a dotted-key
    /// prefix, as opposed to auto-vivified while walking a path. Controls
    /// the "table redefined" check.
    pub defined: bool,
}

impl ObjectBuilder {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
            closed: false,
            defined: false,
        }
    }
}

pub(crate) struct ArrayBuilder {
    pub elements: Vec<Builder>,
    /// Set once an inline array literal `[...]` finishes. Arrays of tables
    /// are never closed during parsing so further `[[...]]` headers can
    /// append to them.
    pub closed: bool,
}

impl ArrayBuilder {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            closed: false,
        }
    }
}

pub(crate) enum Scalar {
    String(String),
    Bool(bool),
    Number(Number),
}

impl Builder {
    pub fn as_object_mut(&mut self) -> Option<&mut ObjectBuilder> {
        match self {
            Builder::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut ArrayBuilder> {
        match self {
            Builder::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn is_closed(&self) -> bool {
        match self {
            Builder::Object(o) => o.closed,
            Builder::Array(a) => a.closed,
            Builder::Scalar(_) => true,
        }
    }

    /// Converts the builder tree into the immutable value tree. Consumes
    /// `self` since nothing in the builder survives parsing.
    pub fn finalize(self) -> Value {
        match self {
            Builder::Object(o) => {
                let mut map = IndexMap::with_capacity(o.entries.len());
                for (key, child) in o.entries {
                    map.insert(key, child.finalize());
                }
                Value::Object(map)
            }
            Builder::Array(a) => Value::Array(a.elements.into_iter().map(Builder::finalize).collect()),
            Builder::Scalar(Scalar::String(s)) => Value::String(s),
            Builder::Scalar(Scalar::Bool(b)) => Value::Bool(b),
            Builder::Scalar(Scalar::Number(n)) => Value::Number(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finalize_preserves_insertion_order() {
        let mut root = ObjectBuilder::new();
        root.entries.insert("b".to_string(), Builder::Scalar(Scalar::Bool(true)));
        root.entries.insert("a".to_string(), Builder::Scalar(Scalar::Bool(false)));
        let value = Builder::Object(root).finalize();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }
}
