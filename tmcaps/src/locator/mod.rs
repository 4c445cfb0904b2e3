//! Discovery of capture objects inside a grammar document.
//!
//! A grammar attaches capture objects to a rule through one of the keys in
//! [`CAPTURE_KEYS`]. Rules can live almost anywhere: in `patterns` arrays, in
//! the named `repository`, nested under `begin`/`end` rules, or inside another
//! capture's own `patterns`. The walk therefore descends into every object and
//! array, and labels each hit with the route it took from the document root.

use serde_json::{Map, Value};

/// Keys whose object value is a capture object, in the order they are checked.
pub const CAPTURE_KEYS: [&str; 4] = ["captures", "beginCaptures", "endCaptures", "whileCaptures"];

/// Keys that hold collections of rule definitions, either positional or named.
const RULE_COLLECTION_KEYS: [&str; 2] = ["patterns", "repository"];

/// A capture object and where it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureLocation<'a> {
    pub path: String,
    pub object: &'a Map<String, Value>,
}

impl CaptureLocation<'_> {
    /// Keys of the capture object, in document order.
    pub fn keys(&self) -> Vec<String> {
        self.object.keys().cloned().collect()
    }
}

/// Find every capture object reachable from `value`.
///
/// Results are depth-first, following object key order and array element
/// order, so identical input always yields the same sequence. The walk keeps
/// its own stack, so nesting depth is bounded by memory rather than the call
/// stack.
pub fn find_capture_objects<'a>(value: &'a Value, path: &str) -> Vec<CaptureLocation<'a>> {
    let mut found = Vec::new();
    let mut pending: Vec<(&'a Value, String)> = vec![(value, path.to_string())];

    while let Some((node, path)) = pending.pop() {
        let children = visit(node, &path, &mut found);
        // Reversed so the first child is visited next.
        pending.extend(children.into_iter().rev());
    }

    found
}

/// Record the capture objects held directly by `node` and return the children
/// to descend into, in document order.
fn visit<'a>(
    node: &'a Value,
    path: &str,
    found: &mut Vec<CaptureLocation<'a>>,
) -> Vec<(&'a Value, String)> {
    let mut children = Vec::new();
    match node {
        Value::Object(map) => {
            for capture_key in CAPTURE_KEYS {
                if let Some(Value::Object(object)) = map.get(capture_key) {
                    found.push(CaptureLocation {
                        path: format!("{path}.{capture_key}"),
                        object,
                    });
                }
            }

            for (key, child) in map {
                if RULE_COLLECTION_KEYS.contains(&key.as_str()) {
                    rule_collection_children(child, &format!("{path}.{key}"), &mut children);
                } else if child.is_object() || child.is_array() {
                    children.push((child, format!("{path}.{key}")));
                }
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                children.push((item, format!("{path}[{i}]")));
            }
        }
        _ => {}
    }
    children
}

/// `patterns` is normally an array and `repository` a map of named rules, but
/// either shape is accepted under both keys.
fn rule_collection_children<'a>(
    value: &'a Value,
    path: &str,
    children: &mut Vec<(&'a Value, String)>,
) {
    match value {
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                children.push((item, format!("{path}[{i}]")));
            }
        }
        Value::Object(members) => {
            for (name, member) in members {
                children.push((member, format!("{path}.{name}")));
            }
        }
        _ => {}
    }
}
