//! Read-only accessors over a parsed OpenAPI document.
//!
//! Documents are plain `serde_json::Value` trees. Each accessor checks the
//! shape it expects and yields nothing when the shape differs, so rules can
//! treat absent or malformed structure as "no relevant items".

use serde_json::{Map, Value as Json};

/// Every HTTP method an OpenAPI path item may declare an operation under.
pub const HTTP_METHODS: &[&str] = &["get", "post", "put", "delete", "patch", "head", "options"];

/// Methods inspected by the documentation, example and security rules.
pub const CRUD_METHODS: &[&str] = &["get", "post", "put", "delete", "patch"];

/// An operation object together with the path and method key it sits under.
#[derive(Debug, Clone, Copy)]
pub struct OperationRef<'a> {
    pub path: &'a str,
    /// Method key as written in the document (not normalized).
    pub method: &'a str,
    pub op: &'a Map<String, Json>,
}

impl<'a> OperationRef<'a> {
    /// `paths.<path>.<method>` followed by `suffix` when non-empty.
    pub fn location(&self, suffix: &str) -> String {
        if suffix.is_empty() {
            format!("paths.{}.{}", self.path, self.method)
        } else {
            format!("paths.{}.{}.{}", self.path, self.method, suffix)
        }
    }
}

/// Follow `keys` through nested objects and return the object found there.
pub fn object_at<'a>(doc: &'a Json, keys: &[&str]) -> Option<&'a Map<String, Json>> {
    value_at(doc, keys)?.as_object()
}

/// Follow `keys` through nested objects and return the value found there.
pub fn value_at<'a>(doc: &'a Json, keys: &[&str]) -> Option<&'a Json> {
    let mut cur = doc;
    for key in keys {
        cur = cur.as_object()?.get(*key)?;
    }
    Some(cur)
}

/// Entries of the `paths` object in document order.
pub fn path_items(doc: &Json) -> impl Iterator<Item = (&String, &Json)> {
    object_at(doc, &["paths"]).into_iter().flat_map(|m| m.iter())
}

/// Case-insensitive membership test for a method key.
pub fn is_method(key: &str, methods: &[&str]) -> bool {
    methods.iter().any(|m| key.eq_ignore_ascii_case(m))
}

/// Object-valued operations under any of `methods`, path by path in
/// document order. Non-object path items and operations are skipped.
pub fn operations<'a>(
    doc: &'a Json,
    methods: &'a [&'a str],
) -> impl Iterator<Item = OperationRef<'a>> + 'a {
    path_items(doc)
        .filter_map(|(path, item)| item.as_object().map(|item| (path, item)))
        .flat_map(move |(path, item)| {
            item.iter()
                .filter(move |(method, _)| is_method(method, methods))
                .filter_map(move |(method, op)| {
                    op.as_object().map(|op| OperationRef {
                        path: path.as_str(),
                        method: method.as_str(),
                        op,
                    })
                })
        })
}

/// Truthiness in the loose sense used across the rules: null, false, zero
/// and empty strings/arrays/objects are falsy.
pub fn is_truthy(v: &Json) -> bool {
    match v {
        Json::Null => false,
        Json::Bool(b) => *b,
        Json::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Json::String(s) => !s.is_empty(),
        Json::Array(a) => !a.is_empty(),
        Json::Object(o) => !o.is_empty(),
    }
}
