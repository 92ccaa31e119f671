//! Schema structure checks.
//!
//! Every schema reachable under a `schema` key inside an operation, plus
//! every named schema in `components.schemas`, must declare a recognized
//! type with enough structure to be unambiguous. `$ref` schemas are trusted.

use super::Rule;
use crate::document::{is_truthy, object_at, path_items};
use crate::models::{Issue, RuleResult, Severity, NOT_APPLICABLE};
use crate::utils::percent;
use serde_json::Value as Json;

const VALID_TYPES: &[&str] = &["string", "number", "integer", "boolean", "array", "object"];
const COMBINATORS: &[&str] = &["allOf", "anyOf", "oneOf"];

/// Why a schema was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaDefect {
    NotAnObject,
    MissingType,
    InvalidType(String),
    FreeFormObject,
    MissingItems,
}

impl SchemaDefect {
    pub fn description(&self) -> String {
        match self {
            SchemaDefect::NotAnObject => "Schema is not a dictionary.".into(),
            SchemaDefect::MissingType => "Missing 'type' in schema.".into(),
            SchemaDefect::InvalidType(t) => format!("Invalid schema type: {}.", t),
            SchemaDefect::FreeFormObject => "Free-form object without defined structure.".into(),
            SchemaDefect::MissingItems => "Missing or invalid 'items' in array schema.".into(),
        }
    }

    pub fn suggestion(&self) -> &'static str {
        match self {
            SchemaDefect::NotAnObject => "Ensure the schema is a valid object.",
            SchemaDefect::MissingType => "Add a 'type' field, such as 'object', to the schema.",
            SchemaDefect::InvalidType(_) => "Use a valid type like 'object', 'array', etc.",
            SchemaDefect::FreeFormObject => "Define 'properties' or use a valid structure.",
            SchemaDefect::MissingItems => "Add an 'items' field with a valid schema.",
        }
    }
}

/// Check one schema, recursing into `items` and object-valued
/// `additionalProperties`.
pub fn check_schema(schema: &Json) -> Result<(), SchemaDefect> {
    let Some(obj) = schema.as_object() else {
        return Err(SchemaDefect::NotAnObject);
    };
    if obj.contains_key("$ref") {
        return Ok(());
    }
    let ty = match obj.get("type") {
        Some(t) if !is_truthy(t) => return Err(SchemaDefect::MissingType),
        None => return Err(SchemaDefect::MissingType),
        Some(Json::String(s)) => s.as_str(),
        Some(other) => return Err(SchemaDefect::InvalidType(other.to_string())),
    };
    if !VALID_TYPES.contains(&ty) {
        return Err(SchemaDefect::InvalidType(ty.to_string()));
    }
    match ty {
        "object" => {
            let has_props = obj.get("properties").is_some_and(Json::is_object);
            let has_combinator = COMBINATORS.iter().any(|k| obj.contains_key(*k));
            if has_props || has_combinator {
                return Ok(());
            }
            match obj.get("additionalProperties") {
                Some(Json::Bool(false)) => Ok(()),
                Some(ap @ Json::Object(_)) => check_schema(ap),
                _ => Err(SchemaDefect::FreeFormObject),
            }
        }
        "array" => match obj.get("items") {
            Some(items @ Json::Object(_)) => check_schema(items),
            _ => Err(SchemaDefect::MissingItems),
        },
        _ => Ok(()),
    }
}

/// A schema found in the document and where it was found.
#[derive(Debug)]
pub struct FoundSchema<'a> {
    pub schema: &'a Json,
    pub location: String,
    pub path: String,
    pub operation: String,
}

/// Operation schemas first (document order), then `components.schemas`.
pub fn collect_schemas(doc: &Json) -> Vec<FoundSchema<'_>> {
    let mut found = Vec::new();
    for (path, item) in path_items(doc) {
        let Some(item) = item.as_object() else {
            continue;
        };
        for (method, op) in item {
            if !op.is_object() {
                continue;
            }
            let ctx = format!("paths.{}.{}", path, method);
            walk(op, &ctx, path, method, &mut found);
        }
    }
    if let Some(schemas) = object_at(doc, &["components", "schemas"]) {
        for (name, schema) in schemas {
            found.push(FoundSchema {
                schema,
                location: format!("components.schemas.{}", name),
                path: NOT_APPLICABLE.into(),
                operation: NOT_APPLICABLE.into(),
            });
        }
    }
    found
}

fn walk<'a>(v: &'a Json, ctx: &str, path: &str, operation: &str, out: &mut Vec<FoundSchema<'a>>) {
    match v {
        Json::Object(obj) => {
            if let Some(schema) = obj.get("schema") {
                out.push(FoundSchema {
                    schema,
                    location: format!("{}.schema", ctx),
                    path: path.to_string(),
                    operation: operation.to_string(),
                });
            }
            for (k, child) in obj {
                walk(child, &format!("{}.{}", ctx, k), path, operation, out);
            }
        }
        Json::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                walk(child, &format!("{}[{}]", ctx, i), path, operation, out);
            }
        }
        _ => {}
    }
}

pub struct SchemaTypesRule;

impl Rule for SchemaTypesRule {
    fn id(&self) -> &'static str {
        "schema-types"
    }

    fn name(&self) -> &'static str {
        "Schema & Types"
    }

    fn weight(&self) -> u32 {
        20
    }

    fn apply(&self, doc: &Json) -> RuleResult {
        let schemas = collect_schemas(doc);
        let mut issues = Vec::new();
        let mut valid = 0usize;
        for found in &schemas {
            match check_schema(found.schema) {
                Ok(()) => valid += 1,
                Err(defect) => issues.push(Issue::new(
                    found.path.as_str(),
                    found.operation.as_str(),
                    found.location.as_str(),
                    Severity::High,
                    defect.description(),
                    defect.suggestion(),
                )),
            }
        }
        let score = percent(valid, schemas.len()).unwrap_or(100);
        RuleResult::new(score, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response_with_schema(schema: Json) -> Json {
        json!({
            "get": {
                "responses": {
                    "200": {
                        "description": "desc",
                        "content": {"application/json": {"schema": schema}}
                    }
                }
            }
        })
    }

    #[test]
    fn test_check_schema_variants() {
        assert_eq!(check_schema(&json!({"type": "object"})), Err(SchemaDefect::FreeFormObject));
        assert_eq!(
            check_schema(&json!({"type": "object", "properties": {"id": {"type": "string"}}})),
            Ok(())
        );
        assert_eq!(check_schema(&json!({"$ref": "#/components/schemas/X"})), Ok(()));
        assert_eq!(check_schema(&json!({"type": "string"})), Ok(()));
        assert_eq!(check_schema(&json!({"format": "uuid"})), Err(SchemaDefect::MissingType));
        assert_eq!(
            check_schema(&json!({"type": "file"})),
            Err(SchemaDefect::InvalidType("file".into()))
        );
        assert_eq!(check_schema(&json!("string")), Err(SchemaDefect::NotAnObject));
        assert_eq!(check_schema(&json!({"type": "object", "oneOf": []})), Ok(()));
        assert_eq!(
            check_schema(&json!({"type": "object", "additionalProperties": false})),
            Ok(())
        );
        assert_eq!(
            check_schema(&json!({"type": "object", "additionalProperties": true})),
            Err(SchemaDefect::FreeFormObject)
        );
        assert_eq!(
            check_schema(&json!({"type": "object", "additionalProperties": {"type": "array"}})),
            Err(SchemaDefect::MissingItems)
        );
        assert_eq!(check_schema(&json!({"type": "array"})), Err(SchemaDefect::MissingItems));
        assert_eq!(
            check_schema(&json!({"type": "array", "items": {"type": "integer"}})),
            Ok(())
        );
        assert_eq!(
            check_schema(&json!({"type": "array", "items": {"type": "object"}})),
            Err(SchemaDefect::FreeFormObject)
        );
        assert!(matches!(
            check_schema(&json!({"type": ["string", "null"]})),
            Err(SchemaDefect::InvalidType(_))
        ));
    }

    #[test]
    fn test_falsy_type_counts_as_missing() {
        for ty in [json!(false), json!(0), json!([]), json!({}), json!("")] {
            assert_eq!(
                check_schema(&json!({"type": ty})),
                Err(SchemaDefect::MissingType)
            );
        }
        assert!(matches!(
            check_schema(&json!({"type": 7})),
            Err(SchemaDefect::InvalidType(_))
        ));
    }

    #[test]
    fn test_apply_zero_score() {
        let doc = json!({
            "paths": {"/test": response_with_schema(json!({"type": "object"}))},
            "components": {"schemas": {"InvalidSchema": {"type": "object"}}}
        });
        let res = SchemaTypesRule.apply(&doc);
        assert_eq!(res.score, 0);
        assert_eq!(res.issues.len(), 2);
        assert_eq!(
            res.issues[0].location,
            "paths./test.get.responses.200.content.application/json.schema"
        );
        assert_eq!(res.issues[0].path, "/test");
        assert_eq!(res.issues[0].operation, "get");
        assert_eq!(res.issues[1].location, "components.schemas.InvalidSchema");
        assert_eq!(res.issues[1].operation, NOT_APPLICABLE);
        assert!(res.issues.iter().all(|i| i.severity == Severity::High));
    }

    #[test]
    fn test_apply_full_score() {
        let doc = json!({
            "paths": {"/test": response_with_schema(json!({"$ref": "#/components/schemas/ValidSchema"}))},
            "components": {"schemas": {"ValidSchema": {
                "type": "object",
                "properties": {"id": {"type": "string"}, "value": {"type": "integer"}}
            }}}
        });
        let res = SchemaTypesRule.apply(&doc);
        assert_eq!(res.score, 100);
        assert!(res.issues.is_empty());
    }

    #[test]
    fn test_apply_partial_score() {
        let doc = json!({
            "paths": {"/test": response_with_schema(json!({
                "type": "object",
                "properties": {"name": {"type": "string"}}
            }))},
            "components": {"schemas": {
                "ValidSchema": {"type": "object", "properties": {"id": {"type": "string"}}},
                "InvalidSchema": {"type": "object"}
            }}
        });
        let res = SchemaTypesRule.apply(&doc);
        assert_eq!(res.score, 67);
        assert_eq!(res.issues.len(), 1);
        assert_eq!(res.issues[0].description, "Free-form object without defined structure.");
    }

    #[test]
    fn test_parameter_schemas_use_bracketed_locations() {
        let doc = json!({"paths": {"/u/{id}": {
            "parameters": [{"name": "id", "schema": {"type": "string"}}],
            "get": {"parameters": [{"name": "q", "in": "query", "schema": {}}]}
        }}});
        let res = SchemaTypesRule.apply(&doc);
        // path-level parameters (an array) are not walked
        assert_eq!(res.issues.len(), 1);
        assert_eq!(res.issues[0].location, "paths./u/{id}.get.parameters[0].schema");
        assert_eq!(res.issues[0].description, "Missing 'type' in schema.");
        assert_eq!(res.score, 0);
    }

    #[test]
    fn test_no_schemas_scores_full() {
        let res = SchemaTypesRule.apply(&json!({"paths": {"/a": {"get": {}}}}));
        assert_eq!(res.score, 100);
        assert!(res.issues.is_empty());
    }
}
