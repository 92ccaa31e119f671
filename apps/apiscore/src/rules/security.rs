//! Security scheme definition and coverage.

use super::Rule;
use crate::document::{object_at, operations, CRUD_METHODS};
use crate::models::{Issue, RuleResult, Severity, GLOBAL};
use crate::utils::percent;
use serde_json::Value as Json;
use std::collections::HashSet;

/// Scheme names referenced by a list of security requirement objects.
fn referenced_schemes(requirements: Option<&Json>) -> HashSet<&str> {
    requirements
        .and_then(Json::as_array)
        .into_iter()
        .flatten()
        .filter_map(Json::as_object)
        .flat_map(|req| req.keys())
        .filter(|k| !k.is_empty())
        .map(String::as_str)
        .collect()
}

pub struct SecurityRule;

impl Rule for SecurityRule {
    fn id(&self) -> &'static str {
        "security"
    }

    fn name(&self) -> &'static str {
        "Security"
    }

    fn weight(&self) -> u32 {
        10
    }

    fn apply(&self, doc: &Json) -> RuleResult {
        let mut issues = Vec::new();
        let defined: HashSet<&str> = object_at(doc, &["components", "securitySchemes"])
            .map(|m| m.keys().map(String::as_str).collect())
            .unwrap_or_default();

        if defined.is_empty() {
            issues.push(Issue::new(
                "components.securitySchemes",
                GLOBAL,
                "components.securitySchemes",
                Severity::High,
                "No security schemes defined",
                "Define security schemes (e.g., API key, OAuth2) under components.securitySchemes",
            ));
        }

        let document_security = doc.get("security");
        let mut total = 0usize;
        let mut secured = 0usize;
        for op in operations(doc, CRUD_METHODS) {
            total += 1;
            // an operation-level key overrides the default, even when empty
            let effective = match op.op.get("security") {
                Some(sec) => Some(sec),
                None => document_security,
            };
            let referenced = referenced_schemes(effective);
            if !referenced.is_disjoint(&defined) {
                secured += 1;
            } else if !defined.is_empty() {
                issues.push(Issue::new(
                    op.path,
                    op.method.to_uppercase(),
                    op.location("security"),
                    Severity::High,
                    "No valid security scheme referenced",
                    "Reference at least one defined security scheme",
                ));
            }
        }

        match percent(secured, total) {
            Some(score) => RuleResult::new(score, issues),
            None => {
                issues.push(Issue::new(
                    "paths",
                    GLOBAL,
                    "paths",
                    Severity::High,
                    "No operations defined in the OpenAPI specification to evaluate security",
                    "Define at least one path and operation (e.g., GET, POST) to apply security rules",
                ));
                RuleResult::new(0, issues)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn api_key_schemes() -> Json {
        json!({"securitySchemes": {"ApiKeyAuth": {"type": "apiKey", "in": "header", "name": "X-API-Key"}}})
    }

    #[test]
    fn test_no_schemes_defined() {
        let doc = json!({"paths": {"/users": {"get": {}, "post": {}}}, "components": {}});
        let res = SecurityRule.apply(&doc);
        assert_eq!(res.score, 0);
        assert_eq!(res.issues.len(), 1);
        assert_eq!(res.issues[0].location, "components.securitySchemes");
        assert_eq!(res.issues[0].operation, GLOBAL);
        assert_eq!(res.issues[0].severity, Severity::High);
    }

    #[test]
    fn test_apply_full_score() {
        let doc = json!({
            "paths": {"/users": {"get": {"security": [{"ApiKeyAuth": []}]}}},
            "components": api_key_schemes()
        });
        let res = SecurityRule.apply(&doc);
        assert_eq!(res.score, 100);
        assert!(res.issues.is_empty());
    }

    #[test]
    fn test_apply_partial_score() {
        let doc = json!({
            "paths": {
                "/users": {"get": {"security": [{"ApiKeyAuth": []}]}},
                "/admin": {"post": {}}
            },
            "components": api_key_schemes()
        });
        let res = SecurityRule.apply(&doc);
        assert_eq!(res.score, 50);
        assert_eq!(res.issues.len(), 1);
        assert_eq!(res.issues[0].location, "paths./admin.post.security");
        assert_eq!(res.issues[0].operation, "POST");
    }

    #[test]
    fn test_undefined_scheme_reference() {
        let doc = json!({
            "paths": {"/users": {"get": {"security": [{"OAuth": ["read"]}]}}},
            "components": api_key_schemes()
        });
        let res = SecurityRule.apply(&doc);
        assert_eq!(res.score, 0);
        assert_eq!(res.issues.len(), 1);
        assert_eq!(res.issues[0].location, "paths./users.get.security");
    }

    #[test]
    fn test_document_default_and_explicit_opt_out() {
        let doc = json!({
            "security": [{"ApiKeyAuth": []}],
            "paths": {
                "/users": {"get": {}},
                "/health": {"get": {"security": []}}
            },
            "components": api_key_schemes()
        });
        let res = SecurityRule.apply(&doc);
        assert_eq!(res.score, 50);
        assert_eq!(res.issues.len(), 1);
        assert_eq!(res.issues[0].path, "/health");
    }

    #[test]
    fn test_no_operations() {
        let res = SecurityRule.apply(&json!({"paths": {}, "components": api_key_schemes()}));
        assert_eq!(res.score, 0);
        assert_eq!(res.issues.len(), 1);
        assert_eq!(res.issues[0].location, "paths");
    }
}
