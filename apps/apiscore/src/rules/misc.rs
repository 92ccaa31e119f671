//! Document-wide best practices: versioning, servers, tags, and reusable
//! components. Each check is worth a quarter of the score.

use super::Rule;
use crate::document::{is_truthy, object_at, path_items, value_at};
use crate::models::{Issue, RuleResult, Severity, GLOBAL};
use crate::utils::percent;
use serde_json::Value as Json;

const REUSABLE_GROUPS: &[&str] = &[
    "schemas",
    "responses",
    "parameters",
    "examples",
    "headers",
    "requestBodies",
];

fn has_version(doc: &Json) -> bool {
    value_at(doc, &["info", "version"])
        .and_then(Json::as_str)
        .is_some_and(|v| !v.trim().is_empty())
}

fn has_servers(doc: &Json) -> bool {
    doc.get("servers")
        .and_then(Json::as_array)
        .is_some_and(|s| !s.is_empty())
}

fn uses_tags(doc: &Json) -> bool {
    path_items(doc)
        .filter_map(|(_, item)| item.as_object())
        .flat_map(|item| item.values())
        .filter_map(Json::as_object)
        .any(|op| op.contains_key("tags"))
}

fn has_reusable_components(doc: &Json) -> bool {
    object_at(doc, &["components"]).is_some_and(|c| {
        REUSABLE_GROUPS
            .iter()
            .any(|g| c.get(*g).is_some_and(is_truthy))
    })
}

pub struct MiscellaneousBestPracticesRule;

impl Rule for MiscellaneousBestPracticesRule {
    fn id(&self) -> &'static str {
        "misc"
    }

    fn name(&self) -> &'static str {
        "Miscellaneous Best Practices"
    }

    fn weight(&self) -> u32 {
        10
    }

    fn apply(&self, doc: &Json) -> RuleResult {
        type Check = (fn(&Json) -> bool, &'static str, Severity, &'static str, &'static str);
        let checks: [Check; 4] = [
            (
                has_version,
                "info.version",
                Severity::Medium,
                "API version is missing or empty.",
                "Set the version in 'info.version' (e.g., '1.0.0').",
            ),
            (
                has_servers,
                "servers",
                Severity::Medium,
                "No servers defined.",
                "Include at least one server in the 'servers' array.",
            ),
            (
                uses_tags,
                "paths",
                Severity::Low,
                "No tags used in operations.",
                "Add tags to operations to help group and organize endpoints.",
            ),
            (
                has_reusable_components,
                "components",
                Severity::Low,
                "No reusable components found.",
                "Define common schemas, responses, or parameters under 'components' for reuse.",
            ),
        ];

        let total = checks.len();
        let mut issues = Vec::new();
        let mut passed = 0usize;
        for (check, location, severity, description, suggestion) in checks {
            if check(doc) {
                passed += 1;
            } else {
                issues.push(Issue::new(location, GLOBAL, location, severity, description, suggestion));
            }
        }
        RuleResult::new(percent(passed, total).unwrap_or(100), issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_apply_zero_score() {
        let doc = json!({
            "info": {},
            "servers": [],
            "paths": {"/path": {"get": {}}},
            "components": {}
        });
        let res = MiscellaneousBestPracticesRule.apply(&doc);
        assert_eq!(res.score, 0);
        let paths: Vec<&str> = res.issues.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["info.version", "servers", "paths", "components"]);
        assert!(res.issues.iter().all(|i| i.operation == GLOBAL));
    }

    #[test]
    fn test_apply_full_score() {
        let doc = json!({
            "info": {"version": "1.0.0"},
            "servers": [{"url": "https://api.example.com"}],
            "paths": {"/path": {"get": {"tags": ["example"]}}},
            "components": {"schemas": {"MySchema": {"type": "object"}}}
        });
        let res = MiscellaneousBestPracticesRule.apply(&doc);
        assert_eq!(res.score, 100);
        assert!(res.issues.is_empty());
    }

    #[test]
    fn test_apply_partial_score() {
        let doc = json!({
            "info": {"version": "  "},
            "servers": [{"url": "https://api.example.com"}],
            "paths": {"/path": {"get": {}}},
            "components": {}
        });
        let res = MiscellaneousBestPracticesRule.apply(&doc);
        assert_eq!(res.score, 25);
        let paths: Vec<&str> = res.issues.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["info.version", "paths", "components"]);
    }

    #[test]
    fn test_wrong_shapes_count_as_missing() {
        let doc = json!({
            "info": {"version": 2},
            "servers": {"url": "https://api.example.com"},
            "paths": ["/a"],
            "components": {"schemas": {}, "securitySchemes": {"k": {}}}
        });
        let res = MiscellaneousBestPracticesRule.apply(&doc);
        assert_eq!(res.score, 0);
        assert_eq!(res.issues.len(), 4);
    }
}
