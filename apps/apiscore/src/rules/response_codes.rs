//! Response code coverage: every operation should declare at least one
//! success (2xx) and one error (4xx/5xx) response, using only standard
//! three-digit status codes.

use super::Rule;
use crate::document::{operations, HTTP_METHODS};
use crate::models::{Issue, RuleResult, Severity};
use crate::utils::percent;
use regex::Regex;
use serde_json::Value as Json;
use std::sync::OnceLock;

fn status_code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[1-5]\d{2}$").expect("static status code pattern"))
}

pub struct ResponseCodesRule;

impl Rule for ResponseCodesRule {
    fn id(&self) -> &'static str {
        "response-codes"
    }

    fn name(&self) -> &'static str {
        "Response Codes"
    }

    fn weight(&self) -> u32 {
        15
    }

    fn apply(&self, doc: &Json) -> RuleResult {
        let mut issues = Vec::new();
        let mut total = 0usize;
        let mut passed = 0usize;

        for op in operations(doc, HTTP_METHODS) {
            total += 1;
            let location = op.location("responses");
            let issue = |severity, description: String, suggestion: &str| {
                Issue::new(op.path, op.method, location.as_str(), severity, description, suggestion)
            };

            let responses = op
                .op
                .get("responses")
                .and_then(Json::as_object)
                .filter(|r| !r.is_empty());
            let Some(responses) = responses else {
                issues.push(issue(
                    Severity::High,
                    "Operation missing 'responses' definition.".into(),
                    "Add at least one success and one error response.",
                ));
                continue;
            };

            let mut invalid: Vec<&str> = Vec::new();
            let mut has_success = false;
            let mut has_error = false;
            for code in responses.keys() {
                if !status_code_re().is_match(code) {
                    invalid.push(code);
                    continue;
                }
                match code.parse::<u16>() {
                    Ok(200..=299) => has_success = true,
                    Ok(400..=599) => has_error = true,
                    _ => {}
                }
            }

            if !invalid.is_empty() {
                issues.push(issue(
                    Severity::Medium,
                    format!("Invalid HTTP response code(s): {}.", invalid.join(", ")),
                    "Use standard 3-digit HTTP status codes.",
                ));
            }
            if !has_success {
                issues.push(issue(
                    Severity::High,
                    "No success (2xx) response code defined.".into(),
                    "Add at least one 2xx status code to indicate success.",
                ));
            }
            if !has_error {
                issues.push(issue(
                    Severity::Medium,
                    "No error (4xx or 5xx) response code defined.".into(),
                    "Add at least one 4xx or 5xx status code to indicate errors.",
                ));
            }
            if has_success && has_error && invalid.is_empty() {
                passed += 1;
            }
        }

        RuleResult::new(percent(passed, total).unwrap_or(0), issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_apply_zero_score() {
        let doc = json!({"paths": {"/users": {"get": {}}}});
        let res = ResponseCodesRule.apply(&doc);
        assert_eq!(res.score, 0);
        assert_eq!(res.issues.len(), 1);
        assert_eq!(res.issues[0].location, "paths./users.get.responses");
        assert_eq!(res.issues[0].severity, Severity::High);
        assert!(res.issues[0].description.to_lowercase().contains("missing"));
    }

    #[test]
    fn test_empty_responses_fail() {
        let doc = json!({"paths": {"/users": {"get": {"responses": {}}}}});
        let res = ResponseCodesRule.apply(&doc);
        assert_eq!(res.score, 0);
        assert_eq!(res.issues.len(), 1);
        assert_eq!(res.issues[0].severity, Severity::High);
    }

    #[test]
    fn test_apply_full_score() {
        let doc = json!({"paths": {
            "/users": {"get": {"responses": {"200": {}, "400": {}}}},
            "/users/{id}": {"put": {"responses": {"204": {}, "404": {}}}}
        }});
        let res = ResponseCodesRule.apply(&doc);
        assert_eq!(res.score, 100);
        assert!(res.issues.is_empty());
    }

    #[test]
    fn test_invalid_code_only() {
        let doc = json!({"paths": {"/x": {"get": {"responses": {"abc": {}}}}}});
        let res = ResponseCodesRule.apply(&doc);
        let got: Vec<(Severity, &str)> = res
            .issues
            .iter()
            .map(|i| (i.severity, i.description.as_str()))
            .collect();
        assert_eq!(
            got,
            vec![
                (Severity::Medium, "Invalid HTTP response code(s): abc."),
                (Severity::High, "No success (2xx) response code defined."),
                (Severity::Medium, "No error (4xx or 5xx) response code defined."),
            ]
        );
        assert_eq!(res.score, 0);
    }

    #[test]
    fn test_apply_partial_score() {
        let doc = json!({"paths": {
            "/users": {"post": {"responses": {"201": {}}}},
            "/users/{id}": {"delete": {"responses": {"500": {}, "abc": {}, "default": {}}}},
            "/products": {"get": {"responses": {"200": {}, "404": {}}}}
        }});
        let res = ResponseCodesRule.apply(&doc);
        assert_eq!(res.score, 33);
        let locations: Vec<&str> = res.issues.iter().map(|i| i.location.as_str()).collect();
        assert!(locations.contains(&"paths./users.post.responses"));
        assert!(locations.contains(&"paths./users/{id}.delete.responses"));
        assert!(res
            .issues
            .iter()
            .any(|i| i.description == "Invalid HTTP response code(s): abc, default."));
    }

    #[test]
    fn test_no_operations_scores_zero_without_issues() {
        let res = ResponseCodesRule.apply(&json!({"paths": {"/a": {"summary": "x"}}}));
        assert_eq!(res.score, 0);
        assert!(res.issues.is_empty());
    }
}
