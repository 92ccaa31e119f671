//! Example coverage for request and response payloads.
//!
//! Request bodies are only expected to carry examples on POST/PUT/PATCH;
//! GET and DELETE are exempt from the request-side check. Responses pass
//! when any declared media type carries `example` or `examples`.

use super::Rule;
use crate::document::{operations, CRUD_METHODS};
use crate::models::{Issue, RuleResult, Severity};
use crate::utils::percent;
use serde_json::{Map, Value as Json};

const REQUIRE_REQUEST_EXAMPLES: &[&str] = &["post", "put", "patch"];

fn has_example(media: &Json) -> bool {
    media
        .as_object()
        .is_some_and(|m| m.contains_key("example") || m.contains_key("examples"))
}

/// `content` mapping of a request body or response object, if any.
fn content_of(obj: Option<&Json>) -> Option<&Map<String, Json>> {
    obj?.as_object()?.get("content")?.as_object()
}

fn content_has_example(content: Option<&Map<String, Json>>) -> bool {
    content.is_some_and(|c| c.values().any(has_example))
}

pub struct ExamplesSamplesRule;

impl Rule for ExamplesSamplesRule {
    fn id(&self) -> &'static str {
        "examples"
    }

    fn name(&self) -> &'static str {
        "Examples & Samples"
    }

    fn weight(&self) -> u32 {
        10
    }

    fn apply(&self, doc: &Json) -> RuleResult {
        let mut issues = Vec::new();
        let mut total = 0usize;
        let mut passed = 0usize;

        for op in operations(doc, CRUD_METHODS) {
            total += 1;
            let label = op.method.to_uppercase();

            let needs_request = REQUIRE_REQUEST_EXAMPLES
                .iter()
                .any(|m| op.method.eq_ignore_ascii_case(m));
            let mut has_request_example = !needs_request;
            if needs_request {
                let content = content_of(op.op.get("requestBody"));
                has_request_example = content_has_example(content);
                // operations without a request body are not penalized
                if !has_request_example && content.is_some_and(|c| !c.is_empty()) {
                    issues.push(Issue::new(
                        op.path,
                        label.as_str(),
                        op.location("requestBody"),
                        Severity::Medium,
                        "Missing request example",
                        "Add an 'example' or 'examples' field to requestBody content",
                    ));
                }
            }

            let responses = op.op.get("responses").and_then(Json::as_object);
            let has_response_example = responses.is_some_and(|r| {
                r.values()
                    .any(|resp| content_has_example(content_of(Some(resp))))
            });
            if !has_response_example && responses.is_some_and(|r| !r.is_empty()) {
                issues.push(Issue::new(
                    op.path,
                    label.as_str(),
                    op.location("responses"),
                    Severity::Medium,
                    "Missing response example",
                    "Add an 'example' or 'examples' field to response content",
                ));
            }

            if has_request_example && has_response_example {
                passed += 1;
            }
        }

        RuleResult::new(percent(passed, total).unwrap_or(0), issues)
    }
}
