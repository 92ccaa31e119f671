//! Description quality for path items and operations.

use super::Rule;
use crate::document::{is_method, path_items, CRUD_METHODS};
use crate::models::{Issue, RuleResult, Severity, NOT_APPLICABLE};
use crate::utils::percent;
use serde_json::{Map, Value as Json};
use std::collections::HashSet;

pub const DEFAULT_MIN_LENGTH: usize = 10;

/// A description is meaningful when it is long enough, is not a TODO
/// placeholder, and uses more than three distinct words.
pub fn is_meaningful(desc: Option<&Json>, min_length: usize) -> bool {
    let Some(text) = desc.and_then(Json::as_str) else {
        return false;
    };
    let clean = text.trim();
    let words: Vec<&str> = clean.split_whitespace().collect();
    let distinct: HashSet<&str> = words.iter().copied().collect();
    clean.chars().count() >= min_length
        && !clean.starts_with("TODO")
        && distinct.len() > 3
        && !words.iter().all(|w| *w == words[0])
}

pub struct DescriptionsDocumentationRule {
    min_length: usize,
}

impl DescriptionsDocumentationRule {
    pub fn new(min_length: usize) -> Self {
        DescriptionsDocumentationRule { min_length }
    }

    fn meaningful(&self, obj: &Map<String, Json>) -> bool {
        is_meaningful(obj.get("description"), self.min_length)
    }
}

impl Default for DescriptionsDocumentationRule {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_LENGTH)
    }
}

impl Rule for DescriptionsDocumentationRule {
    fn id(&self) -> &'static str {
        "descriptions"
    }

    fn name(&self) -> &'static str {
        "Descriptions & Documentation"
    }

    fn weight(&self) -> u32 {
        20
    }

    fn apply(&self, doc: &Json) -> RuleResult {
        let mut issues = Vec::new();
        let mut total = 0usize;
        let mut valid = 0usize;

        for (path, item) in path_items(doc) {
            let Some(item) = item.as_object() else {
                continue;
            };

            // path-level descriptions are optional; only judged when present
            if item.contains_key("description") {
                total += 1;
                if self.meaningful(item) {
                    valid += 1;
                } else {
                    issues.push(Issue::new(
                        path.as_str(),
                        NOT_APPLICABLE,
                        format!("paths.{}.description", path),
                        Severity::Low,
                        "Missing or insufficient path-level description.",
                        "Add a helpful description to this path group.",
                    ));
                }
            }

            for (method, op) in item {
                let Some(op) = op.as_object().filter(|_| is_method(method, CRUD_METHODS)) else {
                    continue;
                };
                total += 1;
                if self.meaningful(op) {
                    valid += 1;
                } else {
                    issues.push(Issue::new(
                        path.as_str(),
                        method.as_str(),
                        format!("paths.{}.{}.description", path, method),
                        Severity::High,
                        "Missing or unhelpful operation description.",
                        "Add a meaningful description to this operation.",
                    ));
                }
            }
        }

        RuleResult::new(percent(valid, total).unwrap_or(100), issues)
    }
}
