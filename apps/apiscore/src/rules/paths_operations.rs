//! Path design checks: near-duplicate paths, verbs in paths, and HTTP
//! method usage relative to path parameters.
//!
//! Paths are compared in normalized form: query string dropped, lowercased,
//! trailing slashes removed and every `{param}` collapsed to `{id}`.

use super::Rule;
use crate::document::path_items;
use crate::models::{Issue, RuleResult, Severity, GLOBAL, NOT_APPLICABLE};
use crate::utils::percent;
use regex::Regex;
use serde_json::Value as Json;
use std::collections::HashSet;
use std::sync::OnceLock;

pub const DEFAULT_HTTP_METHODS: &[&str] =
    &["get", "post", "put", "delete", "patch", "head", "options"];
pub const DEFAULT_VERBS: &[&str] = &[
    "get", "create", "update", "delete", "set", "fetch", "retrieve", "post",
];
pub const DEFAULT_ALLOWED_POST_PATTERNS: &[&str] =
    &["/{id}/actions/", "/{id}/activate", "/{id}/deactivate"];

fn param_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{[^}]+\}").expect("static path parameter pattern"))
}

/// Canonical form of a path template used for conflict and verb detection.
pub fn normalize_path(path: &str) -> String {
    let base = path.split('?').next().unwrap_or_default().to_lowercase();
    let trimmed = base.trim_end_matches('/');
    param_re().replace_all(trimmed, "{id}").into_owned()
}

/// True when `full` continues `prefix` at a segment boundary
/// (`/a` → `/a/b`, but not `/ab`).
fn is_segment_prefix(prefix: &str, full: &str) -> bool {
    full.len() > prefix.len()
        && full.starts_with(prefix)
        && full.as_bytes()[prefix.len()] == b'/'
}

pub struct PathsOperationsRule {
    http_methods: Vec<String>,
    verbs: HashSet<String>,
    allowed_post_patterns: Vec<String>,
}

impl PathsOperationsRule {
    /// Empty option lists fall back to the defaults.
    pub fn new(http_methods: &[String], verbs: &[String], allowed_post_patterns: &[String]) -> Self {
        fn or_default(given: &[String], default: &[&str]) -> Vec<String> {
            if given.is_empty() {
                default.iter().map(|s| s.to_string()).collect()
            } else {
                given.to_vec()
            }
        }
        PathsOperationsRule {
            http_methods: or_default(http_methods, DEFAULT_HTTP_METHODS)
                .into_iter()
                .map(|m| m.to_lowercase())
                .collect(),
            verbs: or_default(verbs, DEFAULT_VERBS)
                .into_iter()
                .map(|v| v.to_lowercase())
                .collect(),
            allowed_post_patterns: or_default(allowed_post_patterns, DEFAULT_ALLOWED_POST_PATTERNS),
        }
    }

    fn contains_verb(&self, normalized: &str) -> bool {
        normalized
            .trim_matches('/')
            .split('/')
            .filter(|seg| !seg.starts_with('{'))
            .any(|seg| self.verbs.contains(&seg.to_lowercase()))
    }

    fn is_allowed_post_with_id(&self, normalized: &str) -> bool {
        // Normalization drops the trailing slash that some patterns end with.
        let probe = format!("{}/", normalized);
        self.allowed_post_patterns
            .iter()
            .any(|p| probe.contains(p.as_str()))
    }

    /// Original path of the first recorded path that `normalized` collides with.
    fn find_conflict<'s>(normalized: &str, seen: &'s [(String, String)]) -> Option<&'s str> {
        if let Some((_, original)) = seen.iter().find(|(n, _)| n == normalized) {
            return Some(original.as_str());
        }
        seen.iter()
            .find(|(n, _)| is_segment_prefix(normalized, n) || is_segment_prefix(n, normalized))
            .map(|(_, original)| original.as_str())
    }

    fn method_usage_issue(&self, path: &str, normalized: &str, method: &str) -> Option<(String, String)> {
        let has_param = param_re().is_match(path);
        match method {
            "post" if has_param && !self.is_allowed_post_with_id(normalized) => Some((
                "POST should not be used with resource IDs (except for RPC actions).".into(),
                "Use POST on collection resources (e.g., /users) or add to allowed RPC patterns."
                    .into(),
            )),
            "put" | "delete" if !has_param => Some((
                format!(
                    "{} operations should target specific resources.",
                    method.to_uppercase()
                ),
                "Include an ID parameter (e.g., /users/{id}).".into(),
            )),
            _ => None,
        }
    }
}

impl Default for PathsOperationsRule {
    fn default() -> Self {
        Self::new(&[], &[], &[])
    }
}

impl Rule for PathsOperationsRule {
    fn id(&self) -> &'static str {
        "paths-operations"
    }

    fn name(&self) -> &'static str {
        "Paths & Operations"
    }

    fn weight(&self) -> u32 {
        15
    }

    fn apply(&self, doc: &Json) -> RuleResult {
        let mut issues = Vec::new();
        // (normalized, original) in first-seen order
        let mut seen: Vec<(String, String)> = Vec::new();
        let mut total = 0usize;
        let mut passed = 0usize;

        for (path, item) in path_items(doc) {
            let normalized = normalize_path(path);

            total += 1;
            match Self::find_conflict(&normalized, &seen) {
                Some(original) => issues.push(Issue::new(
                    path.as_str(),
                    NOT_APPLICABLE,
                    "paths",
                    Severity::Medium,
                    format!("Potential path conflict with '{}'.", original),
                    "Ensure paths are distinct or consolidate similar endpoints.",
                )),
                None => {
                    seen.push((normalized.clone(), path.clone()));
                    passed += 1;
                }
            }

            total += 1;
            if self.contains_verb(&normalized) {
                issues.push(Issue::new(
                    path.as_str(),
                    NOT_APPLICABLE,
                    "paths",
                    Severity::Low,
                    "Path contains a verb, which is discouraged in REST APIs.",
                    "Use nouns for resources (e.g., /users instead of /getUser).",
                ));
            } else {
                passed += 1;
            }

            let Some(item) = item.as_object() else {
                continue;
            };
            for method in item.keys() {
                let lower = method.to_lowercase();
                if !self.http_methods.contains(&lower) {
                    continue;
                }
                total += 1;
                match self.method_usage_issue(path, &normalized, &lower) {
                    Some((description, suggestion)) => issues.push(Issue::new(
                        path.as_str(),
                        method.as_str(),
                        format!("paths.{}.{}", path, method),
                        Severity::Medium,
                        description,
                        suggestion,
                    )),
                    None => passed += 1,
                }
            }
        }

        match percent(passed, total) {
            Some(score) => RuleResult::new(score, issues),
            None => {
                issues.push(Issue::new(
                    "paths",
                    GLOBAL,
                    "paths",
                    Severity::High,
                    "No valid paths or operations found to evaluate path/method quality.",
                    "Define at least one path with standard HTTP methods (e.g., GET, POST).",
                ));
                RuleResult::new(0, issues)
            }
        }
    }
}
