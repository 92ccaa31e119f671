//! Shared data models for rule results and the scoring report.

pub mod report;

pub use report::{Criterion, Grade, Report};

use serde::Serialize;
use std::fmt;

/// Operation label for issues that concern a path rather than one method.
pub const NOT_APPLICABLE: &str = "N/A";
/// Operation label for document-wide issues.
pub const GLOBAL: &str = "GLOBAL";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
/// Severity of an issue.
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// One actionable finding with location and remediation hint.
pub struct Issue {
    pub path: String,
    pub operation: String,
    /// Dotted/bracketed pointer into the document, e.g. `paths./users.get.responses`.
    pub location: String,
    pub description: String,
    pub severity: Severity,
    pub suggestion: String,
}

impl Issue {
    pub fn new(
        path: impl Into<String>,
        operation: impl Into<String>,
        location: impl Into<String>,
        severity: Severity,
        description: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Issue {
            path: path.into(),
            operation: operation.into(),
            location: location.into(),
            description: description.into(),
            severity,
            suggestion: suggestion.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Sub-score in `[0, 100]` and the issues one rule found.
pub struct RuleResult {
    pub score: u32,
    pub issues: Vec<Issue>,
}

impl RuleResult {
    pub fn new(score: u32, issues: Vec<Issue>) -> Self {
        RuleResult { score, issues }
    }
}
