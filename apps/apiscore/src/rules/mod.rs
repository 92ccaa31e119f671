//! Scoring rules and the registry the engine runs.
//!
//! Each rule inspects the whole document and returns a sub-score in
//! `[0, 100]` plus the issues it found. Rules are independent of each other
//! and hold nothing but construction-time options, so the engine may run
//! them in any order.

pub mod descriptions;
pub mod examples;
pub mod misc;
pub mod paths_operations;
pub mod response_codes;
pub mod schema_types;
pub mod security;

pub use descriptions::DescriptionsDocumentationRule;
pub use examples::ExamplesSamplesRule;
pub use misc::MiscellaneousBestPracticesRule;
pub use paths_operations::PathsOperationsRule;
pub use response_codes::ResponseCodesRule;
pub use schema_types::SchemaTypesRule;
pub use security::SecurityRule;

use crate::error::{Error, Result};
use crate::models::RuleResult;
use serde_json::Value as Json;
use std::collections::HashMap;

/// Weights of a valid registry add up to this.
pub const TOTAL_WEIGHT: u32 = 100;

/// A scoring heuristic.
///
/// `apply` must be total over any JSON shape: missing keys or unexpected
/// types count as zero relevant items, never as a failure.
pub trait Rule: Send + Sync {
    /// Stable key used by configuration (`[weights]`, `[rules.<id>]`).
    fn id(&self) -> &'static str;

    /// Display label used in reports.
    fn name(&self) -> &'static str;

    /// Built-in share of the overall score.
    fn weight(&self) -> u32;

    fn apply(&self, doc: &Json) -> RuleResult;
}

/// Construction-time options for the configurable rules.
#[derive(Debug, Clone)]
pub struct RuleOptions {
    pub min_description_length: usize,
    pub http_methods: Vec<String>,
    pub verbs: Vec<String>,
    pub allowed_post_patterns: Vec<String>,
}

impl Default for RuleOptions {
    fn default() -> Self {
        RuleOptions {
            min_description_length: descriptions::DEFAULT_MIN_LENGTH,
            http_methods: to_owned(paths_operations::DEFAULT_HTTP_METHODS),
            verbs: to_owned(paths_operations::DEFAULT_VERBS),
            allowed_post_patterns: to_owned(paths_operations::DEFAULT_ALLOWED_POST_PATTERNS),
        }
    }
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// A rule paired with the weight it carries in this registry.
pub struct RegistryEntry {
    pub rule: Box<dyn Rule>,
    pub weight: u32,
}

impl RegistryEntry {
    /// Entry carrying the rule's built-in weight.
    pub fn new(rule: Box<dyn Rule>) -> Self {
        let weight = rule.weight();
        RegistryEntry { rule, weight }
    }
}

/// Ordered rules with weights summing to [`TOTAL_WEIGHT`].
pub struct RuleRegistry {
    entries: Vec<RegistryEntry>,
}

impl RuleRegistry {
    /// Build a registry, rejecting weight sets that do not add up to 100.
    pub fn new(entries: Vec<RegistryEntry>) -> Result<Self> {
        let sum: u64 = entries.iter().map(|e| u64::from(e.weight)).sum();
        if sum != u64::from(TOTAL_WEIGHT) {
            return Err(Error::WeightSum(sum));
        }
        Ok(RuleRegistry { entries })
    }

    /// The seven built-in rules with default options and weights.
    pub fn builtin() -> Self {
        Self::with_options(&RuleOptions::default())
    }

    /// The seven built-in rules in report order, configured by `opts`.
    pub fn with_options(opts: &RuleOptions) -> Self {
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(SchemaTypesRule),
            Box::new(DescriptionsDocumentationRule::new(opts.min_description_length)),
            Box::new(PathsOperationsRule::new(
                &opts.http_methods,
                &opts.verbs,
                &opts.allowed_post_patterns,
            )),
            Box::new(ResponseCodesRule),
            Box::new(ExamplesSamplesRule),
            Box::new(SecurityRule),
            Box::new(MiscellaneousBestPracticesRule),
        ];
        RuleRegistry {
            entries: rules.into_iter().map(RegistryEntry::new).collect(),
        }
    }

    /// Replace weights by rule id. The result must still sum to 100.
    pub fn reweighted(self, weights: &HashMap<String, u32>) -> Result<Self> {
        for id in weights.keys() {
            if !self.entries.iter().any(|e| e.rule.id() == id) {
                return Err(Error::UnknownRule(id.clone()));
            }
        }
        let entries = self
            .entries
            .into_iter()
            .map(|mut e| {
                if let Some(w) = weights.get(e.rule.id()) {
                    e.weight = *w;
                }
                e
            })
            .collect();
        Self::new(entries)
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
