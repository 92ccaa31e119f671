//! Scoring engine.
//!
//! Runs every rule of a [`RuleRegistry`] against one document and folds the
//! sub-scores into a weighted total, a letter grade, and the concatenated
//! issue list. Rules are evaluated in parallel; results are collected in
//! registry order so the report is deterministic.

use crate::document::is_truthy;
use crate::models::{Criterion, Grade, Issue, Report, RuleResult, Severity, GLOBAL, NOT_APPLICABLE};
use crate::rules::RuleRegistry;
use rayon::prelude::*;
use serde_json::Value as Json;
use tracing::{debug, info};

pub struct ScoringEngine {
    registry: RuleRegistry,
}

impl ScoringEngine {
    pub fn new(registry: RuleRegistry) -> Self {
        ScoringEngine { registry }
    }

    /// Evaluate `doc` and build a report.
    ///
    /// An empty document short-circuits to a zero/F report with a single
    /// issue; no rule runs. A panicking rule is a defect and is not caught.
    pub fn run(&self, doc: &Json) -> Report {
        if !is_truthy(doc) {
            info!("empty specification, skipping rules");
            return empty_report();
        }

        let entries = self.registry.entries();
        let results: Vec<RuleResult> = entries
            .par_iter()
            .map(|entry| entry.rule.apply(doc))
            .collect();

        // weight * score summed as integers: the total is exact at two decimals
        let mut points: u64 = 0;
        let mut criteria = Vec::with_capacity(entries.len());
        let mut issues: Vec<Issue> = Vec::new();
        for (entry, result) in entries.iter().zip(results) {
            debug_assert!(result.score <= 100, "{} scored {}", entry.rule.name(), result.score);
            debug!(
                rule = entry.rule.name(),
                score = result.score,
                weight = entry.weight,
                issues = result.issues.len(),
                "rule evaluated"
            );
            points += u64::from(entry.weight) * u64::from(result.score);
            criteria.push(Criterion {
                name: entry.rule.name().to_string(),
                score: result.score,
                weight: entry.weight,
            });
            issues.extend(result.issues);
        }

        let score = points as f64 / 100.0;
        let grade = Grade::from_score(score);
        info!(score, %grade, issues = issues.len(), "specification scored");
        Report {
            score,
            grade,
            criteria,
            issues,
        }
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(RuleRegistry::builtin())
    }
}

/// Score `doc` with the built-in rules and default options.
pub fn score_document(doc: &Json) -> Report {
    ScoringEngine::default().run(doc)
}

fn empty_report() -> Report {
    Report {
        score: 0.0,
        grade: Grade::F,
        criteria: Vec::new(),
        issues: vec![Issue::new(
            NOT_APPLICABLE,
            GLOBAL,
            "document",
            Severity::High,
            "Empty OpenAPI specification provided.",
            "Provide a non-empty OpenAPI 3.x document.",
        )],
    }
}
