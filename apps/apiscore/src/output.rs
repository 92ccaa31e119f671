//! Output rendering for the `score` and `rules` commands.
//!
//! Supports `human` (default) and `json` outputs. The JSON form of `score`
//! is the serialized Report; `rules` lists id, name and weight per entry.

use crate::models::{Report, Severity};
use crate::rules::RuleRegistry;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn severity_tag(sev: Severity, color: bool) -> String {
    let tag = format!("⟦{}⟧", sev);
    if !color {
        return tag;
    }
    match sev {
        Severity::High => tag.red().bold().to_string(),
        Severity::Medium => tag.yellow().bold().to_string(),
        Severity::Low => tag.blue().bold().to_string(),
    }
}

fn severity_icon(sev: Severity, color: bool) -> String {
    let icon = match sev {
        Severity::High => "✖",
        Severity::Medium => "▲",
        Severity::Low => "◆",
    };
    if !color {
        return icon.to_string();
    }
    match sev {
        Severity::High => icon.red().to_string(),
        Severity::Medium => icon.yellow().to_string(),
        Severity::Low => icon.blue().to_string(),
    }
}

/// Print a scoring report in the requested format.
pub fn print_report(report: &Report, output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_report_json(report)).unwrap_or_default()
        ),
        _ => {
            let color = use_colors(output);
            for is in &report.issues {
                let location = if color {
                    is.location.clone().bold().to_string()
                } else {
                    is.location.clone()
                };
                println!(
                    "{} {} {} ❲{} {}❳ — {}",
                    severity_icon(is.severity, color),
                    severity_tag(is.severity, color),
                    location,
                    is.operation,
                    is.path,
                    is.description
                );
                if color {
                    println!("    {} {}", "hint:".bright_black(), is.suggestion);
                } else {
                    println!("    hint: {}", is.suggestion);
                }
            }
            if !report.issues.is_empty() {
                println!();
            }
            for c in &report.criteria {
                println!("  {:<30} {:>3} / {}", c.name, c.score, c.weight);
            }
            let summary = format!(
                "— Score: {} (grade {}) issues={} —",
                report.score,
                report.grade,
                report.issues.len()
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Print the registry's rules with their effective weights.
pub fn print_rules(registry: &RuleRegistry, output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_rules_json(registry)).unwrap_or_default()
        ),
        _ => {
            let color = use_colors(output);
            for e in registry.entries() {
                let id = if color {
                    e.rule.id().bold().to_string()
                } else {
                    e.rule.id().to_string()
                };
                println!("{:<18} {:<30} {:>3}", id, e.rule.name(), e.weight);
            }
        }
    }
}

/// Compose report JSON object (pure) for testing/snapshot purposes.
pub fn compose_report_json(report: &Report) -> JsonVal {
    serde_json::to_value(report).unwrap_or(JsonVal::Null)
}

/// Compose rules JSON object (pure) for testing/snapshot purposes.
pub fn compose_rules_json(registry: &RuleRegistry) -> JsonVal {
    let items: Vec<_> = registry
        .entries()
        .iter()
        .map(|e| {
            json!({
                "id": e.rule.id(),
                "name": e.rule.name(),
                "weight": e.weight,
            })
        })
        .collect();
    let total: u32 = registry.entries().iter().map(|e| e.weight).sum();
    json!({"rules": items, "summary": {"count": items.len(), "total_weight": total}})
}
