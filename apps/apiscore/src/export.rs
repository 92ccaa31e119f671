//! Report exporters.
//!
//! Supported formats:
//! - `json` - pretty-printed Report
//! - `markdown` - human-readable Markdown
//! - `html` - standalone page with the Markdown content as HTML

use crate::error::{Error, Result};
use crate::models::Report;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Markdown,
    Html,
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "html" => Ok(ExportFormat::Html),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Markdown => write!(f, "markdown"),
            ExportFormat::Html => write!(f, "html"),
        }
    }
}

impl ExportFormat {
    pub fn file_extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Markdown => "md",
            ExportFormat::Html => "html",
        }
    }

    /// `report.<ext>` in the working directory.
    pub fn default_output_path(self) -> PathBuf {
        PathBuf::from(format!("report.{}", self.file_extension()))
    }
}

/// Render a report in the given format.
pub fn render(report: &Report, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => {
            serde_json::to_string_pretty(report).map_err(|e| Error::Serialize(e.to_string()))
        }
        ExportFormat::Markdown => Ok(render_markdown(report)),
        ExportFormat::Html => Ok(render_html(report)),
    }
}

/// Render and write a report; returns the path written.
pub fn export_report(report: &Report, format: ExportFormat, out: Option<&Path>) -> Result<PathBuf> {
    let path = out
        .map(Path::to_path_buf)
        .unwrap_or_else(|| format.default_output_path());
    let body = render(report, format)?;
    fs::write(&path, body).map_err(|source| Error::Write {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), %format, "report exported");
    Ok(path)
}

pub fn render_markdown(report: &Report) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push("# API Scoring Report\n".to_string());
    lines.push(format!("**Score:** {}  ", report.score));
    lines.push(format!("**Grade:** {}\n", report.grade));

    lines.push("## Criteria Scores".to_string());
    for c in &report.criteria {
        lines.push(format!("- **{}**: {} / {}", c.name, c.score, c.weight));
    }

    lines.push("\n## Issues".to_string());
    if report.issues.is_empty() {
        lines.push("No issues found. Great job!".to_string());
    }
    for (i, is) in report.issues.iter().enumerate() {
        lines.push(format!("### Issue {}", i + 1));
        lines.push(format!("- **Path:** {}", is.path));
        lines.push(format!("- **Operation:** {}", is.operation));
        lines.push(format!("- **Location:** {}", is.location));
        lines.push(format!("- **Description:** {}", is.description));
        lines.push(format!("- **Severity:** {}", is.severity));
        lines.push(format!("- **Suggestion:** {}\n", is.suggestion));
    }

    lines.join("\n")
}

pub fn render_html(report: &Report) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n<title>API Scoring Report</title>\n");
    html.push_str("<style>");
    html.push_str(CSS);
    html.push_str("</style>\n</head>\n<body>\n");

    html.push_str("<h1>API Scoring Report</h1>\n");
    html.push_str(&format!(
        "<p><strong>Score:</strong> {}<br>\n<strong>Grade:</strong> <span class=\"grade grade-{}\">{}</span></p>\n",
        report.score,
        report.grade.as_str().to_lowercase(),
        report.grade
    ));

    html.push_str("<h2>Criteria Scores</h2>\n<ul>\n");
    for c in &report.criteria {
        html.push_str(&format!(
            "<li><strong>{}</strong>: {} / {}</li>\n",
            html_escape(&c.name),
            c.score,
            c.weight
        ));
    }
    html.push_str("</ul>\n");

    html.push_str("<h2>Issues</h2>\n");
    if report.issues.is_empty() {
        html.push_str("<p>No issues found. Great job!</p>\n");
    }
    for (i, is) in report.issues.iter().enumerate() {
        html.push_str(&format!(
            "<h3>Issue {}</h3>\n<ul class=\"issue severity-{}\">\n",
            i + 1,
            is.severity
        ));
        let severity = is.severity.to_string();
        let fields = [
            ("Path", is.path.as_str()),
            ("Operation", is.operation.as_str()),
            ("Location", is.location.as_str()),
            ("Description", is.description.as_str()),
            ("Severity", severity.as_str()),
            ("Suggestion", is.suggestion.as_str()),
        ];
        for (label, value) in fields {
            html.push_str(&format!(
                "<li><strong>{}:</strong> {}</li>\n",
                label,
                html_escape(value)
            ));
        }
        html.push_str("</ul>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const CSS: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif; max-width: 960px; margin: 2rem auto; color: #1e293b; }
h1 { border-bottom: 2px solid #6366f1; padding-bottom: .5rem; }
.grade { font-weight: bold; padding: 0 .4rem; border-radius: 4px; color: #fff; }
.grade-a, .grade-b { background: #22c55e; }
.grade-c, .grade-d { background: #eab308; }
.grade-e, .grade-f { background: #ef4444; }
.issue { border-left: 4px solid #94a3b8; padding-left: 1.5rem; }
.severity-high { border-color: #ef4444; }
.severity-medium { border-color: #eab308; }
.severity-low { border-color: #3b82f6; }
"#;
