//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "apiscore",
    version,
    about = "Score the design quality of OpenAPI 3.x documents",
    long_about = "apiscore runs weighted design rules over an OpenAPI 3.x document and reports a score, a grade and actionable issues.\n\nConfiguration precedence: CLI > apiscore.toml > defaults.",
    after_help = "Examples:\n  apiscore score openapi.yaml\n  apiscore score https://example.com/openapi.json --output json\n  apiscore score openapi.yaml --export markdown --out report.md\n  apiscore rules",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands for scoring and listing rules.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current apiscore version.")]
    Version,
    /// Score an OpenAPI document
    #[command(
        about = "Score an OpenAPI document",
        long_about = "Load a document from a file path or http(s) URL, check its structure, run every rule and print the report. With --export the rendered report is written to a file instead.",
        after_help = "Examples:\n  apiscore score openapi.yaml --fail-under 80\n  apiscore score openapi.yaml --export html"
    )]
    Score {
        #[arg(help = "Path or http(s) URL of the OpenAPI document")]
        input: String,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Export format: json|markdown|html")]
        export: Option<String>,
        #[arg(long, help = "Export destination (default: report.<ext>)")]
        out: Option<String>,
        #[arg(long, help = "Path to apiscore.toml|yaml (default: discovered)")]
        config: Option<String>,
        #[arg(long, help = "Exit with status 1 when the score is below this value")]
        fail_under: Option<f64>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Skip the OpenAPI structural check")]
        no_validate: bool,
    },
    /// List the active rules
    #[command(
        about = "List rules and weights",
        long_about = "Print every rule in evaluation order with its id, name and effective weight."
    )]
    Rules {
        #[arg(long, help = "Path to apiscore.toml|yaml (default: discovered)")]
        config: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score_flags() {
        let cli = Cli::try_parse_from([
            "apiscore",
            "score",
            "api.yaml",
            "--output",
            "json",
            "--fail-under",
            "75",
            "--no-validate",
        ])
        .unwrap();
        match cli.cmd {
            Commands::Score {
                input,
                output,
                fail_under,
                no_validate,
                export,
                ..
            } => {
                assert_eq!(input, "api.yaml");
                assert_eq!(output.as_deref(), Some("json"));
                assert_eq!(fail_under, Some(75.0));
                assert!(no_validate);
                assert!(export.is_none());
            }
            _ => panic!("expected score"),
        }
    }

    #[test]
    fn test_score_requires_input() {
        assert!(Cli::try_parse_from(["apiscore", "score"]).is_err());
    }
}
