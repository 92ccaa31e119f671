//! apiscore CLI binary entry point.
//! Delegates to the library for loading, scoring and rendering.

use apiscore::cli::{Cli, Commands};
use apiscore::config::{self, Effective};
use apiscore::engine::ScoringEngine;
use apiscore::error::{Error, Result};
use apiscore::export::{self, ExportFormat};
use apiscore::models::Report;
use apiscore::{loader, output, utils};
use clap::Parser;
use std::path::Path;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Score {
            input,
            output,
            export,
            out,
            config,
            fail_under,
            no_validate,
        } => {
            let eff = config::resolve_effective(
                None,
                config.as_deref(),
                output.as_deref(),
                if no_validate { Some(false) } else { None },
                fail_under,
            )
            .unwrap_or_else(|e| fail(e));
            note_missing_config(&eff);
            if !eff.validate && eff.output != "json" {
                eprintln!("{} Structural check disabled.", utils::info_prefix());
            }
            let report = score(&input, &eff).unwrap_or_else(|e| fail(e));
            match export {
                Some(format) => {
                    let path = format
                        .parse::<ExportFormat>()
                        .and_then(|f| export::export_report(&report, f, out.as_deref().map(Path::new)))
                        .unwrap_or_else(|e| fail(e));
                    println!("Report exported to: {}", path.display());
                }
                None => output::print_report(&report, &eff.output),
            }
            if let Some(threshold) = eff.fail_under {
                if report.score < threshold {
                    if eff.output != "json" {
                        eprintln!(
                            "{} score {} is below --fail-under {}",
                            utils::error_prefix(),
                            report.score,
                            threshold
                        );
                    }
                    std::process::exit(1);
                }
            }
        }
        Commands::Rules { config, output } => {
            let eff = config::resolve_effective(None, config.as_deref(), output.as_deref(), None, None)
                .unwrap_or_else(|e| fail(e));
            check_output_mode(&eff.output).unwrap_or_else(|e| fail(e));
            note_missing_config(&eff);
            let registry = config::build_registry(&eff).unwrap_or_else(|e| fail(e));
            output::print_rules(&registry, &eff.output);
        }
    }
}

fn score(input: &str, eff: &Effective) -> Result<Report> {
    check_output_mode(&eff.output)?;
    let registry = config::build_registry(eff)?;
    let doc = loader::load_document(input)?;
    if eff.validate {
        loader::validate_structure(&doc)?;
    }
    Ok(ScoringEngine::new(registry).run(&doc))
}

fn check_output_mode(output: &str) -> Result<()> {
    match output {
        "human" | "json" => Ok(()),
        other => Err(Error::UnknownFormat(other.to_string())),
    }
}

fn note_missing_config(eff: &Effective) {
    if eff.config_path.is_none() && eff.output != "json" {
        eprintln!(
            "{} No apiscore.toml found; using defaults.",
            utils::note_prefix()
        );
    }
}

fn fail(e: Error) -> ! {
    eprintln!("{} {}", utils::error_prefix(), e);
    std::process::exit(2);
}
