//! apiscore core library.
//!
//! This crate scores the design quality of OpenAPI 3.x documents. A fixed
//! registry of weighted rules inspects the parsed document; the engine
//! combines their sub-scores into a total, a letter grade and a list of
//! actionable issues.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `document`: Typed access helpers over the untyped document tree.
//! - `engine`: Runs the registry and builds the Report.
//! - `error`: Error type for loading, configuration and export.
//! - `export`: JSON, Markdown and HTML report renderers.
//! - `loader`: Reads documents from files or URLs and checks structure.
//! - `models`: Issue, RuleResult and Report structs.
//! - `output`: Human/JSON printers for score and rules.
//! - `rules`: The rule trait, the seven built-in rules and the registry.
//! - `utils`: Supporting helpers.
pub mod cli;
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod export;
pub mod loader;
pub mod models;
pub mod output;
pub mod rules;
pub mod utils;

pub use engine::{score_document, ScoringEngine};
pub use error::{Error, Result};
pub use models::{Issue, Report, Severity};
