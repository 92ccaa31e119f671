//! Configuration discovery and effective settings resolution.
//!
//! apiscore reads `apiscore.toml|yaml|yml` from the working directory (or
//! the closest ancestor, stopping at a `.git` directory), or from the file
//! given with `--config`, and merges it with CLI flags into `Effective`.
//! Defaults:
//! - `output`: `human`
//! - `validate`: true
//! - `fail_under`: unset
//! - `weights`: built-in rule weights
//! - `rules.descriptions.min_length`: 10
//! - `rules.paths-operations.{http_methods,verbs,allowed_post_patterns}`: built-in lists
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::{Error, Result};
use crate::rules::{RuleOptions, RuleRegistry};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_FILES: &[&str] = &["apiscore.toml", "apiscore.yaml", "apiscore.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Options for the description rule under `[rules.descriptions]`.
pub struct DescriptionsCfg {
    pub min_length: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Options for the path rule under `[rules.paths-operations]`.
pub struct PathsOperationsCfg {
    pub http_methods: Option<Vec<String>>,
    pub verbs: Option<Vec<String>>,
    pub allowed_post_patterns: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Per-rule option tables under `[rules]`.
pub struct RulesCfg {
    pub descriptions: Option<DescriptionsCfg>,
    #[serde(rename = "paths-operations")]
    pub paths_operations: Option<PathsOperationsCfg>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `apiscore.toml|yaml`.
pub struct ApiscoreConfig {
    pub output: Option<String>,
    pub validate: Option<bool>,
    pub fail_under: Option<f64>,
    #[serde(default)]
    pub weights: Option<HashMap<String, u32>>, // rule id -> weight
    #[serde(default)]
    pub rules: Option<RulesCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub config_path: Option<PathBuf>,
    pub output: String,
    pub validate: bool,
    pub fail_under: Option<f64>,
    pub weights: HashMap<String, u32>,
    pub rule_options: RuleOptions,
}

/// Registry with the effective rule options and weights.
pub fn build_registry(eff: &Effective) -> Result<RuleRegistry> {
    RuleRegistry::with_options(&eff.rule_options).reweighted(&eff.weights)
}

/// Walk upward from `start` to the directory holding a config file.
///
/// Stops at the first directory with `apiscore.toml|yaml|yml` or `.git`.
pub fn detect_config_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|f| cur.join(f).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Parse one config file; the format follows the extension.
pub fn load_config_file(path: &Path) -> Result<ApiscoreConfig> {
    let s = fs::read_to_string(path).map_err(|e| Error::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let parsed = if is_yaml {
        serde_yaml::from_str::<ApiscoreConfig>(&s).map_err(|e| e.to_string())
    } else {
        toml::from_str::<ApiscoreConfig>(&s).map_err(|e| e.to_string())
    };
    parsed.map_err(|message| Error::Config {
        path: path.to_path_buf(),
        message,
    })
}

/// Load `apiscore.toml` or `apiscore.yaml|yml` from `root` if present.
pub fn load_config(root: &Path) -> Result<Option<(PathBuf, ApiscoreConfig)>> {
    for name in CONFIG_FILES {
        let p = root.join(name);
        if p.exists() {
            let cfg = load_config_file(&p)?;
            return Ok(Some((p, cfg)));
        }
    }
    Ok(None)
}

/// Resolve `Effective` by merging CLI flags, the config file, and defaults.
///
/// `cli_root` is where discovery starts (default: current directory);
/// `cli_config` bypasses discovery.
pub fn resolve_effective(
    cli_root: Option<&str>,
    cli_config: Option<&str>,
    cli_output: Option<&str>,
    cli_validate: Option<bool>,
    cli_fail_under: Option<f64>,
) -> Result<Effective> {
    let loaded = match cli_config {
        Some(path) => {
            let path = PathBuf::from(path);
            let cfg = load_config_file(&path)?;
            Some((path, cfg))
        }
        None => {
            let start = PathBuf::from(cli_root.unwrap_or("."));
            load_config(&detect_config_root(&start))?
        }
    };
    let (config_path, cfg) = match loaded {
        Some((p, c)) => {
            debug!(path = %p.display(), "loaded configuration");
            (Some(p), c)
        }
        None => (None, ApiscoreConfig::default()),
    };

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());
    let validate = cli_validate.or(cfg.validate).unwrap_or(true);
    let fail_under = cli_fail_under.or(cfg.fail_under);
    let weights = cfg.weights.unwrap_or_default();

    let mut rule_options = RuleOptions::default();
    let rules_cfg = cfg.rules.unwrap_or_default();
    if let Some(min) = rules_cfg.descriptions.and_then(|d| d.min_length) {
        rule_options.min_description_length = min;
    }
    if let Some(p) = rules_cfg.paths_operations {
        if let Some(m) = p.http_methods {
            rule_options.http_methods = m;
        }
        if let Some(v) = p.verbs {
            rule_options.verbs = v;
        }
        if let Some(a) = p.allowed_post_patterns {
            rule_options.allowed_post_patterns = a;
        }
    }

    Ok(Effective {
        config_path,
        output,
        validate,
        fail_under,
        weights,
        rule_options,
    })
}
