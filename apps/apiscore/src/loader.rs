//! Loading a specification document from disk or over HTTP.
//!
//! Content is parsed as YAML (which also accepts most JSON) and converted
//! into a `serde_json::Value`, the document model the rules work on. When
//! YAML parsing fails, strict JSON is tried before giving up.

use crate::error::{Error, Result};
use serde_json::{Map, Value as Json};
use serde_yaml::Value as Yaml;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Read the raw text behind `input` (a file path or an `http(s)` URL).
pub fn read_source(input: &str) -> Result<String> {
    if is_url(input) {
        debug!(url = input, "fetching specification");
        let mut resp = ureq::get(input).call().map_err(|e| Error::Http {
            url: input.to_string(),
            message: e.to_string(),
        })?;
        resp.body_mut().read_to_string().map_err(|e| Error::Http {
            url: input.to_string(),
            message: e.to_string(),
        })
    } else {
        debug!(path = input, "reading specification");
        fs::read_to_string(input).map_err(|source| Error::Io {
            path: Path::new(input).to_path_buf(),
            source,
        })
    }
}

/// Load and parse the document behind `input`.
pub fn load_document(input: &str) -> Result<Json> {
    let text = read_source(input)?;
    parse_document(&text, input)
}

/// Parse YAML/JSON text into a document. `origin` only labels errors.
pub fn parse_document(text: &str, origin: &str) -> Result<Json> {
    if text.trim().is_empty() {
        return Err(Error::EmptyContent(origin.to_string()));
    }
    let doc = match serde_yaml::from_str::<Yaml>(text) {
        Ok(mut y) => {
            y.apply_merge()
                .map_err(|e| Error::Parse(format!("{}: {}", origin, e)))?;
            yaml_to_json(y)
        }
        Err(yaml_err) => {
            debug!(error = %yaml_err, "YAML parse failed, trying JSON");
            serde_json::from_str::<Json>(text)
                .map_err(|_| Error::Parse(format!("{}: {}", origin, yaml_err)))?
        }
    };
    if !doc.is_object() {
        return Err(Error::NotAnObject);
    }
    Ok(doc)
}

/// Convert a YAML tree into JSON. Non-string mapping keys are stringified,
/// so `200:` in a `responses` block becomes `"200"`.
pub fn yaml_to_json(v: Yaml) -> Json {
    match v {
        Yaml::Null => Json::Null,
        Yaml::Bool(b) => Json::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Json::from(i)
            } else if let Some(u) = n.as_u64() {
                Json::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(Json::Number)
                    .unwrap_or(Json::Null)
            }
        }
        Yaml::String(s) => Json::String(s),
        Yaml::Sequence(seq) => Json::Array(seq.into_iter().map(yaml_to_json).collect()),
        Yaml::Mapping(map) => {
            let obj: Map<String, Json> = map
                .into_iter()
                .map(|(k, v)| (yaml_key(k), yaml_to_json(v)))
                .collect();
            Json::Object(obj)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_key(k: Yaml) -> String {
    match k {
        Yaml::String(s) => s,
        Yaml::Number(n) => n.to_string(),
        Yaml::Bool(b) => b.to_string(),
        Yaml::Null => "null".to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// Structural check delegated to the `openapiv3` model.
///
/// Only OpenAPI 3.0.x documents can be checked this way; other 3.x
/// versions are accepted with a warning.
pub fn validate_structure(doc: &Json) -> Result<()> {
    let version = doc
        .get("openapi")
        .and_then(Json::as_str)
        .ok_or_else(|| Error::Validation("missing 'openapi' version field".into()))?;
    if !version.starts_with("3.") {
        return Err(Error::Validation(format!(
            "unsupported OpenAPI version '{}'",
            version
        )));
    }
    if version.starts_with("3.0") {
        serde_json::from_value::<openapiv3::OpenAPI>(doc.clone())
            .map_err(|e| Error::Validation(e.to_string()))?;
    } else {
        warn!(version, "structural validation covers OpenAPI 3.0.x only; skipping");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_yaml_status_keys_become_strings() {
        let doc = parse_document(
            r#"
openapi: 3.0.3
paths:
  /users:
    get:
      responses:
        200:
          description: ok
        '404':
          description: missing
"#,
            "inline",
        )
        .unwrap();
        let responses = doc["paths"]["/users"]["get"]["responses"].as_object().unwrap();
        let keys: Vec<&str> = responses.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["200", "404"]);
        assert_eq!(doc["openapi"], "3.0.3");
    }

    #[test]
    fn test_yaml_merge_keys_are_applied() {
        let doc = parse_document(
            r#"
common: &common
  description: Returns every registered user in pages.
  tags: [users]
paths:
  /users:
    get:
      <<: *common
      responses:
        200:
          description: ok
"#,
            "inline",
        )
        .unwrap();
        let op = doc["paths"]["/users"]["get"].as_object().unwrap();
        assert!(!op.contains_key("<<"));
        assert_eq!(op["description"], "Returns every registered user in pages.");
        assert_eq!(op["tags"][0], "users");
        assert!(op["responses"]["200"].is_object());
    }

    #[test]
    fn test_json_input() {
        let doc = parse_document(r#"{"openapi": "3.0.0", "info": {"version": "1"}}"#, "inline").unwrap();
        assert_eq!(doc["info"]["version"], "1");
    }

    #[test]
    fn test_blank_and_non_object_content() {
        assert!(matches!(parse_document("  \n", "x"), Err(Error::EmptyContent(_))));
        assert!(matches!(parse_document("- a\n- b\n", "x"), Err(Error::NotAnObject)));
        assert!(matches!(parse_document("just text", "x"), Err(Error::NotAnObject)));
        assert!(matches!(parse_document("a: [1, 2", "x"), Err(Error::Parse(_))));
    }

    #[test]
    fn test_load_document_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("spec.yaml");
        let mut f = fs::File::create(&path).unwrap();
        writeln!(f, "openapi: 3.0.0\ninfo:\n  title: t\n  version: '1.0'\npaths: {{}}").unwrap();
        let doc = load_document(path.to_str().unwrap()).unwrap();
        assert_eq!(doc["info"]["version"], "1.0");
        assert!(validate_structure(&doc).is_ok());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        assert!(matches!(load_document(path.to_str().unwrap()), Err(Error::Io { .. })));
    }

    #[test]
    fn test_validate_structure() {
        let valid = json!({
            "openapi": "3.0.3",
            "info": {"title": "Pets", "version": "1.0.0"},
            "paths": {}
        });
        assert!(validate_structure(&valid).is_ok());

        let no_info = json!({"openapi": "3.0.3", "paths": {}});
        assert!(matches!(validate_structure(&no_info), Err(Error::Validation(_))));

        let swagger = json!({"swagger": "2.0"});
        assert!(matches!(validate_structure(&swagger), Err(Error::Validation(_))));

        let v31 = json!({"openapi": "3.1.0", "info": {"title": "t", "version": "1"}});
        assert!(validate_structure(&v31).is_ok());
    }
}
