// Token Sets
// Ordered token collections and loading them from JSON/YAML documents

use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use super::token::TokenDefinition;
use crate::utilities::{set_name_from_path, PatternMatcher};

/// A named set's tokens, keyed by dotted token name in document order
pub type TokenSet = IndexMap<String, TokenDefinition>;

/// All known sets, keyed by set name in load order
pub type TokenSets = IndexMap<String, TokenSet>;

/// Errors raised while reading token documents
#[derive(Debug, Error)]
pub enum TokenLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to walk token directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("expected {expected}, found {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },

    #[error("token '{name}' is not a valid definition: {reason}")]
    InvalidDefinition { name: String, reason: String },
}

/// Parse one set document
///
/// Accepts flat documents (dotted keys), nested documents (groups of
/// groups, as written by the exporter) and arrays of definitions carrying a
/// `name` field. Any object with a `value` key is a token definition.
pub fn parse_token_set(document: &Value) -> Result<TokenSet, TokenLoadError> {
    let mut set = TokenSet::new();

    match document {
        Value::Object(entries) => collect_tokens(entries, "", &mut set)?,
        Value::Array(items) => {
            for item in items {
                let name = item
                    .get("name")
                    .and_then(Value::as_str)
                    .ok_or(TokenLoadError::UnexpectedShape {
                        expected: "token with a string `name`",
                        found: shape_of(item),
                    })?
                    .to_string();
                let mut fields = item.as_object().cloned().unwrap_or_default();
                fields.remove("name");
                let definition = parse_definition(&name, Value::Object(fields))?;
                set.insert(name, definition);
            }
        }
        other => {
            return Err(TokenLoadError::UnexpectedShape {
                expected: "token set object or array",
                found: shape_of(other),
            })
        }
    }

    Ok(set)
}

fn collect_tokens(
    entries: &Map<String, Value>,
    prefix: &str,
    set: &mut TokenSet,
) -> Result<(), TokenLoadError> {
    for (key, value) in entries {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            Value::Object(fields) if fields.contains_key("value") => {
                let definition = parse_definition(&name, value.clone())?;
                set.insert(name, definition);
            }
            Value::Object(group) => collect_tokens(group, &name, set)?,
            other => {
                return Err(TokenLoadError::InvalidDefinition {
                    name,
                    reason: format!("expected an object with a `value`, found {}", shape_of(other)),
                })
            }
        }
    }

    Ok(())
}

/// Keys a definition object may carry
const DEFINITION_KEYS: [&str; 3] = ["value", "type", "description"];

fn parse_definition(name: &str, value: Value) -> Result<TokenDefinition, TokenLoadError> {
    // A group that also holds a `value` key would swallow its children
    if let Value::Object(fields) = &value {
        if let Some(extra) = fields.keys().find(|key| !DEFINITION_KEYS.contains(&key.as_str())) {
            return Err(TokenLoadError::InvalidDefinition {
                name: name.to_string(),
                reason: format!("unexpected key `{}` next to `value`", extra),
            });
        }
    }

    serde_json::from_value(value).map_err(|e| TokenLoadError::InvalidDefinition {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

/// Parse a document keyed by set name
pub fn parse_token_sets(document: &Value) -> Result<TokenSets, TokenLoadError> {
    let Value::Object(entries) = document else {
        return Err(TokenLoadError::UnexpectedShape {
            expected: "object keyed by set name",
            found: shape_of(document),
        });
    };

    entries
        .iter()
        .map(|(set_name, set)| Ok((set_name.clone(), parse_token_set(set)?)))
        .collect()
}

/// Read a JSON or YAML file into a document value
pub fn read_document(path: &Path) -> Result<Value, TokenLoadError> {
    let content = fs::read_to_string(path).map_err(|source| TokenLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if is_yaml(path) {
        serde_yaml::from_str(&content).map_err(|source| TokenLoadError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    } else {
        serde_json::from_str(&content).map_err(|source| TokenLoadError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Load token sets from a single multi-set file or from a directory of per-set files
///
/// In a directory every `.json`/`.yaml`/`.yml` file is one set, named by
/// its path relative to the directory without extension. Files are read in
/// sorted path order; set names matching `excludes` are skipped.
pub fn load_token_sets(path: &Path, excludes: &PatternMatcher) -> Result<TokenSets, TokenLoadError> {
    if !path.is_dir() {
        let document = read_document(path)?;
        let mut sets = parse_token_sets(&document)?;
        sets.retain(|name, _| !excludes.should_exclude(name));
        return Ok(sets);
    }

    let mut sets = TokenSets::new();

    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry?;
        let file = entry.path();

        if !file.is_file() || !is_token_file(file) {
            continue;
        }

        let Some(set_name) = set_name_from_path(path, file) else {
            continue;
        };

        if excludes.should_exclude(&set_name) {
            debug!(set = %set_name, "skipping excluded token file");
            continue;
        }

        let document = read_document(file)?;
        let set = parse_token_set(&document)?;
        debug!(set = %set_name, tokens = set.len(), "loaded token set");
        sets.insert(set_name, set);
    }

    Ok(sets)
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn is_token_file(path: &Path) -> bool {
    is_yaml(path) || path.extension().and_then(|e| e.to_str()) == Some("json")
}

fn shape_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
