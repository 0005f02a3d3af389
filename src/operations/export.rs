// Token Export
// Serializes token sets to nested JSON documents and parses them back

use serde_json::{Map, Value};
use std::collections::HashSet;
use thiserror::Error;

use crate::core::{parse_token_set, TokenLoadError, TokenSet, TokenSets};

/// Errors raised while exporting tokens
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("token set '{0}' does not exist")]
    UnknownSet(String),

    #[error("token '{name}' conflicts with '{conflict}' in the nested document")]
    PathConflict { name: String, conflict: String },

    #[error("token '{name}' has a `value` path segment and cannot be nested")]
    ReservedSegment { name: String },

    #[error("failed to serialize tokens: {0}")]
    Json(#[from] serde_json::Error),
}

/// Build the nested document for a set
///
/// `colors.brand.primary` becomes `{"colors": {"brand": {"primary": {...}}}}`
/// where the leaf holds `value`, `type` and an optional `description`.
/// A token whose name is a strict prefix of another token's name cannot be
/// represented and is reported as a conflict. A `value` segment would read
/// back as a definition, so such names are rejected too.
pub fn to_nested_document(set: &TokenSet) -> Result<Value, ExportError> {
    let mut root = Map::new();
    let mut leaves: HashSet<&str> = HashSet::new();

    for (name, definition) in set {
        let leaf = serde_json::to_value(definition)?;
        insert_path(&mut root, name, leaf, &leaves)?;
        leaves.insert(name.as_str());
    }

    Ok(Value::Object(root))
}

fn insert_path(
    root: &mut Map<String, Value>,
    name: &str,
    leaf: Value,
    leaves: &HashSet<&str>,
) -> Result<(), ExportError> {
    let conflict = |with: &str| ExportError::PathConflict {
        name: name.to_string(),
        conflict: with.to_string(),
    };

    let segments: Vec<&str> = name.split('.').collect();
    if segments.contains(&"value") {
        return Err(ExportError::ReservedSegment { name: name.to_string() });
    }

    let Some((last, parents)) = segments.split_last() else {
        return Err(conflict(name));
    };

    let mut node = root;
    let mut prefix_len = 0;

    for segment in parents {
        prefix_len += segment.len();
        let prefix = &name[..prefix_len];
        prefix_len += 1;

        if leaves.contains(prefix) {
            return Err(conflict(prefix));
        }

        node = node
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .ok_or_else(|| conflict(prefix))?;
    }

    if node.contains_key(*last) {
        return Err(conflict(name));
    }

    node.insert(last.to_string(), leaf);
    Ok(())
}

/// Pretty-printed nested JSON for one set
pub fn stringify_token_set(set: &TokenSet) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&to_nested_document(set)?)?)
}

/// Pretty-printed nested JSON for the named set
pub fn stringify_tokens(sets: &TokenSets, set_name: &str) -> Result<String, ExportError> {
    let set = sets
        .get(set_name)
        .ok_or_else(|| ExportError::UnknownSet(set_name.to_string()))?;
    stringify_token_set(set)
}

/// Parse exported JSON text back into a flat token set
pub fn parse_token_document(text: &str) -> Result<TokenSet, TokenLoadError> {
    let document: Value = serde_json::from_str(text).map_err(|source| TokenLoadError::Json {
        path: "<document>".into(),
        source,
    })?;
    parse_token_set(&document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{TokenDefinition, TokenType};
    use serde_json::json;

    fn set(tokens: Vec<(&str, TokenDefinition)>) -> TokenSet {
        tokens.into_iter().map(|(n, d)| (n.to_string(), d)).collect()
    }

    #[test]
    fn test_nested_document_shape() {
        let tokens = set(vec![
            ("colors.brand.primary", TokenDefinition::new("#18a0fb", TokenType::Color).with_description("Brand")),
            ("colors.brand.secondary", TokenDefinition::new("{colors.brand.primary}", TokenType::Color)),
            ("spacing.sm", TokenDefinition::new(4, TokenType::Spacing)),
        ]);

        let document = to_nested_document(&tokens).unwrap();
        assert_eq!(
            document,
            json!({
                "colors": {
                    "brand": {
                        "primary": { "value": "#18a0fb", "type": "color", "description": "Brand" },
                        "secondary": { "value": "{colors.brand.primary}", "type": "color" }
                    }
                },
                "spacing": { "sm": { "value": 4, "type": "spacing" } }
            })
        );
    }

    #[test]
    fn test_output_is_two_space_pretty_json() {
        let tokens = set(vec![("a", TokenDefinition::new(1, TokenType::Sizing))]);
        let text = stringify_token_set(&tokens).unwrap();
        assert_eq!(text, "{\n  \"a\": {\n    \"value\": 1,\n    \"type\": \"sizing\"\n  }\n}");
    }

    #[test]
    fn test_prefix_conflicts_are_rejected() {
        let tokens = set(vec![
            ("colors.red", TokenDefinition::new("#f00", TokenType::Color)),
            ("colors.red.dark", TokenDefinition::new("#800", TokenType::Color)),
        ]);
        assert!(matches!(
            to_nested_document(&tokens),
            Err(ExportError::PathConflict { ref conflict, .. }) if conflict == "colors.red"
        ));

        let reversed = set(vec![
            ("colors.red.dark", TokenDefinition::new("#800", TokenType::Color)),
            ("colors.red", TokenDefinition::new("#f00", TokenType::Color)),
        ]);
        assert!(matches!(to_nested_document(&reversed), Err(ExportError::PathConflict { .. })));
    }

    #[test]
    fn test_value_segment_is_rejected() {
        let tokens = set(vec![
            ("spacing.value", TokenDefinition::new(4, TokenType::Spacing)),
            ("spacing.other", TokenDefinition::new(8, TokenType::Spacing)),
        ]);
        assert!(matches!(
            to_nested_document(&tokens),
            Err(ExportError::ReservedSegment { ref name }) if name == "spacing.value"
        ));

        let nested = set(vec![("a.value.b", TokenDefinition::new(1, TokenType::Other))]);
        assert!(matches!(to_nested_document(&nested), Err(ExportError::ReservedSegment { .. })));
    }

    #[test]
    fn test_unknown_set() {
        let sets = TokenSets::new();
        assert!(matches!(stringify_tokens(&sets, "global"), Err(ExportError::UnknownSet(_))));
    }

    #[test]
    fn test_parse_round_trip() {
        let tokens = set(vec![
            ("type.body", TokenDefinition::new(json!({ "fontFamily": "Inter", "fontSize": 14 }), TokenType::Typography)),
            ("opacity.half", TokenDefinition::new(0.5, TokenType::Opacity)),
        ]);

        let parsed = parse_token_document(&stringify_token_set(&tokens).unwrap()).unwrap();
        assert_eq!(parsed, tokens);
    }
}
