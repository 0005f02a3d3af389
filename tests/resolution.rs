// Integration tests: loading workspaces from disk, merging, resolving and exporting

use indexmap::IndexMap;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use token_manager::core::{load_token_sets, TokenDefinition, TokenSets, TokenStore, TokenType, WorkspaceConfig};
use token_manager::operations::{
    merge_token_sets, parse_token_document, resolve_tokens, stringify_token_set, ResolutionStatus,
};
use token_manager::utilities::PatternMatcher;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(
        root,
        "tokens/core.json",
        r##"{
            "colors": {
                "red": { "value": "#ff0000", "type": "color" },
                "blue": { "value": "#0000ff", "type": "color" }
            },
            "spacing": {
                "sm": { "value": 4, "type": "spacing" },
                "lg": { "value": "16px", "type": "spacing" }
            }
        }"##,
    );
    write(
        root,
        "tokens/themes/light.yaml",
        "\
colors.primary:
  value: \"{colors.red}\"
  type: color
  description: Brand color
padding:
  value: \"{spacing.sm} {spacing.lg}\"
  type: spacing
",
    );
    write(
        root,
        "tokens/themes/dark.json",
        r##"{ "colors.primary": { "value": "{colors.blue}", "type": "color" } }"##,
    );
    write(root, "tokens/$metadata.json", r#"{ "tokenSetOrder": { "value": [] } }"#);
    write(root, "tokens/notes.txt", "not a token file");
    write(
        root,
        "tokens.yaml",
        "token_sets: tokens\nused_sets: [core]\nactive_set: themes/light\n",
    );

    dir
}

#[test]
fn test_directory_loading_names_sets_by_relative_path() {
    let dir = workspace();
    let excludes = PatternMatcher::new(vec!["$*".to_string()]);
    let sets = load_token_sets(&dir.path().join("tokens"), &excludes).unwrap();

    let names: Vec<&str> = sets.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["core", "themes/dark", "themes/light"]);
    assert_eq!(sets["core"].len(), 4);
    assert_eq!(
        sets["themes/light"]["colors.primary"].description.as_deref(),
        Some("Brand color")
    );
}

#[test]
fn test_workspace_config_drives_store() {
    let dir = workspace();
    let config = WorkspaceConfig::load_from_workspace(dir.path(), "tokens.yaml").unwrap();
    let sets = config.load_token_sets(dir.path()).unwrap();
    let active = config.active_set_for(&sets).unwrap();

    let mut store = TokenStore::new(sets, config.used_sets.clone(), active);
    assert_eq!(store.precedence(), vec!["core", "themes/light"]);
    assert_eq!(store.resolution().value("colors.primary"), Some(&json!("#ff0000")));
    assert_eq!(store.resolution().value("padding"), Some(&json!("4 16px")));

    store.set_active_set("themes/dark").unwrap();
    assert_eq!(store.resolution().value("colors.primary"), Some(&json!("#0000ff")));
    assert!(store.resolution().get("padding").is_none());
}

#[test]
fn test_single_file_of_sets() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "tokens.json",
        r##"{
            "global": { "size.base": { "value": 8, "type": "sizing" } },
            "$themes": { "x": { "value": 1 } },
            "brand": { "size.card": { "value": "{size.base}", "type": "sizing" } }
        }"##,
    );

    let excludes = PatternMatcher::new(vec!["$*".to_string()]);
    let sets = load_token_sets(&dir.path().join("tokens.json"), &excludes).unwrap();
    assert_eq!(sets.keys().map(String::as_str).collect::<Vec<_>>(), vec!["global", "brand"]);

    let merged = merge_token_sets(&sets, &["global", "brand"]);
    assert_eq!(resolve_tokens(&merged).value("size.card"), Some(&json!(8)));
}

#[test]
fn test_merge_precedence_is_order_sensitive() {
    let mut sets = TokenSets::new();
    sets.insert(
        "a".to_string(),
        [
            ("shared".to_string(), TokenDefinition::new("from-a", TokenType::Other)),
            ("only.a".to_string(), TokenDefinition::new(1, TokenType::Other)),
        ]
        .into_iter()
        .collect(),
    );
    sets.insert(
        "b".to_string(),
        [
            ("shared".to_string(), TokenDefinition::new("from-b", TokenType::Other)),
            ("only.b".to_string(), TokenDefinition::new(2, TokenType::Other)),
        ]
        .into_iter()
        .collect(),
    );

    for order in [["a", "b"], ["b", "a"]] {
        let merged = merge_token_sets(&sets, &order);
        assert_eq!(merged["only.a"].value, json!(1));
        assert_eq!(merged["only.b"].value, json!(2));
        let expected = if order[1] == "b" { "from-b" } else { "from-a" };
        assert_eq!(merged["shared"].value, json!(expected));
    }
}

#[test]
fn test_round_trip_through_export() {
    let dir = workspace();
    let excludes = PatternMatcher::new(vec!["$*".to_string()]);
    let sets = load_token_sets(&dir.path().join("tokens"), &excludes).unwrap();

    let merged = merge_token_sets(&sets, &["core", "themes/light"]);
    let resolution = resolve_tokens(&merged);
    let exported = stringify_token_set(&resolution.to_token_set()).unwrap();
    let parsed = parse_token_document(&exported).unwrap();

    // Nesting regroups names by path, so compare as maps
    let round_tripped: IndexMap<String, Value> =
        parsed.iter().map(|(name, d)| (name.clone(), d.value.clone())).collect();
    assert_eq!(round_tripped, resolution.values());
    assert_eq!(parsed["colors.primary"].token_type, TokenType::Color);
}

#[test]
fn test_cycles_and_missing_references_are_isolated() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "tokens/broken.json",
        r##"{
            "a": { "value": "{b}" },
            "b": { "value": "{a}" },
            "c": { "value": "{nonexistent.token}" },
            "d": { "value": "plain" }
        }"##,
    );

    let sets = load_token_sets(&dir.path().join("tokens"), &PatternMatcher::default()).unwrap();
    let resolution = resolve_tokens(&sets["broken"]);

    match &resolution.get("a").unwrap().status {
        ResolutionStatus::Circular(err) => assert_eq!(err.chain, vec!["a", "b", "a"]),
        other => panic!("unexpected status: {:?}", other),
    }
    assert_eq!(resolution.value("c"), Some(&json!("{nonexistent.token}")));
    assert_eq!(resolution.unresolved_references().len(), 1);
    assert_eq!(resolution.value("d"), Some(&json!("plain")));
    assert!(resolution.get("d").unwrap().is_resolved());
}
