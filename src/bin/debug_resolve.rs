// Debug script to show merge precedence, resolved values and the nested export
//
// Usage: debug-resolve [WORKSPACE] [SET]

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use token_manager::core::{App, AppConfig, TokenStore, WorkspaceConfig};
use token_manager::operations::{stringify_tokens, ResolutionStatus};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("token_manager=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let config = AppConfig::default();

    let workspace_root = match args.next() {
        Some(path) => PathBuf::from(path),
        None => App::detect_workspace_root(&config.workspace_config_name)?,
    };

    let workspace = WorkspaceConfig::load_from_workspace(&workspace_root, &config.workspace_config_name)
        .unwrap_or_default();
    let sets = workspace.load_token_sets(&workspace_root)?;
    let active = args
        .next()
        .or_else(|| workspace.active_set_for(&sets))
        .context("Workspace has no token sets")?;

    let store = TokenStore::new(sets, workspace.used_sets.clone(), active);

    println!("=== WORKSPACE ===");
    println!("Root: {}", workspace_root.display());
    println!("Token sets: {}", workspace.token_sets_path(&workspace_root).display());
    for (name, set) in store.sets() {
        println!("  {} ({} tokens)", name, set.len());
    }
    println!();

    println!("=== PRECEDENCE (lowest first) ===");
    for (i, name) in store.precedence().iter().enumerate() {
        let marker = if store.sets().contains_key(*name) { "" } else { " [missing]" };
        println!("  [{}] {}{}", i, name, marker);
    }
    println!();

    let resolution = store.resolution();
    println!("=== RESOLVED ({} tokens) ===", resolution.len());
    for token in resolution.iter() {
        let note = match &token.status {
            ResolutionStatus::Resolved => String::new(),
            ResolutionStatus::Unresolved { missing } => format!("  [unresolved: {}]", missing.join(", ")),
            ResolutionStatus::Circular(_) => "  [circular]".to_string(),
        };
        println!("  {} ({}) = {}{}", token.name, token.token_type, token.value, note);
    }
    println!();

    let cycles: Vec<_> = resolution.circular_errors().collect();
    let unresolved = resolution.unresolved_references();
    if !cycles.is_empty() || !unresolved.is_empty() {
        println!("=== ERRORS ===");
        for (name, err) in cycles {
            println!("  {}: {}", name, err);
        }
        for err in unresolved {
            println!("  {}", err);
        }
        println!();
    }

    println!("=== EXPORT ({}) ===", store.active_set());
    let document = stringify_tokens(store.sets(), store.active_set())?;
    println!("{}", document);

    Ok(())
}
