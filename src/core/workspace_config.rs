// Workspace Configuration
// Workspace-level settings that define where tokens live and how sets are ordered

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::token_set::{load_token_sets, TokenSets};
use crate::utilities::{resolve_path, PatternMatcher};

/// Workspace configuration
/// This defines which token sets to load and their precedence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Multi-set file or directory of per-set files, relative to the workspace
    pub token_sets: String,

    /// Sets merged beneath the active set, lowest precedence first
    #[serde(default)]
    pub used_sets: Vec<String>,

    /// Set being edited; defaults to the first loaded set
    #[serde(default)]
    pub active_set: Option<String>,

    /// Set names to skip when loading a directory
    #[serde(default = "default_excludes")]
    pub exclude: Vec<String>,

    /// Selection snapshot shown by the inspector
    #[serde(default)]
    pub selection: Option<String>,

    /// Log file, relative to the workspace
    #[serde(default)]
    pub log_file: Option<String>,
}

fn default_excludes() -> Vec<String> {
    vec!["$*".to_string()]
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            token_sets: "tokens".to_string(),
            used_sets: Vec::new(),
            active_set: None,
            exclude: default_excludes(),
            selection: None,
            log_file: None,
        }
    }
}

impl WorkspaceConfig {
    /// Load workspace configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read workspace config: {}", path.display()))?;

        let config: WorkspaceConfig = serde_yaml::from_str(&content)
            .context("Failed to parse workspace config YAML")?;

        Ok(config)
    }

    /// Load workspace configuration from a workspace root
    pub fn load_from_workspace(workspace_root: &Path, config_name: &str) -> Result<Self> {
        Self::load(&workspace_root.join(config_name))
    }

    /// Save workspace configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize workspace config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write workspace config: {}", path.display()))?;

        Ok(())
    }

    pub fn token_sets_path(&self, workspace_root: &Path) -> PathBuf {
        resolve_path(workspace_root, &self.token_sets)
    }

    pub fn selection_path(&self, workspace_root: &Path) -> Option<PathBuf> {
        self.selection.as_deref().map(|p| resolve_path(workspace_root, p))
    }

    pub fn log_path(&self, workspace_root: &Path, default_name: &str) -> PathBuf {
        resolve_path(workspace_root, self.log_file.as_deref().unwrap_or(default_name))
    }

    /// Load the configured token sets
    pub fn load_token_sets(&self, workspace_root: &Path) -> Result<TokenSets> {
        let path = self.token_sets_path(workspace_root);
        let excludes = PatternMatcher::new(self.exclude.clone());

        load_token_sets(&path, &excludes)
            .with_context(|| format!("Failed to load token sets from {}", path.display()))
    }

    /// Active set name, falling back to the first loaded set
    pub fn active_set_for(&self, sets: &TokenSets) -> Option<String> {
        self.active_set
            .clone()
            .or_else(|| sets.keys().next().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TokenSet;

    #[test]
    fn test_minimal_yaml() {
        let config: WorkspaceConfig = serde_yaml::from_str("token_sets: design/tokens.json\n").unwrap();
        assert_eq!(config.token_sets, "design/tokens.json");
        assert!(config.used_sets.is_empty());
        assert_eq!(config.exclude, vec!["$*".to_string()]);
        assert_eq!(
            config.token_sets_path(Path::new("/work")),
            PathBuf::from("/work/design/tokens.json")
        );
    }

    #[test]
    fn test_full_yaml() {
        let yaml = "\
token_sets: tokens
used_sets: [global, brand]
active_set: light
exclude: []
selection: selection.json
log_file: logs/tm.log
";
        let config: WorkspaceConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.used_sets, vec!["global", "brand"]);
        assert_eq!(config.active_set.as_deref(), Some("light"));
        assert!(config.exclude.is_empty());
        assert_eq!(
            config.selection_path(Path::new("/work")),
            Some(PathBuf::from("/work/selection.json"))
        );
        assert_eq!(
            config.log_path(Path::new("/work"), "default.log"),
            PathBuf::from("/work/logs/tm.log")
        );
    }

    #[test]
    fn test_active_set_falls_back_to_first() {
        let mut sets = TokenSets::new();
        sets.insert("global".to_string(), TokenSet::new());
        sets.insert("light".to_string(), TokenSet::new());

        let config = WorkspaceConfig::default();
        assert_eq!(config.active_set_for(&sets), Some("global".to_string()));
        assert_eq!(config.active_set_for(&TokenSets::new()), None);
    }
}
