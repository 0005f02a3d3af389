// Selection State
// Tokens applied to the host document's current selection

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Value marking a property whose token was removed
pub const DELETE_SENTINEL: &str = "delete";

/// Property -> token name mapping reported by the host for the selection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    /// Document property name -> token name, or the deletion sentinel
    #[serde(default)]
    pub main_node_selection_values: IndexMap<String, String>,

    /// Number of selected layers
    #[serde(default)]
    pub selected_layers: usize,
}

impl SelectionState {
    /// Load a selection snapshot from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read selection: {}", path.display()))?;

        serde_json::from_str(&content).context("Failed to parse selection JSON")
    }

    /// Properties with a token applied, skipping deletions
    pub fn applied(&self) -> impl Iterator<Item = (&str, &str)> {
        self.main_node_selection_values
            .iter()
            .filter(|(_, token)| token.as_str() != DELETE_SENTINEL)
            .map(|(property, token)| (property.as_str(), token.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.main_node_selection_values.is_empty()
    }
}
