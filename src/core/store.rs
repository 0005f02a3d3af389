// Token Store
// Owns the token sets and republishes the resolution after every edit

use std::fmt;
use thiserror::Error;
use tracing::debug;

use super::token::TokenDefinition;
use super::token_set::{TokenSet, TokenSets};
use crate::operations::{merge_token_sets, resolve_tokens, Resolution};

/// Errors from token store mutations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("token set '{0}' does not exist")]
    UnknownSet(String),

    #[error("token set '{0}' already exists")]
    DuplicateSet(String),

    #[error("token '{name}' already exists in set '{set}'")]
    DuplicateToken { set: String, name: String },

    #[error("token '{name}' does not exist in set '{set}'")]
    UnknownToken { set: String, name: String },

    #[error("token names must not be empty")]
    EmptyName,
}

/// Callback invoked with each new resolution
pub type Observer = Box<dyn FnMut(&Resolution)>;

/// Token sets plus the precedence used to merge them
pub struct TokenStore {
    sets: TokenSets,
    used_sets: Vec<String>,
    active_set: String,
    resolution: Resolution,
    observers: Vec<Observer>,
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenStore")
            .field("sets", &self.sets.keys().collect::<Vec<_>>())
            .field("used_sets", &self.used_sets)
            .field("active_set", &self.active_set)
            .field("resolved", &self.resolution.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl TokenStore {
    /// Create a store and resolve it once
    pub fn new(sets: TokenSets, used_sets: Vec<String>, active_set: impl Into<String>) -> Self {
        let mut store = Self {
            sets,
            used_sets,
            active_set: active_set.into(),
            resolution: Resolution::default(),
            observers: Vec::new(),
        };
        store.resolution = store.compute();
        store
    }

    /// Register an observer for future resolutions
    pub fn subscribe(&mut self, observer: impl FnMut(&Resolution) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn sets(&self) -> &TokenSets {
        &self.sets
    }

    pub fn used_sets(&self) -> &[String] {
        &self.used_sets
    }

    pub fn active_set(&self) -> &str {
        &self.active_set
    }

    /// Tokens of the active set, if it exists
    pub fn active_tokens(&self) -> Option<&TokenSet> {
        self.sets.get(&self.active_set)
    }

    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Merge order: used sets, then the active set
    pub fn precedence(&self) -> Vec<&str> {
        self.used_sets
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.active_set.as_str()))
            .collect()
    }

    pub fn create_token(&mut self, set: &str, name: &str, definition: TokenDefinition) -> Result<(), StoreError> {
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        let tokens = self.set_mut(set)?;
        if tokens.contains_key(name) {
            return Err(StoreError::DuplicateToken {
                set: set.to_string(),
                name: name.to_string(),
            });
        }
        tokens.insert(name.to_string(), definition);
        self.refresh();
        Ok(())
    }

    pub fn update_token(&mut self, set: &str, name: &str, definition: TokenDefinition) -> Result<(), StoreError> {
        let tokens = self.set_mut(set)?;
        let Some(slot) = tokens.get_mut(name) else {
            return Err(StoreError::UnknownToken {
                set: set.to_string(),
                name: name.to_string(),
            });
        };
        *slot = definition;
        self.refresh();
        Ok(())
    }

    pub fn delete_token(&mut self, set: &str, name: &str) -> Result<TokenDefinition, StoreError> {
        let tokens = self.set_mut(set)?;
        let removed = tokens.shift_remove(name).ok_or_else(|| StoreError::UnknownToken {
            set: set.to_string(),
            name: name.to_string(),
        })?;
        self.refresh();
        Ok(removed)
    }

    pub fn set_active_set(&mut self, set: &str) -> Result<(), StoreError> {
        self.ensure_set(set)?;
        self.active_set = set.to_string();
        self.refresh();
        Ok(())
    }

    /// Add the set to the used list, or remove it if already used
    ///
    /// Returns whether the set is used afterwards.
    pub fn toggle_used_set(&mut self, set: &str) -> Result<bool, StoreError> {
        self.ensure_set(set)?;
        let used = match self.used_sets.iter().position(|s| s == set) {
            Some(index) => {
                self.used_sets.remove(index);
                false
            }
            None => {
                self.used_sets.push(set.to_string());
                true
            }
        };
        self.refresh();
        Ok(used)
    }

    pub fn add_set(&mut self, set: &str) -> Result<(), StoreError> {
        if set.is_empty() {
            return Err(StoreError::EmptyName);
        }
        if self.sets.contains_key(set) {
            return Err(StoreError::DuplicateSet(set.to_string()));
        }
        self.sets.insert(set.to_string(), TokenSet::new());
        self.refresh();
        Ok(())
    }

    /// Remove a set and drop it from the used list
    pub fn remove_set(&mut self, set: &str) -> Result<TokenSet, StoreError> {
        let removed = self
            .sets
            .shift_remove(set)
            .ok_or_else(|| StoreError::UnknownSet(set.to_string()))?;
        self.used_sets.retain(|s| s != set);
        self.refresh();
        Ok(removed)
    }

    fn ensure_set(&self, set: &str) -> Result<(), StoreError> {
        if self.sets.contains_key(set) {
            Ok(())
        } else {
            Err(StoreError::UnknownSet(set.to_string()))
        }
    }

    fn set_mut(&mut self, set: &str) -> Result<&mut TokenSet, StoreError> {
        self.sets
            .get_mut(set)
            .ok_or_else(|| StoreError::UnknownSet(set.to_string()))
    }

    fn compute(&self) -> Resolution {
        let merged = merge_token_sets(&self.sets, &self.precedence());
        resolve_tokens(&merged)
    }

    fn refresh(&mut self) {
        self.resolution = self.compute();
        debug!(
            active = %self.active_set,
            tokens = self.resolution.len(),
            observers = self.observers.len(),
            "token store re-resolved"
        );
        for observer in &mut self.observers {
            observer(&self.resolution);
        }
    }
}
