// Token Manager Library
// Design token merging, alias resolution and a TUI inspector for token workspaces

// Core infrastructure - tokens, sets, store, settings
pub mod core;

// Operations - merge, resolve and export of token sets
pub mod operations;

// Display - text rendering of tokens and selections
pub mod display;

// Host - messages posted to the design application
pub mod host;

// UI - TUI components and views
pub mod ui;

// Utilities - helper functions and tools
pub mod utilities;

// Re-export commonly used items for convenience
pub use core::{App, AppConfig, TokenDefinition, TokenSet, TokenSets, TokenStore, TokenType, WorkspaceConfig};
pub use host::{HostMessage, HostNotifier};
pub use operations::{merge_token_sets, resolve_tokens, Resolution};
