// Core infrastructure module
// Provides foundational systems that other modules depend on

pub mod app;
pub mod app_config;
pub mod events;
pub mod selection;
pub mod settings;
pub mod store;
pub mod token;
pub mod token_set;
pub mod workspace_config;

pub use app::{App, ViewMode};
pub use app_config::AppConfig;
pub use events::{AppEvent, EventHandler};
pub use selection::{SelectionState, DELETE_SENTINEL};
pub use settings::{Settings, SettingsState, TokenMode, UpdateMode, WindowSettings};
pub use store::{Observer, StoreError, TokenStore};
pub use token::{TokenDefinition, TokenType, TokenValue};
pub use token_set::{load_token_sets, parse_token_set, parse_token_sets, read_document, TokenLoadError, TokenSet, TokenSets};
pub use workspace_config::WorkspaceConfig;
