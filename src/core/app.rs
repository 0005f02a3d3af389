// Application State
// Main application state management and lifecycle

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

use super::{AppConfig, SelectionState, Settings, TokenDefinition, TokenMode, TokenSets, TokenStore, WorkspaceConfig};
use crate::display::{inspect, visible_token_names, Inspection};
use crate::host::HostNotifier;
use crate::operations::{stringify_tokens, Resolution};

/// Rows moved by PageUp / PageDown
const PAGE_SIZE: usize = 10;

/// The current view mode in the application
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewMode {
    /// Active set's tokens grouped by type
    Tokens,
    /// Tokens applied to the current selection
    Inspector,
}

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Application configuration (built-in defaults)
    pub config: AppConfig,

    /// Workspace configuration (loaded from tokens.yaml)
    pub workspace_config: WorkspaceConfig,

    /// Workspace root path
    pub workspace_root: PathBuf,

    /// Token sets and their resolution
    pub store: TokenStore,

    /// Plugin settings, posting to the host
    pub settings: Settings,

    /// Selection snapshot for the inspector
    pub selection: SelectionState,

    /// Current view mode
    pub view_mode: ViewMode,

    /// Selected row in the token list
    pub selected_index: usize,

    /// Whether the tooltip shows resolved values
    pub show_resolved: bool,

    /// Token name filter
    pub filter: String,

    /// Whether keys are editing the filter
    pub filtering: bool,

    /// Result of the last command, shown in the footer
    pub status: Option<String>,

    /// Whether the application should quit
    pub should_quit: bool,
}

impl App {
    /// Create a new application instance from the detected workspace
    pub fn new(host: HostNotifier) -> Result<Self> {
        let config = AppConfig::default();
        let workspace_root = Self::detect_workspace_root(&config.workspace_config_name)?;

        let workspace_config = WorkspaceConfig::load_from_workspace(
            &workspace_root,
            &config.workspace_config_name,
        )
        .unwrap_or_else(|err| {
            warn!(error = %err, "using default workspace config");
            WorkspaceConfig::default()
        });

        let sets = workspace_config.load_token_sets(&workspace_root)?;

        let selection = match workspace_config.selection_path(&workspace_root) {
            Some(path) => SelectionState::load(&path)?,
            None => SelectionState::default(),
        };

        Ok(Self::from_parts(config, workspace_config, workspace_root, sets, selection, host))
    }

    /// Assemble an application from already loaded parts
    pub fn from_parts(
        config: AppConfig,
        workspace_config: WorkspaceConfig,
        workspace_root: PathBuf,
        sets: TokenSets,
        selection: SelectionState,
        host: HostNotifier,
    ) -> Self {
        let store = Self::build_store(&workspace_config, sets);

        Self {
            config,
            workspace_config,
            workspace_root,
            store,
            settings: Settings::new(host),
            selection,
            view_mode: ViewMode::Tokens,
            selected_index: 0,
            show_resolved: true,
            filter: String::new(),
            filtering: false,
            status: None,
            should_quit: false,
        }
    }

    fn build_store(workspace_config: &WorkspaceConfig, sets: TokenSets) -> TokenStore {
        let active = workspace_config.active_set_for(&sets).unwrap_or_default();
        let mut store = TokenStore::new(sets, workspace_config.used_sets.clone(), active);
        log_resolution(store.resolution());
        store.subscribe(log_resolution);
        store
    }

    /// Detect the workspace root directory
    pub fn detect_workspace_root(config_name: &str) -> Result<PathBuf> {
        // First try environment variable
        if let Ok(path) = std::env::var("TOKENS_WORKSPACE") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok(path);
            }
        }

        let cwd = std::env::current_dir()?;

        // Walk up looking for the workspace config
        for dir in cwd.ancestors() {
            if dir.join(config_name).exists() {
                return Ok(dir.to_path_buf());
            }
        }

        // Fall back to current directory
        Ok(cwd)
    }

    /// Token names shown in the list, in display order
    pub fn visible_tokens(&self) -> Vec<&str> {
        self.store
            .active_tokens()
            .map(|set| visible_token_names(set, &self.filter))
            .unwrap_or_default()
    }

    /// Get the currently selected token
    pub fn selected_token(&self) -> Option<(&str, &TokenDefinition)> {
        let name = *self.visible_tokens().get(self.selected_index)?;
        let definition = self.store.active_tokens()?.get(name)?;
        Some((name, definition))
    }

    pub fn resolution(&self) -> &Resolution {
        self.store.resolution()
    }

    pub fn inspection(&self) -> Inspection {
        inspect(&self.selection, self.store.resolution())
    }

    /// Move selection up
    pub fn select_previous(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        let max = self.visible_tokens().len().saturating_sub(1);
        if self.selected_index < max {
            self.selected_index += 1;
        }
    }

    pub fn page_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(PAGE_SIZE);
    }

    pub fn page_down(&mut self) {
        let max = self.visible_tokens().len().saturating_sub(1);
        self.selected_index = (self.selected_index + PAGE_SIZE).min(max);
    }

    /// Toggle between view modes
    pub fn toggle_view_mode(&mut self) {
        self.view_mode = match self.view_mode {
            ViewMode::Tokens => ViewMode::Inspector,
            ViewMode::Inspector => ViewMode::Tokens,
        };
    }

    pub fn toggle_resolved(&mut self) {
        self.show_resolved = !self.show_resolved;
    }

    /// Make the next (or previous) loaded set active
    pub fn cycle_set(&mut self, forward: bool) {
        let count = self.store.sets().len();
        if count == 0 {
            return;
        }

        let current = self.store.sets().get_index_of(self.store.active_set());
        let next = match (current, forward) {
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
            (None, _) => 0,
        };

        let Some(name) = self.store.sets().get_index(next).map(|(name, _)| name.clone()) else {
            return;
        };

        match self.store.set_active_set(&name) {
            Ok(()) => {
                self.selected_index = 0;
                self.status = Some(format!("Active set: {}", name));
            }
            Err(err) => self.report(err),
        }
    }

    pub fn toggle_used_set(&mut self) {
        let name = self.store.active_set().to_string();
        match self.store.toggle_used_set(&name) {
            Ok(true) => self.status = Some(format!("Using {}", name)),
            Ok(false) => self.status = Some(format!("No longer using {}", name)),
            Err(err) => self.report(err),
        }
    }

    /// Delete the selected token from the active set
    pub fn delete_selected(&mut self) {
        let Some(name) = self.selected_token().map(|(name, _)| name.to_string()) else {
            return;
        };
        let set = self.store.active_set().to_string();

        match self.store.delete_token(&set, &name) {
            Ok(_) => {
                info!(token = %name, set = %set, "deleted token");
                self.status = Some(format!("Deleted {}", name));
                let max = self.visible_tokens().len().saturating_sub(1);
                self.selected_index = self.selected_index.min(max);
            }
            Err(err) => self.report(err),
        }
    }

    /// Grow or shrink the plugin window by one step
    pub fn resize_window(&mut self, grow: bool) {
        let step = self.config.window_step;
        let window = self.settings.state().ui_window;
        let (width, height) = if grow {
            (window.width.saturating_add(step), window.height.saturating_add(step))
        } else {
            (
                window.width.saturating_sub(step).max(step),
                window.height.saturating_sub(step).max(step),
            )
        };
        self.settings.set_window_size(width, height);
    }

    pub fn toggle_inspect_deep(&mut self) {
        let value = !self.settings.state().inspect_deep;
        self.settings.set_inspect_deep(value);
    }

    pub fn cycle_update_mode(&mut self) {
        let mode = self.settings.state().update_mode.next();
        self.settings.set_update_mode(mode);
    }

    pub fn toggle_update_remote(&mut self) {
        let value = !self.settings.state().update_remote;
        self.settings.set_update_remote(value);
    }

    pub fn toggle_update_on_change(&mut self) {
        let value = !self.settings.state().update_on_change;
        self.settings.set_update_on_change(value);
    }

    pub fn toggle_update_styles(&mut self) {
        let value = !self.settings.state().update_styles;
        self.settings.set_update_styles(value);
    }

    pub fn toggle_token_mode(&mut self) {
        let mode = match self.settings.state().token_type {
            TokenMode::Object => TokenMode::Array,
            TokenMode::Array => TokenMode::Object,
        };
        self.settings.set_token_type(mode);
    }

    /// Path the active set is exported to
    pub fn export_path(&self) -> PathBuf {
        let file_name = format!("{}.export.json", self.store.active_set().replace('/', "-"));
        self.workspace_root.join(file_name)
    }

    /// Write the active set as a nested JSON document
    pub fn export_active(&mut self) -> Result<PathBuf> {
        let document = stringify_tokens(self.store.sets(), self.store.active_set())?;
        let path = self.export_path();

        fs::write(&path, document)
            .with_context(|| format!("Failed to write export: {}", path.display()))?;

        info!(path = %path.display(), "exported token set");
        Ok(path)
    }

    /// Reload token sets from disk, keeping the current settings
    pub fn reload(&mut self) -> Result<()> {
        let sets = self.workspace_config.load_token_sets(&self.workspace_root)?;
        self.store = Self::build_store(&self.workspace_config, sets);
        self.selected_index = 0;
        Ok(())
    }

    pub fn start_filter(&mut self) {
        self.filtering = true;
    }

    pub fn push_filter(&mut self, c: char) {
        self.filter.push(c);
        self.selected_index = 0;
    }

    pub fn pop_filter(&mut self) {
        self.filter.pop();
        self.selected_index = 0;
    }

    pub fn end_filter(&mut self) {
        self.filtering = false;
    }

    /// Show an error in the footer and log it
    pub fn report(&mut self, err: impl std::fmt::Display) {
        warn!(error = %err, "command failed");
        self.status = Some(format!("Error: {}", err));
    }

    /// Request application quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

fn log_resolution(resolution: &Resolution) {
    info!(
        tokens = resolution.len(),
        circular = resolution.circular_errors().count(),
        unresolved = resolution.unresolved_references().len(),
        "resolution updated"
    );
}
