// Plugin Settings
// Settings state, its reducers, and the host messages they trigger

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::app_config::compiled;
use crate::host::{HostMessage, HostNotifier};

/// Plugin window geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
}

/// Scope the host applies token updates to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMode {
    Page,
    Document,
    Selection,
}

impl UpdateMode {
    /// Parse a mode name, falling back to `page`
    pub fn from_name(name: &str) -> Self {
        match name {
            "document" => UpdateMode::Document,
            "selection" => UpdateMode::Selection,
            _ => UpdateMode::Page,
        }
    }

    /// The next mode in page -> document -> selection order
    pub fn next(self) -> Self {
        match self {
            UpdateMode::Page => UpdateMode::Document,
            UpdateMode::Document => UpdateMode::Selection,
            UpdateMode::Selection => UpdateMode::Page,
        }
    }
}

/// Shape of token storage: nested object or flat list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenMode {
    Object,
    Array,
}

impl TokenMode {
    pub fn from_name(name: &str) -> Self {
        if name == "array" {
            TokenMode::Array
        } else {
            TokenMode::Object
        }
    }
}

/// Settings pushed to the host with `SET_UI`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsState {
    pub ui_window: WindowSettings,
    pub update_mode: UpdateMode,
    pub update_remote: bool,
    pub update_on_change: bool,
    pub update_styles: bool,
    pub token_type: TokenMode,
    pub ignore_first_part_for_styles: bool,
    pub inspect_deep: bool,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            ui_window: WindowSettings {
                width: compiled::WINDOW_WIDTH,
                height: compiled::WINDOW_HEIGHT,
            },
            update_mode: UpdateMode::from_name(compiled::UPDATE_MODE),
            update_remote: compiled::UPDATE_REMOTE,
            update_on_change: compiled::UPDATE_ON_CHANGE,
            update_styles: compiled::UPDATE_STYLES,
            token_type: TokenMode::from_name(compiled::TOKEN_TYPE),
            ignore_first_part_for_styles: compiled::IGNORE_FIRST_PART_FOR_STYLES,
            inspect_deep: compiled::INSPECT_DEEP,
        }
    }
}

/// Settings store; reducers update state and some post to the host
#[derive(Debug, Clone)]
pub struct Settings {
    state: SettingsState,
    host: HostNotifier,
}

impl Settings {
    pub fn new(host: HostNotifier) -> Self {
        Self::with_state(SettingsState::default(), host)
    }

    pub fn with_state(state: SettingsState, host: HostNotifier) -> Self {
        Self { state, host }
    }

    pub fn state(&self) -> &SettingsState {
        &self.state
    }

    pub fn set_inspect_deep(&mut self, inspect_deep: bool) {
        self.state.inspect_deep = inspect_deep;
        self.post_ui();
    }

    pub fn set_window_size(&mut self, width: u32, height: u32) {
        debug!(width, height, "set window size");
        self.state.ui_window = WindowSettings { width, height };
        self.host.post(HostMessage::ResizeWindow { width, height });
    }

    /// Replace all settings; does not notify the host
    pub fn set_ui_settings(&mut self, state: SettingsState) {
        debug!(
            ignore_first_part = state.ignore_first_part_for_styles,
            "replacing ui settings"
        );
        self.state = state;
    }

    /// Re-send the current settings to the host
    pub fn trigger_window_change(&self) {
        self.post_ui();
    }

    pub fn set_update_mode(&mut self, update_mode: UpdateMode) {
        self.state.update_mode = update_mode;
        self.post_ui();
    }

    pub fn set_update_remote(&mut self, update_remote: bool) {
        self.state.update_remote = update_remote;
        self.post_ui();
    }

    pub fn set_update_on_change(&mut self, update_on_change: bool) {
        self.state.update_on_change = update_on_change;
        self.post_ui();
    }

    pub fn set_update_styles(&mut self, update_styles: bool) {
        self.state.update_styles = update_styles;
        self.post_ui();
    }

    /// Does not notify the host
    pub fn set_token_type(&mut self, token_type: TokenMode) {
        self.state.token_type = token_type;
    }

    pub fn set_ignore_first_part_for_styles(&mut self, ignore: bool) {
        self.state.ignore_first_part_for_styles = ignore;
        self.post_ui();
    }

    fn post_ui(&self) {
        self.host.post(HostMessage::SetUi(self.state.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn drain(rx: &mut UnboundedReceiver<HostMessage>) -> Vec<HostMessage> {
        let mut messages = Vec::new();
        while let Ok(message) = rx.try_recv() {
            messages.push(message);
        }
        messages
    }

    #[test]
    fn test_compiled_defaults() {
        let state = SettingsState::default();
        assert_eq!(state.ui_window, WindowSettings { width: 400, height: 600 });
        assert_eq!(state.update_mode, UpdateMode::Page);
        assert!(state.update_remote);
        assert!(state.update_on_change);
        assert!(state.update_styles);
        assert_eq!(state.token_type, TokenMode::Object);
        assert!(!state.ignore_first_part_for_styles);
        assert!(!state.inspect_deep);
    }

    #[test]
    fn test_window_size_posts_resize() {
        let (host, mut rx) = HostNotifier::channel();
        let mut settings = Settings::new(host);

        settings.set_window_size(640, 480);

        assert_eq!(settings.state().ui_window, WindowSettings { width: 640, height: 480 });
        assert_eq!(drain(&mut rx), vec![HostMessage::ResizeWindow { width: 640, height: 480 }]);
    }

    #[test]
    fn test_ui_reducers_post_updated_state() {
        let (host, mut rx) = HostNotifier::channel();
        let mut settings = Settings::new(host);

        settings.set_inspect_deep(true);
        settings.set_update_mode(UpdateMode::Selection);
        settings.set_update_remote(false);
        settings.set_update_on_change(false);
        settings.set_update_styles(false);
        settings.set_ignore_first_part_for_styles(true);

        let messages = drain(&mut rx);
        assert_eq!(messages.len(), 6);
        assert!(messages.iter().all(|m| m.kind() == "SET_UI"));

        match messages.last() {
            Some(HostMessage::SetUi(state)) => assert_eq!(state, settings.state()),
            other => panic!("unexpected message: {other:?}"),
        }
        match &messages[0] {
            HostMessage::SetUi(state) => {
                assert!(state.inspect_deep);
                assert_eq!(state.update_mode, UpdateMode::Page);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_silent_reducers() {
        let (host, mut rx) = HostNotifier::channel();
        let mut settings = Settings::new(host);

        settings.set_token_type(TokenMode::Array);
        let mut replaced = SettingsState::default();
        replaced.update_styles = false;
        settings.set_ui_settings(replaced.clone());

        assert!(drain(&mut rx).is_empty());
        assert_eq!(settings.state(), &replaced);

        settings.trigger_window_change();
        assert_eq!(drain(&mut rx), vec![HostMessage::SetUi(replaced)]);
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let state: SettingsState = serde_json::from_str(r#"{ "updateMode": "document" }"#).unwrap();
        assert_eq!(state.update_mode, UpdateMode::Document);
        assert_eq!(state.ui_window.width, 400);
    }

    #[test]
    fn test_update_mode_cycles() {
        assert_eq!(UpdateMode::Page.next().next().next(), UpdateMode::Page);
        assert_eq!(UpdateMode::from_name("bogus"), UpdateMode::Page);
    }
}
