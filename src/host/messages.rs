// Host Messages
// Typed messages posted to the host design application

use serde::{Deserialize, Serialize};

use crate::core::SettingsState;

/// A message for the host, tagged by `type` with a flat payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HostMessage {
    /// Push the plugin's UI settings
    SetUi(SettingsState),

    /// Request a new plugin window size
    ResizeWindow { width: u32, height: u32 },
}

impl HostMessage {
    /// The `type` discriminator
    pub fn kind(&self) -> &'static str {
        match self {
            HostMessage::SetUi(_) => "SET_UI",
            HostMessage::ResizeWindow { .. } => "RESIZE_WINDOW",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resize_window_is_flat() {
        let message = HostMessage::ResizeWindow { width: 500, height: 700 };
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({ "type": "RESIZE_WINDOW", "width": 500, "height": 700 })
        );
        assert_eq!(message.kind(), "RESIZE_WINDOW");
    }

    #[test]
    fn test_set_ui_flattens_settings() {
        let message = HostMessage::SetUi(SettingsState::default());
        let encoded = serde_json::to_value(&message).unwrap();

        assert_eq!(encoded["type"], "SET_UI");
        assert_eq!(encoded["updateMode"], "page");
        assert_eq!(encoded["uiWindow"], json!({ "width": 400, "height": 600 }));
        assert_eq!(encoded["inspectDeep"], false);

        let decoded: HostMessage = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, message);
    }
}
