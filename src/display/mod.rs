// Display module
// Plain-text views of tokens, independent of any terminal backend

pub mod inspector;
pub mod listing;
pub mod tooltip;

pub use inspector::{inspect, Inspection, InspectorRow};
pub use listing::{group_tokens, visible_token_names, TokenGroup};
pub use tooltip::{format_value, render_tooltip, DisplayMode, FormatError};
