// Token Tooltip
// Human-readable rendering of a token value by type

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::core::{TokenDefinition, TokenType};
use crate::operations::Resolution;

/// Errors raised while formatting a value for display
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("{token_type} value must be an object, found {found}")]
    NotAnObject { token_type: TokenType, found: String },

    #[error("shadow {index} must be an object, found {found}")]
    InvalidShadow { index: usize, found: String },

    #[error("failed to encode value: {0}")]
    Json(#[from] serde_json::Error),
}

/// Whether to show the stored value or its resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Raw,
    Resolved,
}

const TYPOGRAPHY_FIELDS: [(&str, &str); 7] = [
    ("Font", "fontFamily"),
    ("Weight", "fontWeight"),
    ("Leading", "lineHeight"),
    ("Tracking", "letterSpacing"),
    ("Paragraph Spacing", "paragraphSpacing"),
    ("Text Case", "textCase"),
    ("Text Decoration", "textDecoration"),
];

/// Format a value as display lines
pub fn format_value(token_type: TokenType, value: &Value, mode: DisplayMode) -> Result<Vec<String>, FormatError> {
    match token_type {
        TokenType::Typography => format_typography(value, mode),
        TokenType::BoxShadow => format_shadows(value),
        _ => format_scalar(value),
    }
}

fn format_typography(value: &Value, mode: DisplayMode) -> Result<Vec<String>, FormatError> {
    let Value::Object(fields) = value else {
        return Err(FormatError::NotAnObject {
            token_type: TokenType::Typography,
            found: value.to_string(),
        });
    };

    match mode {
        DisplayMode::Resolved => {
            let part = |key: &str| fields.get(key).map(scalar_text).unwrap_or_default();
            Ok(vec![format!(
                "{} {} / {}",
                part("fontFamily"),
                part("fontWeight"),
                part("fontSize")
            )])
        }
        DisplayMode::Raw => Ok(TYPOGRAPHY_FIELDS
            .iter()
            .map(|(label, key)| {
                // A sub-field may itself be a nested token object
                let field = fields.get(*key).map(|f| f.get("value").unwrap_or(f));
                format!("{}: {}", label, field.map(scalar_text).unwrap_or_default())
            })
            .collect()),
    }
}

fn format_shadows(value: &Value) -> Result<Vec<String>, FormatError> {
    match value {
        Value::Array(shadows) => shadows
            .iter()
            .enumerate()
            .map(|(index, shadow)| format_shadow(index, shadow))
            .collect(),
        Value::Object(_) => Ok(vec![format_shadow(0, value)?]),
        other => Err(FormatError::NotAnObject {
            token_type: TokenType::BoxShadow,
            found: other.to_string(),
        }),
    }
}

fn format_shadow(index: usize, shadow: &Value) -> Result<String, FormatError> {
    let Value::Object(fields) = shadow else {
        return Err(FormatError::InvalidShadow {
            index,
            found: shadow.to_string(),
        });
    };

    let parts: Vec<String> = ["type", "x", "y", "blur", "spread", "color"]
        .iter()
        .map(|key| fields.get(*key).map(scalar_text).unwrap_or_default())
        .collect();

    Ok(parts.join(" ").trim().to_string())
}

fn format_scalar(value: &Value) -> Result<Vec<String>, FormatError> {
    match value {
        Value::String(text) => Ok(vec![text.clone()]),
        Value::Number(number) => Ok(vec![number.to_string()]),
        other => Ok(serde_json::to_string_pretty(other)?
            .lines()
            .map(str::to_string)
            .collect()),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Tooltip lines for a token; empty if the value cannot be formatted
///
/// In resolved mode the token's resolved value is used when the resolution
/// knows the name, otherwise the stored value.
pub fn render_tooltip(name: &str, definition: &TokenDefinition, resolution: &Resolution, mode: DisplayMode) -> Vec<String> {
    let value = match mode {
        DisplayMode::Resolved => resolution.value(name).unwrap_or(&definition.value),
        DisplayMode::Raw => &definition.value,
    };

    match format_value(definition.token_type, value, mode) {
        Ok(lines) => lines,
        Err(err) => {
            warn!(token = %name, error = %err, "error rendering tooltip");
            Vec::new()
        }
    }
}
