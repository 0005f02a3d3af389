// Token Model
// Token types, stored definitions and the parsed value representation

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::operations::alias::{parse_template, Segment};

/// Type tag of a design token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenType {
    Color,
    #[default]
    Implicit,
    Sizing,
    Spacing,
    BorderRadius,
    BorderWidth,
    Opacity,
    FontFamilies,
    FontWeights,
    FontSizes,
    LineHeights,
    LetterSpacing,
    ParagraphSpacing,
    Typography,
    BoxShadow,
    Other,
}

impl TokenType {
    /// All token types in listing order
    pub const ALL: [TokenType; 16] = [
        TokenType::Color,
        TokenType::Implicit,
        TokenType::Sizing,
        TokenType::Spacing,
        TokenType::BorderRadius,
        TokenType::BorderWidth,
        TokenType::Opacity,
        TokenType::FontFamilies,
        TokenType::FontWeights,
        TokenType::FontSizes,
        TokenType::LineHeights,
        TokenType::LetterSpacing,
        TokenType::ParagraphSpacing,
        TokenType::Typography,
        TokenType::BoxShadow,
        TokenType::Other,
    ];

    /// The tag as it appears in token documents
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Color => "color",
            TokenType::Implicit => "implicit",
            TokenType::Sizing => "sizing",
            TokenType::Spacing => "spacing",
            TokenType::BorderRadius => "borderRadius",
            TokenType::BorderWidth => "borderWidth",
            TokenType::Opacity => "opacity",
            TokenType::FontFamilies => "fontFamilies",
            TokenType::FontWeights => "fontWeights",
            TokenType::FontSizes => "fontSizes",
            TokenType::LineHeights => "lineHeights",
            TokenType::LetterSpacing => "letterSpacing",
            TokenType::ParagraphSpacing => "paragraphSpacing",
            TokenType::Typography => "typography",
            TokenType::BoxShadow => "boxShadow",
            TokenType::Other => "other",
        }
    }

    /// Human-readable group label
    pub fn label(&self) -> &'static str {
        match self {
            TokenType::Color => "Color",
            TokenType::Implicit => "Unknown",
            TokenType::Sizing => "Sizing",
            TokenType::Spacing => "Spacing",
            TokenType::BorderRadius => "Border Radius",
            TokenType::BorderWidth => "Border Width",
            TokenType::Opacity => "Opacity",
            TokenType::FontFamilies => "Font Families",
            TokenType::FontWeights => "Font Weights",
            TokenType::FontSizes => "Font Sizes",
            TokenType::LineHeights => "Line Heights",
            TokenType::LetterSpacing => "Letter Spacing",
            TokenType::ParagraphSpacing => "Paragraph Spacing",
            TokenType::Typography => "Typography",
            TokenType::BoxShadow => "Box Shadow",
            TokenType::Other => "Other",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token definition as stored in a token set
///
/// The token's name is the key it is stored under and is never part of
/// the serialized definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenDefinition {
    /// Literal value, alias string, or composite object/array
    pub value: Value,

    /// Declared type; `implicit` when the document omits it
    #[serde(rename = "type", default)]
    pub token_type: TokenType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TokenDefinition {
    pub fn new(value: impl Into<Value>, token_type: TokenType) -> Self {
        Self {
            value: value.into(),
            token_type,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Parse the stored value into its alias-aware form
    pub fn parsed_value(&self) -> TokenValue {
        TokenValue::parse(&self.value)
    }
}

/// A token value with alias references made explicit
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    /// A value with no references
    Literal(Value),

    /// A string that is exactly one reference; resolves to the target's value
    Reference(String),

    /// A string mixing text and references; resolves to a string
    Template(Vec<Segment>),

    /// Object value whose fields resolve independently
    Composite(IndexMap<String, TokenValue>),

    /// Array value whose items resolve independently
    List(Vec<TokenValue>),
}

impl TokenValue {
    /// Parse a raw document value
    pub fn parse(raw: &Value) -> Self {
        match raw {
            Value::String(text) => Self::parse_string(text),
            Value::Object(fields) => TokenValue::Composite(
                fields
                    .iter()
                    .map(|(key, value)| (key.clone(), Self::parse(value)))
                    .collect(),
            ),
            Value::Array(items) => TokenValue::List(items.iter().map(Self::parse).collect()),
            other => TokenValue::Literal(other.clone()),
        }
    }

    fn parse_string(text: &str) -> Self {
        let segments = parse_template(text);

        if let [Segment::Reference(name)] = segments.as_slice() {
            return TokenValue::Reference(name.clone());
        }

        if segments.iter().all(|s| matches!(s, Segment::Text(_))) {
            let literal: String = segments
                .into_iter()
                .map(|s| match s {
                    Segment::Text(text) => text,
                    Segment::Reference(_) => String::new(),
                })
                .collect();
            return TokenValue::Literal(Value::String(literal));
        }

        TokenValue::Template(segments)
    }

    /// Names referenced anywhere in this value, first occurrence order, no duplicates
    pub fn references(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<&'a str>) {
        fn push<'a>(out: &mut Vec<&'a str>, name: &'a str) {
            if !out.contains(&name) {
                out.push(name);
            }
        }

        match self {
            TokenValue::Literal(_) => {}
            TokenValue::Reference(name) => push(out, name),
            TokenValue::Template(segments) => {
                for segment in segments {
                    if let Segment::Reference(name) = segment {
                        push(out, name);
                    }
                }
            }
            TokenValue::Composite(fields) => {
                for value in fields.values() {
                    value.collect_references(out);
                }
            }
            TokenValue::List(items) => {
                for item in items {
                    item.collect_references(out);
                }
            }
        }
    }

    pub fn has_references(&self) -> bool {
        !self.references().is_empty()
    }
}
