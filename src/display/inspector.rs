// Inspector
// Lists the tokens applied to the current selection

use crate::core::SelectionState;
use crate::operations::{find_token, Resolution};

/// One applied token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectorRow {
    /// Document property, e.g. `fill`
    pub property: String,
    /// CSS-variable style name, e.g. `$colors-primary`
    pub variable: String,
    /// Comment holding the resolved token as JSON
    pub detail: String,
}

/// What the inspector shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inspection {
    Rows(Vec<InspectorRow>),
    Blank { title: &'static str, text: &'static str },
}

/// Build the inspector view for a selection
pub fn inspect(selection: &SelectionState, resolution: &Resolution) -> Inspection {
    if selection.is_empty() {
        return if selection.selected_layers > 0 {
            Inspection::Blank {
                title: "No tokens found",
                text: "None of the selected layers contain any tokens",
            }
        } else {
            Inspection::Blank {
                title: "No layers selected",
                text: "Select a layer to see applied tokens",
            }
        };
    }

    let rows = selection
        .applied()
        .map(|(property, token)| {
            let json = find_token(resolution, token)
                .and_then(|t| serde_json::to_string(t).ok())
                .unwrap_or_else(|| "null".to_string());

            InspectorRow {
                property: property.to_string(),
                variable: format!("${}", token.replace('.', "-")),
                detail: format!("/* {} */", json),
            }
        })
        .collect();

    Inspection::Rows(rows)
}
