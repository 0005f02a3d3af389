// Token List Component
// Renders the active set's tokens grouped by type

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::core::App;
use crate::display::group_tokens;
use crate::operations::ResolutionStatus;
use super::Styles;

/// Render the token list component
pub fn render_token_list(f: &mut Frame, app: &App, is_focused: bool, area: Rect) {
    let mut items: Vec<ListItem> = Vec::new();
    let mut selected_row = None;
    let mut token_index = 0;

    if let Some(set) = app.store.active_tokens() {
        for group in group_tokens(set, &app.filter) {
            let header_style = if group.is_empty() {
                Styles::group_empty()
            } else {
                Styles::group_header()
            };
            items.push(ListItem::new(Line::from(Span::styled(
                format!("{} ({})", group.label, group.tokens.len()),
                header_style,
            ))));

            for (name, _) in &group.tokens {
                if token_index == app.selected_index {
                    selected_row = Some(items.len());
                }

                let style = if token_index == app.selected_index && is_focused {
                    Styles::list_selected()
                } else {
                    Styles::list_normal()
                };

                let (marker, marker_style) = match app.resolution().get(name).map(|t| &t.status) {
                    Some(ResolutionStatus::Circular(_)) => ("↻ ", Styles::token_circular()),
                    Some(ResolutionStatus::Unresolved { .. }) => ("? ", Styles::token_unresolved()),
                    _ => ("  ", Styles::list_normal()),
                };

                items.push(ListItem::new(Line::from(vec![
                    Span::styled(marker, marker_style),
                    Span::styled(name.to_string(), style),
                ])));
                token_index += 1;
            }
        }
    }

    let title = if app.filter.is_empty() {
        format!("{} tokens", app.store.active_set())
    } else {
        format!("{} tokens / {}", app.store.active_set(), app.filter)
    };

    let (title_style, border_style) = if is_focused {
        (Styles::title_focused(), Styles::border_focused())
    } else {
        (Styles::title_unfocused(), Styles::border_unfocused())
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(title, title_style)),
    );

    let mut list_state = ListState::default();
    list_state.select(selected_row);
    f.render_stateful_widget(list, area, &mut list_state);
}
