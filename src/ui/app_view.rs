// Application View
// Main application layout and rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::core::{App, ViewMode};
use crate::display::{render_tooltip, DisplayMode, Inspection};
use crate::operations::ResolutionStatus;
use super::{render_token_list, Styles};

/// Render the entire application
pub fn render_app(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    match app.view_mode {
        ViewMode::Tokens => render_tokens_view(f, app, chunks[1]),
        ViewMode::Inspector => render_inspector(f, app, chunks[1]),
    }
    render_footer(f, app, chunks[2]);
}

/// Render the header bar
fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let text = format!(
        "Token Manager | {} | sets: {}",
        app.workspace_root.display(),
        app.store.precedence().join(" < ")
    );
    let header = Paragraph::new(text)
        .style(Styles::header())
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

/// Render the token list with the selected token's details
fn render_tokens_view(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_token_list(f, app, true, chunks[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(10)])
        .split(chunks[1]);

    render_token_detail(f, app, right[0]);
    render_settings(f, app, right[1]);
}

/// Render the tooltip and resolution status of the selected token
fn render_token_detail(f: &mut Frame, app: &App, area: Rect) {
    let mode = if app.show_resolved {
        DisplayMode::Resolved
    } else {
        DisplayMode::Raw
    };
    let title = match mode {
        DisplayMode::Resolved => "Token (resolved)",
        DisplayMode::Raw => "Token (raw)",
    };

    let lines: Vec<Line> = match app.selected_token() {
        Some((name, definition)) => {
            let mut lines = vec![
                Line::from(Span::styled(name.to_string(), Styles::property())),
                Line::from(Span::styled(definition.token_type.label(), Styles::comment())),
                Line::from(""),
            ];

            lines.extend(
                render_tooltip(name, definition, app.resolution(), mode)
                    .into_iter()
                    .map(|line| Line::from(Span::styled(line, Styles::token_value()))),
            );

            if let Some(description) = &definition.description {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(description.clone(), Styles::comment())));
            }

            match app.resolution().get(name).map(|t| &t.status) {
                Some(ResolutionStatus::Circular(err)) => {
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled(err.to_string(), Styles::token_circular())));
                }
                Some(ResolutionStatus::Unresolved { missing }) => {
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled(
                        format!("unresolved: {}", missing.join(", ")),
                        Styles::token_unresolved(),
                    )));
                }
                _ => {}
            }

            lines
        }
        None => vec![Line::from("No token selected")],
    };

    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(detail, area);
}

/// Render the current plugin settings
fn render_settings(f: &mut Frame, app: &App, area: Rect) {
    let state = app.settings.state();
    let text = format!(
        "Window: {}x{}\nUpdate mode: {:?}\nUpdate remote: {}\nUpdate on change: {}\nUpdate styles: {}\nToken storage: {:?}\nInspect deep: {}",
        state.ui_window.width,
        state.ui_window.height,
        state.update_mode,
        state.update_remote,
        state.update_on_change,
        state.update_styles,
        state.token_type,
        state.inspect_deep,
    );

    let settings = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Settings"));
    f.render_widget(settings, area);
}

/// Render the tokens applied to the selection
fn render_inspector(f: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = match app.inspection() {
        Inspection::Rows(rows) => rows
            .into_iter()
            .map(|row| {
                Line::from(vec![
                    Span::styled(format!("{}: ", row.property), Styles::property()),
                    Span::styled(row.variable, Styles::variable()),
                    Span::raw(" "),
                    Span::styled(row.detail, Styles::comment()),
                ])
            })
            .collect(),
        Inspection::Blank { title, text } => vec![
            Line::from(Span::styled(title, Styles::group_header())),
            Line::from(text),
        ],
    };

    let title = if app.settings.state().inspect_deep {
        "Inspector (deep)"
    } else {
        "Inspector"
    };

    let inspector = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border_focused())
                .title(Span::styled(title, Styles::title_focused())),
        );
    f.render_widget(inspector, area);
}

/// Render the footer bar
fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let (text, style) = if app.filtering {
        (format!("Filter: {}_  (Enter/Esc: done)", app.filter), Styles::footer())
    } else if let Some(status) = &app.status {
        (status.clone(), Styles::status())
    } else {
        let help = match app.view_mode {
            ViewMode::Tokens => "q: Quit | Tab: Inspector | ↑/↓: Navigate | Enter: Raw/Resolved | [/]: Set | u: Use set | d: Delete | /: Filter | e: Export | R: Reload",
            ViewMode::Inspector => "q: Quit | Tab: Tokens | i: Inspect deep | m: Update mode | r/o/s: Update options | t: Storage | +/-: Window",
        };
        (help.to_string(), Styles::footer())
    };

    let footer = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}
