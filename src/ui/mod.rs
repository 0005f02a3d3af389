// UI module
// TUI components and views for the token manager

pub mod app_view;
pub mod styles;
pub mod token_list;

use anyhow::Result;
use crossterm::event;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::Stdout;
use std::time::Duration;

use crate::core::{App, AppEvent, EventHandler};

pub use app_view::render_app;
pub use styles::Styles;
pub use token_list::render_token_list;

/// Run the main application event loop
pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Render the UI
        terminal.draw(|f| render_app(f, app))?;

        // Handle events
        if event::poll(Duration::from_millis(250))? {
            let event = event::read()?;
            let app_event = EventHandler::handle(event, app.filtering);

            handle_event(app, app_event);
        }

        // Check if we should quit
        if app.should_quit {
            return Ok(());
        }
    }
}

/// Handle an application event
pub fn handle_event(app: &mut App, event: AppEvent) {
    // A new command replaces the previous status line
    if event != AppEvent::None {
        app.status = None;
    }

    match event {
        AppEvent::Quit => app.quit(),
        AppEvent::SelectPrevious => app.select_previous(),
        AppEvent::SelectNext => app.select_next(),
        AppEvent::PageUp => app.page_up(),
        AppEvent::PageDown => app.page_down(),
        AppEvent::ToggleViewMode => app.toggle_view_mode(),
        AppEvent::ToggleResolved => app.toggle_resolved(),
        AppEvent::NextSet => app.cycle_set(true),
        AppEvent::PreviousSet => app.cycle_set(false),
        AppEvent::ToggleUsedSet => app.toggle_used_set(),
        AppEvent::DeleteToken => app.delete_selected(),
        AppEvent::GrowWindow => app.resize_window(true),
        AppEvent::ShrinkWindow => app.resize_window(false),
        AppEvent::ToggleInspectDeep => app.toggle_inspect_deep(),
        AppEvent::CycleUpdateMode => app.cycle_update_mode(),
        AppEvent::ToggleUpdateRemote => app.toggle_update_remote(),
        AppEvent::ToggleUpdateOnChange => app.toggle_update_on_change(),
        AppEvent::ToggleUpdateStyles => app.toggle_update_styles(),
        AppEvent::ToggleTokenMode => app.toggle_token_mode(),
        AppEvent::Export => match app.export_active() {
            Ok(path) => app.status = Some(format!("Exported to {}", path.display())),
            Err(err) => app.report(format!("{:#}", err)),
        },
        AppEvent::Reload => match app.reload() {
            Ok(()) => app.status = Some("Reloaded token sets".to_string()),
            Err(err) => app.report(format!("{:#}", err)),
        },
        AppEvent::StartFilter => app.start_filter(),
        AppEvent::FilterChar(c) => app.push_filter(c),
        AppEvent::FilterBackspace => app.pop_filter(),
        AppEvent::EndFilter => app.end_filter(),
        AppEvent::Back => {
            if app.filter.is_empty() {
                app.quit();
            } else {
                app.filter.clear();
                app.selected_index = 0;
            }
        }
        AppEvent::None => {}
    }
}
