// Event Handling
// Application event types and handler infrastructure

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

/// Application events that can be handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Quit the application
    Quit,

    /// Move selection up
    SelectPrevious,

    /// Move selection down
    SelectNext,

    /// Move selection by a page
    PageUp,
    PageDown,

    /// Switch between the token list and the inspector
    ToggleViewMode,

    /// Switch the tooltip between raw and resolved values
    ToggleResolved,

    /// Make the next or previous set active
    NextSet,
    PreviousSet,

    /// Add or remove the active set from the used sets
    ToggleUsedSet,

    /// Delete the selected token from the active set
    DeleteToken,

    /// Resize the plugin window by one step
    GrowWindow,
    ShrinkWindow,

    ToggleInspectDeep,
    CycleUpdateMode,
    ToggleUpdateRemote,
    ToggleUpdateOnChange,
    ToggleUpdateStyles,
    ToggleTokenMode,

    /// Write the active set as a nested JSON document
    Export,

    /// Reload token sets from disk
    Reload,

    /// Filter editing
    StartFilter,
    FilterChar(char),
    FilterBackspace,
    EndFilter,

    /// Go back / escape current mode
    Back,

    /// No operation
    None,
}

/// Event handler that converts terminal events to application events
pub struct EventHandler;

impl EventHandler {
    /// Convert a crossterm event to an application event
    ///
    /// While `filtering`, printable keys edit the filter instead of
    /// triggering commands.
    pub fn handle(event: Event, filtering: bool) -> AppEvent {
        match event {
            Event::Key(key) if filtering => Self::handle_filter_key(key),
            Event::Key(key) => Self::handle_key(key),
            Event::Mouse(mouse) => Self::handle_mouse(mouse),
            _ => AppEvent::None,
        }
    }

    /// Handle keyboard events
    fn handle_key(key: KeyEvent) -> AppEvent {
        // Only handle key press events
        if key.kind != KeyEventKind::Press {
            return AppEvent::None;
        }

        match key.code {
            // Quit
            KeyCode::Char('q') => AppEvent::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => AppEvent::Quit,

            // Navigation
            KeyCode::Up | KeyCode::Char('k') => AppEvent::SelectPrevious,
            KeyCode::Down | KeyCode::Char('j') => AppEvent::SelectNext,
            KeyCode::PageUp => AppEvent::PageUp,
            KeyCode::PageDown => AppEvent::PageDown,

            // View toggles
            KeyCode::Tab => AppEvent::ToggleViewMode,
            KeyCode::Enter | KeyCode::Char(' ') => AppEvent::ToggleResolved,

            // Sets
            KeyCode::Char(']') => AppEvent::NextSet,
            KeyCode::Char('[') => AppEvent::PreviousSet,
            KeyCode::Char('u') => AppEvent::ToggleUsedSet,
            KeyCode::Char('d') | KeyCode::Delete => AppEvent::DeleteToken,

            // Settings
            KeyCode::Char('+') | KeyCode::Char('=') => AppEvent::GrowWindow,
            KeyCode::Char('-') => AppEvent::ShrinkWindow,
            KeyCode::Char('i') => AppEvent::ToggleInspectDeep,
            KeyCode::Char('m') => AppEvent::CycleUpdateMode,
            KeyCode::Char('r') => AppEvent::ToggleUpdateRemote,
            KeyCode::Char('o') => AppEvent::ToggleUpdateOnChange,
            KeyCode::Char('s') => AppEvent::ToggleUpdateStyles,
            KeyCode::Char('t') => AppEvent::ToggleTokenMode,

            // Files
            KeyCode::Char('e') => AppEvent::Export,
            KeyCode::Char('R') => AppEvent::Reload,

            KeyCode::Char('/') => AppEvent::StartFilter,

            // Back / Escape
            KeyCode::Esc => AppEvent::Back,

            _ => AppEvent::None,
        }
    }

    /// Handle keyboard events while the filter is being edited
    fn handle_filter_key(key: KeyEvent) -> AppEvent {
        if key.kind != KeyEventKind::Press {
            return AppEvent::None;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => AppEvent::Quit,
            KeyCode::Char(c) => AppEvent::FilterChar(c),
            KeyCode::Backspace => AppEvent::FilterBackspace,
            KeyCode::Enter | KeyCode::Esc => AppEvent::EndFilter,
            KeyCode::Up => AppEvent::SelectPrevious,
            KeyCode::Down => AppEvent::SelectNext,
            _ => AppEvent::None,
        }
    }

    /// Handle mouse events
    fn handle_mouse(mouse: MouseEvent) -> AppEvent {
        match mouse.kind {
            MouseEventKind::ScrollUp => AppEvent::SelectPrevious,
            MouseEventKind::ScrollDown => AppEvent::SelectNext,
            _ => AppEvent::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_command_keys() {
        assert_eq!(EventHandler::handle(press(KeyCode::Char('q')), false), AppEvent::Quit);
        assert_eq!(EventHandler::handle(press(KeyCode::Tab), false), AppEvent::ToggleViewMode);
        assert_eq!(EventHandler::handle(press(KeyCode::Char(']')), false), AppEvent::NextSet);
        assert_eq!(EventHandler::handle(press(KeyCode::Char('/')), false), AppEvent::StartFilter);
    }

    #[test]
    fn test_filter_mode_captures_characters() {
        assert_eq!(EventHandler::handle(press(KeyCode::Char('q')), true), AppEvent::FilterChar('q'));
        assert_eq!(EventHandler::handle(press(KeyCode::Backspace), true), AppEvent::FilterBackspace);
        assert_eq!(EventHandler::handle(press(KeyCode::Esc), true), AppEvent::EndFilter);
    }

    #[test]
    fn test_ctrl_c_quits_in_any_mode() {
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(EventHandler::handle(ctrl_c.clone(), false), AppEvent::Quit);
        assert_eq!(EventHandler::handle(ctrl_c, true), AppEvent::Quit);
    }
}
