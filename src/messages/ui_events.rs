//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Which screen the session controller is on
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum UiState {
    /// Editing the four request fields
    #[default]
    Composing,
    /// Request in flight, spinner running
    Sending,
    /// Showing the last outcome
    Displaying,
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    // Focus
    NextField,
    PrevField,

    // Editing the focused field
    CharInput(char),
    Newline,
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    CursorHome,
    CursorEnd,

    // Request
    SendRequest,

    // Response screen
    Back,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on the current screen
pub fn key_to_ui_event(key: KeyEvent, ui_state: UiState) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if is_quit_key(&key) {
        return Some(UiEvent::Quit);
    }

    match ui_state {
        UiState::Composing => composing_keys(key),
        // In-flight requests cannot be cancelled
        UiState::Sending => None,
        UiState::Displaying => displaying_keys(key),
    }
}

/// q, Esc or Ctrl+C, in every state
fn is_quit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') => key.modifiers.is_empty(),
        KeyCode::Esc => true,
        _ => false,
    }
}

fn composing_keys(key: KeyEvent) -> Option<UiEvent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('s') => Some(UiEvent::SendRequest),
            KeyCode::Char('j') => Some(UiEvent::Newline),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => Some(UiEvent::Newline),
        KeyCode::Enter => Some(UiEvent::SendRequest),
        KeyCode::Tab => Some(UiEvent::NextField),
        KeyCode::BackTab => Some(UiEvent::PrevField),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Delete => Some(UiEvent::Delete),
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Up => Some(UiEvent::CursorUp),
        KeyCode::Down => Some(UiEvent::CursorDown),
        KeyCode::Home => Some(UiEvent::CursorHome),
        KeyCode::End => Some(UiEvent::CursorEnd),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => {
            Some(UiEvent::CharInput(c))
        }
        _ => None,
    }
}

fn displaying_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('b') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(UiEvent::Back),
        KeyCode::Up => Some(UiEvent::ScrollUp),
        KeyCode::Down => Some(UiEvent::ScrollDown),
        KeyCode::PageUp => Some(UiEvent::PageUp),
        KeyCode::PageDown => Some(UiEvent::PageDown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_quit_keys_in_every_state() {
        for state in [UiState::Composing, UiState::Sending, UiState::Displaying] {
            for key in [press(KeyCode::Char('q')), press(KeyCode::Esc), ctrl('c')] {
                assert_eq!(key_to_ui_event(key, state), Some(UiEvent::Quit), "{state:?}");
            }
        }
    }

    #[test]
    fn test_composing_bindings() {
        let s = UiState::Composing;
        assert_eq!(key_to_ui_event(press(KeyCode::Tab), s), Some(UiEvent::NextField));
        assert_eq!(
            key_to_ui_event(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT), s),
            Some(UiEvent::PrevField)
        );
        assert_eq!(key_to_ui_event(press(KeyCode::Enter), s), Some(UiEvent::SendRequest));
        assert_eq!(key_to_ui_event(ctrl('s'), s), Some(UiEvent::SendRequest));
        assert_eq!(key_to_ui_event(ctrl('j'), s), Some(UiEvent::Newline));
        assert_eq!(
            key_to_ui_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT), s),
            Some(UiEvent::Newline)
        );
        assert_eq!(
            key_to_ui_event(KeyEvent::new(KeyCode::Char('X'), KeyModifiers::SHIFT), s),
            Some(UiEvent::CharInput('X'))
        );
        assert_eq!(key_to_ui_event(ctrl('b'), s), None);
    }

    #[test]
    fn test_sending_ignores_everything_but_quit() {
        let s = UiState::Sending;
        assert_eq!(key_to_ui_event(press(KeyCode::Enter), s), None);
        assert_eq!(key_to_ui_event(ctrl('b'), s), None);
        assert_eq!(key_to_ui_event(press(KeyCode::Char('a')), s), None);
    }

    #[test]
    fn test_displaying_bindings() {
        let s = UiState::Displaying;
        assert_eq!(key_to_ui_event(ctrl('b'), s), Some(UiEvent::Back));
        assert_eq!(key_to_ui_event(press(KeyCode::Down), s), Some(UiEvent::ScrollDown));
        assert_eq!(key_to_ui_event(press(KeyCode::Char('a')), s), None);
        assert_eq!(key_to_ui_event(press(KeyCode::Enter), s), None);
    }

    #[test]
    fn test_release_events_ignored() {
        let mut key = press(KeyCode::Esc);
        key.kind = KeyEventKind::Release;
        assert_eq!(key_to_ui_event(key, UiState::Composing), None);
    }
}
