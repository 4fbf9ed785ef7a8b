use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Actions bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayAction {
    Quit,
    AlignTop,
    AlignBottom,
    AlignLeft,
    AlignRight,
    Center,
}

/// Map a key press to its action; unbound keys have no effect.
pub fn action_for_key(key: &KeyEvent) -> Option<DisplayAction> {
    // Raw mode delivers Ctrl-C as a key instead of SIGINT
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(DisplayAction::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Some(DisplayAction::Quit),
        KeyCode::Char('c') => Some(DisplayAction::Center),
        KeyCode::Up => Some(DisplayAction::AlignTop),
        KeyCode::Down => Some(DisplayAction::AlignBottom),
        KeyCode::Left => Some(DisplayAction::AlignLeft),
        KeyCode::Right => Some(DisplayAction::AlignRight),
        _ => None,
    }
}
