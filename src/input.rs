use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

/// What the hidden text field would hold after `key`, or `None` when the key
/// does not edit text.
pub fn edited_value(current: &str, key: &KeyEvent) -> Option<String> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }

    match key.code {
        KeyCode::Char(c) => {
            let mut value = current.to_owned();
            value.push(c);
            Some(value)
        }
        KeyCode::Backspace => {
            let mut value = current.to_owned();
            value.pop();
            Some(value)
        }
        _ => None,
    }
}

/// Value of the field after a bracketed paste.
pub fn pasted_value(current: &str, pasted: &str) -> String {
    let mut value = String::with_capacity(current.len() + pasted.len());
    value.push_str(current);
    // the field is single-line
    value.extend(pasted.chars().filter(|c| *c != '\n' && *c != '\r'));
    value
}

/// Caps Lock state as reported with the key. Only terminals with keyboard
/// enhancement report it; elsewhere this reads as off.
pub fn caps_lock_engaged(key: &KeyEvent) -> bool {
    key.state.contains(KeyEventState::CAPS_LOCK)
}

/// Release events only show up with keyboard enhancement enabled.
pub fn is_key_down(key: &KeyEvent) -> bool {
    key.kind != KeyEventKind::Release
}
