use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use flashcopy_search::KeyInput;

/// Maps a terminal key event onto a session key. Key releases and unbound
/// keys decode to `None`.
pub fn decode_key(event: KeyEvent) -> Option<KeyInput> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    let alt = event.modifiers.contains(KeyModifiers::ALT);

    match event.code {
        KeyCode::Esc => Some(KeyInput::Cancel),
        KeyCode::Enter => Some(KeyInput::Enter),
        KeyCode::Backspace if ctrl || alt => Some(KeyInput::DeleteWord),
        KeyCode::Backspace => Some(KeyInput::Backspace),
        KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
            'c' | 'g' | 'd' => Some(KeyInput::Cancel),
            'u' => Some(KeyInput::Clear),
            'w' => Some(KeyInput::DeleteWord),
            'h' => Some(KeyInput::Backspace),
            _ => None,
        },
        KeyCode::Char(_) if alt => None,
        KeyCode::Char(c) if !c.is_control() => Some(KeyInput::Char(c)),
        _ => None,
    }
}
