use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::form::Intent;

/// Maps a terminal key press to a form intent.
pub fn map_key(key: KeyEvent) -> Option<Intent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => Some(Intent::Quit),
        KeyCode::Char('s') if ctrl => Some(Intent::Submit),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Esc => Some(Intent::Quit),
        KeyCode::Tab | KeyCode::Down => Some(Intent::FocusNext),
        KeyCode::BackTab | KeyCode::Up => Some(Intent::FocusPrev),
        KeyCode::Right => Some(Intent::CycleNext),
        KeyCode::Left => Some(Intent::CyclePrev),
        KeyCode::Enter => Some(Intent::Activate),
        KeyCode::Backspace => Some(Intent::Backspace),
        KeyCode::Delete => Some(Intent::RemoveFile),
        KeyCode::Char(c) => Some(Intent::Insert(c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_control_chords() {
        assert_eq!(map_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL)), Some(Intent::Quit));
        assert_eq!(map_key(press(KeyCode::Char('s'), KeyModifiers::CONTROL)), Some(Intent::Submit));
        assert_eq!(map_key(press(KeyCode::Char('x'), KeyModifiers::CONTROL)), None);
    }

    #[test]
    fn test_plain_keys() {
        assert_eq!(map_key(press(KeyCode::Char('Q'), KeyModifiers::SHIFT)), Some(Intent::Insert('Q')));
        assert_eq!(map_key(press(KeyCode::Tab, KeyModifiers::NONE)), Some(Intent::FocusNext));
        assert_eq!(map_key(press(KeyCode::BackTab, KeyModifiers::SHIFT)), Some(Intent::FocusPrev));
        assert_eq!(map_key(press(KeyCode::Left, KeyModifiers::NONE)), Some(Intent::CyclePrev));
        assert_eq!(map_key(press(KeyCode::Enter, KeyModifiers::NONE)), Some(Intent::Activate));
        assert_eq!(map_key(press(KeyCode::F(5), KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_release_ignored() {
        let mut key = press(KeyCode::Char('a'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key), None);
    }
}
