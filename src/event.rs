use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use tokio::sync::mpsc;

use crate::app::Action;

pub async fn run_event_loop(tx: mpsc::UnboundedSender<Action>) {
    let mut reader = EventStream::new();

    while let Some(event) = reader.next().await {
        match event {
            Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                if let Some(action) = key_to_action(key) {
                    if tx.send(action).is_err() {
                        break;
                    }
                }
            }
            Ok(Event::Resize(_, _)) => {
                // Redraw with the new size
                if tx.send(Action::Redraw).is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("terminal event stream failed: {e}");
                break;
            }
        }
    }
}

fn key_to_action(key: KeyEvent) -> Option<Action> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    // Shift+Enter is only reported with keyboard enhancement; Alt+Enter and Ctrl+J work everywhere
    let newline_mods = KeyModifiers::SHIFT | KeyModifiers::ALT;
    let key_action = match key.code {
        KeyCode::Enter if key.modifiers.intersects(newline_mods) => KeyAction::Newline,
        KeyCode::Enter => KeyAction::Enter,
        KeyCode::Char('j') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Newline,
        KeyCode::Up => KeyAction::Up,
        KeyCode::Down => KeyAction::Down,
        KeyCode::Left => KeyAction::Left,
        KeyCode::Right => KeyAction::Right,
        KeyCode::Esc => KeyAction::Escape,
        KeyCode::Tab | KeyCode::BackTab => KeyAction::Tab,
        KeyCode::Backspace => KeyAction::Backspace,
        KeyCode::Char(c) => KeyAction::Char(c),
        _ => return None,
    };
    Some(Action::Key(key_action))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Up,
    Down,
    Left,
    Right,
    Enter,
    /// Shift+Enter, Alt+Enter or Ctrl+J: literal newline in the input box.
    Newline,
    Escape,
    Tab,
    Char(char),
    Backspace,
}
