use crate::widget::ChatWidget;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

const PAGE: u16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Insert(char),
    Backspace,
    Send,
    Voice,
    SelectPrevious,
    SelectNext,
    Copy,
    ScrollUp,
    ScrollDown,
    Quit,
}

pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let action = match key.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Enter => Action::Send,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Up => Action::SelectPrevious,
        KeyCode::Down => Action::SelectNext,
        KeyCode::PageUp => Action::ScrollUp,
        KeyCode::PageDown => Action::ScrollDown,
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => match c {
            'c' => Action::Quit,
            'r' => Action::Voice,
            'y' => Action::Copy,
            'u' => Action::ScrollUp,
            'd' => Action::ScrollDown,
            _ => return None,
        },
        KeyCode::Char(c) => Action::Insert(c),
        _ => return None,
    };
    Some(action)
}

/// Applies an action to the widget. Returns `true` when the user asked to quit.
pub fn handle_action(widget: &mut ChatWidget, action: Action) -> bool {
    match action {
        Action::Quit => return true,
        Action::Insert(c) => widget.input_mut().push(c),
        Action::Backspace => widget.input_mut().pop(),
        Action::Send => {
            widget.send();
        }
        Action::Voice => {
            widget.activate_voice();
        }
        Action::SelectPrevious => widget.messages_mut().select_previous_bot(),
        Action::SelectNext => widget.messages_mut().select_next_bot(),
        Action::Copy => {
            widget.copy_selected();
        }
        Action::ScrollUp => widget.messages_mut().scroll_up(PAGE),
        Action::ScrollDown => widget.messages_mut().scroll_down(PAGE),
    }
    false
}
