//! Key event handlers.
//!
//! The emergency lock-out filter sits in front of every binding: while the
//! physical emergency stop is engaged, only the reload key and Ctrl+C do
//! anything at all.

use crate::input_key::InputKey;
use crate::message::{CommandKind, Message};
use crate::state::{AppState, Tab};

/// Map a key press to a message, given the current state.
pub(crate) fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    if state.locked_out() {
        return match key {
            InputKey::Char('r') => Some(Message::ReloadApp),
            InputKey::CharCtrl('c') => Some(Message::Quit),
            _ => None,
        };
    }

    // Global bindings
    match key {
        InputKey::CharCtrl('c') | InputKey::Char('q') | InputKey::Esc => {
            return Some(Message::Quit)
        }
        InputKey::Tab => return Some(Message::NextTab),
        InputKey::Char('1') => return Some(Message::SwitchTab(Tab::Home)),
        InputKey::Char('2') => return Some(Message::SwitchTab(Tab::Maps)),
        InputKey::Char('3') => return Some(Message::SwitchTab(Tab::MapStitch)),
        InputKey::Char('n') => return Some(Message::RefreshNetwork),
        InputKey::Char('d') => return Some(Message::DiscoverRobot),
        InputKey::Char(' ') => return Some(Message::ToggleRun),
        InputKey::Char('r') => return Some(Message::Command(CommandKind::Relocate)),
        InputKey::Char('R') => return Some(Message::Command(CommandKind::ForceRelocate)),
        InputKey::Char('g') => return Some(Message::Command(CommandKind::Dock)),
        InputKey::Char('G') => return Some(Message::Command(CommandKind::Undock)),
        InputKey::Char('e') => return Some(Message::Command(CommandKind::EmergencyExit)),
        InputKey::Char('m') => return Some(Message::Command(CommandKind::RefreshMapsCache)),
        InputKey::Char('Q') => return Some(Message::Command(CommandKind::QuitNavigation)),
        _ => {}
    }

    // Map navigation works on both map tabs; selection editing and the
    // stitch workflow only on the Map Stitch tab.
    match state.tab {
        Tab::Maps => match key {
            InputKey::Left | InputKey::Char('h') | InputKey::Up => Some(Message::MapCursorPrev),
            InputKey::Right | InputKey::Char('l') | InputKey::Down => Some(Message::MapCursorNext),
            _ => None,
        },
        Tab::MapStitch => match key {
            InputKey::Left | InputKey::Char('h') | InputKey::Up => Some(Message::MapCursorPrev),
            InputKey::Right | InputKey::Char('l') | InputKey::Down => Some(Message::MapCursorNext),
            InputKey::Enter => Some(Message::ToggleSelectAtCursor),
            InputKey::Char('a') => Some(Message::SelectAll),
            InputKey::Char('A') => Some(Message::DeselectAll),
            InputKey::Char('t') => Some(Message::Stitch),
            InputKey::Char('x') => Some(Message::Command(CommandKind::Execute)),
            _ => None,
        },
        Tab::Home => None,
    }
}
