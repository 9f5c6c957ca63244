use crate::actions::Action;
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

pub fn handle_events() -> Result<Option<Action>> {
    if event::poll(Duration::from_millis(50))? {
        return Ok(map_event(event::read()?));
    }
    Ok(None)
}

fn map_event(event: Event) -> Option<Action> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key_event(key),
        Event::Resize(width, _) => Some(Action::Resize(width)),
        _ => None,
    }
}

fn handle_key_event(key: KeyEvent) -> Option<Action> {
    use KeyCode::*;

    match (key.code, key.modifiers) {
        // Quit
        (Char('q'), KeyModifiers::NONE) | (Esc, _) => Some(Action::Quit),
        (Char('c'), KeyModifiers::CONTROL) => Some(Action::Quit),

        // Constraints
        (Char('l'), KeyModifiers::NONE) | (Right, _) => Some(Action::Widen),
        (Char('h'), KeyModifiers::NONE) | (Left, _) => Some(Action::Narrow),
        (Char('j'), KeyModifiers::NONE) | (Down, _) => Some(Action::AddRow),
        (Char('k'), KeyModifiers::NONE) | (Up, _) => Some(Action::RemoveRow),

        // Options
        (Char('c'), KeyModifiers::NONE) => Some(Action::ToggleCenter),
        (Char('n'), KeyModifiers::NONE) => Some(Action::ToggleNonBreakingSpaces),
        (Char('s'), KeyModifiers::NONE) => Some(Action::CycleStrategy),

        _ => None,
    }
}
