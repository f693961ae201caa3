use crate::actions::Action;
use crate::app::{AppMode, AppState, EntityField, Tab};
use crate::model::MetaField;
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

pub fn handle_events(app: &mut AppState) -> Result<Option<Action>> {
    if event::poll(Duration::from_millis(50))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(handle_key_event(app, key));
            }
        }
    }
    Ok(None)
}

pub fn handle_key_event(app: &AppState, key: KeyEvent) -> Option<Action> {
    match &app.mode {
        AppMode::Normal => handle_global_keys(key).or_else(|| match app.tab {
            Tab::Editor => handle_editor_keys(key),
            Tab::Preview => handle_preview_keys(key),
            Tab::Code => handle_code_keys(key),
        }),
        AppMode::Editing { .. } => handle_editing_mode(key),
        AppMode::Help => handle_help_mode(key),
    }
}

fn handle_global_keys(key: KeyEvent) -> Option<Action> {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Some(Action::Quit),
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Action::Quit),

        // Views
        (KeyCode::Char('1'), KeyModifiers::NONE) => Some(Action::SwitchTab(Tab::Editor)),
        (KeyCode::Char('2'), KeyModifiers::NONE) => Some(Action::SwitchTab(Tab::Preview)),
        (KeyCode::Char('3'), KeyModifiers::NONE) => Some(Action::SwitchTab(Tab::Code)),
        (KeyCode::Tab, KeyModifiers::NONE) => Some(Action::NextTab),

        // Undo/Redo
        (KeyCode::Char('u'), KeyModifiers::NONE) => Some(Action::Undo),
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => Some(Action::Redo),

        // File operations
        (KeyCode::Char('X'), KeyModifiers::SHIFT) => Some(Action::Export),

        // Help
        (KeyCode::Char('?'), _) => Some(Action::ShowHelp),

        _ => None,
    }
}

fn handle_editor_keys(key: KeyEvent) -> Option<Action> {
    use KeyCode::*;

    match (key.code, key.modifiers) {
        // Movement
        (Char('j'), KeyModifiers::NONE) | (Down, _) => Some(Action::SelectNext),
        (Char('k'), KeyModifiers::NONE) | (Up, _) => Some(Action::SelectPrevious),

        // Structure
        (Char('c'), KeyModifiers::NONE) => Some(Action::AddCategory),
        (Char('g'), KeyModifiers::NONE) => Some(Action::AddSubGroup),
        (Char('a'), KeyModifiers::NONE) => Some(Action::AddPoint),
        (Char('d'), KeyModifiers::NONE) => Some(Action::DeleteEntity),
        (Char('K'), KeyModifiers::SHIFT) => Some(Action::MoveUp),
        (Char('J'), KeyModifiers::SHIFT) => Some(Action::MoveDown),

        // Fields
        (Char('e'), KeyModifiers::NONE) | (Enter, _) => {
            Some(Action::EditField(EntityField::Name))
        }
        (Char('x'), KeyModifiers::NONE) => Some(Action::EditField(EntityField::X)),
        (Char('y'), KeyModifiers::NONE) => Some(Action::EditField(EntityField::Y)),
        (Char('z'), KeyModifiers::NONE) => Some(Action::EditField(EntityField::Z)),
        (Char('p'), KeyModifiers::NONE) => Some(Action::EditField(EntityField::Price)),

        // NPC metadata
        (Char('I'), KeyModifiers::SHIFT) => Some(Action::EditMeta(MetaField::NpcId)),
        (Char('N'), KeyModifiers::SHIFT) => Some(Action::EditMeta(MetaField::NpcName)),
        (Char('T'), KeyModifiers::SHIFT) => Some(Action::EditMeta(MetaField::NpcTitle)),
        (Char('S'), KeyModifiers::SHIFT) => Some(Action::EditMeta(MetaField::SkinId)),

        _ => None,
    }
}

fn handle_preview_keys(key: KeyEvent) -> Option<Action> {
    use KeyCode::*;

    match (key.code, key.modifiers) {
        (Char('j'), KeyModifiers::NONE) | (Down, _) => Some(Action::PreviewNext),
        (Char('k'), KeyModifiers::NONE) | (Up, _) => Some(Action::PreviewPrevious),
        (Enter, _) => Some(Action::PreviewSelect),
        (Char('b'), KeyModifiers::NONE) | (Backspace, _) => Some(Action::PreviewBack),
        (Char('m'), KeyModifiers::NONE) => Some(Action::PreviewHome),
        _ => None,
    }
}

fn handle_code_keys(key: KeyEvent) -> Option<Action> {
    use KeyCode::*;

    match (key.code, key.modifiers) {
        (Char('h'), KeyModifiers::NONE) | (Left, _) => Some(Action::PreviousKind),
        (Char('l'), KeyModifiers::NONE) | (Right, _) => Some(Action::NextKind),
        (Enter, _) | (Char('G'), KeyModifiers::SHIFT) => Some(Action::Generate),
        (Char('y'), KeyModifiers::NONE) => Some(Action::CopyOutput),

        // Scrolling
        (Char('j'), KeyModifiers::NONE) | (Down, _) => Some(Action::ScrollCodeDown),
        (Char('k'), KeyModifiers::NONE) | (Up, _) => Some(Action::ScrollCodeUp),
        (PageDown, _) | (Char('d'), KeyModifiers::CONTROL) => Some(Action::PageCodeDown),
        (PageUp, _) | (Char('u'), KeyModifiers::CONTROL) => Some(Action::PageCodeUp),
        (Home, _) | (Char('g'), KeyModifiers::NONE) => Some(Action::ScrollCodeTop),
        (End, _) => Some(Action::ScrollCodeBottom),
        _ => None,
    }
}

fn handle_editing_mode(key: KeyEvent) -> Option<Action> {
    use KeyCode::*;

    match (key.code, key.modifiers) {
        (Esc, _) => Some(Action::CancelEdit),
        (Enter, _) => Some(Action::ConfirmEdit),
        (Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => Some(Action::TypeChar(c)),

        (Backspace, _) => Some(Action::Backspace),
        (Delete, _) => Some(Action::Delete),

        (Left, _) => Some(Action::MoveCursorLeft),
        (Right, _) => Some(Action::MoveCursorRight),
        (Home, _) | (Char('a'), KeyModifiers::CONTROL) => Some(Action::MoveCursorHome),
        (End, _) | (Char('e'), KeyModifiers::CONTROL) => Some(Action::MoveCursorEnd),

        _ => None,
    }
}

fn handle_help_mode(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Some(Action::CloseHelp),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::test_support::create_test_app;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn shifted(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::SHIFT)
    }

    #[test]
    fn test_same_key_differs_per_tab() {
        let mut app = create_test_app();
        assert_eq!(
            handle_key_event(&app, key(KeyCode::Char('j'))),
            Some(Action::SelectNext)
        );
        assert_eq!(
            handle_key_event(&app, key(KeyCode::Enter)),
            Some(Action::EditField(EntityField::Name))
        );

        app.tab = Tab::Preview;
        assert_eq!(
            handle_key_event(&app, key(KeyCode::Char('j'))),
            Some(Action::PreviewNext)
        );
        assert_eq!(
            handle_key_event(&app, key(KeyCode::Enter)),
            Some(Action::PreviewSelect)
        );

        app.tab = Tab::Code;
        assert_eq!(
            handle_key_event(&app, key(KeyCode::Enter)),
            Some(Action::Generate)
        );
        assert_eq!(
            handle_key_event(&app, key(KeyCode::Char('j'))),
            Some(Action::ScrollCodeDown)
        );
        assert_eq!(
            handle_key_event(&app, key(KeyCode::PageDown)),
            Some(Action::PageCodeDown)
        );
        assert_eq!(
            handle_key_event(&app, key(KeyCode::End)),
            Some(Action::ScrollCodeBottom)
        );
    }

    #[test]
    fn test_global_keys_win() {
        let mut app = create_test_app();
        app.tab = Tab::Code;
        assert_eq!(
            handle_key_event(&app, key(KeyCode::Char('1'))),
            Some(Action::SwitchTab(Tab::Editor))
        );
        assert_eq!(handle_key_event(&app, shifted('X')), Some(Action::Export));
        assert_eq!(
            handle_key_event(
                &app,
                KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL)
            ),
            Some(Action::Redo)
        );
    }

    #[test]
    fn test_editing_mode_captures_letters() {
        let mut app = create_test_app();
        crate::actions::execute_action(Action::EditField(EntityField::Name), &mut app).unwrap();

        assert_eq!(
            handle_key_event(&app, key(KeyCode::Char('q'))),
            Some(Action::TypeChar('q'))
        );
        assert_eq!(handle_key_event(&app, shifted('X')), Some(Action::TypeChar('X')));
        assert_eq!(
            handle_key_event(&app, key(KeyCode::Esc)),
            Some(Action::CancelEdit)
        );
    }

    #[test]
    fn test_help_mode_closes() {
        let mut app = create_test_app();
        app.mode = AppMode::Help;
        assert_eq!(
            handle_key_event(&app, key(KeyCode::Char('?'))),
            Some(Action::CloseHelp)
        );
        assert_eq!(handle_key_event(&app, key(KeyCode::Char('j'))), None);
    }
}
