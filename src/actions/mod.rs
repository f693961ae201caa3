mod code;
mod editing;
mod file;
mod help;
mod hierarchy;
mod history;
mod preview;

use crate::app::{AppState, EntityField, Tab};
use crate::model::MetaField;
use anyhow::Result;

// Re-export all public functions from submodules
pub use code::*;
pub use editing::*;
pub use file::*;
pub use help::*;
pub use hierarchy::*;
pub use history::*;
pub use preview::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Application control
    Quit,
    SwitchTab(Tab),
    NextTab,

    // Editor: selection and structure
    SelectNext,
    SelectPrevious,
    AddCategory,
    AddSubGroup,
    AddPoint,
    DeleteEntity,
    MoveUp,
    MoveDown,
    EditField(EntityField),
    EditMeta(MetaField),

    // Editing
    TypeChar(char),
    Backspace,
    Delete,
    MoveCursorLeft,
    MoveCursorRight,
    MoveCursorHome,
    MoveCursorEnd,
    ConfirmEdit,
    CancelEdit,

    // Preview
    PreviewNext,
    PreviewPrevious,
    PreviewSelect,
    PreviewBack,
    PreviewHome,

    // Code
    NextKind,
    PreviousKind,
    Generate,
    CopyOutput,
    ScrollCodeDown,
    ScrollCodeUp,
    PageCodeDown,
    PageCodeUp,
    ScrollCodeTop,
    ScrollCodeBottom,

    // Undo/Redo
    Undo,
    Redo,

    // File
    Export,

    // Help
    ShowHelp,
    CloseHelp,
}

pub fn execute_action(action: Action, app: &mut AppState) -> Result<()> {
    match action {
        Action::Quit => app.running = false,
        Action::SwitchTab(tab) => switch_tab(app, tab),
        Action::NextTab => switch_tab(app, app.tab.next()),

        Action::SelectNext => hierarchy::select_next(app),
        Action::SelectPrevious => hierarchy::select_previous(app),
        Action::AddCategory => hierarchy::add_category(app),
        Action::AddSubGroup => hierarchy::add_sub_group(app),
        Action::AddPoint => hierarchy::add_point_here(app),
        Action::DeleteEntity => hierarchy::delete_selected(app),
        Action::MoveUp => hierarchy::move_selected(app, crate::model::Direction::Up),
        Action::MoveDown => hierarchy::move_selected(app, crate::model::Direction::Down),
        Action::EditField(field) => hierarchy::edit_selected(app, field),
        Action::EditMeta(field) => editing::start_meta_edit(app, field),

        Action::TypeChar(c) => editing::type_char(app, c),
        Action::Backspace => editing::backspace(app),
        Action::Delete => editing::delete_char(app),
        Action::MoveCursorLeft => editing::move_cursor_left(app),
        Action::MoveCursorRight => editing::move_cursor_right(app),
        Action::MoveCursorHome => editing::move_cursor_home(app),
        Action::MoveCursorEnd => editing::move_cursor_end(app),
        Action::ConfirmEdit => editing::confirm_edit(app),
        Action::CancelEdit => editing::cancel_edit(app),

        Action::PreviewNext => preview::preview_next(app),
        Action::PreviewPrevious => preview::preview_previous(app),
        Action::PreviewSelect => preview::preview_select(app),
        Action::PreviewBack => preview::preview_back(app),
        Action::PreviewHome => preview::preview_home(app),

        Action::NextKind => code::next_kind(app),
        Action::PreviousKind => code::previous_kind(app),
        Action::Generate => code::generate(app),
        Action::CopyOutput => code::copy_output(app)?,
        Action::ScrollCodeDown => code::scroll_code(app, 1),
        Action::ScrollCodeUp => code::scroll_code(app, -1),
        Action::PageCodeDown => code::page_code_down(app),
        Action::PageCodeUp => code::page_code_up(app),
        Action::ScrollCodeTop => code::scroll_code_top(app),
        Action::ScrollCodeBottom => code::scroll_code_bottom(app),

        Action::Undo => history::undo(app),
        Action::Redo => history::redo(app),

        Action::Export => file::export(app)?,

        Action::ShowHelp => help::show_help(app),
        Action::CloseHelp => help::close_help(app),
    }
    Ok(())
}

fn switch_tab(app: &mut AppState, tab: Tab) {
    app.tab = tab;
    app.clear_message();
    app.clamp_cursors();
}


#[cfg(test)]
mod tests {
    use super::test_support::create_test_app;
    use super::*;

    #[test]
    fn test_quit_stops_app() {
        let mut app = create_test_app();
        execute_action(Action::Quit, &mut app).unwrap();
        assert!(!app.running);
    }

    #[test]
    fn test_tab_cycle() {
        let mut app = create_test_app();
        app.set_message("stale");
        execute_action(Action::NextTab, &mut app).unwrap();
        assert_eq!(app.tab, Tab::Preview);
        assert!(app.message.is_none());
        execute_action(Action::NextTab, &mut app).unwrap();
        execute_action(Action::NextTab, &mut app).unwrap();
        assert_eq!(app.tab, Tab::Editor);
    }
}
