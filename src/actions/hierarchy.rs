use crate::app::{AppState, EditTarget, EntityField};
use crate::model::{
    add_group, add_point, move_sibling, remove_entity, Direction, EntityKind, EntityPath,
};

use super::editing::start_editing;

pub fn select_next(app: &mut AppState) {
    let rows = app.rows().len();
    if app.selected_row + 1 < rows {
        app.selected_row += 1;
    }
}

pub fn select_previous(app: &mut AppState) {
    app.selected_row = app.selected_row.saturating_sub(1);
}

pub fn add_category(app: &mut AppState) {
    match app.session.try_edit(|cfg| add_group(cfg, None)) {
        Ok(path) => begin_rename(app, path),
        Err(e) => app.set_message(e.to_string()),
    }
}

/// Adds a nested group to the category the selection lives in. The in-game
/// dialog pages only one level below a category, so nesting stops there.
pub fn add_sub_group(app: &mut AppState) {
    let Some(row) = app.selected() else {
        app.set_message("Add a category first");
        return;
    };
    let category = EntityPath::new([row.path.segments()[0].as_str()]);
    match app.session.try_edit(|cfg| add_group(cfg, Some(&category))) {
        Ok(path) => begin_rename(app, path),
        Err(e) => app.set_message(e.to_string()),
    }
}

/// Adds a point to the selected group, or next to the selected point.
pub fn add_point_here(app: &mut AppState) {
    let Some(row) = app.selected() else {
        app.set_message("Add a category first");
        return;
    };
    let parent = match row.kind {
        EntityKind::Group => row.path,
        EntityKind::Point => match row.path.parent() {
            Some(parent) => parent,
            None => return,
        },
    };
    match app.session.try_edit(|cfg| add_point(cfg, &parent)) {
        Ok(path) => begin_rename(app, path),
        Err(e) => app.set_message(e.to_string()),
    }
}

pub fn delete_selected(app: &mut AppState) {
    let Some(row) = app.selected() else {
        return;
    };
    match app.session.edit(|cfg| remove_entity(cfg, &row.path)) {
        Ok(()) => {
            app.set_message(format!("Deleted {} \"{}\"", row.kind, row.name));
            app.clamp_cursors();
        }
        Err(e) => app.set_message(e.to_string()),
    }
}

pub fn move_selected(app: &mut AppState, direction: Direction) {
    let Some(row) = app.selected() else {
        return;
    };
    match app.session.edit(|cfg| move_sibling(cfg, &row.path, direction)) {
        Ok(()) => app.select_path(&row.path),
        Err(e) => app.set_message(e.to_string()),
    }
}

pub fn edit_selected(app: &mut AppState, field: EntityField) {
    let Some(row) = app.selected() else {
        return;
    };
    if row.kind == EntityKind::Group && field != EntityField::Name {
        app.set_message("Groups only have a name");
        return;
    }
    start_editing(
        app,
        EditTarget::Entity {
            path: row.path,
            field,
        },
    );
}

fn begin_rename(app: &mut AppState, path: EntityPath) {
    app.select_path(&path);
    start_editing(
        app,
        EditTarget::Entity {
            path,
            field: EntityField::Name,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::test_support::create_test_app;
    use crate::app::AppMode;
    use crate::model::{Child, RootConfig};

    fn names(app: &AppState) -> Vec<String> {
        app.rows().into_iter().map(|row| row.name).collect()
    }

    #[test]
    fn test_selection_is_bounded() {
        let mut app = create_test_app();
        select_previous(&mut app);
        assert_eq!(app.selected_row, 0);
        for _ in 0..10 {
            select_next(&mut app);
        }
        assert_eq!(app.selected_row, 3);
    }

    #[test]
    fn test_add_category_starts_rename() {
        let mut app = create_test_app();
        add_category(&mut app);

        assert_eq!(app.session.config().categories.len(), 2);
        assert_eq!(app.selected_row, 4);
        match &app.mode {
            AppMode::Editing { target, buffer, .. } => {
                assert_eq!(target.label(), "Name");
                assert_eq!(buffer, "New Category");
            }
            other => panic!("expected editing mode, got {:?}", other),
        }
    }

    #[test]
    fn test_add_sub_group_goes_into_category() {
        let mut app = create_test_app();
        app.selected_row = 3; // Weapon Shop inside Giran
        add_sub_group(&mut app);

        let town = &app.session.config().categories[0];
        assert_eq!(town.children.len(), 3);
        assert!(matches!(town.children[2], Child::Group(_)));
    }

    #[test]
    fn test_add_point_next_to_point() {
        let mut app = create_test_app();
        app.selected_row = 3; // Weapon Shop
        add_point_here(&mut app);

        let giran = app
            .session
            .config()
            .resolve_group(&EntityPath::new(["cat_1", "sub_1"]))
            .unwrap();
        assert_eq!(giran.children.len(), 2);
        assert_eq!(app.selected_row, 4);
    }

    #[test]
    fn test_add_point_without_categories() {
        let mut app = create_test_app();
        app.session.commit(RootConfig::empty("1"));
        add_point_here(&mut app);
        assert_eq!(app.message.as_deref(), Some("Add a category first"));
    }

    #[test]
    fn test_delete_clamps_selection() {
        let mut app = create_test_app();
        app.selected_row = 3;
        delete_selected(&mut app);
        assert_eq!(names(&app), vec!["Town Areas", "Town Center", "Giran"]);
        assert_eq!(app.selected_row, 2);
    }

    #[test]
    fn test_move_keeps_selection_on_entity() {
        let mut app = create_test_app();
        app.selected_row = 2; // Giran
        move_selected(&mut app, Direction::Up);
        assert_eq!(
            names(&app),
            vec!["Town Areas", "Giran", "Weapon Shop", "Town Center"]
        );
        assert_eq!(app.selected_row, 1);
    }

    #[test]
    fn test_numeric_edit_on_group_is_refused() {
        let mut app = create_test_app();
        edit_selected(&mut app, EntityField::Price);
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.message.is_some());
    }
}
