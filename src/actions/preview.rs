use crate::app::AppState;
use crate::navigation::Selection;

pub fn preview_next(app: &mut AppState) {
    let items = app.navigator.visible(app.session.config()).len();
    if app.preview_index + 1 < items {
        app.preview_index += 1;
    }
}

pub fn preview_previous(app: &mut AppState) {
    app.preview_index = app.preview_index.saturating_sub(1);
}

pub fn preview_select(app: &mut AppState) {
    let Some(id) = app
        .navigator
        .visible(app.session.config())
        .get(app.preview_index)
        .map(|item| item.id().to_string())
    else {
        return;
    };

    match app.navigator.enter(app.session.config(), &id) {
        Selection::Entered => {
            app.preview_index = 0;
            app.clear_message();
        }
        Selection::Teleport(point) => {
            tracing::debug!(id = %point.id, "Preview teleport");
            app.set_message(format!(
                "Teleport to {} ({}, {}, {}) for {} adena",
                point.name, point.x, point.y, point.z, point.price
            ));
        }
        Selection::Ignored => {}
    }
}

pub fn preview_back(app: &mut AppState) {
    app.navigator.back();
    app.preview_index = 0;
    app.clear_message();
}

pub fn preview_home(app: &mut AppState) {
    app.navigator.home();
    app.preview_index = 0;
    app.clear_message();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::test_support::create_test_app;

    #[test]
    fn test_walk_into_nested_group_and_teleport() {
        let mut app = create_test_app();

        preview_select(&mut app); // Town Areas
        assert_eq!(app.navigator.depth(), 1);

        preview_next(&mut app);
        preview_next(&mut app);
        assert_eq!(app.preview_index, 1);
        preview_select(&mut app); // Giran
        assert_eq!(app.navigator.depth(), 2);
        assert_eq!(app.preview_index, 0);

        preview_select(&mut app); // Weapon Shop
        assert_eq!(
            app.message.as_deref(),
            Some("Teleport to Weapon Shop (82220, 149200, -3470) for 0 adena")
        );
        assert_eq!(app.navigator.depth(), 2);

        preview_back(&mut app);
        assert_eq!(app.navigator.depth(), 1);
        preview_home(&mut app);
        assert_eq!(app.navigator.depth(), 0);
    }

    #[test]
    fn test_select_on_empty_page_is_noop() {
        let mut app = create_test_app();
        app.session.commit(crate::model::RootConfig::empty("7"));
        preview_select(&mut app);
        assert_eq!(app.navigator.depth(), 0);
        assert!(app.message.is_none());
    }
}
