use crate::app::{AppMode, AppState, EditTarget, EntityField};
use crate::model::{update_entity, update_meta, EntityPatch, EntityRef, MetaField, RootConfig};

/// Opens the line editor on `target`, prefilled with its current value.
pub fn start_editing(app: &mut AppState, target: EditTarget) {
    let Some(buffer) = current_value(app.session.config(), &target) else {
        app.set_message("Selection no longer exists");
        return;
    };
    let cursor_pos = buffer.chars().count();
    app.clear_message();
    app.mode = AppMode::Editing {
        target,
        buffer,
        cursor_pos,
    };
}

pub fn start_meta_edit(app: &mut AppState, field: MetaField) {
    start_editing(app, EditTarget::Meta(field));
}

fn current_value(cfg: &RootConfig, target: &EditTarget) -> Option<String> {
    match target {
        EditTarget::Meta(field) => Some(field.read(cfg).to_string()),
        EditTarget::Entity { path, field } => match (cfg.resolve(path)?, field) {
            (entity, EntityField::Name) => Some(entity.name().to_string()),
            (EntityRef::Point(point), EntityField::X) => Some(point.x.to_string()),
            (EntityRef::Point(point), EntityField::Y) => Some(point.y.to_string()),
            (EntityRef::Point(point), EntityField::Z) => Some(point.z.to_string()),
            (EntityRef::Point(point), EntityField::Price) => Some(point.price.to_string()),
            (EntityRef::Group(_), _) => None,
        },
    }
}

// Cursor positions count chars; the buffer is indexed by bytes.
fn byte_index(buffer: &str, cursor_pos: usize) -> usize {
    buffer
        .char_indices()
        .nth(cursor_pos)
        .map(|(index, _)| index)
        .unwrap_or(buffer.len())
}

pub fn type_char(app: &mut AppState, c: char) {
    if let AppMode::Editing {
        buffer, cursor_pos, ..
    } = &mut app.mode
    {
        let at = byte_index(buffer, *cursor_pos);
        buffer.insert(at, c);
        *cursor_pos += 1;
    }
}

pub fn backspace(app: &mut AppState) {
    if let AppMode::Editing {
        buffer, cursor_pos, ..
    } = &mut app.mode
    {
        if *cursor_pos > 0 {
            *cursor_pos -= 1;
            let at = byte_index(buffer, *cursor_pos);
            buffer.remove(at);
        }
    }
}

pub fn delete_char(app: &mut AppState) {
    if let AppMode::Editing {
        buffer, cursor_pos, ..
    } = &mut app.mode
    {
        if *cursor_pos < buffer.chars().count() {
            let at = byte_index(buffer, *cursor_pos);
            buffer.remove(at);
        }
    }
}

pub fn move_cursor_left(app: &mut AppState) {
    if let AppMode::Editing { cursor_pos, .. } = &mut app.mode {
        *cursor_pos = cursor_pos.saturating_sub(1);
    }
}

pub fn move_cursor_right(app: &mut AppState) {
    if let AppMode::Editing {
        buffer, cursor_pos, ..
    } = &mut app.mode
    {
        if *cursor_pos < buffer.chars().count() {
            *cursor_pos += 1;
        }
    }
}

pub fn move_cursor_home(app: &mut AppState) {
    if let AppMode::Editing { cursor_pos, .. } = &mut app.mode {
        *cursor_pos = 0;
    }
}

pub fn move_cursor_end(app: &mut AppState) {
    if let AppMode::Editing {
        buffer, cursor_pos, ..
    } = &mut app.mode
    {
        *cursor_pos = buffer.chars().count();
    }
}

/// Applies the buffer to its target. Numeric fields that fail to parse keep
/// the editor open so the value can be fixed.
pub fn confirm_edit(app: &mut AppState) {
    let AppMode::Editing { target, buffer, .. } = &app.mode else {
        return;
    };
    let target = target.clone();
    let value = buffer.trim().to_string();

    let result = match &target {
        EditTarget::Meta(field) => {
            let next = update_meta(app.session.config(), *field, &value);
            app.session.commit(next);
            Ok(())
        }
        EditTarget::Entity { path, field } => match build_patch(*field, &value) {
            Ok(patch) => app
                .session
                .edit(|cfg| update_entity(cfg, path, &patch))
                .map_err(|e| e.to_string()),
            Err(msg) => {
                app.set_message(msg);
                return;
            }
        },
    };

    app.mode = AppMode::Normal;
    match result {
        Ok(()) => app.clear_message(),
        Err(msg) => app.set_message(msg),
    }
    app.clamp_cursors();
}

fn build_patch(field: EntityField, value: &str) -> Result<EntityPatch, String> {
    let invalid = |_: std::num::ParseIntError| format!("{} must be a whole number", field.label());
    let patch = match field {
        EntityField::Name => EntityPatch::name(value),
        EntityField::X => EntityPatch {
            x: Some(value.parse().map_err(invalid)?),
            ..EntityPatch::default()
        },
        EntityField::Y => EntityPatch {
            y: Some(value.parse().map_err(invalid)?),
            ..EntityPatch::default()
        },
        EntityField::Z => EntityPatch {
            z: Some(value.parse().map_err(invalid)?),
            ..EntityPatch::default()
        },
        EntityField::Price => EntityPatch::price(value.parse().map_err(invalid)?),
    };
    Ok(patch)
}

pub fn cancel_edit(app: &mut AppState) {
    app.mode = AppMode::Normal;
}
