use crate::app::AppState;
use crate::ui::constants::CODE_PAGE_LINES;
use anyhow::Result;
use clipboard::{ClipboardContext, ClipboardProvider};

pub fn next_kind(app: &mut AppState) {
    app.active_kind = app.active_kind.next();
    app.code_scroll = 0;
}

pub fn previous_kind(app: &mut AppState) {
    app.active_kind = app.active_kind.previous();
    app.code_scroll = 0;
}

// Index of the last line of the active kind's text
fn last_code_line(app: &AppState) -> i64 {
    let lines = app
        .generations
        .get(app.active_kind)
        .map(|text| text.lines().count())
        .unwrap_or(0);
    i64::try_from(lines.saturating_sub(1)).unwrap_or(i64::MAX)
}

fn set_code_scroll(app: &mut AppState, line: i64) {
    let line = line.clamp(0, last_code_line(app));
    app.code_scroll = u16::try_from(line).unwrap_or(u16::MAX);
}

/// Scrolls the generated text by `lines`, staying within the text.
pub fn scroll_code(app: &mut AppState, lines: i32) {
    set_code_scroll(app, i64::from(app.code_scroll) + i64::from(lines));
}

pub fn page_code_down(app: &mut AppState) {
    scroll_code(app, CODE_PAGE_LINES);
}

pub fn page_code_up(app: &mut AppState) {
    scroll_code(app, -CODE_PAGE_LINES);
}

pub fn scroll_code_top(app: &mut AppState) {
    app.code_scroll = 0;
}

pub fn scroll_code_bottom(app: &mut AppState) {
    let last = last_code_line(app);
    set_code_scroll(app, last);
}

/// Starts generating the active kind in the background. The result shows up
/// in the code view once the request resolves.
pub fn generate(app: &mut AppState) {
    let kind = app.active_kind;
    // Detached; the task writes its outcome into the shared result table.
    drop(app.generations.request(app.session.config(), kind));
    app.code_scroll = 0;
    app.set_message(format!("Generating {}...", kind));
}

pub fn copy_output(app: &mut AppState) -> Result<()> {
    let kind = app.active_kind;
    if app.generations.is_pending(kind) {
        app.set_message("Still generating");
        return Ok(());
    }
    let Some(text) = app.generations.get(kind) else {
        app.set_message(format!("Nothing generated for {} yet", kind));
        return Ok(());
    };

    app.clipboard = Some(text.clone());

    // Try to copy to system clipboard
    if let Ok(mut ctx) = ClipboardContext::new() {
        let _ = ctx.set_contents(text);
    }

    app.set_message(format!("{} copied", kind));
    Ok(())
}
