use crate::actions::test_support::{create_test_app, create_test_app_with, Canned};
use crate::actions::{execute_action, Action};
use crate::app::{AppState, Tab};
use crate::generation::{GenerationRequest, Generator, OutputKind};
use crate::model::RootConfig;
use async_trait::async_trait;
use ratatui::{backend::TestBackend, Terminal};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

fn draw(app: &AppState) -> String {
    let backend = TestBackend::new(80, 30);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| super::render(frame, app)).unwrap();

    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

#[test]
fn test_editor_shows_outline_and_meta() {
    let app = create_test_app();
    let screen = draw(&app);

    assert!(screen.contains("Global Gatekeeper"));
    assert!(screen.contains("Town Areas"));
    assert!(screen.contains("Weapon Shop"));
    assert!(screen.contains("(82220, 149200, -3470)"));
    assert!(screen.contains("NPC 90001"));
}

#[test]
fn test_preview_pages() {
    let mut app = create_test_app();
    execute_action(Action::SwitchTab(Tab::Preview), &mut app).unwrap();
    assert!(draw(&app).contains("Town Areas"));

    execute_action(Action::PreviewSelect, &mut app).unwrap();
    let screen = draw(&app);
    assert!(screen.contains("Town Center"));
    assert!(screen.contains("Giran"));
    assert!(screen.contains("[b] Back"));
}

#[test]
fn test_preview_empty_page() {
    let mut app = create_test_app();
    app.session.commit(RootConfig::empty("1"));
    app.tab = Tab::Preview;
    assert!(draw(&app).contains("No options available."));
}

#[test]
fn test_code_placeholder_and_help() {
    let mut app = create_test_app();
    app.tab = Tab::Code;
    let screen = draw(&app);
    assert!(screen.contains("Select a file type to generate code..."));
    assert!(screen.contains("TELEPORT_XML"));

    execute_action(Action::ShowHelp, &mut app).unwrap();
    assert!(draw(&app).contains("gk-architect Help"));
}

#[test]
fn test_status_line_shows_edit_buffer() {
    let mut app = create_test_app();
    execute_action(Action::EditMeta(crate::model::MetaField::NpcName), &mut app).unwrap();
    let screen = draw(&app);
    assert!(screen.contains("NPC Name: Global Gatekeeper▌"));
}

fn numbered_lines(count: usize) -> String {
    (0..count)
        .map(|n| format!("LINE_{:03}", n))
        .collect::<Vec<_>>()
        .join("\n")
}

#[tokio::test]
async fn test_code_view_scrolls_to_last_line() {
    let mut app = create_test_app_with(Arc::new(Canned(numbered_lines(100))));
    app.generations
        .request(app.session.config(), OutputKind::Html)
        .await
        .unwrap();
    execute_action(Action::SwitchTab(Tab::Code), &mut app).unwrap();

    let screen = draw(&app);
    assert!(screen.contains("LINE_000"));
    assert!(!screen.contains("LINE_099"));

    execute_action(Action::ScrollCodeDown, &mut app).unwrap();
    let screen = draw(&app);
    assert!(!screen.contains("LINE_000"));
    assert!(screen.contains("LINE_001"));

    for _ in 0..10 {
        execute_action(Action::PageCodeDown, &mut app).unwrap();
    }
    let screen = draw(&app);
    assert!(screen.contains("LINE_099"));
    assert!(screen.contains("LINE_079"));

    execute_action(Action::ScrollCodeTop, &mut app).unwrap();
    assert!(draw(&app).contains("LINE_000"));

    execute_action(Action::ScrollCodeBottom, &mut app).unwrap();
    assert!(draw(&app).contains("LINE_099"));
}

/// Answers the first request at once and holds later ones until released.
struct SecondWaits {
    calls: AtomicUsize,
    release: Arc<Notify>,
}

#[async_trait]
impl Generator for SecondWaits {
    async fn generate(&self, _request: &GenerationRequest) -> anyhow::Result<String> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            return Ok("FIRST_DRAFT".to_string());
        }
        self.release.notified().await;
        Ok("SECOND_DRAFT".to_string())
    }

    fn backend_name(&self) -> &'static str {
        "second-waits"
    }
}

#[tokio::test]
async fn test_previous_result_stays_visible_while_regenerating() {
    let release = Arc::new(Notify::new());
    let mut app = create_test_app_with(Arc::new(SecondWaits {
        calls: AtomicUsize::new(0),
        release: Arc::clone(&release),
    }));
    app.generations
        .request(app.session.config(), OutputKind::Html)
        .await
        .unwrap();
    execute_action(Action::SwitchTab(Tab::Code), &mut app).unwrap();

    execute_action(Action::Generate, &mut app).unwrap();
    assert!(app.generations.is_pending(OutputKind::Html));
    let screen = draw(&app);
    assert!(screen.contains("FIRST_DRAFT"));
    assert!(screen.contains("HTML …"));
    assert!(!screen.contains("Generating..."));

    release.notify_one();
    while app.generations.is_pending(OutputKind::Html) {
        tokio::task::yield_now().await;
    }
    let screen = draw(&app);
    assert!(screen.contains("SECOND_DRAFT"));
    assert!(screen.contains("HTML ✓"));
}
