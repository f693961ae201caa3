mod code;
pub(crate) mod constants;
mod editor;
mod help;
mod preview;
mod status_line;

#[cfg(test)]
mod tests;

use crate::app::{AppMode, AppState, Tab};
use code::CodeRenderer;
use editor::EditorRenderer;
use help::HelpRenderer;
use preview::PreviewRenderer;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};
use status_line::StatusLineRenderer;

pub fn render(frame: &mut Frame, app: &AppState) {
    let size = frame.area();

    // Create main layout chunks
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(size);

    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(index, tab)| Line::from(format!("{} {}", index + 1, tab.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" gk-architect "),
        )
        .select(app.tab.index())
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, chunks[0]);

    // Render based on mode
    match (&app.mode, app.tab) {
        (AppMode::Help, _) => HelpRenderer::render(frame, chunks[1]),
        (_, Tab::Editor) => EditorRenderer::render(frame, app, chunks[1]),
        (_, Tab::Preview) => PreviewRenderer::render(frame, app, chunks[1]),
        (_, Tab::Code) => CodeRenderer::render(frame, app, chunks[1]),
    }

    // Render status line
    StatusLineRenderer::render(frame, app, chunks[2]);
}
