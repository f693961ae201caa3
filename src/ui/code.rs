use crate::app::AppState;
use crate::generation::OutputKind;
use crate::ui::constants::{CODE_PENDING, CODE_PLACEHOLDER, ELLIPSIS};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

// Generated artifacts, one tab per output kind
pub struct CodeRenderer;

impl CodeRenderer {
    pub fn render(frame: &mut Frame, app: &AppState, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);

        let titles: Vec<Line> = OutputKind::ALL
            .iter()
            .map(|kind| {
                let marker = if app.generations.is_pending(*kind) {
                    " …"
                } else if app.generations.get(*kind).is_some() {
                    " ✓"
                } else {
                    ""
                };
                Line::from(format!("{}{}", kind, marker))
            })
            .collect();
        let selected = OutputKind::ALL
            .iter()
            .position(|kind| *kind == app.active_kind)
            .unwrap_or(0);
        let tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::ALL).title(" File type "))
            .select(selected)
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, chunks[0]);

        let kind = app.active_kind;
        let pending = app.generations.is_pending(kind);
        // A finished result stays readable while the same kind regenerates.
        let (body, style) = match app.generations.get(kind) {
            Some(text) => (text, Style::default()),
            None if pending => (CODE_PENDING.to_string(), Style::default().fg(Color::DarkGray)),
            None => (
                CODE_PLACEHOLDER.to_string(),
                Style::default().fg(Color::DarkGray),
            ),
        };

        // Keep a full page on screen at the bottom of the text
        let inner_height = chunks[1].height.saturating_sub(2) as usize;
        let max_scroll = body.lines().count().saturating_sub(inner_height);
        let scroll = (app.code_scroll as usize).min(max_scroll) as u16;

        let title = if pending {
            format!(" {} {} ", kind, ELLIPSIS)
        } else {
            format!(" {} ", kind)
        };
        let block = Block::default().borders(Borders::ALL).title(title);
        let paragraph = Paragraph::new(body)
            .style(style)
            .block(block)
            .scroll((scroll, 0));
        frame.render_widget(paragraph, chunks[1]);
    }
}
