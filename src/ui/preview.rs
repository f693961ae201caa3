use crate::app::AppState;
use crate::navigation::MenuItem;
use crate::ui::constants::{BUTTON_COLUMNS, BUTTON_LABEL_WIDTH, ELLIPSIS, EMPTY_PAGE_TEXT};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

// Simulated in-game dialog: a two-column grid of buttons for the current page
pub struct PreviewRenderer;

impl PreviewRenderer {
    pub fn render(frame: &mut Frame, app: &AppState, area: Rect) {
        let cfg = app.session.config();
        let items = app.navigator.visible(cfg);

        let mut lines = vec![
            Line::from(Span::styled(
                cfg.npc_name.clone(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                cfg.npc_title.clone(),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
        ];

        let breadcrumb = app.navigator.title(cfg);
        if !breadcrumb.is_empty() {
            lines.push(Line::from(Span::styled(
                breadcrumb,
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
        }

        if items.is_empty() {
            lines.push(Line::from(Span::styled(
                EMPTY_PAGE_TEXT,
                Style::default().fg(Color::DarkGray),
            )));
        } else {
            for (row_index, row) in items.chunks(BUTTON_COLUMNS).enumerate() {
                let mut spans = Vec::new();
                for (column, item) in row.iter().enumerate() {
                    let index = row_index * BUTTON_COLUMNS + column;
                    spans.push(Self::button(item, index == app.preview_index));
                    spans.push(Span::raw(" "));
                }
                lines.push(Line::from(spans));
            }
        }

        if app.navigator.depth() > 0 {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "[b] Back   [m] Main",
                Style::default().fg(Color::DarkGray),
            )));
        }

        let block = Block::default().borders(Borders::ALL).title(" Preview ");
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn button(item: &MenuItem, selected: bool) -> Span<'static> {
        let label = fit_label(item.label(), BUTTON_LABEL_WIDTH);
        let text = format!("[{}]", label);
        let style = match (selected, item.is_group()) {
            (true, _) => Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            (false, true) => Style::default().fg(Color::Cyan),
            (false, false) => Style::default(),
        };
        Span::styled(text, style)
    }
}

/// Centers `label` in a cell `width` columns wide, truncating with an
/// ellipsis when it does not fit.
pub fn fit_label(label: &str, width: usize) -> String {
    let label = if label.width() > width {
        let mut truncated = String::new();
        let mut used = 0;
        for c in label.chars() {
            let w = c.width().unwrap_or(0);
            if used + w + 1 > width {
                break;
            }
            truncated.push(c);
            used += w;
        }
        truncated.push(ELLIPSIS);
        truncated
    } else {
        label.to_string()
    };

    let padding = width.saturating_sub(label.width());
    let left = padding / 2;
    format!("{}{}{}", " ".repeat(left), label, " ".repeat(padding - left))
}
