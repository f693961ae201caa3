use crate::app::AppState;
use crate::model::{EntityKind, EntityRef, MetaField};
use crate::ui::constants::{INDENT, SELECTION_MARKER};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const META_FIELDS: [(MetaField, &str); 4] = [
    (MetaField::NpcId, "I"),
    (MetaField::NpcName, "N"),
    (MetaField::NpcTitle, "T"),
    (MetaField::SkinId, "S"),
];

// Hierarchy editor: NPC metadata on top, outline of the tree below
pub struct EditorRenderer;

impl EditorRenderer {
    pub fn render(frame: &mut Frame, app: &AppState, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Min(1)])
            .split(area);

        Self::render_meta(frame, app, chunks[0]);
        Self::render_outline(frame, app, chunks[1]);
    }

    fn render_meta(frame: &mut Frame, app: &AppState, area: Rect) {
        let cfg = app.session.config();
        let key_style = Style::default().fg(Color::DarkGray);
        let lines: Vec<Line> = META_FIELDS
            .iter()
            .map(|(field, key)| {
                Line::from(vec![
                    Span::styled(format!("[{}] ", key), key_style),
                    Span::styled(
                        format!("{:<10}", field.label()),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(field.read(cfg).to_string()),
                ])
            })
            .collect();

        let block = Block::default().borders(Borders::ALL).title(" NPC ");
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_outline(frame: &mut Frame, app: &AppState, area: Rect) {
        let cfg = app.session.config();
        let rows = app.rows();

        let lines: Vec<Line> = if rows.is_empty() {
            vec![Line::from(Span::styled(
                "No categories. Press c to add one.",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            rows.iter()
                .enumerate()
                .map(|(index, row)| {
                    let selected = index == app.selected_row;
                    let marker = if selected { SELECTION_MARKER } else { "  " };
                    let mut spans = vec![Span::raw(format!(
                        "{}{}",
                        marker,
                        INDENT.repeat(row.depth)
                    ))];

                    let name_style = match (row.kind, selected) {
                        (_, true) => Style::default()
                            .fg(Color::Black)
                            .bg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                        (EntityKind::Group, false) => {
                            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                        }
                        (EntityKind::Point, false) => Style::default(),
                    };
                    let label = match row.kind {
                        EntityKind::Group => format!("▸ {}", row.name),
                        EntityKind::Point => format!("• {}", row.name),
                    };
                    spans.push(Span::styled(label, name_style));

                    if let Some(EntityRef::Point(point)) = cfg.resolve(&row.path) {
                        spans.push(Span::styled(
                            format!(
                                "  ({}, {}, {})  {} adena",
                                point.x, point.y, point.z, point.price
                            ),
                            Style::default().fg(Color::DarkGray),
                        ));
                    }
                    Line::from(spans)
                })
                .collect()
        };

        // Keep the selected row on screen
        let inner_height = area.height.saturating_sub(2) as usize;
        let scroll = if inner_height > 0 && app.selected_row >= inner_height {
            app.selected_row + 1 - inner_height
        } else {
            0
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Teleport menu ");
        let paragraph = Paragraph::new(lines)
            .block(block)
            .scroll((scroll as u16, 0));
        frame.render_widget(paragraph, area);
    }
}
