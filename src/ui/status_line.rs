use crate::app::{AppMode, AppState};
use crate::ui::constants::CURSOR_INDICATOR;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Paragraph, Wrap},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

// Status line renderer
pub struct StatusLineRenderer;

impl StatusLineRenderer {
    pub fn render(frame: &mut Frame, app: &AppState, area: Rect) {
        let (content, style) = Self::get_content_and_style(app, area);

        let paragraph = Paragraph::new(content)
            .style(style)
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, area);
    }

    fn get_content_and_style(app: &AppState, area: Rect) -> (String, Style) {
        match &app.mode {
            AppMode::Normal => Self::render_normal_mode(app),
            AppMode::Editing {
                target,
                buffer,
                cursor_pos,
            } => {
                let prefix = format!("{}: ", target.label());
                Self::render_edit_mode(&prefix, buffer, *cursor_pos, area.width, app)
            }
            AppMode::Help => Self::render_help_mode(),
        }
    }

    fn render_normal_mode(app: &AppState) -> (String, Style) {
        let content = if let Some(ref msg) = app.message {
            msg.clone()
        } else {
            let cfg = app.session.config();
            let mut status = format!(
                "gk-architect | NPC {} | {} entries",
                cfg.npc_id,
                app.rows().len()
            );
            if app.generations.any_pending() {
                status.push_str(" | generating");
            }
            status
        };

        let style = if app.message.is_some() {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray).bg(Color::Black)
        };

        (content, style)
    }

    fn render_edit_mode(
        prefix: &str,
        buffer: &str,
        cursor_pos: usize,
        width: u16,
        app: &AppState,
    ) -> (String, Style) {
        let mut display = String::from(prefix);
        let chars: Vec<char> = buffer.chars().collect();

        // Scroll the text so the cursor stays visible
        let available = (width as usize).saturating_sub(prefix.width() + 1);
        let mut start = 0;
        while start < cursor_pos && Self::width_of(&chars[start..cursor_pos]) >= available {
            start += 1;
        }

        let mut used = 0;
        for (index, c) in chars.iter().enumerate().skip(start) {
            if index == cursor_pos {
                display.push(CURSOR_INDICATOR);
                used += 1;
            }
            used += c.width().unwrap_or(0);
            if used > available {
                break;
            }
            display.push(*c);
        }
        if cursor_pos >= chars.len() {
            display.push(CURSOR_INDICATOR);
        }

        if let Some(ref msg) = app.message {
            display.push_str("  ");
            display.push_str(msg);
        }

        let style = Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD);

        (display, style)
    }

    fn width_of(chars: &[char]) -> usize {
        chars.iter().map(|c| c.width().unwrap_or(0)).sum()
    }

    fn render_help_mode() -> (String, Style) {
        let content = String::from("Press ESC or q to close help");
        let style = Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD);

        (content, style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::test_support::create_test_app;

    #[test]
    fn test_edit_window_measures_prefix_in_columns() {
        let app = create_test_app();
        let (display, _) =
            StatusLineRenderer::render_edit_mode("Имя: ", "abcdefgh", 8, 12, &app);
        assert_eq!(display, "Имя: defgh▌");
    }

    #[test]
    fn test_edit_window_keeps_short_buffer_whole() {
        let app = create_test_app();
        let (display, _) = StatusLineRenderer::render_edit_mode("Name: ", "Giran", 2, 40, &app);
        assert_eq!(display, "Name: Gi▌ran");
    }
}
