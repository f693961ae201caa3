use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

// Help section structure
pub struct HelpSection {
    pub title: &'static str,
    pub items: &'static [(&'static str, &'static str)],
}

// Help section definitions
pub const SECTIONS: &[HelpSection] = &[
    HelpSection {
        title: "Global:",
        items: &[
            ("1/2/3", "Editor / Preview / Code"),
            ("⇥    ", "Next view"),
            ("u    ", "Undo"),
            ("^r   ", "Redo"),
            ("X    ", "Export gk_config_<npc>.json"),
            ("?    ", "Help"),
            ("q    ", "Quit"),
        ],
    },
    HelpSection {
        title: "Editor:",
        items: &[
            ("j/k  ", "Select row"),
            ("c    ", "Add category"),
            ("g    ", "Add sub-group to category"),
            ("a    ", "Add teleport point"),
            ("d    ", "Delete"),
            ("K/J  ", "Move up / down"),
            ("e/⏎  ", "Rename"),
            ("x/y/z", "Edit coordinate"),
            ("p    ", "Edit price"),
            ("I/N/T/S", "Edit NPC id / name / title / skin"),
        ],
    },
    HelpSection {
        title: "Preview:",
        items: &[
            ("j/k  ", "Select button"),
            ("⏎    ", "Open group or teleport"),
            ("b/⌫  ", "Back"),
            ("m    ", "Main page"),
        ],
    },
    HelpSection {
        title: "Code:",
        items: &[
            ("h/l  ", "Choose file type"),
            ("⏎/G  ", "Generate"),
            ("y    ", "Copy to clipboard"),
            ("j/k  ", "Scroll"),
            ("PgDn/PgUp", "Scroll a page"),
            ("g/End", "Top / bottom"),
        ],
    },
];

// Help renderer
pub struct HelpRenderer;

impl HelpRenderer {
    pub fn render(frame: &mut Frame, area: Rect) {
        let help_text = Self::build_help_text();
        let block = Block::default().borders(Borders::ALL).title(" Help ");
        let paragraph = Paragraph::new(help_text)
            .block(block)
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, area);
    }

    fn build_help_text() -> Vec<Line<'static>> {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let mut lines = vec![
            Line::from(vec![Span::styled("gk-architect Help", bold)]),
            Line::from(""),
        ];

        for section in SECTIONS {
            lines.push(Line::from(vec![Span::styled(section.title, bold)]));

            for (key, desc) in section.items {
                lines.push(Line::from(format!("  {}  {}", key, desc)));
            }

            lines.push(Line::from(""));
        }

        lines.push(Line::from("Press ESC or q to close help"));
        lines
    }
}
