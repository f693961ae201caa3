use crate::generation::{Generations, OutputKind};
use crate::model::{flatten, EntityPath, MetaField, OutlineRow};
use crate::navigation::Navigator;
use crate::session::Session;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Editor,
    Preview,
    Code,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Editor, Tab::Preview, Tab::Code];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Editor => "Editor",
            Tab::Preview => "Preview",
            Tab::Code => "Code",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Editor => 0,
            Tab::Preview => 1,
            Tab::Code => 2,
        }
    }

    pub fn next(&self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }
}

/// Editable scalar of a point or group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityField {
    Name,
    X,
    Y,
    Z,
    Price,
}

impl EntityField {
    pub fn label(&self) -> &'static str {
        match self {
            EntityField::Name => "Name",
            EntityField::X => "X",
            EntityField::Y => "Y",
            EntityField::Z => "Z",
            EntityField::Price => "Price",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    Meta(MetaField),
    Entity { path: EntityPath, field: EntityField },
}

impl EditTarget {
    pub fn label(&self) -> &'static str {
        match self {
            EditTarget::Meta(field) => field.label(),
            EditTarget::Entity { field, .. } => field.label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    Editing {
        target: EditTarget,
        buffer: String,
        cursor_pos: usize,
    },
    Help,
}

pub struct AppState {
    pub running: bool,
    pub mode: AppMode,
    pub tab: Tab,
    pub session: Session,

    // Editor view
    pub selected_row: usize,

    // Preview view
    pub navigator: Navigator,
    pub preview_index: usize,

    // Code view
    pub generations: Generations,
    pub active_kind: OutputKind,
    pub code_scroll: u16,

    pub export_dir: PathBuf,

    // Message for status line
    pub message: Option<String>,

    // Internal copy of the last text sent to the clipboard
    pub clipboard: Option<String>,
}

impl AppState {
    pub fn new(session: Session, generations: Generations, export_dir: PathBuf) -> Self {
        Self {
            running: true,
            mode: AppMode::Normal,
            tab: Tab::Editor,
            session,
            selected_row: 0,
            navigator: Navigator::new(),
            preview_index: 0,
            generations,
            active_kind: OutputKind::Html,
            code_scroll: 0,
            export_dir,
            message: None,
            clipboard: None,
        }
    }

    pub fn rows(&self) -> Vec<OutlineRow> {
        flatten(self.session.config())
    }

    pub fn selected(&self) -> Option<OutlineRow> {
        self.rows().into_iter().nth(self.selected_row)
    }

    pub fn select_path(&mut self, path: &EntityPath) {
        if let Some(index) = self.rows().iter().position(|row| &row.path == path) {
            self.selected_row = index;
        }
    }

    /// Keeps the editor and preview cursors inside their lists after the
    /// document changes.
    pub fn clamp_cursors(&mut self) {
        let rows = self.rows().len();
        self.selected_row = self.selected_row.min(rows.saturating_sub(1));
        let items = self.navigator.visible(self.session.config()).len();
        self.preview_index = self.preview_index.min(items.saturating_sub(1));
    }

    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }
}
