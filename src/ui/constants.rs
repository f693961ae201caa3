// Constants for rendering
pub const CURSOR_INDICATOR: char = '▌';
pub const SELECTION_MARKER: &str = "› ";
pub const INDENT: &str = "  ";

// Preview dialog
pub const BUTTON_LABEL_WIDTH: usize = 22;
pub const BUTTON_COLUMNS: usize = 2;
pub const ELLIPSIS: char = '…';
pub const EMPTY_PAGE_TEXT: &str = "No options available.";

// Code view
pub const CODE_PLACEHOLDER: &str = "Select a file type to generate code...";
pub const CODE_PENDING: &str = "Generating...";
pub const CODE_PAGE_LINES: i32 = 20;
